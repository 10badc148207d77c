//! VoltScan Core — domain types, indicator engine, signal evaluator, ghost-order lifecycle.
//!
//! This crate is the decision-making heart of the scanner:
//! - Domain types (price series, ghost orders, trade intents)
//! - Rolling indicator engine (ATR, volatility z-score, efficiency ratio, RSI)
//! - Squeeze + breakout signal evaluation
//! - Per-instrument lifecycle state machine (IDLE ⇄ ARMED)
//!
//! Everything here is pure: no I/O, no clock reads. Timestamps are passed in
//! by the caller, so the same inputs always produce the same outputs.

pub mod config;
pub mod domain;
pub mod indicators;
pub mod lifecycle;
pub mod signal;

pub use config::{StrategyConfig, StrategyConfigError};
pub use domain::{Direction, GhostOrder, PriceSeries, TradeIntent};
pub use indicators::IndicatorSnapshot;
pub use lifecycle::{CycleEvent, InstrumentController, InstrumentView};
pub use signal::{evaluate_breakout, is_squeeze, market_status, BreakoutVerdict, MarketStatus};
