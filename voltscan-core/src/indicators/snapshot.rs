//! Per-cycle indicator snapshot.

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::domain::PriceSeries;
use crate::indicators::{atr, efficiency_ratio, rsi, volatility_z};

/// Immutable indicator values computed once per cycle per instrument.
///
/// A pure function of the price series and the configured windows — feeding
/// the same series twice yields bit-identical snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Mean absolute bar-to-bar change over the trailing ATR window.
    pub atr: f64,
    /// Standardized deviation of current rolling volatility from its history.
    pub volatility_z: f64,
    /// Net displacement over path length; trend-quality in [0, 1].
    pub efficiency_ratio: f64,
    /// Momentum oscillator in [0, 100]; 50.0 when undefined.
    pub rsi: f64,
    /// Last price in the series.
    pub price: f64,
}

impl IndicatorSnapshot {
    /// Compute all indicators off the trailing edge of `series`.
    ///
    /// Returns `None` only for an empty series (no last price to anchor on);
    /// any non-empty series yields a snapshot, with too-short windows
    /// reporting their neutral values.
    pub fn compute(series: &PriceSeries, cfg: &StrategyConfig) -> Option<Self> {
        let price = series.last()?;
        let closes = series.closes();
        Some(Self {
            atr: atr(closes, cfg.atr_window),
            volatility_z: volatility_z(closes, cfg.vol_window, cfg.lookback),
            efficiency_ratio: efficiency_ratio(closes, cfg.er_length),
            rsi: rsi(closes, cfg.rsi_window),
            price,
        })
    }
}
