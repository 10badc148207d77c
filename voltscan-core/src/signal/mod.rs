//! Signal evaluation — squeeze detection and breakout confirmation.
//!
//! Both evaluators are pure functions of a snapshot plus configuration.
//! The squeeze is a strict conjunction: abnormally low volatility AND a
//! clean directional path. Breakout confirmation layers a momentum filter
//! on top of the level cross — crossing a level with weak RSI is a fakeout
//! and produces no action.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::StrategyConfig;
use crate::domain::{Direction, GhostOrder};
use crate::indicators::IndicatorSnapshot;

/// True iff the market is squeezed: volatility z below trigger AND efficiency
/// ratio above the trend filter. Neither condition alone is sufficient.
pub fn is_squeeze(snapshot: &IndicatorSnapshot, cfg: &StrategyConfig) -> bool {
    snapshot.volatility_z < cfg.z_trigger && snapshot.efficiency_ratio > cfg.er_filter
}

/// Outcome of checking the current price against an armed ghost order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakoutVerdict {
    /// Price inside the ghost-order channel; nothing to do.
    None,
    /// Price at/above the buy level with RSI agreeing.
    BuyConfirmed,
    /// Price at/below the sell level with RSI agreeing.
    SellConfirmed,
    /// Buy level crossed but momentum too weak; the order stays armed.
    BuyFakeout,
    /// Sell level crossed but momentum too strong; the order stays armed.
    SellFakeout,
}

impl BreakoutVerdict {
    /// Direction of a confirmed breakout, if this verdict is one.
    pub fn confirmed_direction(&self) -> Option<Direction> {
        match self {
            BreakoutVerdict::BuyConfirmed => Some(Direction::Buy),
            BreakoutVerdict::SellConfirmed => Some(Direction::Sell),
            _ => None,
        }
    }

    /// Direction of a rejected (fakeout) breakout, if this verdict is one.
    pub fn fakeout_direction(&self) -> Option<Direction> {
        match self {
            BreakoutVerdict::BuyFakeout => Some(Direction::Buy),
            BreakoutVerdict::SellFakeout => Some(Direction::Sell),
            _ => None,
        }
    }
}

/// Check the snapshot against an armed ghost order's levels.
///
/// The buy side is evaluated before the sell side, so a single wide bar
/// crossing both levels resolves as a buy-side check. Level crossing is
/// necessary but not sufficient: momentum must agree with the direction
/// (`rsi > rsi_buy_min` for buys, `rsi < rsi_sell_max` for sells).
pub fn evaluate_breakout(
    snapshot: &IndicatorSnapshot,
    ghost: &GhostOrder,
    cfg: &StrategyConfig,
) -> BreakoutVerdict {
    if snapshot.price >= ghost.buy_level {
        if snapshot.rsi > cfg.rsi_buy_min {
            BreakoutVerdict::BuyConfirmed
        } else {
            BreakoutVerdict::BuyFakeout
        }
    } else if snapshot.price <= ghost.sell_level {
        if snapshot.rsi < cfg.rsi_sell_max {
            BreakoutVerdict::SellConfirmed
        } else {
            BreakoutVerdict::SellFakeout
        }
    } else {
        BreakoutVerdict::None
    }
}

/// Display-facing classification of an instrument's current market state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    /// No condition met; watching.
    Scanning,
    /// Volatility is squeezed but the trend filter hasn't confirmed yet.
    PreSqueeze,
    /// Both squeeze conditions hold.
    Squeeze,
    /// A ghost order is armed and waiting for a breakout.
    Armed,
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketStatus::Scanning => write!(f, "SCANNING"),
            MarketStatus::PreSqueeze => write!(f, "PRE-SQUEEZE"),
            MarketStatus::Squeeze => write!(f, "SQUEEZE"),
            MarketStatus::Armed => write!(f, "ARMED"),
        }
    }
}

/// Classify a snapshot for display. `Armed` is decided by the lifecycle
/// controller, not here; this covers the stateless cases.
pub fn market_status(snapshot: &IndicatorSnapshot, cfg: &StrategyConfig) -> MarketStatus {
    if is_squeeze(snapshot, cfg) {
        MarketStatus::Squeeze
    } else if snapshot.volatility_z < cfg.z_trigger {
        MarketStatus::PreSqueeze
    } else {
        MarketStatus::Scanning
    }
}
