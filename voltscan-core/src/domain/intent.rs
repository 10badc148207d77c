//! Trade intent — the ephemeral output of a confirmed breakout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a confirmed breakout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Signed unit: +1 for buy, -1 for sell. Used to orient SL/TP offsets.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

/// Directional order request handed to the execution collaborator the instant
/// a breakout is confirmed, then discarded. The lifecycle controller does not
/// track its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIntent {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Fixed stake amount (account currency) to risk on the order.
    pub stake: f64,
}

impl TradeIntent {
    /// Build an intent with SL/TP offset from entry by ATR multiples,
    /// oriented by direction: a buy stops below and targets above, a sell
    /// mirrors that.
    pub fn new(
        symbol: impl Into<String>,
        direction: Direction,
        entry_price: f64,
        atr: f64,
        sl_mult: f64,
        tp_mult: f64,
        stake: f64,
    ) -> Self {
        let sign = direction.sign();
        Self {
            symbol: symbol.into(),
            direction,
            entry_price,
            stop_loss: entry_price - sign * atr * sl_mult,
            take_profit: entry_price + sign * atr * tp_mult,
            stake,
        }
    }

    /// Reward-to-risk ratio implied by the SL/TP distances.
    pub fn reward_risk(&self) -> f64 {
        let risk = (self.entry_price - self.stop_loss).abs();
        let reward = (self.take_profit - self.entry_price).abs();
        if risk == 0.0 {
            0.0
        } else {
            reward / risk
        }
    }
}
