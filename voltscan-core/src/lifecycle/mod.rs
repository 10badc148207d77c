//! Per-instrument lifecycle controller.
//!
//! The only component carrying state across cycles. Each instrument owns one
//! controller holding zero-or-one ghost order; controllers are fully
//! independent — no shared budget, no cross-instrument coordination.
//!
//! State machine per cycle:
//!
//! ```text
//! IDLE  --squeeze-------------------> ARMED   (ghost created, levels ±0.5 ATR)
//! ARMED --age > expiry--------------> IDLE    (checked BEFORE breakout: a
//!                                              stale order never executes)
//! ARMED --confirmed breakout--------> IDLE    (TradeIntent emitted; cleared
//!                                              regardless of dispatch outcome)
//! ARMED --fakeout-------------------> ARMED   (ghost untouched)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::domain::{Direction, GhostOrder, TradeIntent};
use crate::indicators::IndicatorSnapshot;
use crate::signal::{evaluate_breakout, is_squeeze, market_status, MarketStatus};

/// What happened to one instrument in one polling cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CycleEvent {
    /// A squeeze fired and a ghost order was armed.
    Armed { ghost: GhostOrder },
    /// The armed order outlived its expiry window with no breakout.
    Expired { ghost: GhostOrder },
    /// A breakout was confirmed; the intent goes to the execution collaborator.
    Execute { intent: TradeIntent },
    /// Level crossed without momentum; diagnostic only, order stays armed.
    Fakeout { direction: Direction },
    /// Nothing actionable; `status` is for display.
    Idle { status: MarketStatus },
}

/// Read-only view of an instrument's controller, polled by display layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentView {
    pub symbol: String,
    pub status: MarketStatus,
    pub snapshot: Option<IndicatorSnapshot>,
    pub ghost: Option<GhostOrder>,
}

/// Stateful breakout-lifecycle controller for a single instrument.
#[derive(Debug, Clone)]
pub struct InstrumentController {
    symbol: String,
    config: StrategyConfig,
    /// Stake attached to emitted trade intents.
    stake: f64,
    ghost: Option<GhostOrder>,
    last_snapshot: Option<IndicatorSnapshot>,
}

impl InstrumentController {
    pub fn new(symbol: impl Into<String>, config: StrategyConfig, stake: f64) -> Self {
        Self {
            symbol: symbol.into(),
            config,
            stake,
            ghost: None,
            last_snapshot: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// True while a ghost order is armed.
    pub fn is_armed(&self) -> bool {
        self.ghost.is_some()
    }

    /// Advance the state machine by one cycle.
    ///
    /// `now` is passed in rather than read from a clock so the controller
    /// stays deterministic and testable.
    pub fn on_cycle(&mut self, snapshot: IndicatorSnapshot, now: DateTime<Utc>) -> CycleEvent {
        self.last_snapshot = Some(snapshot);

        if let Some(ghost) = self.ghost {
            // Expiry wins over a simultaneous breakout.
            if ghost.is_expired(now, self.config.ghost_expiry_secs) {
                self.ghost = None;
                return CycleEvent::Expired { ghost };
            }

            let verdict = evaluate_breakout(&snapshot, &ghost, &self.config);
            if let Some(direction) = verdict.confirmed_direction() {
                self.ghost = None;
                let entry = match direction {
                    Direction::Buy => ghost.buy_level,
                    Direction::Sell => ghost.sell_level,
                };
                let intent = TradeIntent::new(
                    self.symbol.clone(),
                    direction,
                    entry,
                    ghost.atr_at_arming,
                    self.config.sl_mult,
                    self.config.tp_mult,
                    self.stake,
                );
                return CycleEvent::Execute { intent };
            }
            if let Some(direction) = verdict.fakeout_direction() {
                return CycleEvent::Fakeout { direction };
            }
            // Already armed: a renewed squeeze must not re-arm or move levels.
            return CycleEvent::Idle {
                status: MarketStatus::Armed,
            };
        }

        if is_squeeze(&snapshot, &self.config) {
            let ghost = GhostOrder::arm(snapshot.price, snapshot.atr, now);
            self.ghost = Some(ghost);
            return CycleEvent::Armed { ghost };
        }

        CycleEvent::Idle {
            status: market_status(&snapshot, &self.config),
        }
    }

    /// Current state for the display/query surface.
    pub fn view(&self) -> InstrumentView {
        let status = if self.ghost.is_some() {
            MarketStatus::Armed
        } else {
            self.last_snapshot
                .map(|s| market_status(&s, &self.config))
                .unwrap_or(MarketStatus::Scanning)
        };
        InstrumentView {
            symbol: self.symbol.clone(),
            status,
            snapshot: self.last_snapshot,
            ghost: self.ghost,
        }
    }
}
