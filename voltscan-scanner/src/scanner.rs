//! The scan loop — one pass per cadence tick over every tracked instrument.
//!
//! Single-threaded and poll-driven: fetch closes, compute the snapshot, step
//! the instrument's lifecycle controller, dispatch the resulting event to the
//! journal / notifier / execution collaborators. Controllers live in an
//! explicit per-symbol map owned here; no ambient state anywhere. One
//! instrument's failure is logged and never disturbs the others.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::execution::ExecutionClient;
use crate::feed::{FeedError, TickFeed};
use crate::journal::Journal;
use crate::notify::{Notifier, Severity};
use voltscan_core::{CycleEvent, IndicatorSnapshot, InstrumentController, InstrumentView};

/// Why one symbol's cycle was skipped. Never aborts the pass.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("feed returned an empty series for {symbol}")]
    EmptySeries { symbol: String },
}

pub struct Scanner {
    config: ScannerConfig,
    controllers: BTreeMap<String, InstrumentController>,
    feed: Box<dyn TickFeed>,
    /// `None` in analysis mode: intents are journaled and notified only.
    execution: Option<Box<dyn ExecutionClient>>,
    notifier: Box<dyn Notifier>,
    journal: Journal,
    /// Per-symbol arming-alert throttle.
    last_armed_alert: BTreeMap<String, DateTime<Utc>>,
}

impl Scanner {
    pub fn new(
        config: ScannerConfig,
        feed: Box<dyn TickFeed>,
        execution: Option<Box<dyn ExecutionClient>>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let controllers = config
            .symbols
            .iter()
            .map(|s| {
                (
                    s.clone(),
                    InstrumentController::new(
                        s.clone(),
                        config.strategy.clone(),
                        config.execution.stake,
                    ),
                )
            })
            .collect();
        let journal = Journal::new(config.journal_path.clone());

        Self {
            config,
            controllers,
            feed,
            execution,
            notifier,
            journal,
            last_armed_alert: BTreeMap::new(),
        }
    }

    /// Run until the shutdown flag is raised (or `max_cycles` passes have
    /// completed). The flag is checked between passes and during the sleep;
    /// an in-flight fetch finishes on its own timeout.
    pub fn run(&mut self, shutdown: &AtomicBool, max_cycles: Option<u64>) {
        info!(
            symbols = self.config.symbols.len(),
            interval_secs = self.config.scan_interval_secs,
            mode = self.execution.as_ref().map_or("analysis", |e| e.mode()),
            "scanner started"
        );
        self.journal.append("SCANNER STARTED");

        let mut cycles = 0u64;
        while !shutdown.load(Ordering::Relaxed) {
            self.pass(Utc::now());

            cycles += 1;
            if let Some(max) = max_cycles {
                if cycles >= max {
                    break;
                }
            }

            // Sleep in short slices so shutdown stays responsive.
            let deadline = std::time::Instant::now()
                + Duration::from_secs(self.config.scan_interval_secs);
            while std::time::Instant::now() < deadline {
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(100));
            }
        }

        self.journal.append("SCANNER STOPPED");
        info!(cycles, "scanner stopped");
    }

    /// One pass over all symbols at the given wall-clock instant.
    /// Returns the per-symbol outcomes (used directly by tests and the
    /// one-shot `analyze` command).
    pub fn pass(&mut self, now: DateTime<Utc>) -> Vec<(String, CycleEvent)> {
        let symbols: Vec<String> = self.controllers.keys().cloned().collect();
        let mut outcomes = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let snapshot = match self.snapshot_for(&symbol) {
                Ok(s) => s,
                Err(e) => {
                    // Skip this cycle for this symbol; the pass continues.
                    warn!(symbol = %symbol, error = %e, "cycle skipped");
                    continue;
                }
            };

            let Some(controller) = self.controllers.get_mut(&symbol) else {
                continue;
            };
            let event = controller.on_cycle(snapshot, now);
            self.dispatch(&symbol, &event, now);
            outcomes.push((symbol, event));
        }

        outcomes
    }

    fn snapshot_for(&self, symbol: &str) -> Result<IndicatorSnapshot, ScanError> {
        let series = self.feed.fetch_closes(
            symbol,
            self.config.history_count,
            self.config.granularity_secs,
        )?;

        IndicatorSnapshot::compute(&series, &self.config.strategy).ok_or_else(|| {
            ScanError::EmptySeries {
                symbol: symbol.to_string(),
            }
        })
    }

    fn dispatch(&mut self, symbol: &str, event: &CycleEvent, now: DateTime<Utc>) {
        match event {
            CycleEvent::Armed { ghost } => {
                info!(
                    symbol,
                    buy_level = ghost.buy_level,
                    sell_level = ghost.sell_level,
                    atr = ghost.atr_at_arming,
                    "ghost order armed"
                );
                self.journal.append(&format!(
                    "ARMED | {symbol} | buy {:.2} | sell {:.2} | atr {:.4}",
                    ghost.buy_level, ghost.sell_level, ghost.atr_at_arming
                ));

                let throttled = self
                    .last_armed_alert
                    .get(symbol)
                    .is_some_and(|last| {
                        now - *last < ChronoDuration::seconds(self.config.notify.cooldown_secs)
                    });
                if !throttled {
                    self.notifier.notify_armed(
                        symbol,
                        ghost,
                        self.config.strategy.sl_mult,
                        self.config.strategy.tp_mult,
                    );
                    self.last_armed_alert.insert(symbol.to_string(), now);
                }
            }

            CycleEvent::Expired { ghost } => {
                info!(symbol, armed_at = %ghost.armed_at, "ghost order expired");
                self.journal
                    .append(&format!("EXPIRED | {symbol} | armed at {}", ghost.armed_at));
            }

            CycleEvent::Execute { intent } => {
                self.journal.append(&format!(
                    "SIGNAL FIRED | {symbol} | {} @ {:.2} | SL {:.2} | TP {:.2}",
                    intent.direction, intent.entry_price, intent.stop_loss, intent.take_profit
                ));

                match &self.execution {
                    Some(exec) => match exec.place_order(intent) {
                        Ok(contract_id) => {
                            info!(symbol, %contract_id, mode = exec.mode(), "order placed");
                            self.journal.append(&format!(
                                "PLACED | {symbol} | contract {contract_id} | {} mode",
                                exec.mode()
                            ));
                            self.notifier.notify_executed(
                                intent,
                                &format!("placed ({} mode), contract {contract_id}", exec.mode()),
                            );
                        }
                        Err(e) => {
                            // Reported, never retried; the ghost is already
                            // cleared so the same squeeze cannot re-fire.
                            warn!(symbol, error = %e, "order placement failed");
                            self.journal
                                .append(&format!("EXECUTION FAILED | {symbol} | {e}"));
                            self.notifier.notify(
                                &format!("Execution failed: {symbol}"),
                                &e.to_string(),
                                Severity::Error,
                            );
                        }
                    },
                    None => {
                        info!(symbol, direction = %intent.direction, "signal (analysis mode)");
                        self.notifier
                            .notify_executed(intent, "analysis mode — not dispatched");
                    }
                }
            }

            CycleEvent::Fakeout { direction } => {
                debug!(symbol, %direction, "breakout without momentum, staying armed");
            }

            CycleEvent::Idle { status } => {
                debug!(symbol, %status, "no trigger");
            }
        }
    }

    /// Current state of every instrument, for display layers.
    pub fn views(&self) -> Vec<InstrumentView> {
        self.controllers.values().map(|c| c.view()).collect()
    }
}
