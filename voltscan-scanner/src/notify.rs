//! Notification collaborator — fire-and-forget alerts.
//!
//! Notifications never block the controller and never propagate failure: a
//! dead webhook downgrades to a warn log and the scan continues.

use serde_json::json;
use std::time::Duration;

use voltscan_core::{GhostOrder, TradeIntent};

/// Alert severity, mapped to embed colors on the Discord side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Signal,
    Error,
}

impl Severity {
    fn color(&self) -> u32 {
        match self {
            Severity::Info => 0x808080,
            Severity::Signal => 0xFF0000,
            Severity::Error => 0xFFA500,
        }
    }
}

/// Trait for notification sinks. `notify` is best-effort by contract.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str, severity: Severity);

    /// Rich variant for arming alerts: both breakout brackets in one message.
    fn notify_armed(&self, symbol: &str, ghost: &GhostOrder, sl_mult: f64, tp_mult: f64) {
        let atr = ghost.atr_at_arming;
        let body = format!(
            "Buy stop {:.2} (SL {:.2} / TP {:.2})\nSell stop {:.2} (SL {:.2} / TP {:.2})",
            ghost.buy_level,
            ghost.buy_level - atr * sl_mult,
            ghost.buy_level + atr * tp_mult,
            ghost.sell_level,
            ghost.sell_level + atr * sl_mult,
            ghost.sell_level - atr * tp_mult,
        );
        self.notify(&format!("Squeeze armed: {symbol}"), &body, Severity::Signal);
    }

    /// Rich variant for confirmed breakouts.
    fn notify_executed(&self, intent: &TradeIntent, outcome: &str) {
        let body = format!(
            "{} @ {:.2} | SL {:.2} | TP {:.2} | stake {:.2}\n{outcome}",
            intent.direction, intent.entry_price, intent.stop_loss, intent.take_profit,
            intent.stake,
        );
        self.notify(
            &format!("Breakout: {} {}", intent.symbol, intent.direction),
            &body,
            Severity::Signal,
        );
    }
}

/// Discard-everything notifier for analysis mode and tests.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str, _severity: Severity) {}
}

/// Discord webhook notifier.
pub struct DiscordNotifier {
    client: reqwest::blocking::Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            // Builder fails only on TLS backend misconfiguration.
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

impl Notifier for DiscordNotifier {
    fn notify(&self, title: &str, body: &str, severity: Severity) {
        let payload = json!({
            "embeds": [{
                "title": title,
                "description": body,
                "color": severity.color(),
            }]
        });

        match self.client.post(&self.webhook_url).json(&payload).send() {
            Ok(resp) if !resp.status().is_success() => {
                tracing::warn!(status = %resp.status(), "webhook returned non-success");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "webhook delivery failed");
            }
        }
    }
}
