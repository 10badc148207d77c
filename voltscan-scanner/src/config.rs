//! Scanner configuration — the TOML surface for a whole run.
//!
//! Everything the observed system kept as named constants is exposed here:
//! symbols, cadence, feed endpoint, execution mode and sizing, notification
//! webhook, journal path, and the strategy thresholds.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use voltscan_core::{StrategyConfig, StrategyConfigError};

/// Errors raised while loading or validating a scanner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no symbols configured")]
    NoSymbols,

    #[error("scan_interval_secs must be >= 1")]
    ZeroInterval,

    #[error("history_count ({got}) is below the strategy's minimum history ({needed})")]
    HistoryTooShort { got: usize, needed: usize },

    #[error("live execution requires an api_token")]
    MissingCredential,

    #[error("stake must be positive in paper/live mode (got {0})")]
    NonPositiveStake(f64),

    #[error(transparent)]
    Strategy(#[from] StrategyConfigError),
}

/// How confirmed breakouts are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// No execution at all: signals are journaled and notified only. This is
    /// also the degraded mode when no credential is configured.
    #[default]
    Analysis,
    /// Simulated fills, no network calls.
    Paper,
    /// Real orders against the venue; requires `api_token`.
    Live,
}

/// Feed collaborator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the tick-history endpoint.
    pub endpoint: String,
    /// Application identifier sent with every request.
    pub app_id: u32,
    /// Per-request timeout. A hanging fetch for one symbol must not stall
    /// the whole pass indefinitely.
    pub timeout_secs: u64,
    /// Retries per fetch before the cycle is skipped.
    pub max_retries: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.deriv.example/ticks_history".into(),
            app_id: 1089,
            timeout_secs: 10,
            max_retries: 2,
        }
    }
}

/// Execution collaborator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub mode: ExecutionMode,
    /// Fixed stake per order, account currency.
    pub stake: f64,
    pub leverage: u32,
    /// Venue endpoint for live mode.
    pub endpoint: String,
    /// Venue credential; required for live mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Analysis,
            stake: 10.0,
            leverage: 100,
            endpoint: "https://api.deriv.example/trade".into(),
            api_token: None,
            timeout_secs: 10,
        }
    }
}

/// Notification collaborator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Discord webhook URL; absent means notifications are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Minimum seconds between notifications per symbol, so repeated armings
    /// cannot spam the webhook.
    pub cooldown_secs: i64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            cooldown_secs: 300,
        }
    }
}

/// Complete scanner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Instruments to track, e.g. ["R_75", "R_100"].
    pub symbols: Vec<String>,
    /// Sleep between full passes over all symbols.
    pub scan_interval_secs: u64,
    /// Closes requested from the feed each cycle.
    pub history_count: usize,
    /// Sampling granularity requested from the feed, in seconds.
    pub granularity_secs: u32,
    /// Append-only signal journal.
    pub journal_path: PathBuf,
    pub strategy: StrategyConfig,
    pub feed: FeedConfig,
    pub execution: ExecutionConfig,
    pub notify: NotifyConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["R_75".into()],
            scan_interval_secs: 3,
            history_count: 3000,
            granularity_secs: 60,
            journal_path: PathBuf::from("scan_history.log"),
            strategy: StrategyConfig::default(),
            feed: FeedConfig::default(),
            execution: ExecutionConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl ScannerConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Startup-time validation. A live run without a credential is fatal
    /// here; analysis mode runs with no credential at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        if self.scan_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        self.strategy.validate()?;

        let needed = self.strategy.min_history();
        if self.history_count < needed {
            return Err(ConfigError::HistoryTooShort {
                got: self.history_count,
                needed,
            });
        }

        match self.execution.mode {
            ExecutionMode::Analysis => {}
            ExecutionMode::Paper | ExecutionMode::Live => {
                if !(self.execution.stake > 0.0) {
                    return Err(ConfigError::NonPositiveStake(self.execution.stake));
                }
                if self.execution.mode == ExecutionMode::Live
                    && self.execution.api_token.as_deref().unwrap_or("").is_empty()
                {
                    return Err(ConfigError::MissingCredential);
                }
            }
        }

        Ok(())
    }

    /// Render a commented default configuration, used by `init-config`.
    pub fn default_toml() -> String {
        let defaults = Self::default();
        let body = toml::to_string_pretty(&defaults).expect("default config serializes");
        format!(
            "# VoltScan configuration.\n\
             # execution.mode: \"analysis\" (no orders), \"paper\", or \"live\".\n\
             # Live mode additionally needs execution.api_token.\n\n{body}"
        )
    }
}
