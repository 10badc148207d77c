//! VoltScan CLI — squeeze-scanner commands.
//!
//! Commands:
//! - `scan` — run the polling scan loop until Ctrl-C (or a cycle limit)
//! - `analyze` — one pass over all symbols, print indicator state, exit
//! - `init-config` — write a default TOML config to get started

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use voltscan_scanner::config::{ExecutionMode, ScannerConfig};
use voltscan_scanner::execution::{ExecutionClient, LiveExecution, PaperExecution};
use voltscan_scanner::feed::{FeedBreaker, HttpTickFeed, SyntheticFeed, TickFeed};
use voltscan_scanner::notify::{DiscordNotifier, Notifier, NullNotifier};
use voltscan_scanner::scanner::Scanner;

#[derive(Parser)]
#[command(
    name = "voltscan",
    about = "VoltScan — volatility-squeeze breakout scanner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scan loop until interrupted.
    Scan {
        /// Path to a TOML config file.
        #[arg(long, default_value = "voltscan.toml")]
        config: PathBuf,

        /// Force paper execution regardless of the configured mode.
        #[arg(long, default_value_t = false)]
        paper: bool,

        /// Use the deterministic synthetic feed instead of the live endpoint.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Stop after this many passes (for smoke runs).
        #[arg(long)]
        max_cycles: Option<u64>,
    },
    /// Run a single pass and print per-symbol indicator state.
    Analyze {
        /// Path to a TOML config file.
        #[arg(long, default_value = "voltscan.toml")]
        config: PathBuf,

        /// Restrict the pass to a single symbol.
        #[arg(long)]
        symbol: Option<String>,

        /// Use the deterministic synthetic feed instead of the live endpoint.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Write a default config file.
    InitConfig {
        /// Destination path.
        #[arg(long, default_value = "voltscan.toml")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            paper,
            synthetic,
            max_cycles,
        } => run_scan(&config, paper, synthetic, max_cycles),
        Commands::Analyze {
            config,
            symbol,
            synthetic,
        } => run_analyze(&config, symbol, synthetic),
        Commands::InitConfig { path, force } => run_init_config(&path, force),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_scan(
    config_path: &Path,
    paper: bool,
    synthetic: bool,
    max_cycles: Option<u64>,
) -> Result<()> {
    let config = ScannerConfig::from_file(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let feed = build_feed(&config, synthetic)?;
    let execution = build_execution(&config, paper)?;
    let notifier = build_notifier(&config);

    let shutdown = Arc::new(AtomicBool::new(false));
    let handler_flag = shutdown.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::Relaxed);
    })
    .context("installing Ctrl-C handler")?;

    let mut scanner = Scanner::new(config, feed, execution, notifier);
    scanner.run(&shutdown, max_cycles);
    Ok(())
}

fn run_analyze(config_path: &Path, symbol: Option<String>, synthetic: bool) -> Result<()> {
    let mut config = ScannerConfig::from_file(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    if let Some(sym) = symbol {
        config.symbols = vec![sym];
    }

    let feed = build_feed(&config, synthetic)?;
    let mut scanner = Scanner::new(config, feed, None, Box::new(NullNotifier));
    scanner.pass(chrono::Utc::now());

    println!(
        "{:<10} {:<12} {:>10} {:>8} {:>8} {:>8} {:>12}",
        "Symbol", "Status", "Price", "Z", "ER", "RSI", "ATR"
    );
    println!("{}", "-".repeat(74));
    for view in scanner.views() {
        match view.snapshot {
            Some(s) => println!(
                "{:<10} {:<12} {:>10.2} {:>8.2} {:>8.2} {:>8.1} {:>12.4}",
                view.symbol,
                view.status.to_string(),
                s.price,
                s.volatility_z,
                s.efficiency_ratio,
                s.rsi,
                s.atr
            ),
            None => println!("{:<10} {:<12} (no data)", view.symbol, "-"),
        }
    }

    Ok(())
}

fn run_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists — pass --force to overwrite",
            path.display()
        );
    }
    std::fs::write(path, ScannerConfig::default_toml())
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn build_feed(config: &ScannerConfig, synthetic: bool) -> Result<Box<dyn TickFeed>> {
    if synthetic {
        return Ok(Box::new(SyntheticFeed::new(7)));
    }
    let breaker = Arc::new(FeedBreaker::default_feed());
    let feed = HttpTickFeed::new(&config.feed, breaker)?;
    Ok(Box::new(feed))
}

fn build_execution(
    config: &ScannerConfig,
    force_paper: bool,
) -> Result<Option<Box<dyn ExecutionClient>>> {
    let mode = if force_paper {
        ExecutionMode::Paper
    } else {
        config.execution.mode
    };

    match mode {
        ExecutionMode::Analysis => Ok(None),
        ExecutionMode::Paper => Ok(Some(Box::new(PaperExecution::new()))),
        ExecutionMode::Live => {
            let client = LiveExecution::new(&config.execution)?;
            Ok(Some(Box::new(client)))
        }
    }
}

fn build_notifier(config: &ScannerConfig) -> Box<dyn Notifier> {
    match &config.notify.webhook_url {
        Some(url) => Box::new(DiscordNotifier::new(url.clone())),
        None => Box::new(NullNotifier),
    }
}
