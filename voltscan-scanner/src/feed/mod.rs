//! Feed collaborator — tick-history providers and structured errors.
//!
//! The `TickFeed` trait abstracts over the market-data source (live HTTP
//! endpoint, synthetic generator, scripted test feed). Failures are typed so
//! the scan loop can log the difference between a timeout, an empty payload,
//! and a tripped breaker — but every failure means the same thing to the
//! core: skip this cycle for this symbol.

pub mod breaker;
pub mod http;
pub mod synthetic;

pub use breaker::FeedBreaker;
pub use http::HttpTickFeed;
pub use synthetic::SyntheticFeed;

use thiserror::Error;
use voltscan_core::PriceSeries;

/// Errors from a tick-history fetch. None of these cross into voltscan-core.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("rate limited by feed (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("malformed feed response: {0}")]
    MalformedResponse(String),

    #[error("unknown symbol: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("feed circuit breaker is open")]
    BreakerOpen,
}

/// Trait for tick-history providers.
///
/// Implementations return closes ordered most-recent last. They fail soft at
/// the transport level (typed errors, bounded by their own timeouts) and
/// never panic into the caller.
pub trait TickFeed: Send + Sync {
    /// Human-readable name of this feed.
    fn name(&self) -> &str;

    /// Fetch up to `count` closing prices for `symbol` at the given sampling
    /// granularity, most-recent last.
    fn fetch_closes(
        &self,
        symbol: &str,
        count: usize,
        granularity_secs: u32,
    ) -> Result<PriceSeries, FeedError>;

    /// Whether the feed is currently worth asking (breaker not open).
    fn is_available(&self) -> bool {
        true
    }
}
