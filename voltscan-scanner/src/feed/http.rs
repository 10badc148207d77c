//! HTTP tick-history feed.
//!
//! Fetches closing prices from a tick-history endpoint returning the feed's
//! wire shape: `{"history": {"prices": [...], "times": [...]}}`, prices
//! ordered most-recent last. Handles retries with exponential backoff and
//! the feed circuit breaker; every request is bounded by the client timeout
//! so one symbol's hang cannot stall the pass forever.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::breaker::FeedBreaker;
use super::{FeedError, TickFeed};
use crate::config::FeedConfig;
use voltscan_core::PriceSeries;

/// Tick-history endpoint response.
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    history: Option<HistoryData>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct HistoryData {
    prices: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    message: String,
}

pub struct HttpTickFeed {
    client: reqwest::blocking::Client,
    endpoint: String,
    app_id: u32,
    timeout_secs: u64,
    max_retries: u32,
    base_delay: Duration,
    breaker: Arc<FeedBreaker>,
}

impl HttpTickFeed {
    pub fn new(config: &FeedConfig, breaker: Arc<FeedBreaker>) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            app_id: config.app_id,
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(250),
            breaker,
        })
    }

    fn request_url(&self, symbol: &str, count: usize, granularity_secs: u32) -> String {
        format!(
            "{}?ticks_history={symbol}&count={count}&granularity={granularity_secs}\
             &end=latest&style=ticks&app_id={}",
            self.endpoint, self.app_id
        )
    }

    fn parse_response(symbol: &str, resp: HistoryResponse) -> Result<PriceSeries, FeedError> {
        if let Some(err) = resp.error {
            return if err.code == "InvalidSymbol" {
                Err(FeedError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
            } else {
                Err(FeedError::MalformedResponse(format!(
                    "{}: {}",
                    err.code, err.message
                )))
            };
        }

        let history = resp
            .history
            .ok_or_else(|| FeedError::MalformedResponse("no history in response".into()))?;

        // Empty price list is a soft failure: the loop skips the cycle.
        if history.prices.is_empty() {
            return Err(FeedError::MalformedResponse("empty price history".into()));
        }

        Ok(PriceSeries::new(history.prices))
    }

    fn fetch_with_retry(
        &self,
        symbol: &str,
        count: usize,
        granularity_secs: u32,
    ) -> Result<PriceSeries, FeedError> {
        if !self.breaker.is_allowed() {
            return Err(FeedError::BreakerOpen);
        }

        let url = self.request_url(symbol, count, granularity_secs);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
                if !self.breaker.is_allowed() {
                    return Err(FeedError::BreakerOpen);
                }
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(FeedError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        self.breaker.record_failure();
                        last_error =
                            Some(FeedError::Transport(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let parsed: HistoryResponse = resp.json().map_err(|e| {
                        FeedError::MalformedResponse(format!("decode response for {symbol}: {e}"))
                    })?;

                    let series = Self::parse_response(symbol, parsed)?;
                    self.breaker.record_success();
                    return Ok(series);
                }
                Err(e) => {
                    self.breaker.record_failure();
                    if e.is_timeout() {
                        last_error = Some(FeedError::Timeout(self.timeout_secs));
                        continue;
                    }
                    if e.is_connect() {
                        last_error = Some(FeedError::Transport(e.to_string()));
                        continue;
                    }
                    return Err(FeedError::Transport(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FeedError::Transport("max retries exceeded".into())))
    }
}

impl TickFeed for HttpTickFeed {
    fn name(&self) -> &str {
        "http_tick_history"
    }

    fn fetch_closes(
        &self,
        symbol: &str,
        count: usize,
        granularity_secs: u32,
    ) -> Result<PriceSeries, FeedError> {
        self.fetch_with_retry(symbol, count, granularity_secs)
    }

    fn is_available(&self) -> bool {
        self.breaker.is_allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_happy_path() {
        let resp = HistoryResponse {
            history: Some(HistoryData {
                prices: vec![100.0, 100.5, 101.0],
            }),
            error: None,
        };
        let series = HttpTickFeed::parse_response("R_75", resp).unwrap();
        assert_eq!(series.last(), Some(101.0));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn parse_api_error_unknown_symbol() {
        let resp = HistoryResponse {
            history: None,
            error: Some(ApiError {
                code: "InvalidSymbol".into(),
                message: "symbol X does not exist".into(),
            }),
        };
        let err = HttpTickFeed::parse_response("X", resp).unwrap_err();
        assert!(matches!(err, FeedError::SymbolNotFound { .. }));
    }

    #[test]
    fn parse_empty_history_is_soft_failure() {
        let resp = HistoryResponse {
            history: Some(HistoryData { prices: vec![] }),
            error: None,
        };
        let err = HttpTickFeed::parse_response("R_75", resp).unwrap_err();
        assert!(matches!(err, FeedError::MalformedResponse(_)));
    }

    #[test]
    fn parse_missing_history_is_malformed() {
        let resp = HistoryResponse {
            history: None,
            error: None,
        };
        let err = HttpTickFeed::parse_response("R_75", resp).unwrap_err();
        assert!(matches!(err, FeedError::MalformedResponse(_)));
    }

    #[test]
    fn url_carries_all_query_params() {
        let feed = HttpTickFeed::new(&FeedConfig::default(), Arc::new(FeedBreaker::default_feed()))
            .unwrap();
        let url = feed.request_url("R_75", 3000, 60);
        assert!(url.contains("ticks_history=R_75"));
        assert!(url.contains("count=3000"));
        assert!(url.contains("granularity=60"));
        assert!(url.contains("app_id=1089"));
    }
}
