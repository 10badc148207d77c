//! Live execution against the trading venue.
//!
//! Order placement is a three-step HTTP sequence: authorize the credential,
//! request a price proposal for the contract, then buy the proposal and
//! attach the take-profit limit. Each step fails with its own `ExecError`
//! variant so the journal can tell an expired token from a rejected order.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{ContractId, ExecError, ExecutionClient};
use crate::config::ExecutionConfig;
use voltscan_core::{Direction, TradeIntent};

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    authorize: Option<AuthorizeData>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct AuthorizeData {
    loginid: String,
}

#[derive(Debug, Deserialize)]
struct ProposalResponse {
    proposal: Option<ProposalData>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ProposalData {
    id: String,
    ask_price: f64,
}

#[derive(Debug, Deserialize)]
struct BuyResponse {
    buy: Option<BuyData>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct BuyData {
    contract_id: u64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    message: String,
}

impl ApiError {
    fn describe(&self) -> String {
        format!("{}: {}", self.code, self.message)
    }
}

pub struct LiveExecution {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_token: String,
    leverage: u32,
}

impl LiveExecution {
    /// Build a live client. The credential's presence was validated at
    /// startup; an invalid one surfaces as `ExecError::Auth` on first use.
    pub fn new(config: &ExecutionConfig) -> Result<Self, ExecError> {
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| ExecError::Auth("no api_token configured".into()))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExecError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token,
            leverage: config.leverage,
        })
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::blocking::Response, ExecError> {
        self.client
            .post(format!("{}/{path}", self.endpoint))
            .json(&body)
            .send()
            .map_err(|e| ExecError::Transport(e.to_string()))
    }

    fn authorize(&self) -> Result<String, ExecError> {
        let resp: AuthorizeResponse = self
            .post("authorize", json!({ "authorize": self.api_token }))?
            .json()
            .map_err(|e| ExecError::Transport(format!("decode authorize: {e}")))?;

        if let Some(err) = resp.error {
            return Err(ExecError::Auth(err.describe()));
        }
        resp.authorize
            .map(|a| a.loginid)
            .ok_or_else(|| ExecError::Auth("empty authorize response".into()))
    }

    fn propose(&self, intent: &TradeIntent) -> Result<ProposalData, ExecError> {
        let contract_type = match intent.direction {
            Direction::Buy => "MULTUP",
            Direction::Sell => "MULTDOWN",
        };
        let body = json!({
            "proposal": 1,
            "symbol": intent.symbol,
            "contract_type": contract_type,
            "amount": intent.stake,
            "basis": "stake",
            "currency": "USD",
            "multiplier": self.leverage,
            "limit_order": {
                "stop_loss": (intent.entry_price - intent.stop_loss).abs(),
                "take_profit": (intent.take_profit - intent.entry_price).abs(),
            },
        });

        let resp: ProposalResponse = self
            .post("proposal", body)?
            .json()
            .map_err(|e| ExecError::Transport(format!("decode proposal: {e}")))?;

        if let Some(err) = resp.error {
            return Err(ExecError::Proposal(err.describe()));
        }
        resp.proposal
            .ok_or_else(|| ExecError::Proposal("empty proposal response".into()))
    }

    fn buy(&self, proposal: &ProposalData) -> Result<ContractId, ExecError> {
        let body = json!({
            "buy": proposal.id,
            "price": proposal.ask_price,
        });

        let resp: BuyResponse = self
            .post("buy", body)?
            .json()
            .map_err(|e| ExecError::Transport(format!("decode buy: {e}")))?;

        if let Some(err) = resp.error {
            return Err(ExecError::Rejected(err.describe()));
        }
        resp.buy
            .map(|b| ContractId(b.contract_id.to_string()))
            .ok_or_else(|| ExecError::Rejected("empty buy response".into()))
    }
}

impl ExecutionClient for LiveExecution {
    fn mode(&self) -> &str {
        "live"
    }

    fn place_order(&self, intent: &TradeIntent) -> Result<ContractId, ExecError> {
        let loginid = self.authorize()?;
        tracing::debug!(%loginid, symbol = %intent.symbol, "authorized for order placement");
        let proposal = self.propose(intent)?;
        self.buy(&proposal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionMode;

    #[test]
    fn missing_token_is_auth_error() {
        let config = ExecutionConfig {
            mode: ExecutionMode::Live,
            api_token: None,
            ..Default::default()
        };
        assert!(matches!(LiveExecution::new(&config), Err(ExecError::Auth(_))));
    }

    #[test]
    fn api_error_shapes_decode() {
        let raw = r#"{"error":{"code":"InvalidToken","message":"token expired"}}"#;
        let resp: AuthorizeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.error.unwrap().describe(), "InvalidToken: token expired");
        assert!(resp.authorize.is_none());
    }

    #[test]
    fn proposal_shape_decodes() {
        let raw = r#"{"proposal":{"id":"abc-123","ask_price":10.2}}"#;
        let resp: ProposalResponse = serde_json::from_str(raw).unwrap();
        let p = resp.proposal.unwrap();
        assert_eq!(p.id, "abc-123");
        assert_eq!(p.ask_price, 10.2);
    }

    #[test]
    fn buy_shape_decodes() {
        let raw = r#"{"buy":{"contract_id":987654}}"#;
        let resp: BuyResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.buy.unwrap().contract_id, 987654);
    }
}
