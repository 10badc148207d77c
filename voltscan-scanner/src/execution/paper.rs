//! Paper execution — simulated fills, no network.

use std::sync::atomic::{AtomicU64, Ordering};

use super::{ContractId, ExecError, ExecutionClient};
use voltscan_core::TradeIntent;

/// Always-succeeding execution client handing out monotonic contract ids.
#[derive(Debug, Default)]
pub struct PaperExecution {
    next_id: AtomicU64,
}

impl PaperExecution {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExecutionClient for PaperExecution {
    fn mode(&self) -> &str {
        "paper"
    }

    fn place_order(&self, intent: &TradeIntent) -> Result<ContractId, ExecError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(ContractId(format!("paper-{}-{n}", intent.symbol)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltscan_core::Direction;

    fn intent() -> TradeIntent {
        TradeIntent::new("R_75", Direction::Buy, 100.0, 2.0, 3.0, 9.0, 10.0)
    }

    #[test]
    fn always_succeeds_with_monotonic_ids() {
        let exec = PaperExecution::new();
        let a = exec.place_order(&intent()).unwrap();
        let b = exec.place_order(&intent()).unwrap();
        assert_eq!(a.0, "paper-R_75-1");
        assert_eq!(b.0, "paper-R_75-2");
    }

    #[test]
    fn mode_label() {
        assert_eq!(PaperExecution::new().mode(), "paper");
    }
}
