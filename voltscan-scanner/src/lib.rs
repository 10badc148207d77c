//! Service layer for the squeeze scanner: configuration, the tick feed
//! adapters, execution clients, notifications, the append-only journal, and
//! the scan loop that wires them to `voltscan-core`'s pure lifecycle logic.
//!
//! Everything here is blocking and synchronous. External collaborators are
//! trait objects so tests can script them.

pub mod config;
pub mod execution;
pub mod feed;
pub mod journal;
pub mod notify;
pub mod scanner;

pub use config::{ConfigError, ExecutionMode, ScannerConfig};
pub use execution::{ContractId, ExecError, ExecutionClient};
pub use feed::{FeedError, TickFeed};
pub use journal::Journal;
pub use notify::{Notifier, Severity};
pub use scanner::{ScanError, Scanner};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn collaborator_handles_are_thread_safe() {
        assert_send_sync::<Box<dyn TickFeed>>();
        assert_send_sync::<Box<dyn ExecutionClient>>();
        assert_send_sync::<Journal>();
    }
}
