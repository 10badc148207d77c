//! Domain types for the squeeze scanner.

pub mod ghost;
pub mod intent;
pub mod series;

pub use ghost::GhostOrder;
pub use intent::{Direction, TradeIntent};
pub use series::PriceSeries;
