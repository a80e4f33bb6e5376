//! Threshold filtering and point scoring.

pub mod calculator;
pub mod filter;
pub mod pool;

pub use calculator::ScoreCalculator;
pub use filter::ThresholdFilter;
pub use pool::{pool_totals, PoolTotals};
