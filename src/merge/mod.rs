//! Multi-source merge and point aggregation.

pub mod aggregation;
pub mod merger;

pub use aggregation::{Aggregator, PointTotal};
pub use merger::{MergeOutcome, Merger, POINT_COLUMN, WALLET_COLUMN};
