//! Wallet point scoring: threshold filtering, the weighted point formula,
//! multi-source merge and point aggregation over exported trading activity.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod merge;
pub mod models;
pub mod scoring;
pub mod sources;

pub use error::{CellError, PipelineError, PipelineResult};
