//! Row types flowing between the pipeline stages and the run summaries.

pub mod records;
pub mod summary;

pub use records::{MergedDataset, PointRow, ScoredWallet, TradeRecord};
pub use summary::{
    format_thousands, MergeSummary, PoolSummary, ScoreSummary, SkippedSource, SumSummary,
};
