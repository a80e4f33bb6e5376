//! Volume threshold filter

use crate::models::TradeRecord;

/// Keeps records whose volume strictly exceeds the threshold.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdFilter {
    threshold: f64,
}

impl ThresholdFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn passes(&self, record: &TradeRecord) -> bool {
        record.volume > self.threshold
    }

    /// Retained records in their original order.
    pub fn apply(&self, records: Vec<TradeRecord>) -> Vec<TradeRecord> {
        records.into_iter().filter(|r| self.passes(r)).collect()
    }
}
