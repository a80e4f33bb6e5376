//! Totals over the eligible population.
//!
//! Run over the filtered records of a campaign, these are the numbers that
//! end up as the volume and pnl divisors of the point formula.

use crate::models::TradeRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PoolTotals {
    pub records: usize,
    pub total_volume: f64,
    pub total_abs_pnl: f64,
}

/// Left fold in row order so repeated runs give identical sums.
pub fn pool_totals(records: &[TradeRecord]) -> PoolTotals {
    records
        .iter()
        .fold(PoolTotals::default(), |mut totals, record| {
            totals.records += 1;
            totals.total_volume += record.volume;
            totals.total_abs_pnl += record.pnl.abs();
            totals
        })
}
