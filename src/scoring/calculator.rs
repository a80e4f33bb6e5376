//! Point formula

use crate::config::ScoringConfig;
use crate::models::{ScoredWallet, TradeRecord};

pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl ScoreCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// `(Wv * volume / Dv + Wp * |pnl| / Dp) * M + B`, evaluated left to right
    /// exactly as written. The sign of `pnl` never matters.
    pub fn point(&self, volume: f64, pnl: f64) -> f64 {
        let c = &self.config;
        (c.volume_weight * volume / c.volume_divisor + c.pnl_weight * pnl.abs() / c.pnl_divisor)
            * c.multiplier
            + c.bonus
    }

    pub fn score(&self, record: &TradeRecord) -> ScoredWallet {
        ScoredWallet {
            wallet: record.wallet.clone(),
            point: self.point(record.volume, record.pnl),
        }
    }

    pub fn score_all(&self, records: &[TradeRecord]) -> Vec<ScoredWallet> {
        records.iter().map(|r| self.score(r)).collect()
    }
}
