use serde::{Deserialize, Serialize};

/// One row of a raw trade export after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub wallet: String,
    /// Total traded volume in USD.
    pub volume: f64,
    /// Net profit or loss in USD. Only the magnitude is scored.
    pub pnl: f64,
}

impl TradeRecord {
    pub fn new(wallet: impl Into<String>, volume: f64, pnl: f64) -> Self {
        Self {
            wallet: wallet.into(),
            volume,
            pnl,
        }
    }
}

/// A scored wallet as written to a per-source score file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWallet {
    #[serde(rename = "wallet_address")]
    pub wallet: String,
    pub point: f64,
}

/// A row re-read from a score file. The point cell keeps its original text so
/// merged output reproduces each source exactly; coercion is left to the
/// aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointRow {
    #[serde(rename = "wallet_address")]
    pub wallet: String,
    pub point: String,
}

impl PointRow {
    pub fn new(wallet: impl Into<String>, point: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
            point: point.into(),
        }
    }
}

/// Concatenation of score rows from one or more sources, in source order and
/// then row order. Wallets are never grouped: a wallet present in two sources
/// appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedDataset {
    rows: Vec<PointRow>,
}

impl MergedDataset {
    pub fn append(&mut self, rows: Vec<PointRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[PointRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.point.as_str())
    }
}

impl From<Vec<PointRow>> for MergedDataset {
    fn from(rows: Vec<PointRow>) -> Self {
        Self { rows }
    }
}
