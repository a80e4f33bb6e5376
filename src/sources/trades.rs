use crate::config::ColumnMapping;
use crate::error::PipelineResult;
use crate::models::TradeRecord;
use crate::sources::parser::parse_optional_f64;
use crate::sources::table::Table;
use std::path::Path;
use tracing::{debug, info, warn};

/// Raw trade records from one export, with the data-quality drop counts.
#[derive(Debug, Clone, Default)]
pub struct TradeLoad {
    pub records: Vec<TradeRecord>,
    pub rows_read: usize,
    /// Rows whose volume or pnl cell could not be coerced to a finite number.
    pub dropped_non_numeric: usize,
    /// Rows with an empty wallet identifier.
    pub dropped_empty_wallet: usize,
}

impl TradeLoad {
    pub fn dropped(&self) -> usize {
        self.dropped_non_numeric + self.dropped_empty_wallet
    }
}

/// Load a raw trade export.
///
/// Missing columns are a schema error. Malformed rows are dropped and counted,
/// never fatal.
pub fn load_trades(path: &Path, columns: &ColumnMapping) -> PipelineResult<TradeLoad> {
    let table = Table::load(path)?;
    info!(path = %path.display(), rows = table.len(), "Loaded trade export");

    let indices = table.require_columns(&[
        columns.wallet.as_str(),
        columns.volume.as_str(),
        columns.pnl.as_str(),
    ])?;
    let (wallet_idx, volume_idx, pnl_idx) = (indices[0], indices[1], indices[2]);

    let mut load = TradeLoad {
        records: Vec::with_capacity(table.len()),
        rows_read: table.len(),
        ..TradeLoad::default()
    };

    for (row_number, row) in table.rows().enumerate() {
        let volume = parse_optional_f64(row.get(volume_idx));
        let pnl = parse_optional_f64(row.get(pnl_idx));
        let (volume, pnl) = match (volume, pnl) {
            (Ok(volume), Ok(pnl)) => (volume, pnl),
            (volume, pnl) => {
                debug!(
                    row = row_number + 1,
                    volume = ?volume.err(),
                    pnl = ?pnl.err(),
                    "Dropping row with non-numeric volume/pnl"
                );
                load.dropped_non_numeric += 1;
                continue;
            }
        };

        let wallet = row.get(wallet_idx).unwrap_or("");
        if wallet.trim().is_empty() {
            debug!(row = row_number + 1, "Dropping row with empty wallet");
            load.dropped_empty_wallet += 1;
            continue;
        }

        load.records.push(TradeRecord::new(wallet, volume, pnl));
    }

    if load.dropped_non_numeric > 0 {
        warn!(
            dropped = load.dropped_non_numeric,
            volume_column = %columns.volume,
            pnl_column = %columns.pnl,
            "Dropped {} row(s) with non-numeric or empty volume/pnl",
            load.dropped_non_numeric
        );
    }
    if load.dropped_empty_wallet > 0 {
        warn!(
            dropped = load.dropped_empty_wallet,
            wallet_column = %columns.wallet,
            "Dropped {} row(s) with an empty wallet",
            load.dropped_empty_wallet
        );
    }

    Ok(load)
}
