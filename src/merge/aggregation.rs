//! Summation of a point column

use crate::error::PipelineResult;
use crate::models::MergedDataset;
use crate::sources::{parse_optional_f64, Table};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PointTotal {
    pub total: f64,
    pub valid: usize,
    /// Cells that were empty, missing or not a finite number.
    pub invalid: usize,
}

impl PointTotal {
    pub fn rows(&self) -> usize {
        self.valid + self.invalid
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Sum coercible cells in iteration order. `None` is a missing cell.
    pub fn sum_points<'a, I>(cells: I) -> PointTotal
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut acc = PointTotal::default();
        for (row, cell) in cells.into_iter().enumerate() {
            match parse_optional_f64(cell) {
                Ok(value) => {
                    acc.total += value;
                    acc.valid += 1;
                }
                Err(e) => {
                    debug!(row = row + 1, error = %e, "Ignoring invalid point cell");
                    acc.invalid += 1;
                }
            }
        }
        if acc.invalid > 0 {
            warn!(
                invalid = acc.invalid,
                "Ignored {} non-numeric or empty point cell(s)",
                acc.invalid
            );
        }
        acc
    }

    pub fn sum_dataset(dataset: &MergedDataset) -> PointTotal {
        Self::sum_points(dataset.points().map(Some))
    }

    /// Sum `column` of a loaded table; the column itself must exist.
    pub fn sum_column(table: &Table, column: &str) -> PipelineResult<PointTotal> {
        let idx = table.require_columns(&[column])?[0];
        Ok(Self::sum_points(table.rows().map(|row| row.get(idx))))
    }
}
