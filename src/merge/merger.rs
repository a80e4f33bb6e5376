//! Best-effort concatenation of per-source score files

use crate::error::{PipelineError, PipelineResult};
use crate::models::{MergedDataset, PointRow, SkippedSource};
use crate::sources::Table;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const WALLET_COLUMN: &str = "wallet_address";
pub const POINT_COLUMN: &str = "point";

/// Result of merging a set of candidate files. Skipped files contribute no
/// rows and exactly one entry in `skipped`.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub dataset: MergedDataset,
    /// Files that passed validation, with the number of rows each contributed.
    pub merged: Vec<(PathBuf, usize)>,
    pub skipped: Vec<SkippedSource>,
}

/// Merges score files whose wallet and point columns carry the configured
/// names; output rows always use the canonical `wallet_address`/`point`.
#[derive(Debug, Clone)]
pub struct Merger {
    wallet_column: String,
    point_column: String,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(WALLET_COLUMN, POINT_COLUMN)
    }
}

impl Merger {
    pub fn new(wallet_column: impl Into<String>, point_column: impl Into<String>) -> Self {
        Self {
            wallet_column: wallet_column.into(),
            point_column: point_column.into(),
        }
    }

    /// Candidate files in `dir` with the given extension, sorted by path so the
    /// merge order is the same on every run.
    ///
    /// `exclude` keeps a previous merge output living in the same directory
    /// from being merged into itself.
    pub fn discover(
        dir: &Path,
        extension: &str,
        exclude: Option<&Path>,
    ) -> PipelineResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(PipelineError::DirectoryNotFound(dir.to_path_buf()));
        }
        let extension = extension.trim_start_matches('.');
        let excluded = exclude.and_then(|p| fs::canonicalize(p).ok());

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))? {
            let path = entry.map_err(|e| PipelineError::io(dir, e))?.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
            if !matches {
                continue;
            }
            if excluded.is_some() && fs::canonicalize(&path).ok() == excluded {
                continue;
            }
            files.push(path);
        }
        files.sort();

        if files.is_empty() {
            return Err(PipelineError::NoSourceFiles {
                dir: dir.to_path_buf(),
                extension: extension.to_string(),
            });
        }
        Ok(files)
    }

    /// Merge `files` in the given order. A file that cannot be read or lacks
    /// the required columns is logged and skipped.
    pub fn merge(&self, files: &[PathBuf]) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for path in files {
            match self.load_source(path) {
                Ok(rows) => {
                    info!(path = %path.display(), rows = rows.len(), "Merged source");
                    outcome.merged.push((path.clone(), rows.len()));
                    outcome.dataset.append(rows);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping source");
                    outcome.skipped.push(SkippedSource {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        outcome
    }

    /// Load one score file projected to `{wallet_address, point}`.
    pub fn load_source(&self, path: &Path) -> PipelineResult<Vec<PointRow>> {
        let table = Table::load(path)?;
        let indices =
            table.require_columns(&[self.wallet_column.as_str(), self.point_column.as_str()])?;
        let (wallet_idx, point_idx) = (indices[0], indices[1]);

        Ok(table
            .rows()
            .map(|row| {
                PointRow::new(
                    row.get(wallet_idx).unwrap_or(""),
                    row.get(point_idx).unwrap_or(""),
                )
            })
            .collect())
    }
}
