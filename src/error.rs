//! Error taxonomy for the scoring pipeline.
//!
//! Components return these values and never exit the process themselves; the
//! runner decides which ones are fatal and which ones only skip a source.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("unsupported file format: {} (expected .csv, .tsv or .xlsx)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error(
        "{}: missing required column(s) {missing:?}; available columns: {available:?}",
        .path.display()
    )]
    Schema {
        path: PathBuf,
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("no .{extension} files found in {}", .dir.display())]
    NoSourceFiles { dir: PathBuf, extension: String },

    #[error("none of the {0} source file(s) yielded valid rows; nothing was written")]
    NoValidSources(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed workbook {}: {source}", .path.display())]
    WorkbookRead {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to write workbook {}: {source}", .path.display())]
    WorkbookWrite {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("failed to render summary: {0}")]
    Summary(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path.to_path_buf());
        }
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Process exit status for a fatal error. Each terminal condition gets its
    /// own code so wrapper scripts can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Io { .. }
            | Self::Csv { .. }
            | Self::WorkbookRead { .. }
            | Self::WorkbookWrite { .. }
            | Self::Summary(_) => 1,
            Self::NotFound(_) | Self::DirectoryNotFound(_) => 2,
            Self::UnsupportedFormat(_) => 3,
            Self::Schema { .. } => 4,
            Self::NoSourceFiles { .. } => 5,
            Self::NoValidSources(_) => 6,
            Self::InvalidConfig(_) => 7,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Why a single cell could not be used as a number. These never abort a run:
/// the row is dropped (or the cell skipped) and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("empty cell")]
    Empty,

    #[error("not a number: {0:?}")]
    NotNumeric(String),

    #[error("not a finite number: {0:?}")]
    NotFinite(String),
}
