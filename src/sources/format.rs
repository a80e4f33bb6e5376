use crate::error::{PipelineError, PipelineResult};
use std::path::Path;

/// Tabular formats the pipeline reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    /// Excel workbook; only the first worksheet is used.
    Xlsx,
}

impl TableFormat {
    /// Pick the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> PipelineResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("tsv") => Ok(Self::Tsv),
            Some("xlsx") => Ok(Self::Xlsx),
            _ => Err(PipelineError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Field delimiter of the text formats; `None` for workbooks.
    pub fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Xlsx => None,
        }
    }
}
