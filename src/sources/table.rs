use crate::error::{PipelineError, PipelineResult};
use crate::sources::format::TableFormat;
use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const UTF8_BOM: char = '\u{feff}';

/// A loaded tabular file: header row plus raw string records.
///
/// Rows may be shorter than the header; a missing trailing cell reads as
/// `None`.
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    pub fn load(path: &Path) -> PipelineResult<Self> {
        if !path.is_file() {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }
        let (headers, rows) = match TableFormat::from_path(path)?.delimiter() {
            Some(delimiter) => read_delimited(path, delimiter)?,
            None => read_workbook(path)?,
        };
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolve every required column or fail with the full missing list.
    pub fn require_columns(&self, names: &[&str]) -> PipelineResult<Vec<usize>> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => indices.push(idx),
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(PipelineError::Schema {
                path: self.path.clone(),
                missing,
                available: self.headers.clone(),
            });
        }
        Ok(indices)
    }

    pub fn rows(&self) -> impl Iterator<Item = &StringRecord> {
        self.rows.iter()
    }
}

fn read_delimited(path: &Path, delimiter: u8) -> PipelineResult<(Vec<String>, Vec<StringRecord>)> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::csv(path, e))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(UTF8_BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PipelineError::csv(path, e))?;
    Ok((headers, rows))
}

/// First worksheet of a workbook; its first row is the header.
fn read_workbook(path: &Path) -> PipelineResult<(Vec<String>, Vec<StringRecord>)> {
    let workbook_error = |source| PipelineError::WorkbookRead {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(workbook_error)?,
        None => return Ok((Vec::new(), Vec::new())),
    };

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell_text(cell).trim().to_string())
            .collect(),
        None => Vec::new(),
    };
    let rows = sheet_rows
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .map(StringRecord::from)
        .collect();
    Ok((headers, rows))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
