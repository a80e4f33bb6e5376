use crate::error::{PipelineError, PipelineResult};
use crate::models::{PointRow, ScoredWallet};
use crate::sources::format::TableFormat;
use crate::sources::parser::parse_f64;
use rust_xlsxwriter::{Workbook, XlsxError};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One cell of a worksheet row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetCell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// A row that can be written both as delimited text (through serde) and as a
/// worksheet row.
pub trait SheetRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn sheet_cells(&self) -> Vec<SheetCell<'_>>;
}

impl SheetRow for ScoredWallet {
    const HEADERS: &'static [&'static str] = &["wallet_address", "point"];

    fn sheet_cells(&self) -> Vec<SheetCell<'_>> {
        vec![SheetCell::Text(&self.wallet), SheetCell::Number(self.point)]
    }
}

impl SheetRow for PointRow {
    const HEADERS: &'static [&'static str] = &["wallet_address", "point"];

    /// Numeric point text goes in as a number so spreadsheet sums work; any
    /// other text is kept verbatim.
    fn sheet_cells(&self) -> Vec<SheetCell<'_>> {
        let point = if self.point.trim().is_empty() {
            SheetCell::Blank
        } else {
            match parse_f64(&self.point) {
                Ok(value) => SheetCell::Number(value),
                Err(_) => SheetCell::Text(&self.point),
            }
        };
        vec![SheetCell::Text(&self.wallet), point]
    }
}

/// Fail early if `path` cannot be written in a supported format, before any
/// work is done for it.
pub fn check_output_path(path: &Path) -> PipelineResult<TableFormat> {
    TableFormat::from_path(path)
}

/// Write `rows` with a header row.
///
/// Parent directories are created as needed. `write_bom` only applies to the
/// delimited formats. The file is fully flushed before returning.
pub fn write_rows<T: SheetRow>(path: &Path, rows: &[T], write_bom: bool) -> PipelineResult<()> {
    let format = check_output_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }

    match format.delimiter() {
        Some(delimiter) => write_delimited(path, rows, delimiter, write_bom),
        None => write_workbook(path, rows).map_err(|source| PipelineError::WorkbookWrite {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_delimited<T: Serialize>(
    path: &Path,
    rows: &[T],
    delimiter: u8,
    write_bom: bool,
) -> PipelineResult<()> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut out = BufWriter::new(file);
    if write_bom {
        out.write_all(UTF8_BOM)
            .map_err(|e| PipelineError::io(path, e))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_writer(out);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| PipelineError::csv(path, e))?;
    }
    writer.flush().map_err(|e| PipelineError::io(path, e))?;
    Ok(())
}

fn write_workbook<T: SheetRow>(path: &Path, rows: &[T]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in T::HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, cell) in row.sheet_cells().into_iter().enumerate() {
            match cell {
                SheetCell::Text(text) => {
                    worksheet.write_string(row_num, col as u16, text)?;
                }
                SheetCell::Number(value) => {
                    worksheet.write_number(row_num, col as u16, value)?;
                }
                SheetCell::Blank => {}
            }
        }
    }

    workbook.save(path)
}
