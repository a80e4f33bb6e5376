//! Per-command run summaries, printed on stdout as text or JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub input: PathBuf,
    pub rows_read: usize,
    pub dropped_non_numeric: usize,
    pub dropped_empty_wallet: usize,
    pub threshold: f64,
    pub rows_retained: usize,
    pub total_points: f64,
    /// `None` when no row passed the filter and nothing was written.
    pub output: Option<PathBuf>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolSummary {
    pub input: PathBuf,
    pub rows_read: usize,
    pub dropped_non_numeric: usize,
    pub dropped_empty_wallet: usize,
    pub threshold: f64,
    pub rows_retained: usize,
    pub total_volume: f64,
    pub total_abs_pnl: f64,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub input_dir: PathBuf,
    pub files_found: usize,
    pub files_merged: usize,
    pub skipped: Vec<SkippedSource>,
    pub rows_merged: usize,
    pub output: PathBuf,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SumSummary {
    pub input: PathBuf,
    pub column: String,
    pub rows: usize,
    pub valid_cells: usize,
    pub invalid_cells: usize,
    pub total: f64,
    pub finished_at: DateTime<Utc>,
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- score summary ---")?;
        writeln!(f, "input:               {}", self.input.display())?;
        writeln!(f, "rows read:           {}", self.rows_read)?;
        writeln!(f, "dropped non-numeric: {}", self.dropped_non_numeric)?;
        writeln!(f, "dropped no wallet:   {}", self.dropped_empty_wallet)?;
        writeln!(
            f,
            "retained (> {}): {}",
            self.threshold, self.rows_retained
        )?;
        writeln!(
            f,
            "total points:        {}",
            format_thousands(self.total_points, 4)
        )?;
        match &self.output {
            Some(path) => write!(f, "output:              {}", path.display()),
            None => write!(f, "output:              not written (no rows passed the filter)"),
        }
    }
}

impl fmt::Display for PoolSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- pool summary ---")?;
        writeln!(f, "input:               {}", self.input.display())?;
        writeln!(f, "rows read:           {}", self.rows_read)?;
        writeln!(f, "dropped non-numeric: {}", self.dropped_non_numeric)?;
        writeln!(f, "dropped no wallet:   {}", self.dropped_empty_wallet)?;
        writeln!(
            f,
            "retained (> {}): {}",
            self.threshold, self.rows_retained
        )?;
        writeln!(
            f,
            "total volume:        {}",
            format_thousands(self.total_volume, 2)
        )?;
        write!(
            f,
            "total |pnl|:         {}",
            format_thousands(self.total_abs_pnl, 2)
        )
    }
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- merge summary ---")?;
        writeln!(f, "input dir:    {}", self.input_dir.display())?;
        writeln!(f, "files found:  {}", self.files_found)?;
        writeln!(f, "files merged: {}", self.files_merged)?;
        writeln!(f, "files skipped: {}", self.skipped.len())?;
        for skipped in &self.skipped {
            writeln!(f, "  - {}: {}", skipped.path.display(), skipped.reason)?;
        }
        writeln!(f, "rows merged:  {}", self.rows_merged)?;
        write!(f, "output:       {}", self.output.display())
    }
}

impl fmt::Display for SumSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- sum summary ---")?;
        writeln!(f, "input:         {}", self.input.display())?;
        writeln!(f, "rows:          {}", self.rows)?;
        writeln!(f, "valid cells:   {}", self.valid_cells)?;
        writeln!(f, "invalid cells: {}", self.invalid_cells)?;
        write!(
            f,
            "total '{}':   {}",
            self.column,
            format_thousands(self.total, 4)
        )
    }
}

/// Fixed-point rendering with `,` thousands separators, e.g. `1,234.50`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, frac)) => (i, Some(frac)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
