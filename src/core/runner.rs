//! Top-level command runners.
//!
//! Each runner executes one linear pass and returns a summary. Errors that
//! reach the caller are fatal for the run; recoverable problems (bad rows,
//! bad merge sources) are handled inside and only show up in the summary.

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::merge::{Aggregator, Merger};
use crate::models::{MergeSummary, PoolSummary, ScoreSummary, SumSummary};
use crate::scoring::{pool_totals, ScoreCalculator, ThresholdFilter};
use crate::sources::{check_output_path, load_trades, write_rows, Table, TradeLoad};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

const PREVIEW_ROWS: usize = 5;

/// Load, filter and score one raw export and write its score file.
pub fn run_score(config: &Config) -> PipelineResult<ScoreSummary> {
    let scoring = &config.scoring;
    scoring.validate()?;
    if !scoring.weights_sum_to_one() {
        warn!(
            volume_weight = scoring.volume_weight,
            pnl_weight = scoring.pnl_weight,
            "Scoring weights do not sum to 1.0"
        );
    }
    check_output_path(&config.output_path)?;

    let TradeLoad {
        records,
        rows_read,
        dropped_non_numeric,
        dropped_empty_wallet,
    } = load_trades(&config.input_path, &config.columns)?;

    let filter = ThresholdFilter::new(scoring.threshold);
    let retained = filter.apply(records);
    info!(
        retained = retained.len(),
        threshold = filter.threshold(),
        "{} row(s) with {} > {}",
        retained.len(),
        config.columns.volume,
        filter.threshold()
    );

    let calculator = ScoreCalculator::new(scoring.clone());
    let scored = calculator.score_all(&retained);
    let total_points = scored.iter().fold(0.0, |acc, s| acc + s.point);

    let output = if scored.is_empty() {
        warn!(
            threshold = filter.threshold(),
            "No rows passed the volume filter; score file not written"
        );
        None
    } else {
        write_rows(&config.output_path, &scored, false)?;
        info!(path = %config.output_path.display(), rows = scored.len(), "Wrote score file");
        for row in scored.iter().take(PREVIEW_ROWS) {
            info!(wallet = %row.wallet, point = row.point, "preview");
        }
        Some(config.output_path.clone())
    };

    Ok(ScoreSummary {
        input: config.input_path.clone(),
        rows_read,
        dropped_non_numeric,
        dropped_empty_wallet,
        threshold: filter.threshold(),
        rows_retained: retained.len(),
        total_points,
        output,
        finished_at: Utc::now(),
    })
}

/// Totals of volume and |pnl| over the filtered population of one export.
pub fn run_pool(config: &Config) -> PipelineResult<PoolSummary> {
    config.scoring.validate_threshold()?;

    let TradeLoad {
        records,
        rows_read,
        dropped_non_numeric,
        dropped_empty_wallet,
    } = load_trades(&config.input_path, &config.columns)?;

    let filter = ThresholdFilter::new(config.scoring.threshold);
    let retained = filter.apply(records);
    if retained.is_empty() {
        warn!(
            threshold = filter.threshold(),
            "No rows passed the volume filter; pool totals are zero"
        );
    }
    let totals = pool_totals(&retained);

    Ok(PoolSummary {
        input: config.input_path.clone(),
        rows_read,
        dropped_non_numeric,
        dropped_empty_wallet,
        threshold: filter.threshold(),
        rows_retained: totals.records,
        total_volume: totals.total_volume,
        total_abs_pnl: totals.total_abs_pnl,
        finished_at: Utc::now(),
    })
}

/// Merge every score file of the input directory into one file.
pub fn run_merge(config: &Config) -> PipelineResult<MergeSummary> {
    let merge = &config.merge;
    check_output_path(&merge.output_path)?;

    let files = Merger::discover(&merge.input_dir, &merge.extension, Some(&merge.output_path))?;
    info!(
        dir = %merge.input_dir.display(),
        files = files.len(),
        "Found {} candidate source file(s)",
        files.len()
    );

    let outcome = Merger::new(&merge.wallet_column, &merge.point_column).merge(&files);
    if outcome.dataset.is_empty() {
        return Err(PipelineError::NoValidSources(files.len()));
    }

    write_rows(&merge.output_path, outcome.dataset.rows(), merge.write_bom)?;
    info!(
        path = %merge.output_path.display(),
        rows = outcome.dataset.len(),
        "Wrote merged file"
    );

    Ok(MergeSummary {
        input_dir: merge.input_dir.clone(),
        files_found: files.len(),
        files_merged: outcome.merged.len(),
        skipped: outcome.skipped,
        rows_merged: outcome.dataset.len(),
        output: merge.output_path.clone(),
        finished_at: Utc::now(),
    })
}

/// Sum a point column of any score or merged file.
pub fn run_sum(path: &Path, column: &str) -> PipelineResult<SumSummary> {
    let table = Table::load(path)?;
    info!(path = %path.display(), rows = table.len(), "Loaded point file");
    let total = Aggregator::sum_column(&table, column)?;

    Ok(SumSummary {
        input: path.to_path_buf(),
        column: column.to_string(),
        rows: table.len(),
        valid_cells: total.valid,
        invalid_cells: total.invalid,
        total: total.total,
        finished_at: Utc::now(),
    })
}
