//! Run configuration.
//!
//! Every tunable of the pipeline lives here with its documented default.
//! `Config::from_env` overlays `WALLETPOINTS_*` environment variables on the
//! defaults; the CLI overlays explicit flags on top of that.

use crate::error::{PipelineError, PipelineResult};
use crate::merge::{POINT_COLUMN, WALLET_COLUMN};
use std::env;
use std::path::PathBuf;

/// Column names of the raw trade export.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub wallet: String,
    pub volume: String,
    pub pnl: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            wallet: "user".to_string(),
            volume: "totalVolumeUSD".to_string(),
            pnl: "netPnLUSD".to_string(),
        }
    }
}

/// Threshold and constants of the point formula
///
/// `point = (volume_weight * volume / volume_divisor
///           + pnl_weight * |pnl| / pnl_divisor) * multiplier + bonus`
///
/// The divisors are the pool totals of the eligible population, fixed when the
/// campaign is configured rather than recomputed per input file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Records need `volume > threshold` to be scored.
    pub threshold: f64,
    pub volume_weight: f64,
    pub pnl_weight: f64,
    pub volume_divisor: f64,
    pub pnl_divisor: f64,
    pub multiplier: f64,
    /// Flat amount added to every scored wallet.
    pub bonus: f64,
}

impl ScoringConfig {
    pub const DEFAULT_THRESHOLD: f64 = 100.1;
    pub const DEFAULT_VOLUME_WEIGHT: f64 = 0.6;
    pub const DEFAULT_PNL_WEIGHT: f64 = 0.4;
    pub const DEFAULT_VOLUME_DIVISOR: f64 = 46819347748.1;
    pub const DEFAULT_PNL_DIVISOR: f64 = 6747073669.32;
    pub const DEFAULT_MULTIPLIER: f64 = 5_000_000_000.0;
    pub const DEFAULT_BONUS: f64 = 3229.08553589;

    /// Weights are expected to sum to 1.0. Not enforced, only reported.
    pub fn weights_sum_to_one(&self) -> bool {
        (self.volume_weight + self.pnl_weight - 1.0).abs() < 1e-9
    }

    /// A NaN or infinite threshold would silently filter out every row.
    pub fn validate_threshold(&self) -> PipelineResult<()> {
        if !self.threshold.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> PipelineResult<()> {
        self.validate_threshold()?;
        let finite = [
            ("volume_weight", self.volume_weight),
            ("pnl_weight", self.pnl_weight),
            ("multiplier", self.multiplier),
            ("bonus", self.bonus),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(PipelineError::InvalidConfig(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("volume_divisor", self.volume_divisor),
            ("pnl_divisor", self.pnl_divisor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PipelineError::InvalidConfig(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            volume_weight: Self::DEFAULT_VOLUME_WEIGHT,
            pnl_weight: Self::DEFAULT_PNL_WEIGHT,
            volume_divisor: Self::DEFAULT_VOLUME_DIVISOR,
            pnl_divisor: Self::DEFAULT_PNL_DIVISOR,
            multiplier: Self::DEFAULT_MULTIPLIER,
            bonus: Self::DEFAULT_BONUS,
        }
    }
}

/// Where the merge step looks for scored files and where it writes the result.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    pub input_dir: PathBuf,
    /// File extension of candidate sources, without the dot.
    pub extension: String,
    pub output_path: PathBuf,
    /// Wallet column of the source files, renamed to `wallet_address` on output.
    pub wallet_column: String,
    /// Point column of the source files, renamed to `point` on output.
    pub point_column: String,
    /// Prefix the merged file with a UTF-8 byte-order mark so spreadsheet
    /// tools pick the right encoding for non-ASCII wallet identifiers.
    pub write_bom: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("output"),
            extension: "csv".to_string(),
            output_path: PathBuf::from("result/merged_wallets.csv"),
            wallet_column: WALLET_COLUMN.to_string(),
            point_column: POINT_COLUMN.to_string(),
            write_bom: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Raw trade export read by `score` and `pool`.
    pub input_path: PathBuf,
    /// Per-source scored file written by `score`.
    pub output_path: PathBuf,
    pub columns: ColumnMapping,
    pub scoring: ScoringConfig,
    pub merge: MergeConfig,
    /// Column summed by `sum`.
    pub point_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/photon.csv"),
            output_path: PathBuf::from("output/photon_point.csv"),
            columns: ColumnMapping::default(),
            scoring: ScoringConfig::default(),
            merge: MergeConfig::default(),
            point_column: "point".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `WALLETPOINTS_*` environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let mut config = Self::default();

        if let Some(v) = env_string("WALLETPOINTS_INPUT") {
            config.input_path = PathBuf::from(v);
        }
        if let Some(v) = env_string("WALLETPOINTS_OUTPUT") {
            config.output_path = PathBuf::from(v);
        }
        if let Some(v) = env_string("WALLETPOINTS_WALLET_COLUMN") {
            config.columns.wallet = v;
        }
        if let Some(v) = env_string("WALLETPOINTS_VOLUME_COLUMN") {
            config.columns.volume = v;
        }
        if let Some(v) = env_string("WALLETPOINTS_PNL_COLUMN") {
            config.columns.pnl = v;
        }
        if let Some(v) = env_string("WALLETPOINTS_POINT_COLUMN") {
            config.point_column = v;
        }

        let scoring = &mut config.scoring;
        overlay_f64("WALLETPOINTS_VOLUME_THRESHOLD", &mut scoring.threshold)?;
        overlay_f64("WALLETPOINTS_VOLUME_WEIGHT", &mut scoring.volume_weight)?;
        overlay_f64("WALLETPOINTS_PNL_WEIGHT", &mut scoring.pnl_weight)?;
        overlay_f64("WALLETPOINTS_VOLUME_DIVISOR", &mut scoring.volume_divisor)?;
        overlay_f64("WALLETPOINTS_PNL_DIVISOR", &mut scoring.pnl_divisor)?;
        overlay_f64("WALLETPOINTS_POINT_MULTIPLIER", &mut scoring.multiplier)?;
        overlay_f64("WALLETPOINTS_POINT_BONUS", &mut scoring.bonus)?;

        if let Some(v) = env_string("WALLETPOINTS_MERGE_INPUT_DIR") {
            config.merge.input_dir = PathBuf::from(v);
        }
        if let Some(v) = env_string("WALLETPOINTS_MERGE_EXTENSION") {
            config.merge.extension = v.trim_start_matches('.').to_string();
        }
        if let Some(v) = env_string("WALLETPOINTS_MERGE_OUTPUT") {
            config.merge.output_path = PathBuf::from(v);
        }
        if let Some(v) = env_string("WALLETPOINTS_MERGE_WALLET_COLUMN") {
            config.merge.wallet_column = v;
        }
        if let Some(v) = env_string("WALLETPOINTS_MERGE_POINT_COLUMN") {
            config.merge.point_column = v;
        }
        if let Some(v) = env_string("WALLETPOINTS_MERGE_BOM") {
            config.merge.write_bom = parse_bool("WALLETPOINTS_MERGE_BOM", &v)?;
        }

        Ok(config)
    }
}

/// Deployment environment, used to pick the log format.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn overlay_f64(key: &str, target: &mut f64) -> PipelineResult<()> {
    if let Some(raw) = env_string(key) {
        *target = raw.trim().parse::<f64>().map_err(|_| {
            PipelineError::InvalidConfig(format!("{} is not a number: {:?}", key, raw))
        })?;
    }
    Ok(())
}

fn parse_bool(key: &str, raw: &str) -> PipelineResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PipelineError::InvalidConfig(format!(
            "{} is not a boolean: {:?}",
            key, raw
        ))),
    }
}
