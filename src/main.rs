//! walletpoints CLI
//!
//! Usage:
//!   walletpoints score --input data/photon.csv --output output/photon_point.csv
//!   walletpoints pool --input data/gmgn.csv
//!   walletpoints merge --input-dir output --output result/merged_wallets.csv
//!   walletpoints sum result/merged_wallets.csv

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use walletpoints::config::{self, Config};
use walletpoints::core::runner;
use walletpoints::logging;
use walletpoints::PipelineResult;

#[derive(Parser, Debug)]
#[command(name = "walletpoints")]
#[command(about = "Score, merge and total wallet reward points from trade exports")]
#[command(version)]
struct Cli {
    /// Print the run summary as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter and score a raw trade export into a score file
    Score(ScoreArgs),
    /// Total volume and |pnl| of the filtered population (the divisors)
    Pool(PoolArgs),
    /// Concatenate every score file of a directory
    Merge(MergeArgs),
    /// Sum the point column of a file
    Sum(SumArgs),
}

#[derive(Args, Debug, Default)]
struct ColumnArgs {
    /// Wallet identifier column of the raw export
    #[arg(long)]
    wallet_column: Option<String>,

    /// Volume column of the raw export
    #[arg(long)]
    volume_column: Option<String>,

    /// PnL column of the raw export
    #[arg(long)]
    pnl_column: Option<String>,
}

#[derive(Args, Debug, Default)]
struct ScoringArgs {
    /// Records need volume strictly above this value
    #[arg(long)]
    threshold: Option<f64>,

    #[arg(long)]
    volume_weight: Option<f64>,

    #[arg(long)]
    pnl_weight: Option<f64>,

    #[arg(long)]
    volume_divisor: Option<f64>,

    #[arg(long)]
    pnl_divisor: Option<f64>,

    #[arg(long)]
    multiplier: Option<f64>,

    #[arg(long)]
    bonus: Option<f64>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Raw trade export (.csv, .tsv or .xlsx)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Score file to write
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    columns: ColumnArgs,

    #[command(flatten)]
    scoring: ScoringArgs,
}

#[derive(Args, Debug)]
struct PoolArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    #[command(flatten)]
    columns: ColumnArgs,

    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// Directory holding the per-source score files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Merged file to write
    #[arg(long)]
    output: Option<PathBuf>,

    /// Extension of candidate files, without the dot
    #[arg(long)]
    extension: Option<String>,

    /// Wallet column of the source files
    #[arg(long)]
    wallet_column: Option<String>,

    /// Point column of the source files
    #[arg(long)]
    point_column: Option<String>,

    /// Do not prefix the merged file with a UTF-8 byte-order mark
    #[arg(long)]
    no_bom: bool,
}

#[derive(Args, Debug)]
struct SumArgs {
    /// File to sum; defaults to the merge output
    input: Option<PathBuf>,

    /// Column to sum
    #[arg(long)]
    column: Option<String>,
}

impl ColumnArgs {
    fn apply(self, config: &mut Config) {
        if let Some(v) = self.wallet_column {
            config.columns.wallet = v;
        }
        if let Some(v) = self.volume_column {
            config.columns.volume = v;
        }
        if let Some(v) = self.pnl_column {
            config.columns.pnl = v;
        }
    }
}

impl ScoringArgs {
    fn apply(self, config: &mut Config) {
        let scoring = &mut config.scoring;
        let overrides = [
            (self.threshold, &mut scoring.threshold),
            (self.volume_weight, &mut scoring.volume_weight),
            (self.pnl_weight, &mut scoring.pnl_weight),
            (self.volume_divisor, &mut scoring.volume_divisor),
            (self.pnl_divisor, &mut scoring.pnl_divisor),
            (self.multiplier, &mut scoring.multiplier),
            (self.bonus, &mut scoring.bonus),
        ];
        for (value, target) in overrides {
            if let Some(v) = value {
                *target = v;
            }
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    info!(environment = %config::get_environment(), "Starting walletpoints");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Run aborted");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> PipelineResult<()> {
    let mut config = Config::from_env()?;

    match cli.command {
        Command::Score(args) => {
            if let Some(v) = args.input {
                config.input_path = v;
            }
            if let Some(v) = args.output {
                config.output_path = v;
            }
            args.columns.apply(&mut config);
            args.scoring.apply(&mut config);
            report(&runner::run_score(&config)?, cli.json)
        }
        Command::Pool(args) => {
            if let Some(v) = args.input {
                config.input_path = v;
            }
            if let Some(v) = args.threshold {
                config.scoring.threshold = v;
            }
            args.columns.apply(&mut config);
            report(&runner::run_pool(&config)?, cli.json)
        }
        Command::Merge(args) => {
            if let Some(v) = args.input_dir {
                config.merge.input_dir = v;
            }
            if let Some(v) = args.output {
                config.merge.output_path = v;
            }
            if let Some(v) = args.extension {
                config.merge.extension = v.trim_start_matches('.').to_string();
            }
            if let Some(v) = args.wallet_column {
                config.merge.wallet_column = v;
            }
            if let Some(v) = args.point_column {
                config.merge.point_column = v;
            }
            if args.no_bom {
                config.merge.write_bom = false;
            }
            report(&runner::run_merge(&config)?, cli.json)
        }
        Command::Sum(args) => {
            let input = args.input.unwrap_or_else(|| config.merge.output_path.clone());
            let column = args.column.unwrap_or_else(|| config.point_column.clone());
            report(&runner::run_sum(&input, &column)?, cli.json)
        }
    }
}

fn report<S: Serialize + Display>(summary: &S, json: bool) -> PipelineResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}
