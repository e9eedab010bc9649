//! Metrix CLI - command-line front end for the metrics engine
//!
//! Commands:
//! - score: Compute one percentile from a range and a value
//! - series: Build per-type time series from a record history
//! - evaluate: Produce a full player report against reference ranges
//! - ingest: Parse a bulk history CSV into history events

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use metrix_engine::ingest::read_history_csv;
use metrix_engine::{
    build_series, percentile, EngineError, MetricRecord, ReferenceRangeStore, ReportEncoder,
    ENGINE_VERSION,
};

/// Metrix - scoring and aggregation engine for athlete performance metrics
#[derive(Parser)]
#[command(name = "metrix")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score athlete metrics against age-graded reference ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one percentile from a reference range and a value
    Score {
        /// Reference minimum
        #[arg(long)]
        min: f64,

        /// Reference maximum
        #[arg(long)]
        max: f64,

        /// Measured value
        #[arg(long)]
        value: f64,
    },

    /// Build per-type time series from a record history
    Series {
        /// Records JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Produce a full player report against reference ranges
    Evaluate {
        /// Records JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference ranges JSON file
        #[arg(short, long)]
        ranges: PathBuf,

        /// Player age to evaluate against (12-20)
        #[arg(short, long)]
        age: u8,

        /// Owner id recorded in the report
        #[arg(long)]
        owner: Option<String>,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Parse a bulk history CSV into history events
    Ingest {
        /// CSV file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },
}

/// Error envelope printed to stderr as JSON
#[derive(Serialize)]
struct CliError {
    error: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let envelope = CliError {
                error: e.to_string(),
            };
            eprintln!(
                "{}",
                serde_json::to_string(&envelope)
                    .unwrap_or_else(|_| "{\"error\":\"unknown\"}".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliFailure> {
    match cli.command {
        Commands::Score { min, max, value } => {
            let pct = percentile(min, max, value)?;
            println!("{pct}");
            Ok(())
        }

        Commands::Series { input, output } => {
            let records = read_records(&input)?;
            let series = build_series(&records);
            write_output(&output, &serde_json::to_string_pretty(&series).map_err(EngineError::Json)?)
        }

        Commands::Evaluate {
            input,
            ranges,
            age,
            owner,
            output,
        } => {
            let records = read_records(&input)?;
            let ranges_json = read_input(&ranges)?;
            let store = ReferenceRangeStore::from_json(&ranges_json).map_err(EngineError::Json)?;
            let encoder = ReportEncoder::new();
            let json = encoder.encode_to_json(&records, age, &store, owner, Utc::now())?;
            write_output(&output, &json)
        }

        Commands::Ingest { input, output } => {
            let csv = read_input(&input)?;
            let (events, stats) = read_history_csv(csv.as_bytes())?;
            eprintln!(
                "{}",
                serde_json::to_string(&stats).map_err(EngineError::Json)?
            );
            write_output(&output, &serde_json::to_string_pretty(&events).map_err(EngineError::Json)?)
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<MetricRecord>, CliFailure> {
    let json = read_input(path)?;
    let records = serde_json::from_str(&json).map_err(EngineError::Json)?;
    Ok(records)
}

fn read_input(path: &Path) -> Result<String, CliFailure> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: &Path, contents: &str) -> Result<(), CliFailure> {
    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{contents}")?;
        Ok(())
    } else {
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Engine or I/O failure surfaced by the CLI
#[derive(Debug)]
enum CliFailure {
    Engine(EngineError),
    Io(io::Error),
}

impl std::fmt::Display for CliFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliFailure::Engine(e) => write!(f, "{e}"),
            CliFailure::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl From<EngineError> for CliFailure {
    fn from(e: EngineError) -> Self {
        CliFailure::Engine(e)
    }
}

impl From<io::Error> for CliFailure {
    fn from(e: io::Error) -> Self {
        CliFailure::Io(e)
    }
}
