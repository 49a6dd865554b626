//! CLI argument definitions for Foresight.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `simulate` | Run a Monte Carlo forecast from a JSON configuration |
//! | `score` | Brier-score a single resolved prediction |
//! | `calibration` | Reliability table and calibration index for a history file |
//! | `leaderboard` | Rank forecasters in a history file by mean Brier score |
//! | `resolve` | Record the outcome of a pending forecast in a history file |
//! | `sectors` | List the built-in sector catalog |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--seed` | random | Seed for reproducible simulation |
//!
//! # Examples
//!
//! ```bash
//! # Simulate a forecast with a fixed seed
//! foresight simulate fixtures/asts_revenue_2026.json --seed 42 --pretty
//!
//! # Score a 70% prediction that came true
//! foresight score --probability 0.7 --outcome hit
//!
//! # Rank forecasters
//! foresight leaderboard fixtures/forecast_history.json --format table
//!
//! # Resolve a pending forecast and save the updated history
//! foresight resolve history.json --id 9e4a1b6c-2d7f-4a83-8c5e-1f0b3d6a7c92 --outcome miss --write
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use foresight_core::engine::{DEFAULT_HISTOGRAM_BINS, DEFAULT_ITERATIONS};
use uuid::Uuid;

/// Foresight - probabilistic forecasting with Monte Carlo simulation
///
/// Decompose a business target into uncertain drivers, simulate the outcome
/// distribution, and track forecaster accuracy with Brier scores.
#[derive(Debug, Parser)]
#[command(
    name = "foresight",
    author,
    version,
    about = "Monte Carlo forecasting and calibration CLI",
    long_about = "Foresight estimates the probability that a company reaches a business target \
by sampling its uncertain drivers. Features include:\n\
\n\
  • Triangular, normal, uniform, and beta drivers\n\
  • Reproducible seeded and parallel simulation\n\
  • Brier scoring and calibration analysis\n\
  • Structured JSON output with metadata\n\
\n\
Use 'foresight <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON object (default)
    /// - table: Human-readable summary
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Seed for the random generator.
    ///
    /// When omitted a seed is drawn and reported in the output metadata, so
    /// any run can be replayed.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate a forecast configuration and report P(outcome >= target).
    ///
    /// Examples:
    ///   foresight simulate forecast.json
    ///   foresight simulate forecast.json --iterations 50000 --parallel
    Simulate(SimulateArgs),

    /// Compute the Brier score of one resolved prediction.
    Score(ScoreArgs),

    /// Calibration table and index over a forecast history file.
    Calibration(RecordsArgs),

    /// Rank forecasters in a history file, best first.
    Leaderboard(RecordsArgs),

    /// Resolve a pending forecast in a history file against its outcome.
    ///
    /// Examples:
    ///   foresight resolve history.json --id <FORECAST_ID> --outcome hit
    ///   foresight resolve history.json --id <FORECAST_ID> --outcome miss --write
    Resolve(ResolveArgs),

    /// List the built-in sectors with default drivers and metrics.
    Sectors,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Path to a forecast configuration (JSON).
    pub config: PathBuf,

    /// Number of Monte Carlo trials.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Number of histogram bins.
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,

    /// Spread trials across all cores.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Predicted probability in [0, 1].
    #[arg(long)]
    pub probability: f64,

    /// What actually happened.
    #[arg(long, value_enum)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    /// The predicted event occurred.
    Hit,
    /// The predicted event did not occur.
    Miss,
}

impl Outcome {
    pub const fn occurred(self) -> bool {
        matches!(self, Self::Hit)
    }
}

#[derive(Debug, Args)]
pub struct RecordsArgs {
    /// Path to a forecast history file (JSON array of records).
    pub records: PathBuf,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Path to a forecast history file (JSON array of records).
    pub records: PathBuf,

    /// Id of the pending forecast to resolve.
    #[arg(long)]
    pub id: Uuid,

    /// What actually happened.
    #[arg(long, value_enum)]
    pub outcome: Outcome,

    /// Resolution instant (RFC 3339, UTC). Defaults to now.
    #[arg(long)]
    pub resolved_at: Option<String>,

    /// Write the updated history back to the records file.
    #[arg(long, default_value_t = false)]
    pub write: bool,
}
