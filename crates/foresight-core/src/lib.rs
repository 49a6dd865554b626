//! # Foresight Core
//!
//! Probabilistic forecasting engine: Monte Carlo simulation over uncertain
//! drivers, probability-of-success evaluation, Brier scoring, and
//! calibration analysis across forecasters.
//!
//! ## Overview
//!
//! - **Distribution sampling** for triangular, normal, uniform, and beta drivers
//! - **Monte Carlo aggregation** of multiplicative driver products
//! - **Success probability** of reaching a target in a declared scale
//! - **Brier scoring** with qualitative tiers
//! - **Calibration analysis** and a per-forecaster leaderboard
//! - **Response envelope** with metadata for machine-readable output
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`brier`] | Brier score, tiers, and baseline |
//! | [`calibration`] | Reliability table, calibration index, leaderboard |
//! | [`catalog`] | Sector catalog and driver templates |
//! | [`domain`] | Drivers, forecast configuration, and prediction records |
//! | [`engine`] | Monte Carlo engine and outcome summary |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`evaluator`] | Success probability and the end-to-end runner |
//! | [`random`] | Injected randomness |
//! | [`sampler`] | Per-distribution sampling |
//!
//! ## Quick Start
//!
//! ```rust
//! use foresight_core::{
//!     Distribution, Driver, ForecastConfig, ForecastRunner, Scale, SimulationConfig,
//!     TargetDate, TargetMetric, Ticker,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let forecast = ForecastConfig::builder()
//!         .ticker(Ticker::parse("RKLB")?)
//!         .target(TargetMetric::Revenue, 200.0, Scale::Millions)
//!         .target_date(TargetDate::parse("2026-12-31")?)
//!         .driver_scale(Scale::Millions)
//!         .driver(Driver::new(
//!             "Launch Cadence",
//!             "Launches per year",
//!             "launches/year",
//!             Distribution::triangular(18.0, 24.0, 30.0)?,
//!         )?)
//!         .driver(Driver::new(
//!             "Avg Launch Price",
//!             "Average price per launch",
//!             "M USD",
//!             Distribution::normal(7.5, 1.2)?,
//!         )?)
//!         .build()?;
//!
//!     let runner = ForecastRunner::new(SimulationConfig::default());
//!     let result = runner.run(&forecast, &mut fastrand::Rng::with_seed(7))?;
//!     println!("P(revenue >= $200M) = {:.2}", result.probability_above_target.value());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ ForecastConfig  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────────┐
//! │ ForecastRunner  │────▶│ MonteCarloEngine     │
//! └────────┬────────┘     │ (DistributionSampler)│
//!          │              └──────────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ForecastEvaluator│
//! └─────────────────┘
//!
//! ┌─────────────────┐     ┌──────────────────────┐
//! │ ForecastRecord  │────▶│ CalibrationAnalyzer  │
//! │ (history)       │     │ (BrierScorer)        │
//! └─────────────────┘     └──────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems surface as [`ValidationError`] before any trial
//! runs. Nothing is silently repaired:
//!
//! ```rust
//! use foresight_core::{Distribution, ValidationError};
//!
//! let err = Distribution::triangular(10.0, 5.0, 20.0).unwrap_err();
//! assert!(matches!(err, ValidationError::InvalidTriangular { .. }));
//! ```

pub mod brier;
pub mod calibration;
pub mod catalog;
pub mod domain;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod evaluator;
pub mod random;
pub mod sampler;

// Scoring
pub use brier::{BrierScorer, BrierTier};

// Calibration
pub use calibration::{CalibrationAnalyzer, CalibrationBin, LeaderboardEntry};

// Catalog
pub use catalog::{DriverRegistry, SectorConfig, SectorRegistry};

// Domain models
pub use domain::{
    BaseRate, Distribution, DistributionKind, DistributionParameters, Driver, DriverDraft,
    ForecastConfig, ForecastConfigBuilder, ForecastRecord, ForecasterId, PendingForecast,
    PremortemScenario, Probability, ResolvedForecast, Scale, TargetDate, TargetMetric, Ticker,
    UtcDateTime,
};

// Simulation
pub use engine::{HistogramBin, MonteCarloEngine, OutcomeDistribution, SimulationConfig};
pub use evaluator::{ForecastEvaluator, ForecastRunner, SimulationResult};
pub use random::{RandomSource, SequenceSource};
pub use sampler::DistributionSampler;

// Envelope types
pub use envelope::{Envelope, EnvelopeMeta, SCHEMA_VERSION};

// Error types
pub use error::{CoreError, ValidationError};
