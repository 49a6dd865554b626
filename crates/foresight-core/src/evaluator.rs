//! Probability-of-success evaluation and the end-to-end forecast runner.
//!
//! # Unit contract
//!
//! [`ForecastEvaluator::success_probability`] compares a target against
//! histogram bin centers *as given*: the target must already be in the unit
//! of the driver product. Nothing here rescales. [`ForecastRunner`] is the
//! one place that converts, using the scales declared on the
//! [`ForecastConfig`] (see [`ForecastConfig::target_in_driver_units`]).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{MonteCarloEngine, OutcomeDistribution, SimulationConfig};
use crate::random::RandomSource;
use crate::{ForecastConfig, Probability, ValidationError};

/// Outcome distribution plus the probability of reaching the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(flatten)]
    pub distribution: OutcomeDistribution,
    /// Target in driver-product units.
    pub target_value: f64,
    pub probability_above_target: Probability,
}

/// Derives success probability from a summarized distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastEvaluator;

impl ForecastEvaluator {
    pub const fn new() -> Self {
        Self
    }

    /// Fraction of trials whose histogram bin center is at or above `target_value`.
    pub fn success_probability(
        &self,
        distribution: &OutcomeDistribution,
        target_value: f64,
    ) -> Result<Probability, ValidationError> {
        if !target_value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "target_value",
            });
        }
        if distribution.iterations == 0 {
            return Err(ValidationError::InvalidIterations);
        }

        let above = distribution
            .histogram
            .iter()
            .filter(|bin| bin.bin_center >= target_value)
            .map(|bin| bin.count)
            .sum::<usize>();
        Probability::new(above as f64 / distribution.iterations as f64)
    }

    pub fn evaluate(
        &self,
        distribution: OutcomeDistribution,
        target_value: f64,
    ) -> Result<SimulationResult, ValidationError> {
        let probability_above_target = self.success_probability(&distribution, target_value)?;
        Ok(SimulationResult {
            distribution,
            target_value,
            probability_above_target,
        })
    }
}

/// Validates a forecast, simulates its drivers, and evaluates the target.
#[derive(Debug, Clone, Default)]
pub struct ForecastRunner {
    engine: MonteCarloEngine,
    evaluator: ForecastEvaluator,
}

impl ForecastRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: MonteCarloEngine::new(config),
            evaluator: ForecastEvaluator::new(),
        }
    }

    pub fn engine(&self) -> &MonteCarloEngine {
        &self.engine
    }

    pub fn run<R>(
        &self,
        forecast: &ForecastConfig,
        rng: &mut R,
    ) -> Result<SimulationResult, ValidationError>
    where
        R: RandomSource + ?Sized,
    {
        forecast.validate()?;
        let distribution = self.engine.simulate(&forecast.drivers, rng)?;
        self.finish(forecast, distribution)
    }

    pub fn run_parallel(
        &self,
        forecast: &ForecastConfig,
        seed: u64,
    ) -> Result<SimulationResult, ValidationError> {
        forecast.validate()?;
        let distribution = self.engine.simulate_parallel(&forecast.drivers, seed)?;
        self.finish(forecast, distribution)
    }

    fn finish(
        &self,
        forecast: &ForecastConfig,
        distribution: OutcomeDistribution,
    ) -> Result<SimulationResult, ValidationError> {
        let result = self
            .evaluator
            .evaluate(distribution, forecast.target_in_driver_units())?;
        info!(
            ticker = %forecast.ticker,
            metric = %forecast.target_metric,
            p50 = result.distribution.p50,
            probability = result.probability_above_target.value(),
            "forecast evaluated"
        );
        Ok(result)
    }
}
