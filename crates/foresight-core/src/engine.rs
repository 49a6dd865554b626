//! Monte Carlo aggregation of driver samples into an outcome distribution.
//!
//! Each trial draws one sample per driver and multiplies them (Fermi
//! decomposition). The collected population is summarized by order-statistic
//! percentiles, population mean/standard deviation, and an equal-width
//! histogram spanning `[min, max]`.
//!
//! The engine holds no state between runs. Reproducibility is the caller's
//! choice: pass a seeded [`fastrand::Rng`] to [`MonteCarloEngine::simulate`],
//! or a seed to [`MonteCarloEngine::simulate_parallel`].

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::random::RandomSource;
use crate::sampler::DistributionSampler;
use crate::{Driver, ValidationError};

pub const DEFAULT_ITERATIONS: usize = 10_000;
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;
pub const DEFAULT_PARALLEL_CHUNK_SIZE: usize = 2_500;

/// Run-shape configuration for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of trials per run.
    pub iterations: usize,
    /// Number of equal-width histogram bins.
    pub histogram_bins: usize,
    /// Trials per independently seeded chunk in parallel runs.
    pub parallel_chunk_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            parallel_chunk_size: DEFAULT_PARALLEL_CHUNK_SIZE,
        }
    }
}

impl SimulationConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_histogram_bins(mut self, histogram_bins: usize) -> Self {
        self.histogram_bins = histogram_bins;
        self
    }

    pub fn with_parallel_chunk_size(mut self, parallel_chunk_size: usize) -> Self {
        self.parallel_chunk_size = parallel_chunk_size;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.iterations == 0 {
            return Err(ValidationError::InvalidIterations);
        }
        if self.histogram_bins == 0 {
            return Err(ValidationError::InvalidHistogramBins);
        }
        if self.parallel_chunk_size == 0 {
            return Err(ValidationError::InvalidChunkSize);
        }
        Ok(())
    }
}

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub bin_center: f64,
    pub count: usize,
}

/// Summary of a simulated outcome population, in the unit of the driver product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub iterations: usize,
    pub min: f64,
    pub max: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub histogram: Vec<HistogramBin>,
}

impl OutcomeDistribution {
    /// Summarize a complete population.
    ///
    /// Partial populations from concurrent workers must be concatenated
    /// before calling this; percentiles need every sample.
    pub fn from_population(
        mut population: Vec<f64>,
        histogram_bins: usize,
    ) -> Result<Self, ValidationError> {
        if population.is_empty() {
            return Err(ValidationError::InvalidIterations);
        }
        if histogram_bins == 0 {
            return Err(ValidationError::InvalidHistogramBins);
        }
        if population.iter().any(|value| !value.is_finite()) {
            return Err(ValidationError::NonFiniteValue { field: "outcome" });
        }

        population.sort_by(f64::total_cmp);

        let (mean, std_dev) = moments(&population);
        Ok(Self {
            iterations: population.len(),
            min: population[0],
            max: population[population.len() - 1],
            p10: order_statistic(&population, 0.1),
            p50: order_statistic(&population, 0.5),
            p90: order_statistic(&population, 0.9),
            mean,
            std_dev,
            histogram: histogram(&population, histogram_bins),
        })
    }
}

/// `sorted[floor(q * n)]`, clamped to the last element. No interpolation.
fn order_statistic(sorted: &[f64], quantile: f64) -> f64 {
    let index = (sorted.len() as f64 * quantile).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Population mean and standard deviation.
///
/// Magnitudes past `1e150` are scaled down by an exact power of two first, so
/// neither the sum nor the squared deviations overflow.
fn moments(sorted: &[f64]) -> (f64, f64) {
    let magnitude = sorted[0].abs().max(sorted[sorted.len() - 1].abs());
    let scale = if magnitude > 1e150 { 2f64.powi(600) } else { 1.0 };

    let n = sorted.len() as f64;
    let mean = sorted.iter().map(|value| value / scale).sum::<f64>() / n;
    let variance = sorted
        .iter()
        .map(|value| (value / scale - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean * scale, variance.sqrt() * scale)
}

/// Equal-width bins over `[min, max]`.
///
/// Bounds are halved before differencing so `max - min` stays finite. When
/// the bin width underflows to zero the population is treated as degenerate
/// and reported as a single bin at `min`.
fn histogram(sorted: &[f64], bins: usize) -> Vec<HistogramBin> {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let half_width = (max / 2.0 - min / 2.0) / bins as f64;
    if max == min || half_width == 0.0 {
        return vec![HistogramBin {
            bin_center: min,
            count: sorted.len(),
        }];
    }

    let mut counts = vec![0_usize; bins];
    for value in sorted {
        let index = (((value / 2.0 - min / 2.0) / half_width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| HistogramBin {
            bin_center: 2.0 * (min / 2.0 + (index as f64 + 0.5) * half_width),
            count,
        })
        .collect()
}

/// Stateless Monte Carlo engine.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    config: SimulationConfig,
    sampler: DistributionSampler,
}

impl MonteCarloEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            sampler: DistributionSampler::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run all trials on the calling thread.
    pub fn simulate<R>(
        &self,
        drivers: &[Driver],
        rng: &mut R,
    ) -> Result<OutcomeDistribution, ValidationError>
    where
        R: RandomSource + ?Sized,
    {
        self.validate(drivers)?;
        let started = Instant::now();

        let population = (0..self.config.iterations)
            .map(|_| self.trial(drivers, &mut *rng))
            .collect::<Vec<_>>();
        let distribution = OutcomeDistribution::from_population(population, self.config.histogram_bins)?;

        debug!(
            drivers = drivers.len(),
            iterations = self.config.iterations,
            elapsed_us = started.elapsed().as_micros() as u64,
            "simulation complete"
        );
        Ok(distribution)
    }

    /// Run trials across the rayon pool.
    ///
    /// Trials are split into fixed-size chunks, each with its own generator
    /// seeded from `seed` and the chunk index, so the result depends only on
    /// `seed` and the config, never on the thread count.
    pub fn simulate_parallel(
        &self,
        drivers: &[Driver],
        seed: u64,
    ) -> Result<OutcomeDistribution, ValidationError> {
        self.validate(drivers)?;
        let started = Instant::now();

        let iterations = self.config.iterations;
        let chunk_size = self.config.parallel_chunk_size;
        let mut seeder = fastrand::Rng::with_seed(seed);
        let chunk_seeds = (0..iterations.div_ceil(chunk_size))
            .map(|_| seeder.u64(..))
            .collect::<Vec<_>>();

        let population = chunk_seeds
            .into_par_iter()
            .enumerate()
            .map(|(index, chunk_seed)| {
                let len = chunk_size.min(iterations - index * chunk_size);
                let mut rng = fastrand::Rng::with_seed(chunk_seed);
                (0..len)
                    .map(|_| self.trial(drivers, &mut rng))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .concat();
        let distribution = OutcomeDistribution::from_population(population, self.config.histogram_bins)?;

        debug!(
            drivers = drivers.len(),
            iterations,
            chunk_size,
            elapsed_us = started.elapsed().as_micros() as u64,
            "parallel simulation complete"
        );
        Ok(distribution)
    }

    fn validate(&self, drivers: &[Driver]) -> Result<(), ValidationError> {
        self.config.validate()?;
        if drivers.is_empty() {
            return Err(ValidationError::NoDrivers);
        }
        for driver in drivers {
            driver.distribution().validate()?;
        }
        Ok(())
    }

    fn trial<R>(&self, drivers: &[Driver], rng: &mut R) -> f64
    where
        R: RandomSource + ?Sized,
    {
        drivers.iter().fold(1.0, |product, driver| {
            product * self.sampler.sample(driver.distribution(), rng)
        })
    }
}
