//! Single-draw sampling from the supported distribution families.
//!
//! Every method consumes uniform draws from an injected [`RandomSource`];
//! draws are independent across calls and no correlation is modeled.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use rand_distr::Distribution as _;
use rand_distr::{Beta, Gamma};
use tracing::warn;

use crate::random::{RandomSource, SourceRng};
use crate::{Distribution, ValidationError};

/// Stateless sampler for [`Distribution`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionSampler;

impl DistributionSampler {
    pub const fn new() -> Self {
        Self
    }

    /// Validate parameters, then draw once.
    pub fn sample_checked<R>(
        &self,
        distribution: &Distribution,
        rng: &mut R,
    ) -> Result<f64, ValidationError>
    where
        R: RandomSource + ?Sized,
    {
        distribution.validate()?;
        Ok(self.sample(distribution, rng))
    }

    /// Draw once from an already-validated distribution.
    pub fn sample<R>(&self, distribution: &Distribution, rng: &mut R) -> f64
    where
        R: RandomSource + ?Sized,
    {
        match *distribution {
            Distribution::Triangular { low, mode, high } => triangular(rng, low, mode, high),
            Distribution::Normal { mean, std_dev } => normal(rng, mean, std_dev),
            Distribution::Uniform { low, high } => uniform(rng, low, high),
            Distribution::Beta { alpha, beta } => beta_draw(rng, alpha, beta),
        }
    }
}

/// Interpolates between the bounds, so `high - low` is never formed and
/// ranges wider than `f64::MAX` stay finite.
fn uniform<R: RandomSource + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    let u = rng.next_f64();
    ((1.0 - u) * low + u * high).clamp(low, high)
}

/// Inverse-CDF triangular draw; a zero-width range is a point mass at `low`.
///
/// Works on halved bounds so every difference fits in an `f64`, and takes the
/// square roots of the two factors separately so their product cannot overflow.
fn triangular<R: RandomSource + ?Sized>(rng: &mut R, low: f64, mode: f64, high: f64) -> f64 {
    if high == low {
        return low;
    }

    let (low_half, mode_half, high_half) = (low / 2.0, mode / 2.0, high / 2.0);
    let range = high_half - low_half;
    let u = rng.next_f64();
    let draw_half = if u * range < mode_half - low_half {
        low_half + (u * range).sqrt() * (mode_half - low_half).sqrt()
    } else {
        high_half - ((1.0 - u) * range).sqrt() * (high_half - mode_half).sqrt()
    };
    // Rounding can land one ulp outside the support.
    (draw_half * 2.0).clamp(low, high)
}

/// Box-Muller transform.
fn normal<R: RandomSource + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    mean + standard_normal(rng) * std_dev
}

fn standard_normal<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.next_open_unit();
    let u2 = rng.next_f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Shapes for which `rand_distr`'s Cheng sampler is used directly. Its
/// set-up forms `alpha + beta` and `2 * alpha * beta`, which lose precision
/// or overflow far outside this band.
const CHENG_SHAPES: RangeInclusive<f64> = 1e-3..=1e6;

/// Beta(alpha, beta) through `rand_distr`, fed by the injected source.
fn beta_draw<R: RandomSource + ?Sized>(rng: &mut R, alpha: f64, beta: f64) -> f64 {
    let mut rng = SourceRng::new(rng);

    if CHENG_SHAPES.contains(&alpha) && CHENG_SHAPES.contains(&beta) {
        match Beta::new(alpha, beta) {
            Ok(distribution) => return distribution.sample(&mut rng),
            Err(error) => warn!(alpha, beta, %error, "beta shapes rejected; using gamma ratio"),
        }
    }
    gamma_ratio(&mut rng, alpha, beta)
}

/// `X / (X + Y)` with `X ~ Gamma(alpha)`, `Y ~ Gamma(beta)`, rewritten as
/// `1 / (1 + Y / X)` so huge shapes cannot overflow the sum.
fn gamma_ratio<G: rand::Rng + ?Sized>(rng: &mut G, alpha: f64, beta: f64) -> f64 {
    let (Ok(x_distribution), Ok(y_distribution)) = (Gamma::new(alpha, 1.0), Gamma::new(beta, 1.0))
    else {
        warn!(alpha, beta, "gamma shapes rejected");
        return f64::NAN;
    };
    let x = x_distribution.sample(rng);
    let y = y_distribution.sample(rng);
    if x == 0.0 && y == 0.0 {
        // Both underflowed: only reachable for tiny shapes, where the
        // distribution collapses onto {0, 1} with weights beta and alpha.
        warn!(alpha, beta, "beta draw underflowed; using two-point limit");
        let alpha_weight = 1.0 / (1.0 + beta / alpha);
        return if rng.gen::<f64>() < alpha_weight { 1.0 } else { 0.0 };
    }
    1.0 / (1.0 + y / x)
}
