//! Behavior-driven tests for forecast simulation
//!
//! These tests verify WHAT a forecaster learns from a simulation run:
//! the outcome distribution and the probability of reaching the target.

use foresight_core::{ForecastEvaluator, Probability, Scale};
use foresight_tests::{
    load_fixture, point_mass, Distribution, Driver, ForecastConfig, ForecastRunner,
    MonteCarloEngine, SimulationConfig,
};

// =============================================================================
// Simulation: Deterministic drivers
// =============================================================================

#[test]
fn point_mass_drivers_give_certain_outcome_and_sharp_threshold() {
    // Given: Two drivers that are always exactly 100 and 2
    let drivers = [point_mass("volume", 100.0), point_mass("price", 2.0)];
    let engine = MonteCarloEngine::new(SimulationConfig::default().with_iterations(1_000));

    // When: The forecast is simulated
    let summary = engine
        .simulate(&drivers, &mut fastrand::Rng::with_seed(1))
        .expect("simulation should succeed");

    // Then: Every percentile is the exact product with no spread
    assert_eq!(summary.p10, 200.0);
    assert_eq!(summary.p50, 200.0);
    assert_eq!(summary.p90, 200.0);
    assert_eq!(summary.std_dev, 0.0);

    // And: Reaching 200 is certain while 201 is impossible
    let evaluator = ForecastEvaluator::new();
    assert_eq!(
        evaluator.success_probability(&summary, 200.0).expect("valid"),
        Probability::ONE
    );
    assert_eq!(
        evaluator.success_probability(&summary, 201.0).expect("valid"),
        Probability::ZERO
    );
}

// =============================================================================
// Simulation: Statistical behavior
// =============================================================================

#[test]
fn uniform_driver_mean_converges_with_many_trials() {
    // Given: A single uniform driver on [0, 10]
    let driver = Driver::new("share", "", "%", Distribution::uniform(0.0, 10.0).expect("ordered"))
        .expect("valid driver");
    let engine = MonteCarloEngine::new(SimulationConfig::default().with_iterations(100_000));

    // When: It is simulated 100,000 times
    let summary = engine
        .simulate(&[driver], &mut fastrand::Rng::with_seed(2024))
        .expect("simulation should succeed");

    // Then: The sample mean is close to 5
    assert!(
        (summary.mean - 5.0).abs() < 0.1,
        "mean {} should be within 0.1 of 5.0",
        summary.mean
    );
    assert!(summary.min >= 0.0 && summary.max <= 10.0);
}

#[test]
fn same_seed_reproduces_the_same_distribution() {
    // Given: The ASTS forecast and a fixed seed
    let forecast: ForecastConfig = load_fixture("asts_revenue_2026.json");
    let runner = ForecastRunner::new(SimulationConfig::default().with_iterations(5_000));

    // When: It is run twice sequentially and twice in parallel
    let first = runner
        .run(&forecast, &mut fastrand::Rng::with_seed(42))
        .expect("runs");
    let second = runner
        .run(&forecast, &mut fastrand::Rng::with_seed(42))
        .expect("runs");
    let parallel_a = runner.run_parallel(&forecast, 42).expect("runs");
    let parallel_b = runner.run_parallel(&forecast, 42).expect("runs");

    // Then: Each mode is reproducible
    assert_eq!(first, second);
    assert_eq!(parallel_a, parallel_b);

    // And: A different seed gives a different sample
    let other = runner.run_parallel(&forecast, 43).expect("runs");
    assert_ne!(parallel_a.distribution.mean, other.distribution.mean);
}

// =============================================================================
// Simulation: Realistic forecasts
// =============================================================================

#[test]
fn asts_forecast_converts_target_from_millions_to_dollars() {
    // Given: A subscriber x ARPU x months forecast with a target in millions
    let forecast: ForecastConfig = load_fixture("asts_revenue_2026.json");
    assert_eq!(forecast.target_scale, Scale::Millions);
    assert_eq!(forecast.driver_scale, Scale::Units);

    // When: The forecast is run
    let result = ForecastRunner::new(SimulationConfig::default())
        .run(&forecast, &mut fastrand::Rng::with_seed(7))
        .expect("runs");

    // Then: The target is compared in dollars
    assert_eq!(result.target_value, 150_000_000.0);

    // And: The outcome is genuinely uncertain
    let probability = result.probability_above_target.value();
    assert!(probability > 0.0 && probability < 1.0, "got {probability}");
    let summary = &result.distribution;
    assert!(summary.p10 <= summary.p50 && summary.p50 <= summary.p90);
    assert_eq!(summary.iterations, 10_000);
    assert_eq!(summary.histogram.len(), 50);
}

#[test]
fn legacy_camel_case_configuration_is_accepted() {
    // Given: The RKLB forecast written with camelCase keys
    let forecast: ForecastConfig = load_fixture("rklb_revenue_2026.json");

    // Then: Every field is understood
    assert_eq!(forecast.drivers.len(), 2);
    assert_eq!(forecast.base_rate.source, "Industry Analysis");
    assert_eq!(forecast.premortem[1].failure_mode, "Neutron delays");
    assert_eq!(forecast.target_in_driver_units(), 200.0);

    // When: It is simulated in parallel
    let result = ForecastRunner::new(SimulationConfig::default().with_iterations(20_000))
        .run_parallel(&forecast, 11)
        .expect("runs");

    // Then: The mean revenue sits near cadence x price = 180M
    assert!(
        (result.distribution.mean - 180.0).abs() < 3.0,
        "mean {}",
        result.distribution.mean
    );
    let probability = result.probability_above_target.value();
    assert!(probability > 0.0 && probability < 0.5, "got {probability}");
}
