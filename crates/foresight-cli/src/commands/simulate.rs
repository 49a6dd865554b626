use foresight_core::{
    BaseRate, BrierScorer, ForecastConfig, ForecastRunner, PremortemScenario, Scale, SimulationConfig,
    SimulationResult, TargetDate, TargetMetric, Ticker, UtcDateTime,
};
use serde::Serialize;

use crate::cli::SimulateArgs;
use crate::error::CliError;

use super::{load_json, CommandResult};

/// Below this many trials the tail percentiles are noisy.
const LOW_ITERATION_WARNING: usize = 1_000;

#[derive(Debug, Serialize)]
struct SimulateResponseData {
    ticker: Ticker,
    target_metric: TargetMetric,
    target_value: f64,
    target_scale: Scale,
    driver_scale: Scale,
    target_date: TargetDate,
    base_rate: BaseRate,
    /// Expected Brier score of always answering the base rate.
    base_rate_brier_baseline: f64,
    premortem: Vec<PremortemScenario>,
    parallel: bool,
    simulation: SimulationResult,
}

pub fn run(args: &SimulateArgs, seed: Option<u64>) -> Result<CommandResult, CliError> {
    let forecast: ForecastConfig = load_json(&args.config)?;
    let config = SimulationConfig::default()
        .with_iterations(args.iterations)
        .with_histogram_bins(args.bins);
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));

    let runner = ForecastRunner::new(config);
    let simulation = if args.parallel {
        runner.run_parallel(&forecast, seed)?
    } else {
        runner.run(&forecast, &mut fastrand::Rng::with_seed(seed))?
    };

    let mut warnings = Vec::new();
    if args.iterations < LOW_ITERATION_WARNING {
        warnings.push(format!(
            "only {} iterations; percentiles may be unstable",
            args.iterations
        ));
    }
    if forecast.target_date.has_passed(UtcDateTime::now()) {
        warnings.push(format!(
            "target date {} has already passed; resolve this forecast instead",
            forecast.target_date
        ));
    }

    let ForecastConfig {
        ticker,
        target_metric,
        target_value,
        target_scale,
        driver_scale,
        target_date,
        base_rate,
        premortem,
        ..
    } = forecast;

    let base_rate_brier_baseline = BrierScorer::new().baseline(base_rate.probability);
    let data = serde_json::to_value(SimulateResponseData {
        ticker,
        target_metric,
        target_value,
        target_scale,
        driver_scale,
        target_date,
        base_rate,
        base_rate_brier_baseline,
        premortem,
        parallel: args.parallel,
        simulation,
    })?;

    Ok(CommandResult::ok(data)
        .with_seed(seed)
        .with_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(body.as_bytes()).expect("writes");
        file
    }

    const POINT_MASS: &str = r#"{
        "ticker": "ACME",
        "target_metric": "revenue",
        "target_value": 200,
        "target_scale": "units",
        "target_date": "2099-12-31",
        "drivers": [
            {"name": "a", "distribution_kind": "triangular", "parameters": {"low": 100, "mode": 100, "high": 100}},
            {"name": "b", "distribution_kind": "triangular", "parameters": {"low": 2, "mode": 2, "high": 2}}
        ]
    }"#;

    #[test]
    fn reports_seed_and_certain_success() {
        let file = config_file(POINT_MASS);
        let args = SimulateArgs {
            config: file.path().to_path_buf(),
            iterations: 1_000,
            bins: 50,
            parallel: false,
        };

        let result = run(&args, Some(5)).expect("runs");
        assert_eq!(result.seed, Some(5));
        assert!(result.warnings.is_empty());
        assert_eq!(result.data["simulation"]["probability_above_target"], 1.0);
        assert_eq!(result.data["simulation"]["p50"], 200.0);
        assert_eq!(result.data["base_rate_brier_baseline"], 0.25);
    }

    #[test]
    fn same_seed_gives_same_output_in_parallel_mode() {
        let file = config_file(&POINT_MASS.replace(
            r#"{"low": 2, "mode": 2, "high": 2}"#,
            r#"{"low": 1, "mode": 2, "high": 4}"#,
        ));
        let args = SimulateArgs {
            config: file.path().to_path_buf(),
            iterations: 500,
            bins: 20,
            parallel: true,
        };

        let first = run(&args, Some(99)).expect("runs");
        let second = run(&args, Some(99)).expect("runs");
        assert_eq!(first.data, second.data);
        assert_eq!(first.warnings.len(), 1);
    }

    #[test]
    fn empty_driver_list_aborts() {
        let file = config_file(
            r#"{"ticker": "ACME", "target_metric": "revenue", "target_value": 1,
                "target_date": "2099-12-31", "drivers": []}"#,
        );
        let args = SimulateArgs {
            config: file.path().to_path_buf(),
            iterations: 100,
            bins: 10,
            parallel: false,
        };

        let err = run(&args, Some(1)).expect_err("must fail");
        assert!(matches!(
            err,
            CliError::Validation(foresight_core::ValidationError::NoDrivers)
        ));
    }
}
