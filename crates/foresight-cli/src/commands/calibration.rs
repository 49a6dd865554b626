use foresight_core::{CalibrationAnalyzer, CalibrationBin, ForecastRecord, ResolvedForecast};
use serde::Serialize;

use crate::cli::RecordsArgs;
use crate::error::CliError;

use super::{load_json, CommandResult};

#[derive(Debug, Serialize)]
struct CalibrationResponseData {
    total_forecasts: usize,
    resolved_forecasts: usize,
    calibration_index: Option<f64>,
    bins: Vec<CalibrationBin>,
}

pub fn run(args: &RecordsArgs) -> Result<CommandResult, CliError> {
    let records: Vec<ForecastRecord> = load_json(&args.records)?;
    let resolved = records
        .iter()
        .filter_map(ForecastRecord::as_resolved)
        .collect::<Vec<&ResolvedForecast>>();

    let analyzer = CalibrationAnalyzer::new();
    let calibration_index = analyzer.calibration_index(resolved.iter().copied());
    let data = serde_json::to_value(CalibrationResponseData {
        total_forecasts: records.len(),
        resolved_forecasts: resolved.len(),
        calibration_index,
        bins: analyzer.calibration_curve(resolved.iter().copied()),
    })?;

    let result = CommandResult::ok(data);
    if calibration_index.is_none() {
        return Ok(result.with_warning("no resolved forecasts; calibration index is undefined"));
    }
    Ok(result)
}
