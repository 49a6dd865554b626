use foresight_core::{CalibrationAnalyzer, ForecastRecord};

use crate::cli::RecordsArgs;
use crate::error::CliError;

use super::{load_json, CommandResult};

pub fn run(args: &RecordsArgs) -> Result<CommandResult, CliError> {
    let records: Vec<ForecastRecord> = load_json(&args.records)?;
    let entries = CalibrationAnalyzer::new().leaderboard(&records);

    let unscored = entries
        .iter()
        .filter(|entry| entry.avg_brier_score.is_none())
        .count();
    let data = serde_json::to_value(entries)?;

    let result = CommandResult::ok(data);
    if unscored > 0 {
        return Ok(result.with_warning(format!(
            "{unscored} forecaster(s) have no resolved forecasts and are ranked last"
        )));
    }
    Ok(result)
}
