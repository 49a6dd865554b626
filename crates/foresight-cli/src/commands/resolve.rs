use std::fs;

use foresight_core::{BrierTier, ForecastRecord, ResolvedForecast, UtcDateTime};
use serde::Serialize;
use tracing::info;

use crate::cli::ResolveArgs;
use crate::error::CliError;

use super::{load_json, CommandResult};

#[derive(Debug, Serialize)]
struct ResolveResponseData {
    forecast: ResolvedForecast,
    tier: BrierTier,
    tier_label: &'static str,
    written: bool,
}

pub fn run(args: &ResolveArgs) -> Result<CommandResult, CliError> {
    let resolved_at = match args.resolved_at.as_deref() {
        Some(raw) => UtcDateTime::parse(raw)?,
        None => UtcDateTime::now(),
    };

    let mut records: Vec<ForecastRecord> = load_json(&args.records)?;
    let slot = records
        .iter_mut()
        .find(|record| record.forecast_id() == args.id)
        .ok_or_else(|| {
            CliError::Command(format!(
                "no forecast with id {} in {}",
                args.id,
                args.records.display()
            ))
        })?;

    let ForecastRecord::Pending(pending) = slot else {
        return Err(CliError::Command(format!(
            "forecast {} is already resolved",
            args.id
        )));
    };

    let mut warnings = Vec::new();
    if !pending.resolution_date.has_passed(resolved_at) {
        warnings.push(format!(
            "resolved on {} before its resolution date {}",
            resolved_at.date(),
            pending.resolution_date
        ));
    }

    let resolved = pending.clone().resolve(args.outcome.occurred(), resolved_at);
    *slot = ForecastRecord::Resolved(resolved.clone());
    info!(
        forecast_id = %args.id,
        forecaster = %resolved.forecaster(),
        brier_score = resolved.brier_score(),
        "forecast resolved"
    );

    if args.write {
        let payload = serde_json::to_string_pretty(&records)?;
        fs::write(&args.records, payload + "\n").map_err(|source| CliError::Io {
            path: args.records.clone(),
            source,
        })?;
    }

    let tier = BrierTier::from_score(resolved.brier_score());
    let data = serde_json::to_value(ResolveResponseData {
        forecast: resolved,
        tier,
        tier_label: tier.label(),
        written: args.write,
    })?;
    Ok(CommandResult::ok(data).with_warnings(warnings))
}
