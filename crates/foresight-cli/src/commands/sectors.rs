use foresight_core::SectorRegistry;

use crate::error::CliError;

use super::CommandResult;

pub fn run() -> Result<CommandResult, CliError> {
    let registry = SectorRegistry::with_defaults();
    let data = serde_json::to_value(registry.all().collect::<Vec<_>>())?;
    Ok(CommandResult::ok(data))
}
