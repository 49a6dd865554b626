mod calibration;
mod leaderboard;
mod resolve;
mod score;
mod sectors;
mod simulate;

use std::fs;
use std::path::Path;

use foresight_core::{Envelope, SCHEMA_VERSION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub seed: Option<u64>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            seed: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let command_result = match &cli.command {
        Command::Simulate(args) => simulate::run(args, cli.seed)?,
        Command::Score(args) => score::run(args)?,
        Command::Calibration(args) => calibration::run(args)?,
        Command::Leaderboard(args) => leaderboard::run(args)?,
        Command::Resolve(args) => resolve::run(args)?,
        Command::Sectors => sectors::run()?,
    };

    let CommandResult {
        data,
        warnings,
        seed,
    } = command_result;

    let mut metadata = Metadata::new(seed);
    for warning in warnings {
        metadata.push_warning(warning);
    }

    let meta = metadata.into_envelope_meta(SCHEMA_VERSION)?;
    Ok(Envelope::new(meta, data))
}

/// Read and deserialize a JSON input file.
///
/// Validation failures inside the document surface as [`CliError::Input`]
/// with the offending message.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "loaded input file");
    serde_json::from_str(&raw).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use foresight_core::ForecastConfig;
    use std::io::Write;

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_json::<ForecastConfig>(&dir.path().join("absent.json")).expect_err("must fail");
        assert!(matches!(err, CliError::Io { .. }));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn invalid_driver_is_reported_as_input_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"{{
                "ticker": "ACME",
                "target_metric": "revenue",
                "target_value": 10,
                "target_date": "2026-12-31",
                "drivers": [
                    {{"name": "x", "distribution_kind": "lognormal", "parameters": {{}}}}
                ]
            }}"#
        )
        .expect("writes");

        let err = load_json::<ForecastConfig>(file.path()).expect_err("must fail");
        assert!(matches!(err, CliError::Input { .. }));
        assert!(err.to_string().contains("lognormal"));
        assert_eq!(err.exit_code(), 2);
    }
}
