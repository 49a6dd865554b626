use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] foresight_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error("invalid JSON in {path}: {source}")]
    Input {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Input { .. } => 2,
            Self::Serialization(_) => 4,
            Self::Io { .. } => 10,
        }
    }
}
