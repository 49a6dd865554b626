use thiserror::Error;

/// Configuration and contract errors exposed by `foresight-core`.
///
/// Every variant is a rejection at entry; nothing here is repaired silently.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("forecaster id cannot be empty")]
    EmptyForecasterId,
    #[error("driver name cannot be empty")]
    EmptyDriverName,
    #[error("forecast must declare at least one driver")]
    NoDrivers,

    #[error("unknown distribution kind '{value}', expected one of triangular, normal, uniform, beta")]
    UnknownDistribution { value: String },
    #[error("{distribution} distribution requires parameter '{parameter}'")]
    MissingParameter {
        distribution: &'static str,
        parameter: &'static str,
    },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("triangular parameters must satisfy low <= mode <= high (got {low}, {mode}, {high})")]
    InvalidTriangular { low: f64, mode: f64, high: f64 },
    #[error("uniform parameters must satisfy low <= high (got {low}, {high})")]
    InvalidUniform { low: f64, high: f64 },
    #[error("normal std_dev must be >= 0 (got {value})")]
    NegativeStdDev { value: f64 },
    #[error("beta shape '{field}' must be > 0 (got {value})")]
    NonPositiveShape { field: &'static str, value: f64 },

    #[error("iterations must be a positive integer")]
    InvalidIterations,
    #[error("histogram must have at least one bin")]
    InvalidHistogramBins,
    #[error("parallel chunk size must be a positive integer")]
    InvalidChunkSize,

    #[error("probability must lie within [0, 1] (got {value})")]
    ProbabilityOutOfRange { value: f64 },

    #[error("invalid target metric '{value}', expected one of revenue, market_cap, profitability")]
    InvalidTargetMetric { value: String },
    #[error("invalid scale '{value}', expected one of units, thousands, millions, billions")]
    InvalidScale { value: String },
    #[error("forecast is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("target date must be YYYY-MM-DD: '{value}'")]
    InvalidTargetDate { value: String },
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("request id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema version must look like v<major>.<minor>.<patch>: '{value}'")]
    InvalidSchemaVersion { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
