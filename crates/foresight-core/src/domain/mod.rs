//! # Domain Models
//!
//! Canonical value types for forecast construction and resolution.
//!
//! All models are validated at construction and serialize with snake_case
//! field names. Deserialization routes through the same validation, so a
//! malformed configuration is rejected before it reaches the engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Driver`] | Named uncertain factor with a parametric [`Distribution`] |
//! | [`ForecastConfig`] | Target, resolution date, drivers, and metadata |
//! | [`Scale`] | Declared order of magnitude for targets and driver products |
//! | [`Probability`] | Value in `[0, 1]` |
//! | [`PendingForecast`] / [`ResolvedForecast`] | Prediction history |
//! | [`Ticker`] | Normalized exchange ticker |
//! | [`TargetDate`] / [`UtcDateTime`] | Calendar day and UTC instant |

mod driver;
mod forecast;
mod probability;
mod record;
mod ticker;
mod timestamp;

pub use driver::{Distribution, DistributionKind, DistributionParameters, Driver, DriverDraft};
pub use forecast::{
    BaseRate, ForecastConfig, ForecastConfigBuilder, PremortemScenario, Scale, TargetMetric,
};
pub use probability::Probability;
pub use record::{ForecastRecord, ForecasterId, PendingForecast, ResolvedForecast};
pub use ticker::Ticker;
pub use timestamp::{TargetDate, UtcDateTime};
