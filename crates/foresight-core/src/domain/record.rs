use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brier::BrierScorer;
use crate::{Probability, TargetDate, Ticker, UtcDateTime, ValidationError};

/// Identity of the forecaster who owns a prediction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ForecasterId(String);

impl ForecasterId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyForecasterId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ForecasterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ForecasterId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ForecasterId> for String {
    fn from(value: ForecasterId) -> Self {
        value.0
    }
}

/// A prediction whose resolution date has not been scored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingForecast {
    pub forecast_id: Uuid,
    pub forecaster: ForecasterId,
    pub ticker: Ticker,
    pub predicted_probability: Probability,
    pub resolution_date: TargetDate,
}

impl PendingForecast {
    pub fn new(
        forecaster: ForecasterId,
        ticker: Ticker,
        predicted_probability: Probability,
        resolution_date: TargetDate,
    ) -> Self {
        Self {
            forecast_id: Uuid::new_v4(),
            forecaster,
            ticker,
            predicted_probability,
            resolution_date,
        }
    }

    /// Score the prediction against ground truth, producing immutable history.
    pub fn resolve(self, actual_outcome: bool, resolved_at: UtcDateTime) -> ResolvedForecast {
        ResolvedForecast {
            forecast_id: self.forecast_id,
            forecaster: self.forecaster,
            ticker: self.ticker,
            predicted_probability: self.predicted_probability,
            actual_outcome,
            brier_score: BrierScorer::score_probability(self.predicted_probability, actual_outcome),
            resolved_at,
        }
    }
}

/// A scored prediction. Fields are read-only once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResolvedForecastDraft")]
pub struct ResolvedForecast {
    forecast_id: Uuid,
    forecaster: ForecasterId,
    ticker: Ticker,
    predicted_probability: Probability,
    actual_outcome: bool,
    brier_score: f64,
    resolved_at: UtcDateTime,
}

impl ResolvedForecast {
    pub fn forecast_id(&self) -> Uuid {
        self.forecast_id
    }

    pub fn forecaster(&self) -> &ForecasterId {
        &self.forecaster
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn predicted_probability(&self) -> Probability {
        self.predicted_probability
    }

    pub fn actual_outcome(&self) -> bool {
        self.actual_outcome
    }

    pub fn brier_score(&self) -> f64 {
        self.brier_score
    }

    pub fn resolved_at(&self) -> UtcDateTime {
        self.resolved_at
    }
}

// The stored score is ignored on read and recomputed from its inputs.
#[derive(Deserialize)]
struct ResolvedForecastDraft {
    forecast_id: Uuid,
    forecaster: ForecasterId,
    ticker: Ticker,
    predicted_probability: Probability,
    actual_outcome: bool,
    resolved_at: UtcDateTime,
}

impl TryFrom<ResolvedForecastDraft> for ResolvedForecast {
    type Error = ValidationError;

    fn try_from(value: ResolvedForecastDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            brier_score: BrierScorer::score_probability(
                value.predicted_probability,
                value.actual_outcome,
            ),
            forecast_id: value.forecast_id,
            forecaster: value.forecaster,
            ticker: value.ticker,
            predicted_probability: value.predicted_probability,
            actual_outcome: value.actual_outcome,
            resolved_at: value.resolved_at,
        })
    }
}

/// One entry of a forecaster's history, resolved or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastRecord {
    Pending(PendingForecast),
    Resolved(ResolvedForecast),
}

impl ForecastRecord {
    pub fn forecast_id(&self) -> Uuid {
        match self {
            Self::Pending(pending) => pending.forecast_id,
            Self::Resolved(resolved) => resolved.forecast_id(),
        }
    }

    pub fn forecaster(&self) -> &ForecasterId {
        match self {
            Self::Pending(pending) => &pending.forecaster,
            Self::Resolved(resolved) => resolved.forecaster(),
        }
    }

    pub fn as_resolved(&self) -> Option<&ResolvedForecast> {
        match self {
            Self::Pending(_) => None,
            Self::Resolved(resolved) => Some(resolved),
        }
    }
}

impl From<PendingForecast> for ForecastRecord {
    fn from(value: PendingForecast) -> Self {
        Self::Pending(value)
    }
}

impl From<ResolvedForecast> for ForecastRecord {
    fn from(value: ResolvedForecast) -> Self {
        Self::Resolved(value)
    }
}
