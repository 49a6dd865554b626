//! Brier scoring for resolved binary forecasts.
//!
//! ```text
//! brier = (predicted_probability - outcome)^2,  outcome in {0, 1}
//! ```
//!
//! 0 is perfect, 1 is worst. Always answering 0.5 scores 0.25.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Probability, ValidationError};

const SUPERFORECASTER_BELOW: f64 = 0.10;
const GOOD_BELOW: f64 = 0.20;
const FAIR_BELOW: f64 = 0.25;

/// Qualitative band for a (mean) Brier score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrierTier {
    Superforecaster,
    Good,
    Fair,
    Poor,
}

impl BrierTier {
    pub fn from_score(score: f64) -> Self {
        if score < SUPERFORECASTER_BELOW {
            Self::Superforecaster
        } else if score < GOOD_BELOW {
            Self::Good
        } else if score < FAIR_BELOW {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Superforecaster => "Superforecaster",
            Self::Good => "Good calibration",
            Self::Fair => "Fair (better than random)",
            Self::Poor => "Poor calibration",
        }
    }
}

impl Display for BrierTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Stateless scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrierScorer;

impl BrierScorer {
    pub const fn new() -> Self {
        Self
    }

    /// Score a raw probability, rejecting values outside `[0, 1]`.
    pub fn score(&self, predicted_probability: f64, actual_outcome: bool) -> Result<f64, ValidationError> {
        let probability = Probability::new(predicted_probability)?;
        Ok(Self::score_probability(probability, actual_outcome))
    }

    pub fn score_probability(predicted_probability: Probability, actual_outcome: bool) -> f64 {
        let actual = if actual_outcome { 1.0 } else { 0.0 };
        (predicted_probability.value() - actual).powi(2)
    }

    pub fn tier(&self, score: f64) -> BrierTier {
        BrierTier::from_score(score)
    }

    /// Unweighted mean; `None` for an empty slice.
    pub fn average(&self, scores: &[f64]) -> Option<f64> {
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    /// Expected score of always predicting `base_rate` when events occur at that rate.
    pub fn baseline(&self, base_rate: Probability) -> f64 {
        let p = base_rate.value();
        p * (1.0 - p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_certain_and_coin_flip_predictions() {
        let scorer = BrierScorer::new();
        assert_eq!(scorer.score(1.0, true).expect("valid"), 0.0);
        assert_eq!(scorer.score(0.0, true).expect("valid"), 1.0);
        assert_eq!(scorer.score(0.5, true).expect("valid"), 0.25);
        assert_eq!(scorer.score(0.5, false).expect("valid"), 0.25);
    }

    #[test]
    fn rejects_probabilities_outside_unit_interval() {
        let scorer = BrierScorer::new();
        assert!(matches!(
            scorer.score(1.2, true),
            Err(ValidationError::ProbabilityOutOfRange { .. })
        ));
        assert!(matches!(
            scorer.score(-0.1, false),
            Err(ValidationError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn tier_thresholds_are_strict_upper_bounds() {
        assert_eq!(BrierTier::from_score(0.0), BrierTier::Superforecaster);
        assert_eq!(BrierTier::from_score(0.0999), BrierTier::Superforecaster);
        assert_eq!(BrierTier::from_score(0.10), BrierTier::Good);
        assert_eq!(BrierTier::from_score(0.20), BrierTier::Fair);
        assert_eq!(BrierTier::from_score(0.2499), BrierTier::Fair);
        assert_eq!(BrierTier::from_score(0.25), BrierTier::Poor);
        assert_eq!(BrierTier::from_score(1.0), BrierTier::Poor);
    }

    #[test]
    fn average_of_nothing_is_undefined() {
        let scorer = BrierScorer::new();
        assert_eq!(scorer.average(&[]), None);
        assert_eq!(scorer.average(&[0.1, 0.3]), Some(0.2));
    }

    #[test]
    fn baseline_peaks_at_even_odds() {
        let scorer = BrierScorer::new();
        assert_eq!(scorer.baseline(Probability::HALF), 0.25);
        assert_eq!(scorer.baseline(Probability::ONE), 0.0);
    }
}
