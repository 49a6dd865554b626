//! Calibration analysis across a population of resolved forecasts.
//!
//! Predictions are grouped into five fixed confidence bands:
//! `[0, 0.2)`, `[0.2, 0.4)`, `[0.4, 0.6)`, `[0.6, 0.8)`, `[0.8, 1.0]`.
//! For each non-empty band the mean predicted probability is compared with
//! the observed hit rate. The calibration index is one minus the mean
//! absolute gap over non-empty bands; with no resolved forecasts it is
//! undefined (`None`), never zero.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::brier::{BrierScorer, BrierTier};
use crate::{ForecastRecord, ForecasterId, ResolvedForecast};

/// Lower edges of bands 1..=4; band 0 starts at 0 and band 4 is closed at 1.
const INNER_EDGES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];
const BIN_COUNT: usize = INNER_EDGES.len() + 1;

/// One confidence band of a reliability table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub mean_predicted: Option<f64>,
    pub actual_frequency: Option<f64>,
    pub deviation: Option<f64>,
}

/// Per-forecaster aggregate, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub forecaster: ForecasterId,
    /// `None` until the forecaster has a resolved forecast.
    pub avg_brier_score: Option<f64>,
    pub calibration_index: Option<f64>,
    pub total_forecasts: usize,
    pub resolved_forecasts: usize,
    pub status: Option<BrierTier>,
}

/// Stateless analyzer over read-only forecast history.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalibrationAnalyzer {
    scorer: BrierScorer,
}

impl CalibrationAnalyzer {
    pub const fn new() -> Self {
        Self {
            scorer: BrierScorer::new(),
        }
    }

    /// Reliability table over all five bands, empty bands included.
    pub fn calibration_curve<'a, I>(&self, resolved: I) -> Vec<CalibrationBin>
    where
        I: IntoIterator<Item = &'a ResolvedForecast>,
    {
        let mut predicted_sums = [0.0_f64; BIN_COUNT];
        let mut hits = [0_usize; BIN_COUNT];
        let mut counts = [0_usize; BIN_COUNT];

        for forecast in resolved {
            let probability = forecast.predicted_probability().value();
            let bin = bin_index(probability);
            predicted_sums[bin] += probability;
            counts[bin] += 1;
            if forecast.actual_outcome() {
                hits[bin] += 1;
            }
        }

        (0..BIN_COUNT)
            .map(|bin| {
                let lower = if bin == 0 { 0.0 } else { INNER_EDGES[bin - 1] };
                let upper = INNER_EDGES.get(bin).copied().unwrap_or(1.0);
                let count = counts[bin];
                if count == 0 {
                    return CalibrationBin {
                        lower,
                        upper,
                        count,
                        mean_predicted: None,
                        actual_frequency: None,
                        deviation: None,
                    };
                }

                let mean_predicted = predicted_sums[bin] / count as f64;
                let actual_frequency = hits[bin] as f64 / count as f64;
                CalibrationBin {
                    lower,
                    upper,
                    count,
                    mean_predicted: Some(mean_predicted),
                    actual_frequency: Some(actual_frequency),
                    deviation: Some((mean_predicted - actual_frequency).abs()),
                }
            })
            .collect()
    }

    /// Calibration index in `[0, 1]`, or `None` with no resolved forecasts.
    pub fn calibration_index<'a, I>(&self, resolved: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a ResolvedForecast>,
    {
        let deviations = self
            .calibration_curve(resolved)
            .into_iter()
            .filter_map(|bin| bin.deviation)
            .collect::<Vec<_>>();
        if deviations.is_empty() {
            return None;
        }
        Some(1.0 - deviations.iter().sum::<f64>() / deviations.len() as f64)
    }

    /// Rank forecasters by mean Brier score, best first.
    ///
    /// Pending records count toward `total_forecasts` only. Forecasters with
    /// nothing resolved rank after everyone else; ties break by id.
    pub fn leaderboard(&self, records: &[ForecastRecord]) -> Vec<LeaderboardEntry> {
        self.rank(
            records
                .iter()
                .map(|record| (record.forecaster(), record.as_resolved())),
        )
    }

    /// Leaderboard over resolved history only.
    pub fn leaderboard_resolved(&self, resolved: &[ResolvedForecast]) -> Vec<LeaderboardEntry> {
        self.rank(
            resolved
                .iter()
                .map(|forecast| (forecast.forecaster(), Some(forecast))),
        )
    }

    fn rank<'a, I>(&self, history: I) -> Vec<LeaderboardEntry>
    where
        I: Iterator<Item = (&'a ForecasterId, Option<&'a ResolvedForecast>)>,
    {
        let mut grouped: BTreeMap<&ForecasterId, (usize, Vec<&ResolvedForecast>)> = BTreeMap::new();
        for (forecaster, resolved) in history {
            let (total, scored) = grouped.entry(forecaster).or_default();
            *total += 1;
            scored.extend(resolved);
        }

        let mut entries = grouped
            .into_iter()
            .map(|(forecaster, (total, scored))| {
                let scores = scored
                    .iter()
                    .map(|forecast| forecast.brier_score())
                    .collect::<Vec<_>>();
                let avg_brier_score = self.scorer.average(&scores);
                LeaderboardEntry {
                    rank: 0,
                    forecaster: forecaster.clone(),
                    avg_brier_score,
                    calibration_index: self.calibration_index(scored.iter().copied()),
                    total_forecasts: total,
                    resolved_forecasts: scored.len(),
                    status: avg_brier_score.map(BrierTier::from_score),
                }
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| {
            compare_scores(a.avg_brier_score, b.avg_brier_score)
                .then_with(|| a.forecaster.cmp(&b.forecaster))
        });
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }
        entries
    }
}

fn bin_index(probability: f64) -> usize {
    INNER_EDGES
        .iter()
        .take_while(|edge| probability >= **edge)
        .count()
}

fn compare_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PendingForecast, Probability, TargetDate, Ticker, UtcDateTime};

    fn pending(forecaster: &str, probability: f64) -> PendingForecast {
        PendingForecast::new(
            ForecasterId::parse(forecaster).expect("valid"),
            Ticker::parse("ASTS").expect("valid"),
            Probability::new(probability).expect("valid"),
            TargetDate::parse("2026-12-31").expect("valid"),
        )
    }

    fn resolved(forecaster: &str, probability: f64, outcome: bool) -> ResolvedForecast {
        let at = UtcDateTime::parse("2027-01-05T12:00:00Z").expect("valid");
        pending(forecaster, probability).resolve(outcome, at)
    }

    #[test]
    fn bins_are_half_open_with_closed_top() {
        assert_eq!(bin_index(0.0), 0);
        assert_eq!(bin_index(0.1999), 0);
        assert_eq!(bin_index(0.2), 1);
        assert_eq!(bin_index(0.6), 3);
        assert_eq!(bin_index(0.8), 4);
        assert_eq!(bin_index(1.0), 4);
    }

    #[test]
    fn perfectly_calibrated_history_scores_one() {
        let history = vec![
            resolved("a", 0.0, false),
            resolved("a", 0.0, false),
            resolved("a", 0.5, true),
            resolved("a", 0.5, false),
            resolved("a", 1.0, true),
        ];
        let analyzer = CalibrationAnalyzer::new();
        assert_eq!(analyzer.calibration_index(&history), Some(1.0));
    }

    #[test]
    fn empty_history_is_undefined() {
        let analyzer = CalibrationAnalyzer::new();
        assert_eq!(analyzer.calibration_index(&Vec::<ResolvedForecast>::new()), None);
    }

    #[test]
    fn averages_deviation_over_non_empty_bins_only() {
        // Band [0.8, 1.0]: mean 0.9, hit rate 0.5 -> gap 0.4.
        // Band [0.0, 0.2): mean 0.1, hit rate 0.0 -> gap 0.1.
        let history = vec![
            resolved("a", 0.9, true),
            resolved("a", 0.9, false),
            resolved("a", 0.1, false),
        ];
        let analyzer = CalibrationAnalyzer::new();
        let index = analyzer.calibration_index(&history).expect("defined");
        assert!((index - 0.75).abs() < 1e-12);

        let curve = analyzer.calibration_curve(&history);
        assert_eq!(curve.len(), 5);
        assert_eq!(curve[2].count, 0);
        assert_eq!(curve[2].deviation, None);
        assert_eq!(curve[4].count, 2);
        assert_eq!(curve[4].actual_frequency, Some(0.5));
    }

    #[test]
    fn leaderboard_ranks_lower_brier_first() {
        let records: Vec<ForecastRecord> = vec![
            resolved("sloppy", 0.7, false).into(),
            resolved("sharp", 0.9, true).into(),
            resolved("sharp", 0.2, false).into(),
            pending("sharp", 0.6).into(),
        ];
        let board = CalibrationAnalyzer::new().leaderboard(&records);

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].forecaster.as_str(), "sharp");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].total_forecasts, 3);
        assert_eq!(board[0].resolved_forecasts, 2);
        assert!((board[0].avg_brier_score.expect("scored") - 0.025).abs() < 1e-12);
        assert_eq!(board[0].status, Some(BrierTier::Superforecaster));
        assert_eq!(board[1].forecaster.as_str(), "sloppy");
        assert_eq!(board[1].status, Some(BrierTier::Poor));
    }

    #[test]
    fn resolved_only_leaderboard_ranks_the_lower_average_strictly_ahead() {
        // zoe: 0.16 and 0.00 -> 0.08. abe: 0.04, 0.25 and 0.16 -> 0.15.
        let history = vec![
            resolved("abe", 0.8, true),
            resolved("zoe", 0.6, true),
            resolved("abe", 0.5, true),
            resolved("zoe", 1.0, true),
            resolved("abe", 0.6, true),
        ];
        let board = CalibrationAnalyzer::new().leaderboard_resolved(&history);

        assert_eq!(board.len(), 2);
        assert_eq!((board[0].forecaster.as_str(), board[0].rank), ("zoe", 1));
        assert_eq!((board[1].forecaster.as_str(), board[1].rank), ("abe", 2));
        let zoe = board[0].avg_brier_score.expect("scored");
        let abe = board[1].avg_brier_score.expect("scored");
        assert!((zoe - 0.08).abs() < 1e-12);
        assert!((abe - 0.15).abs() < 1e-12);
        assert!(zoe < abe);
        assert_eq!(board[0].total_forecasts, board[0].resolved_forecasts);
        assert_eq!(board[1].total_forecasts, 3);
    }

    #[test]
    fn forecaster_without_resolutions_is_undefined_and_last() {
        let records: Vec<ForecastRecord> = vec![
            pending("newcomer", 0.5).into(),
            resolved("veteran", 0.4, false).into(),
        ];
        let board = CalibrationAnalyzer::new().leaderboard(&records);

        assert_eq!(board[0].forecaster.as_str(), "veteran");
        let newcomer = &board[1];
        assert_eq!(newcomer.total_forecasts, 1);
        assert_eq!(newcomer.resolved_forecasts, 0);
        assert_eq!(newcomer.avg_brier_score, None);
        assert_eq!(newcomer.calibration_index, None);
        assert_eq!(newcomer.status, None);
    }
}
