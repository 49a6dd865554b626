use foresight_core::{BrierScorer, BrierTier, Probability};
use serde::Serialize;

use crate::cli::ScoreArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ScoreResponseData {
    predicted_probability: f64,
    actual_outcome: bool,
    brier_score: f64,
    tier: BrierTier,
    tier_label: &'static str,
    /// Score of a coin-flip forecaster, for comparison.
    coin_flip_baseline: f64,
}

pub fn run(args: &ScoreArgs) -> Result<CommandResult, CliError> {
    let scorer = BrierScorer::new();
    let actual_outcome = args.outcome.occurred();
    let brier_score = scorer.score(args.probability, actual_outcome)?;
    let tier = scorer.tier(brier_score);

    let data = serde_json::to_value(ScoreResponseData {
        predicted_probability: args.probability,
        actual_outcome,
        brier_score,
        tier,
        tier_label: tier.label(),
        coin_flip_baseline: scorer.baseline(Probability::HALF),
    })?;
    Ok(CommandResult::ok(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Outcome;

    #[test]
    fn scores_a_confident_miss_as_poor() {
        let result = run(&ScoreArgs {
            probability: 0.9,
            outcome: Outcome::Miss,
        })
        .expect("valid");
        let score = result.data["brier_score"].as_f64().expect("number");
        assert!((score - 0.81).abs() < 1e-12);
        assert_eq!(result.data["tier"], "poor");
        assert_eq!(result.data["coin_flip_baseline"], 0.25);
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let err = run(&ScoreArgs {
            probability: 1.5,
            outcome: Outcome::Hit,
        })
        .expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
    }
}
