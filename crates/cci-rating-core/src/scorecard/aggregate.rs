//! Weighted aggregation of pillar scores into the final score and base
//! grade, plus the committee notch adjustment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PillarId;
use crate::error::RatingError;
use crate::scale::RatingGrade;
use crate::types::Score;
use crate::RatingResult;

/// Tolerance when checking that weights sum to one.
const WEIGHT_TOLERANCE: Decimal = dec!(0.000001);

/// Committee adjustments are bounded to three notches either way.
pub const MAX_NOTCHES: i32 = 3;

/// Pillar weights. Must be non-negative and sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(BTreeMap<PillarId, Decimal>);

impl Default for Weights {
    /// The canonical four-pillar scheme: collateral 40%, credit 35%,
    /// structure 15%, market scenario 10%.
    fn default() -> Self {
        Weights(BTreeMap::from([
            (PillarId::Collateral, dec!(0.40)),
            (PillarId::Credit, dec!(0.35)),
            (PillarId::Structure, dec!(0.15)),
            (PillarId::Market, dec!(0.10)),
        ]))
    }
}

impl Weights {
    pub fn new(entries: impl IntoIterator<Item = (PillarId, Decimal)>) -> Self {
        Weights(entries.into_iter().collect())
    }

    pub fn get(&self, pillar: PillarId) -> Option<Decimal> {
        self.0.get(&pillar).copied()
    }

    pub fn pillars(&self) -> impl Iterator<Item = PillarId> + '_ {
        self.0.keys().copied()
    }

    pub fn validate(&self) -> RatingResult<()> {
        if self.0.is_empty() {
            return Err(RatingError::InvalidWeights("weights map is empty".into()));
        }
        for (pillar, w) in &self.0 {
            if *w < Decimal::ZERO {
                return Err(RatingError::InvalidWeights(format!(
                    "weight for pillar '{pillar}' is negative ({w})"
                )));
            }
        }
        let sum: Decimal = self.0.values().sum();
        if (sum - Decimal::ONE).abs() > WEIGHT_TOLERANCE {
            return Err(RatingError::InvalidWeights(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// What to do when a weighted pillar has not been scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPillarPolicy {
    /// Refuse to aggregate an incomplete scorecard.
    #[default]
    Reject,
    /// Explicit opt-in: substitute the worst score (1.0) and proceed.
    WorstCase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationOutput {
    pub final_score: Score,
    pub base_grade: RatingGrade,
}

/// Combine pillar scores through the weights into the final score and
/// map it onto the rating scale.
///
/// Every scored pillar must be present in the weights set; a weighted
/// pillar without a score is handled per `policy`.
pub fn aggregate(
    scores: &BTreeMap<PillarId, Score>,
    weights: &Weights,
    policy: MissingPillarPolicy,
) -> RatingResult<AggregationOutput> {
    weights.validate()?;

    for pillar in scores.keys() {
        if weights.get(*pillar).is_none() {
            return Err(RatingError::InvalidWeights(format!(
                "pillar '{pillar}' was scored but has no weight"
            )));
        }
    }

    let mut final_score = Decimal::ZERO;
    for pillar in weights.pillars() {
        let weight = weights.get(pillar).unwrap_or_default();
        let score = match scores.get(&pillar) {
            Some(s) => {
                if *s < Decimal::ONE || *s > dec!(5) {
                    return Err(RatingError::InvalidInput {
                        field: "scores".into(),
                        reason: format!("pillar '{pillar}' score {s} outside [1.0, 5.0]"),
                    });
                }
                *s
            }
            None => match policy {
                MissingPillarPolicy::Reject => {
                    return Err(RatingError::IncompleteScorecard(format!(
                        "pillar '{pillar}' has not been scored"
                    )))
                }
                MissingPillarPolicy::WorstCase => Decimal::ONE,
            },
        };
        final_score += weight * score;
    }

    Ok(AggregationOutput {
        final_score,
        base_grade: RatingGrade::from_score(final_score),
    })
}

/// Apply the committee's discretionary notch adjustment. The shift
/// saturates at the scale bounds; a notch value outside [-3, 3] is a
/// caller defect.
pub fn apply_notch(base_grade: RatingGrade, notches: i32) -> RatingResult<RatingGrade> {
    if notches.abs() > MAX_NOTCHES {
        return Err(RatingError::InvalidInput {
            field: "notches".into(),
            reason: format!("adjustment must be within [-{MAX_NOTCHES}, {MAX_NOTCHES}], got {notches}"),
        });
    }
    Ok(base_grade.shift(notches))
}
