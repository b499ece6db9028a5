//! Pillar scorecards.
//!
//! One scoring module per pillar, all following the same shape: fixed
//! categorical lookup tables and numeric threshold ladders produce
//! sub-factor scores in {1..5}, sub-factors are averaged into named
//! groups, and group scores combine through fixed intra-pillar weights
//! into a pillar score in [1.0, 5.0].
//!
//! Every scorer is total: each enumerated value is mapped, and ratio
//! sub-factors with a non-positive denominator route to the worst
//! bucket instead of failing.

pub mod aggregate;
pub mod collateral;
pub mod credit;
pub mod market;
pub mod structure;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Score;

/// Identifies one of the four scorecard pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarId {
    Collateral,
    Credit,
    Structure,
    Market,
}

impl fmt::Display for PillarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PillarId::Collateral => "collateral",
            PillarId::Credit => "credit",
            PillarId::Structure => "structure",
            PillarId::Market => "market",
        };
        write!(f, "{name}")
    }
}

/// Score of one named sub-factor group inside a pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupScore {
    pub name: String,
    /// Intra-pillar weight of this group (weights sum to 1 per pillar).
    pub weight: Decimal,
    pub score: Score,
}

impl GroupScore {
    fn new(name: &str, weight: Decimal, score: Score) -> Self {
        GroupScore {
            name: name.to_string(),
            weight,
            score,
        }
    }
}

/// The result of scoring one pillar: the weighted pillar score plus the
/// per-group detail behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarBreakdown {
    pub pillar: PillarId,
    pub score: Score,
    pub groups: Vec<GroupScore>,
}

impl PillarBreakdown {
    fn from_groups(pillar: PillarId, groups: Vec<GroupScore>) -> Self {
        let score = groups.iter().map(|g| g.weight * g.score).sum();
        PillarBreakdown {
            pillar,
            score: clamp_score(score),
            groups,
        }
    }
}

/// Unweighted arithmetic mean of sub-factor scores. An empty slice
/// degrades to the worst score.
fn mean(scores: &[Decimal]) -> Decimal {
    if scores.is_empty() {
        return Decimal::ONE;
    }
    let sum: Decimal = scores.iter().sum();
    sum / Decimal::from(scores.len() as u64)
}

/// Pin a score into the [1.0, 5.0] scale.
fn clamp_score(score: Score) -> Score {
    score.max(Decimal::ONE).min(dec!(5))
}
