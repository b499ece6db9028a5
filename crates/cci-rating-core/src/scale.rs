//! The ordinal rating scale for structured real-estate credit notes.
//!
//! Grades run worst to best: D, C, CC, CCC, B, BB, BBB, A, AA, AAA.
//! Rendered with the structured-finance suffix, e.g. `AAA(sf)`.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;
use crate::types::Score;

/// A grade on the rating scale. The derived `Ord` follows scale order,
/// so `RatingGrade::D < RatingGrade::Aaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingGrade {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "CCC")]
    Ccc,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

/// Scale order, worst first. Index arithmetic for notching uses this.
const SCALE: [RatingGrade; 10] = [
    RatingGrade::D,
    RatingGrade::C,
    RatingGrade::Cc,
    RatingGrade::Ccc,
    RatingGrade::B,
    RatingGrade::Bb,
    RatingGrade::Bbb,
    RatingGrade::A,
    RatingGrade::Aa,
    RatingGrade::Aaa,
];

impl RatingGrade {
    /// Map a weighted scorecard result onto the scale.
    ///
    /// Threshold bands are right-open and cover the whole real line: the
    /// top band captures everything at or above its lower bound, the
    /// bottom band everything below the next threshold.
    pub fn from_score(score: Score) -> RatingGrade {
        if score >= dec!(4.75) {
            RatingGrade::Aaa
        } else if score >= dec!(4.25) {
            RatingGrade::Aa
        } else if score >= dec!(3.75) {
            RatingGrade::A
        } else if score >= dec!(3.25) {
            RatingGrade::Bbb
        } else if score >= dec!(2.75) {
            RatingGrade::Bb
        } else if score >= dec!(2.50) {
            RatingGrade::B
        } else if score >= dec!(2.25) {
            RatingGrade::Ccc
        } else if score >= dec!(2.00) {
            RatingGrade::Cc
        } else if score >= dec!(1.50) {
            RatingGrade::C
        } else {
            RatingGrade::D
        }
    }

    /// Move `notches` steps along the scale, saturating at both ends.
    ///
    /// Saturation is the committee-adjustment policy: a downgrade past D
    /// stays at D, an upgrade past AAA stays at AAA.
    pub fn shift(self, notches: i32) -> RatingGrade {
        let idx = self.index() as i64 + notches as i64;
        let idx = idx.clamp(0, (SCALE.len() - 1) as i64);
        SCALE[idx as usize]
    }

    /// Position on the scale, 0 = worst (D).
    pub fn index(self) -> usize {
        SCALE.iter().position(|g| *g == self).unwrap_or(0)
    }

    /// The bare symbol without the instrument-class suffix.
    pub fn symbol(self) -> &'static str {
        match self {
            RatingGrade::D => "D",
            RatingGrade::C => "C",
            RatingGrade::Cc => "CC",
            RatingGrade::Ccc => "CCC",
            RatingGrade::B => "B",
            RatingGrade::Bb => "BB",
            RatingGrade::Bbb => "BBB",
            RatingGrade::A => "A",
            RatingGrade::Aa => "AA",
            RatingGrade::Aaa => "AAA",
        }
    }

    /// All grades, worst first.
    pub fn all() -> &'static [RatingGrade] {
        &SCALE
    }
}

impl fmt::Display for RatingGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(sf)", self.symbol())
    }
}

impl FromStr for RatingGrade {
    type Err = RatingError;

    /// Accepts both the bare symbol (`AAA`) and the suffixed form (`AAA(sf)`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.trim().strip_suffix("(sf)").unwrap_or(s.trim());
        SCALE
            .iter()
            .copied()
            .find(|g| g.symbol().eq_ignore_ascii_case(bare))
            .ok_or_else(|| RatingError::InvalidInput {
                field: "grade".into(),
                reason: format!("'{s}' is not a grade on the rating scale"),
            })
    }
}
