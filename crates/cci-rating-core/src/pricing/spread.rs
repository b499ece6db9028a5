//! Credit spread assignment and indicative rate composition.
//!
//! The spread has three additive parts: a base spread looked up from
//! the assigned grade, a liquidity premium keyed on issue size, and a
//! duration adjustment around a five-year pivot. The total is floored.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::scale::RatingGrade;
use crate::types::{Money, Rate};
use crate::RatingResult;

/// Issues below this size carry the higher liquidity premium.
const LIQUIDITY_THRESHOLD: Money = dec!(5000000);
const SMALL_ISSUE_PREMIUM: Rate = dec!(0.0030);
const LARGE_ISSUE_PREMIUM: Rate = dec!(0.0010);

/// Duration adjustment per year of deviation from the pivot.
const DURATION_PIVOT_YEARS: Decimal = dec!(5);
const DURATION_ADJUSTMENT_PER_YEAR: Rate = dec!(0.0008);

/// No composed spread prices below 50 bps.
const SPREAD_FLOOR: Rate = dec!(0.0050);

/// Base credit spread for a grade, as a decimal. Grades below CCC
/// price at a distressed ceiling.
fn base_spread(grade: RatingGrade) -> Rate {
    match grade {
        RatingGrade::Aaa => dec!(0.0120),
        RatingGrade::Aa => dec!(0.0180),
        RatingGrade::A => dec!(0.0250),
        RatingGrade::Bbb => dec!(0.0330),
        RatingGrade::Bb => dec!(0.0420),
        RatingGrade::B => dec!(0.0600),
        RatingGrade::Ccc => dec!(0.0850),
        RatingGrade::Cc | RatingGrade::C | RatingGrade::D => dec!(0.1000),
    }
}

/// Total credit spread for a grade, duration, and issue size.
pub fn credit_spread(grade: RatingGrade, duration_years: Decimal, issue_size: Money) -> Rate {
    let liquidity = if issue_size < LIQUIDITY_THRESHOLD {
        SMALL_ISSUE_PREMIUM
    } else {
        LARGE_ISSUE_PREMIUM
    };
    let duration_adj = (duration_years - DURATION_PIVOT_YEARS) * DURATION_ADJUSTMENT_PER_YEAR;
    let total = base_spread(grade) + liquidity + duration_adj;
    total.max(SPREAD_FLOOR)
}

/// Indicative rates composed from the spread and market curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResult {
    pub credit_spread: Rate,
    pub credit_spread_bps: Decimal,
    /// Real (inflation-linked) indicative rate.
    pub real_rate: Rate,
    /// Nominal indicative rate via Fisher composition.
    pub nominal_rate: Rate,
    /// Spread over the floating-rate projection.
    pub floating_spread: Rate,
}

/// Compose indicative rates from the reference real curve, the
/// floating-rate projection, and the assigned spread.
///
/// Implied inflation comes from the Fisher relation between the two
/// curves; a degenerate real curve at or below -100% implies zero.
pub fn compose_pricing(
    reference_real_rate: Rate,
    floating_rate_projection: Rate,
    spread: Rate,
) -> RatingResult<PricingResult> {
    let implied_inflation = if reference_real_rate <= dec!(-1) {
        Decimal::ZERO
    } else {
        (Decimal::ONE + floating_rate_projection) / (Decimal::ONE + reference_real_rate)
            - Decimal::ONE
    };

    let real_rate = reference_real_rate + spread;
    let nominal_rate =
        (Decimal::ONE + real_rate) * (Decimal::ONE + implied_inflation) - Decimal::ONE;
    let floating_spread = nominal_rate - floating_rate_projection;

    Ok(PricingResult {
        credit_spread: spread,
        credit_spread_bps: spread * dec!(10000),
        real_rate,
        nominal_rate,
        floating_spread,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_spread_widens_down_the_scale() {
        // Scale order is worst first, so the spread must not widen as
        // the grade improves along it.
        let mut prev = Rate::MAX;
        for grade in RatingGrade::all() {
            let s = credit_spread(*grade, dec!(5), dec!(10000000));
            assert!(s <= prev, "spread widened at {grade}");
            prev = s;
        }
        assert!(
            credit_spread(RatingGrade::Ccc, dec!(5), dec!(10000000))
                > credit_spread(RatingGrade::Aaa, dec!(5), dec!(10000000))
        );
    }

    #[test]
    fn test_top_grade_large_issue_at_pivot() {
        // 120 bps base + 10 bps liquidity, no duration adjustment.
        let s = credit_spread(RatingGrade::Aaa, dec!(5), dec!(10000000));
        assert_eq!(s, dec!(0.0130));
    }

    #[test]
    fn test_small_issue_pays_liquidity_premium() {
        let small = credit_spread(RatingGrade::A, dec!(5), dec!(1500000));
        let large = credit_spread(RatingGrade::A, dec!(5), dec!(5000000));
        assert_eq!(small - large, dec!(0.0020));
    }

    #[test]
    fn test_duration_adjustment_is_signed() {
        let short = credit_spread(RatingGrade::Bbb, dec!(3), dec!(10000000));
        let at_pivot = credit_spread(RatingGrade::Bbb, dec!(5), dec!(10000000));
        let long = credit_spread(RatingGrade::Bbb, dec!(8), dec!(10000000));
        assert!(short < at_pivot);
        assert!(long > at_pivot);
        assert_eq!(long - at_pivot, dec!(0.0024));
    }

    #[test]
    fn test_spread_floor_binds() {
        // Even a hypothetical negative adjustment cannot price below
        // 50 bps.
        let s = credit_spread(RatingGrade::Aaa, dec!(-20), dec!(10000000));
        assert_eq!(s, dec!(0.0050));
    }

    #[test]
    fn test_distressed_grades_share_the_ceiling() {
        let cc = credit_spread(RatingGrade::Cc, dec!(5), dec!(10000000));
        let d = credit_spread(RatingGrade::D, dec!(5), dec!(10000000));
        assert_eq!(cc, d);
        assert_eq!(cc, dec!(0.1010));
    }

    #[test]
    fn test_fisher_composition_reference_values() {
        // Real curve 6.15%, floating projection 10.25%, 120 bps spread.
        let out = compose_pricing(dec!(0.0615), dec!(0.1025), dec!(0.0120)).unwrap();
        assert_close(out.real_rate, dec!(0.0735), dec!(0.000001));
        // Implied inflation = 1.1025/1.0615 - 1 ~ 3.8624%.
        assert_close(out.nominal_rate, dec!(0.114963), dec!(0.00001));
        assert_close(out.floating_spread, dec!(0.012463), dec!(0.00001));
        assert_eq!(out.credit_spread_bps, dec!(120));
    }

    #[test]
    fn test_degenerate_real_curve_implies_zero_inflation() {
        let out = compose_pricing(dec!(-1), dec!(0.10), dec!(0.02)).unwrap();
        // Nominal collapses onto the real rate.
        assert_eq!(out.nominal_rate, out.real_rate);
        assert_eq!(out.real_rate, dec!(-0.98));
    }

    #[test]
    fn test_zero_inflation_when_curves_coincide() {
        let out = compose_pricing(dec!(0.08), dec!(0.08), dec!(0.015)).unwrap();
        assert_close(out.nominal_rate, out.real_rate, dec!(0.000001));
    }
}
