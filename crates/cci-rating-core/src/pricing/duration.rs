//! Macaulay duration of an amortization schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::cashflow::{monthly_rate, CashFlowPeriod};
use crate::types::Rate;
use crate::RatingResult;

/// Macaulay duration of the schedule in years, discounting at the
/// monthly equivalent of `annual_yield`.
///
/// Degenerate schedules (no payments, or a discounted sum of zero)
/// yield a duration of zero rather than an error.
pub fn macaulay_duration(
    schedule: &[CashFlowPeriod],
    annual_yield: Rate,
) -> RatingResult<Decimal> {
    let rate = monthly_rate(annual_yield)?;
    let base = Decimal::ONE + rate;

    let mut discount = Decimal::ONE;
    let mut discounted_to = 0u32;
    let mut weighted = Decimal::ZERO;
    let mut total = Decimal::ZERO;

    for row in schedule {
        // Discount by the row's period index, not its position, so a
        // sparse or mid-life schedule still prices at the right dates.
        while discounted_to < row.period {
            discount /= base;
            discounted_to += 1;
        }
        let pv = row.total_payment * discount;
        weighted += Decimal::from(row.period) * pv;
        total += pv;
    }

    if total.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(weighted / total / dec!(12))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::cashflow::{generate_schedule, AmortizationSystem, IndexType, OperationTerms};

    fn bullet_at(period: u32, amount: Decimal) -> CashFlowPeriod {
        CashFlowPeriod {
            period,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            interest: Decimal::ZERO,
            principal_payment: amount,
            total_payment: amount,
            closing_balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_single_payment_duration_is_its_maturity() {
        // One payment at month 12 has a duration of exactly one year,
        // whatever the yield.
        let schedule = vec![bullet_at(12, dec!(100000))];
        let duration = macaulay_duration(&schedule, dec!(0.10)).unwrap();
        assert_eq!(duration, dec!(1));
    }

    #[test]
    fn test_empty_schedule_has_zero_duration() {
        let duration = macaulay_duration(&[], dec!(0.10)).unwrap();
        assert_eq!(duration, Decimal::ZERO);
    }

    #[test]
    fn test_amortizing_duration_below_half_tenor() {
        let terms = OperationTerms {
            principal: dec!(1500000),
            annual_rate: dec!(0.115),
            index: IndexType::InflationLinked,
            issue_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            tenor_months: 120,
            amortization: AmortizationSystem::EqualPrincipal,
        };
        let schedule = generate_schedule(&terms).unwrap();
        let duration = macaulay_duration(&schedule, terms.annual_rate).unwrap();
        // A 10y constant-principal schedule is front-loaded: duration
        // sits well inside (0, 5) years.
        assert!(duration > dec!(2) && duration < dec!(5), "got {duration}");
    }

    #[test]
    fn test_sparse_schedule_discounts_by_period_index() {
        // Equal bullets at months 6 and 60 at a 10% yield:
        // PV6 = 50,000 / 1.1^0.5, PV60 = 50,000 / 1.1^5, giving
        // (6*PV6 + 60*PV60) / (PV6 + PV60) / 12 ~ 2.2749 years.
        let schedule = vec![bullet_at(6, dec!(50000)), bullet_at(60, dec!(50000))];
        let duration = macaulay_duration(&schedule, dec!(0.10)).unwrap();
        assert!(
            (duration - dec!(2.2749)).abs() <= dec!(0.001),
            "got {duration}"
        );
    }

    #[test]
    fn test_higher_yield_shortens_duration() {
        let schedule = vec![bullet_at(6, dec!(50000)), bullet_at(60, dec!(50000))];
        let low = macaulay_duration(&schedule, dec!(0.02)).unwrap();
        let high = macaulay_duration(&schedule, dec!(0.20)).unwrap();
        assert!(high < low);
    }

    #[test]
    fn test_negative_yield_below_floor_rejected() {
        assert!(macaulay_duration(&[bullet_at(1, dec!(100))], dec!(-1)).is_err());
    }
}
