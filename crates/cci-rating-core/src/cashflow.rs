//! Amortization schedule generation for a loan-style note.
//!
//! Two conventions: constant principal installment (SAC-style) and
//! constant total installment (Price-style annuity). The monthly rate
//! is derived from the nominal annual rate by compounding:
//! `(1 + annual)^(1/12) - 1`.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RatingError;
use crate::types::{Money, Rate};
use crate::RatingResult;

/// A residual balance at or below this is treated as fully amortized.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Rate index the note accrues against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    InflationLinked,
    Floating,
    Fixed,
}

/// Amortization convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationSystem {
    /// Constant principal installment each period (SAC).
    EqualPrincipal,
    /// Constant total installment each period (Price / annuity).
    EqualInstallment,
}

/// Commercial terms of the note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationTerms {
    pub principal: Money,
    /// Nominal annual rate as a decimal (0.115 = 11.5% a.a.).
    pub annual_rate: Rate,
    pub index: IndexType,
    pub issue_date: NaiveDate,
    pub tenor_months: u32,
    pub amortization: AmortizationSystem,
}

/// One row of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    /// 1-based period index.
    pub period: u32,
    pub due_date: NaiveDate,
    pub interest: Money,
    pub principal_payment: Money,
    pub total_payment: Money,
    pub closing_balance: Money,
}

/// Monthly rate equivalent to `annual` under monthly compounding.
pub fn monthly_rate(annual: Rate) -> RatingResult<Rate> {
    if annual <= dec!(-1) {
        return Err(RatingError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate must be greater than -100%.".into(),
        });
    }
    Ok((Decimal::ONE + annual).powd(Decimal::ONE / dec!(12)) - Decimal::ONE)
}

/// Generate the full amortization schedule.
///
/// The schedule is finite: at most `tenor_months` rows, ending early
/// once the balance falls within `BALANCE_EPSILON` of zero. The final
/// principal installment is capped at the outstanding balance so the
/// schedule lands exactly on zero.
pub fn generate_schedule(terms: &OperationTerms) -> RatingResult<Vec<CashFlowPeriod>> {
    validate_terms(terms)?;

    let rate = monthly_rate(terms.annual_rate)?;
    let tenor = Decimal::from(terms.tenor_months);
    let level_principal = terms.principal / tenor;

    let mut schedule = Vec::with_capacity(terms.tenor_months as usize);
    let mut balance = terms.principal;

    for period in 1..=terms.tenor_months {
        let interest = balance * rate;

        let mut principal_payment = match terms.amortization {
            AmortizationSystem::EqualPrincipal => level_principal,
            AmortizationSystem::EqualInstallment => {
                let remaining = terms.tenor_months - period + 1;
                annuity_payment(balance, rate, remaining) - interest
            }
        };
        if period == terms.tenor_months || principal_payment > balance {
            principal_payment = balance;
        }

        balance -= principal_payment;

        let due_date = terms
            .issue_date
            .checked_add_months(Months::new(period))
            .ok_or_else(|| {
                RatingError::DateError(format!("due date overflow at period {period}"))
            })?;

        schedule.push(CashFlowPeriod {
            period,
            due_date,
            interest,
            principal_payment,
            total_payment: interest + principal_payment,
            closing_balance: balance,
        });

        if balance <= BALANCE_EPSILON {
            break;
        }
    }

    Ok(schedule)
}

/// Level annuity payment on `balance` over `periods` at the periodic
/// `rate`. A zero rate degenerates to straight-line repayment.
fn annuity_payment(balance: Money, rate: Rate, periods: u32) -> Money {
    if rate.is_zero() {
        return balance / Decimal::from(periods);
    }
    let factor = (Decimal::ONE + rate).powd(Decimal::from(periods));
    balance * rate * factor / (factor - Decimal::ONE)
}

fn validate_terms(terms: &OperationTerms) -> RatingResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(RatingError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive.".into(),
        });
    }
    if terms.tenor_months == 0 {
        return Err(RatingError::InvalidInput {
            field: "tenor_months".into(),
            reason: "Tenor must be at least one month.".into(),
        });
    }
    if terms.annual_rate <= dec!(-1) {
        return Err(RatingError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate must be greater than -100%.".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    pub(crate) fn sample_terms() -> OperationTerms {
        OperationTerms {
            principal: dec!(1500000),
            annual_rate: dec!(0.115),
            index: IndexType::InflationLinked,
            issue_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            tenor_months: 120,
            amortization: AmortizationSystem::EqualPrincipal,
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_equal_principal_reference_scenario() {
        // 1.5M at 11.5% a.a. over 120 months, constant principal.
        let schedule = generate_schedule(&sample_terms()).unwrap();
        assert_eq!(schedule.len(), 120);

        // Principal installment is 12,500 every period.
        for row in &schedule {
            assert_eq!(row.principal_payment, dec!(12500));
        }

        // First interest = principal * ((1.115)^(1/12) - 1) ~ 13,668.9.
        let expected_first = dec!(1500000) * monthly_rate(dec!(0.115)).unwrap();
        assert_close(schedule[0].interest, expected_first, dec!(0.01));
        assert!(expected_first > dec!(13600) && expected_first < dec!(13750));

        // Lands exactly on zero.
        assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_principal_installments_sum_to_principal() {
        for amortization in [
            AmortizationSystem::EqualPrincipal,
            AmortizationSystem::EqualInstallment,
        ] {
            let terms = OperationTerms {
                amortization,
                ..sample_terms()
            };
            let schedule = generate_schedule(&terms).unwrap();
            let total: Decimal = schedule.iter().map(|r| r.principal_payment).sum();
            assert_close(total, terms.principal, dec!(0.01));
            assert!(schedule.len() <= terms.tenor_months as usize);
        }
    }

    #[test]
    fn test_balance_monotonically_non_increasing() {
        let terms = OperationTerms {
            amortization: AmortizationSystem::EqualInstallment,
            ..sample_terms()
        };
        let schedule = generate_schedule(&terms).unwrap();
        let mut prev = terms.principal;
        for row in &schedule {
            assert!(row.closing_balance <= prev);
            prev = row.closing_balance;
        }
        assert!(prev <= dec!(0.01));
    }

    #[test]
    fn test_payment_is_interest_plus_principal() {
        let schedule = generate_schedule(&sample_terms()).unwrap();
        for row in &schedule {
            assert_eq!(row.total_payment, row.interest + row.principal_payment);
        }
    }

    #[test]
    fn test_equal_installment_payments_are_level() {
        let terms = OperationTerms {
            amortization: AmortizationSystem::EqualInstallment,
            ..sample_terms()
        };
        let schedule = generate_schedule(&terms).unwrap();
        let first = schedule[0].total_payment;
        for row in &schedule {
            assert_close(row.total_payment, first, dec!(0.01));
        }
    }

    #[test]
    fn test_zero_rate_degenerates_to_straight_line() {
        let terms = OperationTerms {
            annual_rate: Decimal::ZERO,
            amortization: AmortizationSystem::EqualInstallment,
            tenor_months: 12,
            principal: dec!(120000),
            ..sample_terms()
        };
        let schedule = generate_schedule(&terms).unwrap();
        assert_eq!(schedule.len(), 12);
        for row in &schedule {
            assert_eq!(row.interest, Decimal::ZERO);
            assert_eq!(row.principal_payment, dec!(10000));
        }
    }

    #[test]
    fn test_due_dates_advance_monthly() {
        let terms = OperationTerms {
            tenor_months: 3,
            ..sample_terms()
        };
        let schedule = generate_schedule(&terms).unwrap();
        assert_eq!(
            schedule[0].due_date,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(
            schedule[2].due_date,
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
        );
    }

    #[test]
    fn test_monthly_rate_compounding() {
        // (1 + m)^12 should recover the annual rate.
        let m = monthly_rate(dec!(0.115)).unwrap();
        let annual = (Decimal::ONE + m).powd(dec!(12)) - Decimal::ONE;
        assert_close(annual, dec!(0.115), dec!(0.000001));
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut terms = sample_terms();
        terms.principal = Decimal::ZERO;
        assert!(generate_schedule(&terms).is_err());

        let mut terms = sample_terms();
        terms.tenor_months = 0;
        assert!(generate_schedule(&terms).is_err());

        let mut terms = sample_terms();
        terms.annual_rate = dec!(-1);
        assert!(generate_schedule(&terms).is_err());
    }

    #[test]
    fn test_single_period_schedule() {
        let terms = OperationTerms {
            tenor_months: 1,
            ..sample_terms()
        };
        let schedule = generate_schedule(&terms).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].principal_payment, terms.principal);
        assert_eq!(schedule[0].closing_balance, Decimal::ZERO);
    }
}
