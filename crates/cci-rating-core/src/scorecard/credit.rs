//! Credit & borrower pillar: capacity and willingness to pay.
//!
//! Three groups: credit structure (40%), borrower profile (40%) and
//! payment performance (20%). The borrower group is modular: a single
//! credit is analysed on the debtor (individual or corporate), a
//! portfolio on its granularity and concentration. Performance starts
//! from a fixed neutral score for notes with no payment history yet.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{mean, GroupScore, PillarBreakdown, PillarId};
use crate::cashflow::AmortizationSystem;
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    Acquisition,
    Construction,
    HomeEquity,
}

/// Bureau score tier of an individual debtor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BureauScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetWorthTier {
    High,
    Medium,
    Low,
}

/// Who stands behind the backing credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BorrowerProfile {
    /// A single individual debtor.
    Individual {
        monthly_installment: Money,
        monthly_income: Money,
        bureau_score: BureauScoreTier,
        net_worth: NetWorthTier,
    },
    /// A single corporate debtor.
    Corporate {
        net_debt_to_ebitda: Decimal,
        current_ratio: Decimal,
        dscr: Decimal,
    },
    /// A portfolio of credits.
    Portfolio {
        debtor_count: u32,
        /// Share of the five largest debtors, in percent.
        top5_concentration_pct: Decimal,
    },
}

/// Current payment-history status once a note is seasoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    CurrentOver12Months,
    CurrentUnder12Months,
    HasArrears,
}

/// Payment history of the note. New issuances carry no realised
/// performance, so that branch carries no data and scores a fixed
/// neutral value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentHistory {
    New,
    Seasoned {
        status: PaymentStatus,
        /// Share of the balance more than 90 days past due, in percent.
        delinquency_90d_pct: Decimal,
    },
}

/// Input record for the credit pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditInput {
    /// Appraised collateral value, repeated here for the LTV ratio.
    pub appraisal_value: Money,
    pub outstanding_balance: Money,
    pub purpose: LoanPurpose,
    pub amortization: AmortizationSystem,
    pub borrower: BorrowerProfile,
    pub history: PaymentHistory,
}

/// Neutral performance score applied while the note has no history.
const NEUTRAL_PERFORMANCE: Decimal = dec!(4.0);

/// Score the credit pillar. Pure and total over the input domain.
pub fn score_credit(input: &CreditInput) -> PillarBreakdown {
    let structure = credit_structure_score(input);
    let borrower = borrower_score(&input.borrower);
    let performance = performance_score(&input.history);

    PillarBreakdown::from_groups(
        PillarId::Credit,
        vec![
            GroupScore::new("credit_structure", dec!(0.40), structure),
            GroupScore::new("borrower", dec!(0.40), borrower),
            GroupScore::new("performance", dec!(0.20), performance),
        ],
    )
}

fn credit_structure_score(input: &CreditInput) -> Decimal {
    mean(&[
        ltv_score(input),
        match input.purpose {
            LoanPurpose::Acquisition => dec!(5),
            LoanPurpose::Construction => dec!(3),
            LoanPurpose::HomeEquity => dec!(2),
        },
        // Constant-principal amortization deleverages faster.
        match input.amortization {
            AmortizationSystem::EqualPrincipal => dec!(5),
            AmortizationSystem::EqualInstallment => dec!(4),
        },
    ])
}

/// A non-positive appraisal value means unbounded LTV: worst bucket,
/// never a division fault.
fn ltv_score(input: &CreditInput) -> Decimal {
    if input.appraisal_value <= Decimal::ZERO {
        return dec!(1);
    }
    let ltv_pct = input.outstanding_balance / input.appraisal_value * dec!(100);
    if ltv_pct < dec!(50) {
        dec!(5)
    } else if ltv_pct <= dec!(70) {
        dec!(3)
    } else {
        dec!(1)
    }
}

fn borrower_score(borrower: &BorrowerProfile) -> Decimal {
    match borrower {
        BorrowerProfile::Individual {
            monthly_installment,
            monthly_income,
            bureau_score,
            net_worth,
        } => mean(&[
            dti_score(*monthly_installment, *monthly_income),
            match bureau_score {
                BureauScoreTier::Excellent => dec!(5),
                BureauScoreTier::Good => dec!(4),
                BureauScoreTier::Fair => dec!(2),
                BureauScoreTier::Poor => dec!(1),
            },
            match net_worth {
                NetWorthTier::High => dec!(5),
                NetWorthTier::Medium => dec!(4),
                NetWorthTier::Low => dec!(2),
            },
        ]),
        BorrowerProfile::Corporate {
            net_debt_to_ebitda,
            current_ratio,
            dscr,
        } => mean(&[
            if *net_debt_to_ebitda < dec!(2.0) {
                dec!(5)
            } else if *net_debt_to_ebitda <= dec!(4.0) {
                dec!(3)
            } else {
                dec!(1)
            },
            if *current_ratio > dec!(1.5) {
                dec!(5)
            } else if *current_ratio >= dec!(1.0) {
                dec!(3)
            } else {
                dec!(1)
            },
            if *dscr > dec!(1.5) {
                dec!(5)
            } else if *dscr >= dec!(1.2) {
                dec!(3)
            } else {
                dec!(1)
            },
        ]),
        BorrowerProfile::Portfolio {
            debtor_count,
            top5_concentration_pct,
        } => mean(&[
            if *debtor_count > 50 {
                dec!(5)
            } else if *debtor_count > 10 {
                dec!(4)
            } else {
                dec!(2)
            },
            if *top5_concentration_pct < dec!(30) {
                dec!(5)
            } else if *top5_concentration_pct <= dec!(50) {
                dec!(3)
            } else {
                dec!(1)
            },
        ]),
    }
}

/// Zero or negative income means unbounded DTI: worst bucket.
fn dti_score(installment: Money, income: Money) -> Decimal {
    if income <= Decimal::ZERO {
        return dec!(1);
    }
    let dti_pct = installment / income * dec!(100);
    if dti_pct <= dec!(30) {
        dec!(5)
    } else if dti_pct <= dec!(40) {
        dec!(3)
    } else {
        dec!(1)
    }
}

fn performance_score(history: &PaymentHistory) -> Decimal {
    match history {
        PaymentHistory::New => NEUTRAL_PERFORMANCE,
        PaymentHistory::Seasoned {
            status,
            delinquency_90d_pct,
        } => mean(&[
            match status {
                PaymentStatus::CurrentOver12Months => dec!(5),
                PaymentStatus::CurrentUnder12Months => dec!(4),
                PaymentStatus::HasArrears => dec!(1),
            },
            if delinquency_90d_pct.is_zero() {
                dec!(5)
            } else if *delinquency_90d_pct <= dec!(2) {
                dec!(3)
            } else {
                dec!(1)
            },
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    pub(crate) fn sample_input() -> CreditInput {
        CreditInput {
            appraisal_value: dec!(2500000),
            outstanding_balance: dec!(1500000),
            purpose: LoanPurpose::Acquisition,
            amortization: AmortizationSystem::EqualPrincipal,
            borrower: BorrowerProfile::Individual {
                monthly_installment: dec!(12000),
                monthly_income: dec!(45000),
                bureau_score: BureauScoreTier::Excellent,
                net_worth: NetWorthTier::High,
            },
            history: PaymentHistory::New,
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_sample_pillar_score() {
        // structure: LTV 60% -> 3, acquisition -> 5, equal-principal -> 5;
        // mean 13/3. borrower: DTI 26.7% -> 5, excellent -> 5, high -> 5;
        // mean 5. performance: new -> 4.0.
        // 13/3 * 0.4 + 5 * 0.4 + 4 * 0.2 = 4.5333...
        let out = score_credit(&sample_input());
        assert_close(out.score, dec!(4.5333), dec!(0.001));
        assert_eq!(out.pillar, PillarId::Credit);
    }

    #[test]
    fn test_new_note_gets_neutral_performance() {
        let out = score_credit(&sample_input());
        let perf = out.groups.iter().find(|g| g.name == "performance").unwrap();
        assert_eq!(perf.score, dec!(4.0));
    }

    #[test]
    fn test_seasoned_clean_history_beats_neutral() {
        let mut input = sample_input();
        input.history = PaymentHistory::Seasoned {
            status: PaymentStatus::CurrentOver12Months,
            delinquency_90d_pct: Decimal::ZERO,
        };
        let out = score_credit(&input);
        let perf = out.groups.iter().find(|g| g.name == "performance").unwrap();
        assert_eq!(perf.score, dec!(5));
    }

    #[test]
    fn test_seasoned_arrears_drags_performance() {
        let mut input = sample_input();
        input.history = PaymentHistory::Seasoned {
            status: PaymentStatus::HasArrears,
            delinquency_90d_pct: dec!(5.0),
        };
        let out = score_credit(&input);
        let perf = out.groups.iter().find(|g| g.name == "performance").unwrap();
        assert_eq!(perf.score, dec!(1));
    }

    #[test]
    fn test_zero_income_routes_to_worst_bucket() {
        assert_eq!(dti_score(dec!(12000), Decimal::ZERO), dec!(1));
        assert_eq!(dti_score(dec!(12000), dec!(-1)), dec!(1));
    }

    #[test]
    fn test_zero_appraisal_routes_to_worst_bucket() {
        let mut input = sample_input();
        input.appraisal_value = Decimal::ZERO;
        assert_eq!(ltv_score(&input), dec!(1));
        let out = score_credit(&input);
        assert!(out.score >= dec!(1) && out.score <= dec!(5));
    }

    #[test]
    fn test_ltv_bands() {
        let mut input = sample_input();
        input.appraisal_value = dec!(1000000);
        input.outstanding_balance = dec!(400000); // 40%
        assert_eq!(ltv_score(&input), dec!(5));
        input.outstanding_balance = dec!(700000); // 70%, boundary inclusive
        assert_eq!(ltv_score(&input), dec!(3));
        input.outstanding_balance = dec!(700001);
        assert_eq!(ltv_score(&input), dec!(1));
    }

    #[test]
    fn test_corporate_borrower_ladders() {
        let strong = BorrowerProfile::Corporate {
            net_debt_to_ebitda: dec!(1.5),
            current_ratio: dec!(1.8),
            dscr: dec!(1.6),
        };
        assert_eq!(borrower_score(&strong), dec!(5));

        let weak = BorrowerProfile::Corporate {
            net_debt_to_ebitda: dec!(5.0),
            current_ratio: dec!(0.8),
            dscr: dec!(1.0),
        };
        assert_eq!(borrower_score(&weak), dec!(1));
    }

    #[test]
    fn test_portfolio_granularity() {
        let granular = BorrowerProfile::Portfolio {
            debtor_count: 120,
            top5_concentration_pct: dec!(12),
        };
        assert_eq!(borrower_score(&granular), dec!(5));

        let concentrated = BorrowerProfile::Portfolio {
            debtor_count: 8,
            top5_concentration_pct: dec!(80),
        };
        assert_eq!(borrower_score(&concentrated), dec!(1.5));
    }

    #[test]
    fn test_equal_installment_scores_lower() {
        let mut input = sample_input();
        input.amortization = AmortizationSystem::EqualInstallment;
        let sac = score_credit(&sample_input());
        let price = score_credit(&input);
        assert!(price.score < sac.score);
    }

    #[test]
    fn test_tagged_history_json_shape() {
        let json = serde_json::to_value(PaymentHistory::New).unwrap();
        assert_eq!(json, serde_json::json!({"state": "new"}));
    }
}
