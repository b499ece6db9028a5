//! Note-structure pillar: legal, financial and operational protections.
//!
//! Two conditionally weighted components: the structural assessment and
//! the surveillance (realised performance) assessment. A new issuance is
//! judged mostly on structure (70/30); once payment history exists the
//! surveillance weight rises (50/50).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{mean, GroupScore, PillarBreakdown, PillarId};
use crate::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuerReputation {
    Tier1Bank,
    MidSizeInstitution,
    NicheSecuritizer,
    UnknownOrNegative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServicerQuality {
    InternalSpecialized,
    ExternalTier1,
    ExternalStandard,
    WeakTrackRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterfallClarity {
    ClearAndDefined,
    MarketStandard,
    Ambiguous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalOpinionQuality {
    Tier1Firm,
    MarketStandard,
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingQuality {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovenantStrength {
    Strong,
    MarketStandard,
    WeakOrAbsent,
}

/// Credit enhancements beyond the fiduciary lien itself. Each one adds
/// a capped bonus to the structural score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalGuarantee {
    PersonalGuarantee,
    ReceivablesAssignment,
    FinancialCollateralPledge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenegotiationHistory {
    None,
    IsolatedSuccessful,
    RecurrentOrLossy,
}

/// Surveillance data. Absent for a new issuance; the neutral score
/// stands in until the note has realised performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SurveillanceData {
    New,
    Seasoned {
        /// Balance more than 90 days past due.
        delinquent_balance_90d: Money,
        /// Average number of installments in arrears per delinquent debtor.
        avg_installments_in_arrears: u32,
        renegotiations: RenegotiationHistory,
    },
}

/// Input record for the structure pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureInput {
    pub issuer_reputation: IssuerReputation,
    pub servicer_quality: ServicerQuality,
    /// Reserve fund size in number of monthly payments covered.
    pub reserve_fund_payments: Decimal,
    /// Whether the reserve fund must be replenished after a draw.
    pub reserve_replenishment_rule: bool,
    /// Whether operating expenses are subordinated to investor payments.
    pub expenses_subordinated: bool,
    pub waterfall_clarity: WaterfallClarity,
    pub legal_opinion: LegalOpinionQuality,
    pub reporting_quality: ReportingQuality,
    pub covenants: CovenantStrength,
    pub additional_guarantees: Vec<AdditionalGuarantee>,
    /// Total outstanding balance, denominator of the delinquency ratio.
    pub outstanding_balance: Money,
    pub surveillance: SurveillanceData,
}

const NEUTRAL_SURVEILLANCE: Decimal = dec!(4.0);
const GUARANTEE_BONUS: Decimal = dec!(0.25);

/// Score the structure pillar. Pure and total over the input domain.
pub fn score_structure(input: &StructureInput) -> PillarBreakdown {
    let structural = structural_score(input);
    let surveillance = surveillance_score(input);

    let structural_weight = match input.surveillance {
        SurveillanceData::New => dec!(0.70),
        SurveillanceData::Seasoned { .. } => dec!(0.50),
    };
    let surveillance_weight = Decimal::ONE - structural_weight;

    PillarBreakdown::from_groups(
        PillarId::Structure,
        vec![
            GroupScore::new("structural", structural_weight, structural),
            GroupScore::new("surveillance", surveillance_weight, surveillance),
        ],
    )
}

fn structural_score(input: &StructureInput) -> Decimal {
    let base = mean(&[
        match input.issuer_reputation {
            IssuerReputation::Tier1Bank => dec!(5),
            IssuerReputation::MidSizeInstitution => dec!(4),
            IssuerReputation::NicheSecuritizer => dec!(3),
            IssuerReputation::UnknownOrNegative => dec!(1),
        },
        match input.servicer_quality {
            ServicerQuality::InternalSpecialized => dec!(5),
            ServicerQuality::ExternalTier1 => dec!(4),
            ServicerQuality::ExternalStandard => dec!(3),
            ServicerQuality::WeakTrackRecord => dec!(1),
        },
        reserve_fund_score(input),
        match input.waterfall_clarity {
            WaterfallClarity::ClearAndDefined => dec!(5),
            WaterfallClarity::MarketStandard => dec!(4),
            WaterfallClarity::Ambiguous => dec!(2),
        },
        if input.expenses_subordinated { dec!(5) } else { dec!(3) },
        match input.legal_opinion {
            LegalOpinionQuality::Tier1Firm => dec!(5),
            LegalOpinionQuality::MarketStandard => dec!(4),
            LegalOpinionQuality::Limited => dec!(2),
        },
        match input.reporting_quality {
            ReportingQuality::High => dec!(5),
            ReportingQuality::Medium => dec!(3),
            ReportingQuality::Low => dec!(1),
        },
        match input.covenants {
            CovenantStrength::Strong => dec!(5),
            CovenantStrength::MarketStandard => dec!(3),
            CovenantStrength::WeakOrAbsent => dec!(1),
        },
    ]);

    // Enhancement bonus, capped at the top of the scale.
    let bonus = GUARANTEE_BONUS * Decimal::from(input.additional_guarantees.len() as u64);
    (base + bonus).min(dec!(5))
}

fn reserve_fund_score(input: &StructureInput) -> Decimal {
    let base = if input.reserve_fund_payments >= dec!(3) {
        dec!(5)
    } else if input.reserve_fund_payments >= dec!(1) {
        dec!(3)
    } else {
        dec!(1)
    };
    if input.reserve_replenishment_rule {
        (base + Decimal::ONE).min(dec!(5))
    } else {
        base
    }
}

fn surveillance_score(input: &StructureInput) -> Decimal {
    match &input.surveillance {
        SurveillanceData::New => NEUTRAL_SURVEILLANCE,
        SurveillanceData::Seasoned {
            delinquent_balance_90d,
            avg_installments_in_arrears,
            renegotiations,
        } => {
            // A zero total balance leaves nothing to be delinquent on.
            let delinquency_pct = if input.outstanding_balance > Decimal::ZERO {
                delinquent_balance_90d / input.outstanding_balance * dec!(100)
            } else {
                Decimal::ZERO
            };
            mean(&[
                if delinquency_pct.is_zero() {
                    dec!(5)
                } else if delinquency_pct <= dec!(3) {
                    dec!(3)
                } else if delinquency_pct <= dec!(7) {
                    dec!(2)
                } else {
                    dec!(1)
                },
                match avg_installments_in_arrears {
                    0 => dec!(5),
                    1 | 2 => dec!(3),
                    _ => dec!(1),
                },
                match renegotiations {
                    RenegotiationHistory::None => dec!(5),
                    RenegotiationHistory::IsolatedSuccessful => dec!(4),
                    RenegotiationHistory::RecurrentOrLossy => dec!(1),
                },
            ])
        }
    }
}
