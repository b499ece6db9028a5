//! Collateral pillar: quality and liquidity of the real-estate backing.
//!
//! Three groups: valuation & location (50%), physical characteristics
//! (25%), legal due diligence (25%).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{mean, GroupScore, PillarBreakdown, PillarId};
use crate::types::Money;

/// Credibility tier of the firm that produced the appraisal report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppraiserCredibility {
    NationalTier1,
    KnownRegional,
    LittleKnown,
}

/// Whether the appraisal report's comparable sales support its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparablesQuality {
    Adequate,
    Partial,
    Inadequate,
}

/// Risk of new supply flooding the property's submarket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductMarketFit {
    Ideal,
    Adequate,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeveloperReputation {
    Tier1,
    Average,
    WeakOrUnknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConservationState {
    NewOrRenovated,
    WellMaintained,
    NeedsRepairs,
    Poor,
}

/// Lien/encumbrance certificates checked during the legal review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    PropertyTax,
    Debtor,
    PriorOwners,
    Developer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalRisk {
    None,
    LowManaged,
    NeedsAssessment,
}

/// Input record for the collateral pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralInput {
    /// Appraised value of the property.
    pub appraisal_value: Money,
    /// Outstanding balance of the backing credit.
    pub outstanding_balance: Money,
    /// Stress haircut applied to the appraised value, in percent (15.0 = 15%).
    pub value_stress_pct: Decimal,
    pub appraiser_credibility: AppraiserCredibility,
    pub comparables_quality: ComparablesQuality,
    /// 12-month regional sale-price index variation, in percent.
    pub price_index_12m_pct: Decimal,
    /// Estimated absorption (time-to-sell) in days.
    pub absorption_days: Decimal,
    pub supply_risk: SupplyRisk,
    pub product_market_fit: ProductMarketFit,
    pub developer_reputation: DeveloperReputation,
    pub conservation_state: ConservationState,
    /// Whether a 20-year chain-of-title review was performed.
    pub chain_of_title_reviewed: bool,
    /// Whether the absence of property-attached debts was verified.
    pub liens_cleared: bool,
    pub verified_certificates: Vec<CertificateKind>,
    pub environmental_risk: EnvironmentalRisk,
}

/// Score the collateral pillar. Pure and total over the input domain.
pub fn score_collateral(input: &CollateralInput) -> PillarBreakdown {
    let valuation = valuation_location_score(input);
    let physical = physical_score(input);
    let legal = legal_score(input);

    PillarBreakdown::from_groups(
        PillarId::Collateral,
        vec![
            GroupScore::new("valuation_location", dec!(0.50), valuation),
            GroupScore::new("physical", dec!(0.25), physical),
            GroupScore::new("legal", dec!(0.25), legal),
        ],
    )
}

fn valuation_location_score(input: &CollateralInput) -> Decimal {
    let mut scores = vec![
        match input.appraiser_credibility {
            AppraiserCredibility::NationalTier1 => dec!(5),
            AppraiserCredibility::KnownRegional => dec!(4),
            AppraiserCredibility::LittleKnown => dec!(2),
        },
        match input.comparables_quality {
            ComparablesQuality::Adequate => dec!(5),
            ComparablesQuality::Partial => dec!(3),
            ComparablesQuality::Inadequate => dec!(1),
        },
        stressed_ltv_score(input),
    ];

    scores.push(if input.price_index_12m_pct > dec!(7.5) {
        dec!(5)
    } else if input.price_index_12m_pct > Decimal::ZERO {
        dec!(4)
    } else {
        dec!(2)
    });

    scores.push(if input.absorption_days <= dec!(90) {
        dec!(5)
    } else if input.absorption_days <= dec!(180) {
        dec!(3)
    } else {
        dec!(1)
    });

    scores.push(match input.supply_risk {
        SupplyRisk::Low => dec!(5),
        SupplyRisk::Medium => dec!(3),
        SupplyRisk::High => dec!(1),
    });

    mean(&scores)
}

/// LTV against the stress-haircut value. A stressed value of zero or
/// less means the collateral offers no cover, which is the worst bucket
/// rather than a division failure.
fn stressed_ltv_score(input: &CollateralInput) -> Decimal {
    let stressed_value =
        input.appraisal_value * (Decimal::ONE - input.value_stress_pct / dec!(100));
    if stressed_value <= Decimal::ZERO {
        return dec!(1);
    }
    let ltv_pct = input.outstanding_balance / stressed_value * dec!(100);
    if ltv_pct < dec!(70) {
        dec!(5)
    } else if ltv_pct < dec!(85) {
        dec!(3)
    } else {
        dec!(1)
    }
}

fn physical_score(input: &CollateralInput) -> Decimal {
    mean(&[
        match input.product_market_fit {
            ProductMarketFit::Ideal => dec!(5),
            ProductMarketFit::Adequate => dec!(4),
            ProductMarketFit::Poor => dec!(2),
        },
        match input.developer_reputation {
            DeveloperReputation::Tier1 => dec!(5),
            DeveloperReputation::Average => dec!(3),
            DeveloperReputation::WeakOrUnknown => dec!(2),
        },
        match input.conservation_state {
            ConservationState::NewOrRenovated => dec!(5),
            ConservationState::WellMaintained => dec!(4),
            ConservationState::NeedsRepairs => dec!(2),
            ConservationState::Poor => dec!(1),
        },
    ])
}

fn legal_score(input: &CollateralInput) -> Decimal {
    // One point per verified certificate on top of the floor, capped.
    let certificates = Decimal::from(1 + input.verified_certificates.len() as u64).min(dec!(5));
    mean(&[
        if input.chain_of_title_reviewed { dec!(5) } else { dec!(2) },
        if input.liens_cleared { dec!(5) } else { dec!(1) },
        certificates,
        match input.environmental_risk {
            EnvironmentalRisk::None => dec!(5),
            EnvironmentalRisk::LowManaged => dec!(4),
            EnvironmentalRisk::NeedsAssessment => dec!(2),
        },
    ])
}
