//! Market-scenario pillar: the macro and property-cycle backdrop the
//! note will amortize through.
//!
//! Two groups, equally weighted: macro environment and property market
//! cycle.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{mean, GroupScore, PillarBreakdown, PillarId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRateTrend {
    Falling,
    Stable,
    Rising,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflationOutlook {
    Anchored,
    Moderate,
    Unanchored,
}

/// Funding conditions in the local credit market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingConditions {
    Abundant,
    Normal,
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyPipeline {
    Low,
    Moderate,
    High,
}

/// Input record for the market-scenario pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInput {
    pub policy_rate_trend: PolicyRateTrend,
    pub inflation_outlook: InflationOutlook,
    pub funding_conditions: FundingConditions,
    /// 12-month regional sale-price momentum, in percent.
    pub price_momentum_12m_pct: Decimal,
    /// Regional vacancy rate, in percent.
    pub vacancy_rate_pct: Decimal,
    pub supply_pipeline: SupplyPipeline,
}

/// Score the market-scenario pillar. Pure and total over the input domain.
pub fn score_market(input: &MarketInput) -> PillarBreakdown {
    let macro_env = mean(&[
        match input.policy_rate_trend {
            PolicyRateTrend::Falling => dec!(5),
            PolicyRateTrend::Stable => dec!(4),
            PolicyRateTrend::Rising => dec!(2),
        },
        match input.inflation_outlook {
            InflationOutlook::Anchored => dec!(5),
            InflationOutlook::Moderate => dec!(3),
            InflationOutlook::Unanchored => dec!(1),
        },
        match input.funding_conditions {
            FundingConditions::Abundant => dec!(5),
            FundingConditions::Normal => dec!(3),
            FundingConditions::Restricted => dec!(1),
        },
    ]);

    let property_cycle = mean(&[
        if input.price_momentum_12m_pct > dec!(7.5) {
            dec!(5)
        } else if input.price_momentum_12m_pct > Decimal::ZERO {
            dec!(4)
        } else {
            dec!(2)
        },
        if input.vacancy_rate_pct < dec!(5) {
            dec!(5)
        } else if input.vacancy_rate_pct <= dec!(10) {
            dec!(3)
        } else {
            dec!(1)
        },
        match input.supply_pipeline {
            SupplyPipeline::Low => dec!(5),
            SupplyPipeline::Moderate => dec!(3),
            SupplyPipeline::High => dec!(1),
        },
    ]);

    PillarBreakdown::from_groups(
        PillarId::Market,
        vec![
            GroupScore::new("macro_environment", dec!(0.50), macro_env),
            GroupScore::new("property_cycle", dec!(0.50), property_cycle),
        ],
    )
}
