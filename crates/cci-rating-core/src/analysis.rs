//! End-to-end analysis: scorecard, rating, cash flows and indicative
//! pricing in one pass over a single request record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::cashflow::{generate_schedule, CashFlowPeriod, OperationTerms};
use crate::error::RatingError;
use crate::pricing::{compose_pricing, credit_spread, macaulay_duration, PricingResult};
use crate::scale::RatingGrade;
use crate::scorecard::aggregate::{aggregate, apply_notch, MissingPillarPolicy, Weights};
use crate::scorecard::collateral::{score_collateral, CollateralInput};
use crate::scorecard::credit::{score_credit, CreditInput};
use crate::scorecard::market::{score_market, MarketInput};
use crate::scorecard::structure::{score_structure, StructureInput};
use crate::scorecard::PillarBreakdown;
use crate::types::{ComputationOutput, Rate, Score};
use crate::RatingResult;

pub const METHODOLOGY: &str = "cci_four_pillar_scorecard_v1";

/// Market curves the pricing leg composes against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketParams {
    /// Reference real (inflation-linked) rate, e.g. the on-the-run
    /// government linker yield.
    pub reference_real_rate: Rate,
    /// Floating benchmark projection for the note's tenor.
    pub floating_rate_projection: Rate,
}

/// Everything the engine needs to rate and price one note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub terms: OperationTerms,
    pub collateral: CollateralInput,
    pub credit: CreditInput,
    pub structure: StructureInput,
    pub market: MarketInput,
    pub market_params: MarketParams,
    /// Pillar weights; the canonical scheme when absent.
    #[serde(default)]
    pub weights: Option<Weights>,
    /// Committee notch adjustment in [-3, 3].
    #[serde(default)]
    pub notches: i32,
    #[serde(default)]
    pub justification: Option<String>,
}

/// Full analysis report for one note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub pillars: Vec<PillarBreakdown>,
    pub final_score: Score,
    pub base_grade: RatingGrade,
    pub final_grade: RatingGrade,
    pub notches: i32,
    pub justification: Option<String>,
    pub macaulay_duration_years: Decimal,
    pub pricing: PricingResult,
    pub schedule: Vec<CashFlowPeriod>,
}

/// Run the full pipeline: score the four pillars, aggregate, apply the
/// committee notch, generate the amortization schedule, and price the
/// note off the assigned grade.
pub fn analyze(request: &AnalysisRequest) -> RatingResult<ComputationOutput<AnalysisReport>> {
    let start = Instant::now();

    validate_consistency(request)?;
    let warnings = collect_warnings(request);

    let pillars = vec![
        score_collateral(&request.collateral),
        score_credit(&request.credit),
        score_structure(&request.structure),
        score_market(&request.market),
    ];

    let scores: BTreeMap<_, _> = pillars.iter().map(|p| (p.pillar, p.score)).collect();
    let weights = request.weights.clone().unwrap_or_default();
    let aggregation = aggregate(&scores, &weights, MissingPillarPolicy::Reject)?;
    let final_grade = apply_notch(aggregation.base_grade, request.notches)?;

    let schedule = generate_schedule(&request.terms)?;
    let duration = macaulay_duration(&schedule, request.terms.annual_rate)?;

    let spread = credit_spread(final_grade, duration, request.terms.principal);
    let pricing = compose_pricing(
        request.market_params.reference_real_rate,
        request.market_params.floating_rate_projection,
        spread,
    )?;

    let report = AnalysisReport {
        pillars,
        final_score: aggregation.final_score,
        base_grade: aggregation.base_grade,
        final_grade,
        notches: request.notches,
        justification: request.justification.clone(),
        macaulay_duration_years: duration,
        pricing,
        schedule,
    };

    let assumptions = serde_json::json!({
        "weights": weights,
        "value_stress_pct": request.collateral.value_stress_pct,
        "reference_real_rate": request.market_params.reference_real_rate,
        "floating_rate_projection": request.market_params.floating_rate_projection,
        "missing_pillar_policy": MissingPillarPolicy::Reject,
    });

    ComputationOutput::new(
        METHODOLOGY,
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        report,
    )
}

/// Hard consistency checks across the per-pillar records.
fn validate_consistency(request: &AnalysisRequest) -> RatingResult<()> {
    if request.credit.amortization != request.terms.amortization {
        return Err(RatingError::InvalidInput {
            field: "credit.amortization".into(),
            reason: "amortization system differs from the note's terms".into(),
        });
    }
    Ok(())
}

/// Soft cross-record checks that do not block the analysis.
fn collect_warnings(request: &AnalysisRequest) -> Vec<String> {
    let mut warnings = Vec::new();
    if request.collateral.appraisal_value != request.credit.appraisal_value {
        warnings.push(format!(
            "appraisal value differs between collateral ({}) and credit ({}) records",
            request.collateral.appraisal_value, request.credit.appraisal_value
        ));
    }
    if request.collateral.outstanding_balance != request.credit.outstanding_balance {
        warnings.push(format!(
            "outstanding balance differs between collateral ({}) and credit ({}) records",
            request.collateral.outstanding_balance, request.credit.outstanding_balance
        ));
    }
    if request.notches != 0 && request.justification.is_none() {
        warnings.push("notch adjustment applied without a written justification".into());
    }
    warnings
}
