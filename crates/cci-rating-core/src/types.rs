use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::RatingResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Scorecard points on the 1.0–5.0 scale.
pub type Score = Decimal;

/// Envelope around a full analysis result: the result itself plus the
/// methodology name, the assumptions it was produced under, and any
/// soft warnings raised along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub engine_version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl<T: Serialize> ComputationOutput<T> {
    pub fn new(
        methodology: &str,
        assumptions: &impl Serialize,
        warnings: Vec<String>,
        elapsed_us: u64,
        result: T,
    ) -> RatingResult<Self> {
        Ok(ComputationOutput {
            result,
            methodology: methodology.to_string(),
            assumptions: serde_json::to_value(assumptions)?,
            warnings,
            metadata: ComputationMetadata {
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                computation_time_us: elapsed_us,
                precision: "rust_decimal_128bit".to_string(),
            },
        })
    }
}
