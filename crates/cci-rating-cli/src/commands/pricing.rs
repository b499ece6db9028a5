use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use cci_rating_core::pricing::{compose_pricing, credit_spread};
use cci_rating_core::scale::RatingGrade;

/// Arguments for spread lookup and rate composition
#[derive(Args)]
pub struct SpreadArgs {
    /// Rating grade, e.g. AAA or bbb(sf)
    #[arg(long)]
    pub grade: RatingGrade,

    /// Macaulay duration in years
    #[arg(long, default_value = "5", allow_hyphen_values = true)]
    pub duration_years: Decimal,

    /// Issue size (drives the liquidity premium)
    #[arg(long)]
    pub issue_size: Decimal,

    /// Reference real rate as a decimal, enables rate composition
    #[arg(long)]
    pub reference_real_rate: Option<Decimal>,

    /// Floating benchmark projection as a decimal
    #[arg(long)]
    pub floating_rate_projection: Option<Decimal>,
}

pub fn run_spread(args: SpreadArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let spread = credit_spread(args.grade, args.duration_years, args.issue_size);

    match (args.reference_real_rate, args.floating_rate_projection) {
        (Some(real), Some(floating)) => {
            let pricing = compose_pricing(real, floating, spread)?;
            let mut value = serde_json::to_value(pricing)?;
            value["grade"] = Value::String(args.grade.to_string());
            Ok(value)
        }
        (None, None) => Ok(serde_json::json!({
            "grade": args.grade.to_string(),
            "credit_spread": spread,
            "credit_spread_bps": spread * dec!(10000),
        })),
        _ => Err(
            "--reference-real-rate and --floating-rate-projection must be given together".into(),
        ),
    }
}
