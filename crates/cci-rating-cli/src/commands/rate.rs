use clap::Args;
use serde_json::Value;

use cci_rating_core::analysis::{analyze, AnalysisRequest};

use crate::input;

/// Arguments for the full rating analysis
#[derive(Args)]
pub struct RateArgs {
    /// Path to a JSON analysis request (or pipe it on stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Committee notch adjustment in [-3, 3], overriding the request
    #[arg(long, allow_hyphen_values = true)]
    pub notches: Option<i32>,

    /// Written justification for the notch adjustment
    #[arg(long)]
    pub justification: Option<String>,
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: AnalysisRequest = input::load(args.input.as_deref(), "rate")?;

    if let Some(notches) = args.notches {
        request.notches = notches;
    }
    if args.justification.is_some() {
        request.justification = args.justification;
    }

    let output = analyze(&request)?;
    Ok(serde_json::to_value(output)?)
}
