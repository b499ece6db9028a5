use clap::Args;
use serde_json::Value;

use cci_rating_core::scorecard::collateral::{score_collateral, CollateralInput};
use cci_rating_core::scorecard::credit::{score_credit, CreditInput};
use cci_rating_core::scorecard::market::{score_market, MarketInput};
use cci_rating_core::scorecard::structure::{score_structure, StructureInput};

use crate::input;

/// Arguments shared by the single-pillar scoring commands
#[derive(Args)]
pub struct PillarArgs {
    /// Path to the pillar's JSON input record (or pipe it on stdin)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_collateral(args: PillarArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: CollateralInput = input::load(args.input.as_deref(), "score-collateral")?;
    Ok(serde_json::to_value(score_collateral(&record))?)
}

pub fn run_credit(args: PillarArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: CreditInput = input::load(args.input.as_deref(), "score-credit")?;
    Ok(serde_json::to_value(score_credit(&record))?)
}

pub fn run_structure(args: PillarArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: StructureInput = input::load(args.input.as_deref(), "score-structure")?;
    Ok(serde_json::to_value(score_structure(&record))?)
}

pub fn run_market(args: PillarArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: MarketInput = input::load(args.input.as_deref(), "score-market")?;
    Ok(serde_json::to_value(score_market(&record))?)
}
