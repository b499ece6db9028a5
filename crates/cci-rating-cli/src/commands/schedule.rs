use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use cci_rating_core::cashflow::{
    generate_schedule, AmortizationSystem, IndexType, OperationTerms,
};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AmortizationChoice {
    EqualPrincipal,
    EqualInstallment,
}

impl From<AmortizationChoice> for AmortizationSystem {
    fn from(choice: AmortizationChoice) -> Self {
        match choice {
            AmortizationChoice::EqualPrincipal => AmortizationSystem::EqualPrincipal,
            AmortizationChoice::EqualInstallment => AmortizationSystem::EqualInstallment,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IndexChoice {
    InflationLinked,
    Floating,
    Fixed,
}

impl From<IndexChoice> for IndexType {
    fn from(choice: IndexChoice) -> Self {
        match choice {
            IndexChoice::InflationLinked => IndexType::InflationLinked,
            IndexChoice::Floating => IndexType::Floating,
            IndexChoice::Fixed => IndexType::Fixed,
        }
    }
}

/// Arguments for amortization schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON terms record (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate as a decimal (0.115 = 11.5% a.a.)
    #[arg(long, allow_hyphen_values = true)]
    pub annual_rate: Option<Decimal>,

    /// Tenor in months
    #[arg(long)]
    pub tenor_months: Option<u32>,

    /// Issue date, YYYY-MM-DD
    #[arg(long)]
    pub issue_date: Option<NaiveDate>,

    /// Amortization system
    #[arg(long, value_enum, default_value = "equal-principal")]
    pub amortization: AmortizationChoice,

    /// Rate index
    #[arg(long, value_enum, default_value = "inflation-linked")]
    pub index: IndexChoice,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: OperationTerms = match input::try_load(args.input.as_deref())? {
        Some(terms) => terms,
        None => OperationTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            index: args.index.into(),
            issue_date: args
                .issue_date
                .ok_or("--issue-date is required (or provide --input)")?,
            tenor_months: args
                .tenor_months
                .ok_or("--tenor-months is required (or provide --input)")?,
            amortization: args.amortization.into(),
        },
    };

    let schedule = generate_schedule(&terms)?;
    Ok(serde_json::to_value(schedule)?)
}
