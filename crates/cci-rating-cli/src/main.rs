mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::pricing::SpreadArgs;
use commands::rate::RateArgs;
use commands::schedule::ScheduleArgs;
use commands::scorecard::PillarArgs;

/// Credit rating and indicative pricing for real-estate-backed notes
#[derive(Parser)]
#[command(
    name = "ccir",
    version,
    about = "Credit rating and indicative pricing for real-estate-backed notes",
    long_about = "Rates a real-estate-backed credit note (CCI) on a four-pillar \
                  scorecard, maps the result onto a ten-step scale, generates the \
                  amortization schedule, and composes an indicative rate from the \
                  assigned credit spread. All arithmetic is decimal-precise."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: scorecard, rating, schedule and pricing
    Rate(RateArgs),
    /// Score the collateral pillar on its own
    ScoreCollateral(PillarArgs),
    /// Score the credit & borrower pillar on its own
    ScoreCredit(PillarArgs),
    /// Score the note-structure pillar on its own
    ScoreStructure(PillarArgs),
    /// Score the market-scenario pillar on its own
    ScoreMarket(PillarArgs),
    /// Generate an amortization schedule
    Schedule(ScheduleArgs),
    /// Look up the credit spread for a grade, with optional rate composition
    Spread(SpreadArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Rate(args) => commands::rate::run_rate(args),
        Commands::ScoreCollateral(args) => commands::scorecard::run_collateral(args),
        Commands::ScoreCredit(args) => commands::scorecard::run_credit(args),
        Commands::ScoreStructure(args) => commands::scorecard::run_structure(args),
        Commands::ScoreMarket(args) => commands::scorecard::run_market(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Spread(args) => commands::pricing::run_spread(args),
        Commands::Version => {
            println!("ccir {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
