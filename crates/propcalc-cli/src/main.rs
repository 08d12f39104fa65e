mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::display::FormatArgs;
use commands::eligibility::{EligibilityArgs, OffersArgs};
use commands::loan::LoanArgs;
use commands::sensitivity::SensitivityArgs;

/// Home-loan and property investment calculations
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Home-loan and property investment calculations",
    long_about = "A CLI for the property calculator engine with decimal precision. \
                  Supports EMI and ROI metrics, amortization and equity series, \
                  loan eligibility, bank offer comparison, EMI sensitivity and \
                  rupee formatting. Set RUST_LOG=debug for engine tracing."
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
    /// EMI, recurring costs, cash flow, appreciation and ROI
    Metrics(LoanArgs),
    /// Full projection: metrics, chart series, breakdowns and display strings
    Project(LoanArgs),
    /// Yearly principal/interest split (first 10 years)
    Amortization(LoanArgs),
    /// Property value and equity by year (year 0 to 10)
    Growth(LoanArgs),
    /// Maximum loan from income and age
    Eligibility(EligibilityArgs),
    /// Compare bank offers for a loan amount
    Offers(OffersArgs),
    /// EMI grid over interest rate and tenure
    Sensitivity(SensitivityArgs),
    /// Format an amount the way the app displays it
    Format(FormatArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Metrics(args) => commands::loan::run_metrics(args),
        Commands::Project(args) => commands::loan::run_project(args),
        Commands::Amortization(args) => commands::loan::run_amortization(args),
        Commands::Growth(args) => commands::loan::run_growth(args),
        Commands::Eligibility(args) => commands::eligibility::run_eligibility(args),
        Commands::Offers(args) => commands::eligibility::run_offers(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Format(args) => commands::display::run_format(args),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
