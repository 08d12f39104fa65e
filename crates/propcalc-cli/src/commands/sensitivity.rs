use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use propcalc_core::sensitivity::{emi_sensitivity, EmiSensitivityInput, SweepRange};

use super::decimal_arg;
use crate::input;

/// Arguments for the rate x tenure EMI grid
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON/YAML file with loan_amount, rate_range and term_range
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, value_parser = decimal_arg)]
    pub loan_amount: Option<Decimal>,

    /// Interest rate sweep as min:max:step (e.g. "7.5:10:0.5")
    #[arg(long, default_value = "7.5:10:0.5")]
    pub rates: String,

    /// Tenure sweep in years as min:max:step (e.g. "10:30:5")
    #[arg(long, default_value = "10:30:5")]
    pub terms: String,
}

fn parse_sweep(spec: &str) -> Result<SweepRange, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Sweep must be min:max:step, got '{}'", spec).into());
    }
    Ok(SweepRange {
        min: decimal_arg(parts[0])?,
        max: decimal_arg(parts[1])?,
        step: decimal_arg(parts[2])?,
    })
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sens_input: EmiSensitivityInput =
        match input::from_file_or_stdin(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => EmiSensitivityInput {
                loan_amount: args
                    .loan_amount
                    .ok_or("--loan-amount is required (or provide --input)")?,
                rate_range: parse_sweep(&args.rates)?,
                term_range: parse_sweep(&args.terms)?,
            },
        };
    let result = emi_sensitivity(&sens_input)?;
    Ok(serde_json::to_value(result)?)
}
