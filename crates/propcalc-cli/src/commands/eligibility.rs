use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use propcalc_core::eligibility::calculator::{compute_eligibility, EligibilityParameters};
use propcalc_core::eligibility::offers::{
    compare_bank_offers, default_bank_offers, OfferComparisonInput,
};

use super::decimal_arg;
use crate::input;

/// Arguments for loan eligibility
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON/YAML parameter file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Applicant age in years
    #[arg(long, value_parser = decimal_arg)]
    pub age: Option<Decimal>,

    /// Net monthly income
    #[arg(long, value_parser = decimal_arg)]
    pub monthly_income: Option<Decimal>,

    /// EMIs already being paid each month
    #[arg(long, value_parser = decimal_arg)]
    pub existing_emi: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, value_parser = decimal_arg, default_value = "8.5")]
    pub rate: Decimal,

    /// Loan tenure in years
    #[arg(long, alias = "term", default_value = "20")]
    pub years: u32,
}

/// Arguments for bank offer comparison
#[derive(Args)]
pub struct OffersArgs {
    /// Path to JSON/YAML file with loan amount, term and optional offer table
    #[arg(long)]
    pub input: Option<String>,

    /// Requested loan amount
    #[arg(long, value_parser = decimal_arg)]
    pub loan_amount: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long, alias = "term", default_value = "20")]
    pub years: u32,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: EligibilityParameters = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(params) => params,
        None => EligibilityParameters {
            age: args.age.ok_or("--age is required (or provide --input)")?,
            monthly_income: args
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            existing_monthly_emi: args.existing_emi.unwrap_or(Decimal::ZERO),
            annual_interest_rate_percent: args.rate,
            loan_term_years: args.years,
        },
    };
    let result = compute_eligibility(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_offers(args: OffersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let offer_input: OfferComparisonInput =
        match input::from_file_or_stdin(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => OfferComparisonInput {
                loan_amount: args
                    .loan_amount
                    .ok_or("--loan-amount is required (or provide --input)")?,
                loan_term_years: args.years,
                offers: default_bank_offers(),
            },
        };
    let result = compare_bank_offers(&offer_input)?;
    Ok(serde_json::to_value(result)?)
}
