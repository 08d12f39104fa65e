use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use propcalc_core::loan::amortization::generate_amortization_series;
use propcalc_core::loan::growth::generate_growth_series;
use propcalc_core::loan::metrics::compute_point_metrics;
use propcalc_core::loan::projection::project_investment;
use propcalc_core::loan::LoanParameters;

use super::decimal_arg;
use crate::input;

/// Loan and property inputs shared by the metric and series commands.
/// Flags left unset take the calculator screen defaults.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON/YAML parameter file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price, e.g. 50,00,000
    #[arg(long, value_parser = decimal_arg)]
    pub property_value: Option<Decimal>,

    /// Down payment as percent of price
    #[arg(long, alias = "down", value_parser = decimal_arg)]
    pub down_payment: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long, alias = "term")]
    pub years: Option<u32>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long, value_parser = decimal_arg)]
    pub rate: Option<Decimal>,

    /// Annual property tax, percent of value
    #[arg(long, value_parser = decimal_arg)]
    pub property_tax: Option<Decimal>,

    /// Annual maintenance, percent of value
    #[arg(long, value_parser = decimal_arg)]
    pub maintenance: Option<Decimal>,

    /// Annual insurance, percent of value
    #[arg(long, value_parser = decimal_arg)]
    pub insurance: Option<Decimal>,

    /// Expected annual appreciation in percent (may be negative)
    #[arg(long, value_parser = decimal_arg)]
    pub appreciation: Option<Decimal>,

    /// Gross annual rental yield in percent
    #[arg(long, value_parser = decimal_arg)]
    pub rental_yield: Option<Decimal>,
}

fn resolve_params(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(params) = input::from_file_or_stdin(args.input.as_deref())? {
        return Ok(params);
    }

    let defaults = LoanParameters::default();
    Ok(LoanParameters {
        property_value: args.property_value.unwrap_or(defaults.property_value),
        down_payment_percentage: args.down_payment.unwrap_or(defaults.down_payment_percentage),
        loan_term_years: args.years.unwrap_or(defaults.loan_term_years),
        annual_interest_rate_percent: args.rate.unwrap_or(defaults.annual_interest_rate_percent),
        property_tax_rate_percent: args
            .property_tax
            .unwrap_or(defaults.property_tax_rate_percent),
        maintenance_rate_percent: args.maintenance.unwrap_or(defaults.maintenance_rate_percent),
        insurance_rate_percent: args.insurance.unwrap_or(defaults.insurance_rate_percent),
        annual_appreciation_rate_percent: args
            .appreciation
            .unwrap_or(defaults.annual_appreciation_rate_percent),
        annual_rental_yield_percent: args
            .rental_yield
            .unwrap_or(defaults.annual_rental_yield_percent),
    })
}

pub fn run_metrics(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = compute_point_metrics(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_project(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = project_investment(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortization(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let metrics = compute_point_metrics(&params)?.result;
    let series = generate_amortization_series(
        metrics.loan_amount,
        params.annual_interest_rate_percent,
        metrics.monthly_emi,
        params.loan_term_years,
    );
    Ok(serde_json::to_value(series)?)
}

pub fn run_growth(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let metrics = compute_point_metrics(&params)?.result;
    let series = generate_growth_series(
        params.property_value,
        params.annual_appreciation_rate_percent,
        params.loan_term_years,
        metrics.down_payment,
        metrics.loan_amount,
        metrics.monthly_emi,
    )?;
    Ok(serde_json::to_value(series)?)
}
