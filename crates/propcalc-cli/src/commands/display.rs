use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use propcalc_core::display::{format_currency, format_emi};

use super::decimal_arg;

/// Arguments for rupee formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Amount to format; grouping separators and ₹ are accepted
    #[arg(value_parser = decimal_arg)]
    pub amount: Decimal,

    /// Use the EMI rules (adds the lakh tier)
    #[arg(long)]
    pub emi: bool,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let formatted = if args.emi {
        format_emi(args.amount)
    } else {
        format_currency(args.amount)
    };
    Ok(json!({
        "amount": args.amount.to_string(),
        "style": if args.emi { "emi" } else { "currency" },
        "formatted": formatted,
    }))
}
