pub mod display;
pub mod eligibility;
pub mod loan;
pub mod sensitivity;

use propcalc_core::parse::parse_amount;
use rust_decimal::Decimal;

/// clap value parser accepting grouped amounts such as `37,50,000`.
pub fn decimal_arg(s: &str) -> Result<Decimal, String> {
    parse_amount(s).map_err(|e| e.to_string())
}
