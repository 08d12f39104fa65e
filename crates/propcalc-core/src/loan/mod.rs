pub mod amortization;
pub mod growth;
pub mod metrics;
pub mod projection;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropCalcError;
use crate::time_value::{require_non_negative, require_positive, require_term};
use crate::types::{Money, Percent, Years};
use crate::PropCalcResult;

/// Chart series never extend past the first decade of a loan.
pub const DISPLAY_YEARS_CAP: Years = 10;

/// Down payment band offered by the calculator slider.
const UI_DOWN_PAYMENT_MIN: Decimal = dec!(10);
const UI_DOWN_PAYMENT_MAX: Decimal = dec!(50);

/// Inputs of the property investment calculator. Every rate is a percentage
/// of property value per year unless noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Purchase price of the property
    pub property_value: Money,
    /// Share of the price paid upfront (0-100)
    pub down_payment_percentage: Percent,
    /// Loan tenure in whole years
    pub loan_term_years: Years,
    /// Nominal annual interest rate on the loan
    pub annual_interest_rate_percent: Percent,
    #[serde(default)]
    pub property_tax_rate_percent: Percent,
    #[serde(default)]
    pub maintenance_rate_percent: Percent,
    #[serde(default)]
    pub insurance_rate_percent: Percent,
    /// Expected yearly change in market value; may be negative
    #[serde(default)]
    pub annual_appreciation_rate_percent: Percent,
    /// Gross yearly rent as a share of property value
    #[serde(default)]
    pub annual_rental_yield_percent: Percent,
}

impl Default for LoanParameters {
    /// The values the investment calculator screen opens with.
    fn default() -> Self {
        Self {
            property_value: dec!(5000000),
            down_payment_percentage: dec!(20),
            loan_term_years: 20,
            annual_interest_rate_percent: dec!(8.5),
            property_tax_rate_percent: dec!(1),
            maintenance_rate_percent: dec!(1),
            insurance_rate_percent: dec!(0.5),
            annual_appreciation_rate_percent: dec!(5),
            annual_rental_yield_percent: dec!(3),
        }
    }
}

impl LoanParameters {
    /// Years rendered in the chart series: min(term, 10)
    pub fn display_years(&self) -> Years {
        self.loan_term_years.min(DISPLAY_YEARS_CAP)
    }
}

/// Reject anything that would make the formulas meaningless. Runs before any
/// figure is computed so a caller never sees partial metrics.
pub(crate) fn validate_loan_parameters(
    params: &LoanParameters,
    warnings: &mut Vec<String>,
) -> PropCalcResult<()> {
    require_positive("property_value", params.property_value)?;
    require_term(params.loan_term_years)?;

    if params.down_payment_percentage < Decimal::ZERO
        || params.down_payment_percentage > dec!(100)
    {
        return Err(PropCalcError::invalid(
            "down_payment_percentage",
            "Down payment must be between 0 and 100 percent",
        ));
    }

    require_non_negative(
        "annual_interest_rate_percent",
        params.annual_interest_rate_percent,
    )?;
    require_non_negative("property_tax_rate_percent", params.property_tax_rate_percent)?;
    require_non_negative("maintenance_rate_percent", params.maintenance_rate_percent)?;
    require_non_negative("insurance_rate_percent", params.insurance_rate_percent)?;
    require_non_negative(
        "annual_rental_yield_percent",
        params.annual_rental_yield_percent,
    )?;

    if params.annual_appreciation_rate_percent <= dec!(-100) {
        return Err(PropCalcError::invalid(
            "annual_appreciation_rate_percent",
            "Appreciation must be greater than -100 percent",
        ));
    }

    // --- Warnings ---
    if params.down_payment_percentage < UI_DOWN_PAYMENT_MIN
        || params.down_payment_percentage > UI_DOWN_PAYMENT_MAX
    {
        warnings.push(format!(
            "Down payment of {}% is outside the usual 10-50% range",
            params.down_payment_percentage
        ));
    }

    if params.annual_interest_rate_percent.is_zero() {
        warnings.push("Zero interest rate: EMI uses straight-line repayment".into());
    }

    Ok(())
}
