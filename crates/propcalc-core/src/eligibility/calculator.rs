use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::display::{format_currency, format_emi};
use crate::error::PropCalcError;
use crate::time_value::{emi, require_non_negative, require_term, total_months};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs of the home-loan eligibility screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityParameters {
    /// Applicant age in years; drives the income multiplier
    pub age: Decimal,
    pub monthly_income: Money,
    /// Instalments already being paid on other loans
    #[serde(default)]
    pub existing_monthly_emi: Money,
    pub annual_interest_rate_percent: Percent,
    pub loan_term_years: Years,
}

/// Formatted figures for the eligibility result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDisplay {
    pub max_loan_amount: String,
    pub monthly_emi: String,
    pub total_payable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Income left after existing EMIs, floored at zero
    pub eligible_income: Money,
    /// 50 - age / 10
    pub eligibility_multiplier: Decimal,
    pub max_loan_amount: Money,
    pub monthly_emi: Money,
    pub total_payable: Money,
    pub total_interest: Money,
    pub display: EligibilityDisplay,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Largest loan an applicant qualifies for, and what it costs per month.
///
/// `max_loan = (income - existing EMIs) * (50 - age / 10)`, then the
/// standard EMI on that amount.
pub fn compute_eligibility(
    params: &EligibilityParameters,
) -> PropCalcResult<ComputationOutput<EligibilityResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(params)?;

    let raw_eligible = params.monthly_income - params.existing_monthly_emi;
    let eligible_income = if raw_eligible < Decimal::ZERO {
        warnings.push(format!(
            "Existing EMIs exceed income by {}: no further loan eligibility",
            (-raw_eligible).round_dp(2)
        ));
        Decimal::ZERO
    } else {
        raw_eligible
    };

    let eligibility_multiplier = dec!(50) - params.age / dec!(10);
    let max_loan_amount = eligible_income
        .checked_mul(eligibility_multiplier)
        .ok_or_else(|| PropCalcError::overflow("maximum loan amount"))?;

    let months = total_months(params.loan_term_years)?;
    let monthly_emi = emi(max_loan_amount, params.annual_interest_rate_percent, months)?;
    let total_payable = monthly_emi
        .checked_mul(Decimal::from(months))
        .ok_or_else(|| PropCalcError::overflow("total payable"))?;
    let total_interest = (total_payable - max_loan_amount).max(Decimal::ZERO);

    if params.annual_interest_rate_percent.is_zero() {
        warnings.push("Zero interest rate: EMI uses straight-line repayment".into());
    }
    if monthly_emi > params.monthly_income && params.monthly_income > Decimal::ZERO {
        warnings.push(format!(
            "EMI of {} exceeds the stated monthly income",
            format_emi(monthly_emi)
        ));
    }

    log::debug!(
        "eligibility: multiplier={eligibility_multiplier} max_loan={max_loan_amount} emi={monthly_emi}"
    );

    let display = EligibilityDisplay {
        max_loan_amount: format_currency(max_loan_amount),
        monthly_emi: format_emi(monthly_emi),
        total_payable: format_currency(total_payable),
    };

    let output = EligibilityResult {
        eligible_income,
        eligibility_multiplier,
        max_loan_amount,
        monthly_emi,
        total_payable,
        total_interest,
        display,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Income Multiplier Loan Eligibility (50 - age/10)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(params: &EligibilityParameters) -> PropCalcResult<()> {
    if params.age <= Decimal::ZERO || params.age > dec!(100) {
        return Err(PropCalcError::invalid(
            "age",
            "Age must be greater than 0 and at most 100",
        ));
    }
    require_non_negative("monthly_income", params.monthly_income)?;
    require_non_negative("existing_monthly_emi", params.existing_monthly_emi)?;
    require_non_negative(
        "annual_interest_rate_percent",
        params.annual_interest_rate_percent,
    )?;
    require_term(params.loan_term_years)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
