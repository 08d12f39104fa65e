use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::loan::{validate_loan_parameters, LoanParameters};
use crate::time_value::{compound_growth, emi, percent_of, total_months};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Point figures for a single purchase scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMetrics {
    pub down_payment: Money,
    pub loan_amount: Money,
    pub monthly_emi: Money,
    pub monthly_property_tax: Money,
    pub monthly_maintenance: Money,
    pub monthly_insurance: Money,
    /// EMI plus the three recurring ownership costs
    pub total_monthly_payment: Money,
    /// EMI * months - loan amount
    pub total_interest_paid: Money,
    pub monthly_rental_income: Money,
    /// Rent minus total monthly outgo; negative when the property costs more than it earns
    pub monthly_cash_flow: Money,
    /// Value at the end of the full loan term
    pub future_property_value: Money,
    pub total_appreciation: Money,
    /// Down payment plus every monthly outgo over the term
    pub total_investment: Money,
    /// Future value plus every month of rent over the term
    pub total_returns: Money,
    pub return_on_investment_percent: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute EMI, recurring costs, rental cash flow, appreciation and ROI for a
/// purchase.
///
/// Parameters are validated before anything is computed; an invalid field is
/// reported as `InvalidParameter` and no partial metrics are returned.
pub fn compute_point_metrics(
    params: &LoanParameters,
) -> PropCalcResult<ComputationOutput<PointMetrics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_parameters(params, &mut warnings)?;
    let metrics = point_metrics(params, &mut warnings)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortising Loan EMI with Compound Appreciation ROI",
        params,
        warnings,
        elapsed,
        metrics,
    ))
}

/// Metric computation on already-validated parameters.
pub(crate) fn point_metrics(
    params: &LoanParameters,
    warnings: &mut Vec<String>,
) -> PropCalcResult<PointMetrics> {
    let value = params.property_value;
    let months = total_months(params.loan_term_years)?;
    let months_dec = Decimal::from(months);

    // --- Financing ---
    let down_payment = percent_of(value, params.down_payment_percentage)?;
    let loan_amount = value - down_payment;

    let monthly_emi = if loan_amount <= Decimal::ZERO {
        warnings.push("Down payment covers the full price: no loan required".into());
        Decimal::ZERO
    } else {
        emi(loan_amount, params.annual_interest_rate_percent, months)?
    };

    // --- Recurring ownership costs ---
    let monthly_property_tax = percent_of(value, params.property_tax_rate_percent)? / dec!(12);
    let monthly_maintenance = percent_of(value, params.maintenance_rate_percent)? / dec!(12);
    let monthly_insurance = percent_of(value, params.insurance_rate_percent)? / dec!(12);
    let total_monthly_payment = [monthly_property_tax, monthly_maintenance, monthly_insurance]
        .into_iter()
        .try_fold(monthly_emi, |acc, cost| acc.checked_add(cost))
        .ok_or_else(|| PropCalcError::overflow("total monthly payment"))?;

    let total_interest_paid = if loan_amount <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        monthly_emi
            .checked_mul(months_dec)
            .ok_or_else(|| PropCalcError::overflow("total interest paid"))?
            - loan_amount
    };

    // --- Rent and cash flow ---
    let monthly_rental_income =
        percent_of(value, params.annual_rental_yield_percent)? / dec!(12);
    let monthly_cash_flow = monthly_rental_income - total_monthly_payment;

    if monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly cash flow of {}: rent does not cover outgoings",
            monthly_cash_flow.round_dp(2)
        ));
    }

    // --- Appreciation and ROI over the full term ---
    let future_property_value = compound_growth(
        value,
        params.annual_appreciation_rate_percent,
        params.loan_term_years,
    )?;
    let total_appreciation = future_property_value - value;

    let total_investment = total_monthly_payment
        .checked_mul(months_dec)
        .and_then(|outgo| outgo.checked_add(down_payment))
        .ok_or_else(|| PropCalcError::overflow("total investment"))?;
    let total_returns = monthly_rental_income
        .checked_mul(months_dec)
        .and_then(|rent| rent.checked_add(future_property_value))
        .ok_or_else(|| PropCalcError::overflow("total returns"))?;

    let return_on_investment_percent = if total_investment > Decimal::ZERO {
        (total_returns - total_investment)
            .checked_div(total_investment)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| PropCalcError::overflow("return on investment"))?
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "point metrics: loan={loan_amount} emi={monthly_emi} roi={return_on_investment_percent}"
    );

    Ok(PointMetrics {
        down_payment,
        loan_amount,
        monthly_emi,
        monthly_property_tax,
        monthly_maintenance,
        monthly_insurance,
        total_monthly_payment,
        total_interest_paid,
        monthly_rental_income,
        monthly_cash_flow,
        future_property_value,
        total_appreciation,
        total_investment,
        total_returns,
        return_on_investment_percent,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
