use napi::Result as NapiResult;
use napi_derive::napi;

use propcalc_core::loan::LoanParameters;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Every investment-calculator entry point takes a `LoanParameters` object.
/// Series are derived from the engine's own point metrics.
fn loan_params(input_json: &str) -> NapiResult<LoanParameters> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn point_metrics(input_json: String) -> NapiResult<String> {
    let input = loan_params(&input_json)?;
    let output =
        propcalc_core::loan::metrics::compute_point_metrics(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_investment(input_json: String) -> NapiResult<String> {
    let input = loan_params(&input_json)?;
    let output =
        propcalc_core::loan::projection::project_investment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_series(input_json: String) -> NapiResult<String> {
    let input = loan_params(&input_json)?;
    let metrics = propcalc_core::loan::metrics::compute_point_metrics(&input)
        .map_err(to_napi_error)?
        .result;
    let series = propcalc_core::loan::amortization::generate_amortization_series(
        metrics.loan_amount,
        input.annual_interest_rate_percent,
        metrics.monthly_emi,
        input.loan_term_years,
    );
    serde_json::to_string(&series).map_err(to_napi_error)
}

#[napi]
pub fn growth_series(input_json: String) -> NapiResult<String> {
    let input = loan_params(&input_json)?;
    let metrics = propcalc_core::loan::metrics::compute_point_metrics(&input)
        .map_err(to_napi_error)?
        .result;
    let series = propcalc_core::loan::growth::generate_growth_series(
        input.property_value,
        input.annual_appreciation_rate_percent,
        input.loan_term_years,
        metrics.down_payment,
        metrics.loan_amount,
        metrics.monthly_emi,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&series).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Home-loan eligibility
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_eligibility(input_json: String) -> NapiResult<String> {
    let input: propcalc_core::eligibility::calculator::EligibilityParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = propcalc_core::eligibility::calculator::compute_eligibility(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_offers(input_json: String) -> NapiResult<String> {
    let input: propcalc_core::eligibility::offers::OfferComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = propcalc_core::eligibility::offers::compare_bank_offers(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn emi_sensitivity(input_json: String) -> NapiResult<String> {
    let input: propcalc_core::sensitivity::EmiSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        propcalc_core::sensitivity::emi_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display and input helpers
// ---------------------------------------------------------------------------

/// Amounts cross the boundary as strings to keep full decimal precision.
#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let value = propcalc_core::parse::parse_amount(&amount).map_err(to_napi_error)?;
    Ok(propcalc_core::display::format_currency(value))
}

#[napi]
pub fn format_emi(amount: String) -> NapiResult<String> {
    let value = propcalc_core::parse::parse_amount(&amount).map_err(to_napi_error)?;
    Ok(propcalc_core::display::format_emi(value))
}

/// Normalise a form-field string ("37,50,000") to a plain decimal string.
#[napi]
pub fn parse_amount(text: String) -> NapiResult<String> {
    let value = propcalc_core::parse::parse_amount(&text).map_err(to_napi_error)?;
    Ok(value.to_string())
}
