use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::PropCalcError;
use crate::types::{Money, Percent, Years};
use crate::PropCalcResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Longest loan tenure accepted anywhere in the engine
pub const MAX_TERM_YEARS: Years = 100;

/// Monthly periodic rate from an annual percentage (8.5 -> 0.0070833..)
pub fn monthly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / dec!(1200)
}

/// Number of monthly instalments in a term of whole years
pub fn total_months(term_years: Years) -> PropCalcResult<u32> {
    term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| PropCalcError::overflow("months in loan term"))
}

/// `value * pct / 100`
pub fn percent_of(value: Money, pct: Percent) -> PropCalcResult<Money> {
    value
        .checked_mul(pct)
        .map(|x| x / dec!(100))
        .ok_or_else(|| PropCalcError::overflow("percentage of value"))
}

/// Equated Monthly Instalment: P * r(1+r)^n / ((1+r)^n - 1)
///
/// A non-positive principal is a fully paid-up purchase and yields a zero
/// instalment. A zero rate falls back to straight-line repayment `P / n`.
pub fn emi(principal: Money, annual_rate_pct: Percent, months: u32) -> PropCalcResult<Money> {
    if months == 0 {
        return Err(PropCalcError::invalid(
            "loan_term_years",
            "Loan term must be at least 1 year",
        ));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(PropCalcError::invalid(
            "annual_interest_rate_percent",
            "Interest rate cannot be negative",
        ));
    }

    if principal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let r = monthly_rate(annual_rate_pct);
    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let compound = (Decimal::ONE + r)
        .checked_powu(u64::from(months))
        .ok_or_else(|| PropCalcError::overflow("EMI compounding factor"))?;
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // Rate too small to register after rounding; treat as interest-free.
        return Ok(principal / Decimal::from(months));
    }

    principal
        .checked_mul(r)
        .and_then(|x| x.checked_mul(compound))
        .and_then(|x| x.checked_div(denominator))
        .ok_or_else(|| PropCalcError::overflow("EMI numerator"))
}

/// Compound growth: value * (1 + pct/100)^years
pub fn compound_growth(value: Money, annual_pct: Percent, years: Years) -> PropCalcResult<Money> {
    let factor = (Decimal::ONE + annual_pct / dec!(100))
        .checked_powu(u64::from(years))
        .ok_or_else(|| PropCalcError::overflow("compound growth factor"))?;
    value
        .checked_mul(factor)
        .ok_or_else(|| PropCalcError::overflow("compound growth value"))
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

pub(crate) fn require_positive(field: &str, value: Decimal) -> PropCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(PropCalcError::invalid(field, "Must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> PropCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(PropCalcError::invalid(field, "Cannot be negative"));
    }
    Ok(())
}

pub(crate) fn require_term(term_years: Years) -> PropCalcResult<()> {
    if term_years == 0 {
        return Err(PropCalcError::invalid(
            "loan_term_years",
            "Loan term must be at least 1 year",
        ));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(PropCalcError::invalid(
            "loan_term_years",
            format!("Loan term cannot exceed {MAX_TERM_YEARS} years"),
        ));
    }
    Ok(())
}
