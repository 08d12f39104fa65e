//! Adapter from form-field strings to engine numerics.
//!
//! The calculator screens hand over text such as `"37,50,000"` or
//! `"₹ 5,00,000"`. The engine operations only accept parsed `Decimal`s; this
//! module is the one place that cleanup happens.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::PropCalcError;
use crate::PropCalcResult;

const CURRENCY_PREFIXES: [&str; 4] = ["₹", "INR", "Rs.", "Rs"];

/// Parse a grouped amount or percentage string into a `Decimal`.
///
/// Accepts Indian (`37,50,000`) and Western (`3,750,000`) grouping, `_`
/// separators, surrounding whitespace and a leading rupee marker.
pub fn parse_amount(input: &str) -> PropCalcResult<Decimal> {
    let mut s = input.trim();
    for prefix in CURRENCY_PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim_start();
            break;
        }
    }
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();

    let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return Err(PropCalcError::InvalidNumber {
            input: input.to_string(),
            reason: "empty value".into(),
        });
    }

    Decimal::from_str(&cleaned).map_err(|e| PropCalcError::InvalidNumber {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
