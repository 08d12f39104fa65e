//! Rupee display formatting shared by the summary tables and chart labels.
//!
//! Amounts at or above one crore render as `₹X.YY Cr`. The EMI variant adds a
//! lakh tier (`₹X.YY L`). Everything else renders as an Indian-grouped whole
//! rupee figure (`₹37,50,000`).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

pub const LAKH: Decimal = dec!(100000);
pub const CRORE: Decimal = dec!(10000000);

const RUPEE: &str = "₹";

/// Whole-rupee figure with Indian digit grouping: 3750000 -> "37,50,000".
/// Rounds half away from zero. The sign is kept.
pub fn group_indian(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut pairs: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            pairs.push(&head[start..end]);
            end = start;
        }
        pairs.reverse();
        format!("{},{}", pairs.join(","), tail)
    };

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// General currency display: crore tier, else grouped whole rupees.
///
/// The crore figure always carries exactly two decimals, rounded half away
/// from zero: 12,000,000 -> "₹1.20 Cr", 12,350,000 -> "₹1.24 Cr".
pub fn format_currency(amount: Money) -> String {
    let (sign, abs) = split_sign(amount);
    if abs >= CRORE {
        return format!("{sign}{RUPEE}{} Cr", two_places(abs / CRORE));
    }
    format!("{sign}{RUPEE}{}", group_indian(abs))
}

/// EMI display: crore tier, lakh tier, else grouped whole rupees. Both tiers
/// use the same two-decimal rounding as [`format_currency`].
pub fn format_emi(amount: Money) -> String {
    let (sign, abs) = split_sign(amount);
    if abs >= CRORE {
        return format!("{sign}{RUPEE}{} Cr", two_places(abs / CRORE));
    }
    if abs >= LAKH {
        return format!("{sign}{RUPEE}{} L", two_places(abs / LAKH));
    }
    format!("{sign}{RUPEE}{}", group_indian(abs))
}

/// Percentage with two decimals: 12.345 -> "12.35%"
pub fn format_percent(pct: Percent) -> String {
    format!("{}%", two_places(pct))
}

fn split_sign(amount: Money) -> (&'static str, Money) {
    if amount < Decimal::ZERO {
        ("-", amount.abs())
    } else {
        ("", amount)
    }
}

fn two_places(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
