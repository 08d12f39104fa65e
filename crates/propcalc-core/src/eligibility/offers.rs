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

/// A lender's headline home-loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankOffer {
    pub name: String,
    pub annual_interest_rate_percent: Percent,
    pub processing_fee_description: String,
    pub max_loan_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparisonInput {
    pub loan_amount: Money,
    pub loan_term_years: Years,
    /// Offers to compare; the built-in table when omitted
    #[serde(default = "default_bank_offers")]
    pub offers: Vec<BankOffer>,
}

/// One offer priced for the requested loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferQuote {
    pub name: String,
    pub annual_interest_rate_percent: Percent,
    pub processing_fee_description: String,
    pub monthly_emi: Money,
    pub total_payable: Money,
    pub total_interest: Money,
    /// Requested amount does not exceed the lender's ceiling
    pub within_limit: bool,
    /// Lowest EMI among offers that are within limit
    pub best_value: bool,
    pub monthly_emi_display: String,
    pub max_loan_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparisonOutput {
    /// Sorted by EMI, cheapest first
    pub quotes: Vec<OfferQuote>,
    /// Monthly saving of the cheapest eligible offer over the dearest one
    pub max_monthly_saving: Money,
}

// ---------------------------------------------------------------------------
// Offer table
// ---------------------------------------------------------------------------

/// Illustrative lender table shown on the eligibility screen.
pub fn default_bank_offers() -> Vec<BankOffer> {
    vec![
        BankOffer {
            name: "State Bank of India".into(),
            annual_interest_rate_percent: dec!(8.50),
            processing_fee_description: "0.35% of loan amount (min ₹2,000)".into(),
            max_loan_amount: dec!(75000000),
        },
        BankOffer {
            name: "HDFC Bank".into(),
            annual_interest_rate_percent: dec!(8.75),
            processing_fee_description: "Up to 0.50% or ₹3,000, whichever is higher".into(),
            max_loan_amount: dec!(100000000),
        },
        BankOffer {
            name: "ICICI Bank".into(),
            annual_interest_rate_percent: dec!(9.00),
            processing_fee_description: "0.50% - 1.00% of loan amount".into(),
            max_loan_amount: dec!(50000000),
        },
        BankOffer {
            name: "Axis Bank".into(),
            annual_interest_rate_percent: dec!(9.10),
            processing_fee_description: "Up to 1% (min ₹10,000)".into(),
            max_loan_amount: dec!(50000000),
        },
        BankOffer {
            name: "LIC Housing Finance".into(),
            annual_interest_rate_percent: dec!(8.65),
            processing_fee_description: "Up to 0.25% (max ₹15,000)".into(),
            max_loan_amount: dec!(150000000),
        },
    ]
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a loan against every offer using the shared EMI formula.
pub fn compare_bank_offers(
    input: &OfferComparisonInput,
) -> PropCalcResult<ComputationOutput<OfferComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative("loan_amount", input.loan_amount)?;
    require_term(input.loan_term_years)?;
    if input.offers.is_empty() {
        return Err(PropCalcError::invalid(
            "offers",
            "At least one bank offer is required",
        ));
    }

    let months = total_months(input.loan_term_years)?;
    let mut quotes = Vec::with_capacity(input.offers.len());

    for offer in &input.offers {
        let monthly_emi = emi(input.loan_amount, offer.annual_interest_rate_percent, months)
            .map_err(|e| match e {
                PropCalcError::InvalidParameter { reason, .. } => PropCalcError::InvalidParameter {
                    field: format!("offers[{}].annual_interest_rate_percent", offer.name),
                    reason,
                },
                other => other,
            })?;
        let total_payable = monthly_emi
            .checked_mul(Decimal::from(months))
            .ok_or_else(|| PropCalcError::overflow(format!("total payable for {}", offer.name)))?;
        let within_limit = input.loan_amount <= offer.max_loan_amount;

        if !within_limit {
            warnings.push(format!(
                "{} lends at most {}: requested amount exceeds its limit",
                offer.name,
                format_currency(offer.max_loan_amount)
            ));
        }

        quotes.push(OfferQuote {
            name: offer.name.clone(),
            annual_interest_rate_percent: offer.annual_interest_rate_percent,
            processing_fee_description: offer.processing_fee_description.clone(),
            monthly_emi,
            total_payable,
            total_interest: (total_payable - input.loan_amount).max(Decimal::ZERO),
            within_limit,
            best_value: false,
            monthly_emi_display: format_emi(monthly_emi),
            max_loan_display: format_currency(offer.max_loan_amount),
        });
    }

    quotes.sort_by(|a, b| a.monthly_emi.cmp(&b.monthly_emi));

    let eligible: Vec<&OfferQuote> = quotes.iter().filter(|q| q.within_limit).collect();
    let max_monthly_saving = match (eligible.first(), eligible.last()) {
        (Some(cheapest), Some(dearest)) => dearest.monthly_emi - cheapest.monthly_emi,
        _ => Decimal::ZERO,
    };

    if let Some(best) = quotes.iter_mut().find(|q| q.within_limit) {
        best.best_value = true;
    } else {
        warnings.push("No offer covers the requested loan amount".into());
    }

    let output = OfferComparisonOutput {
        quotes,
        max_monthly_saving,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bank Offer Comparison (shared EMI formula)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> OfferComparisonInput {
        OfferComparisonInput {
            loan_amount: dec!(5000000),
            loan_term_years: 20,
            offers: default_bank_offers(),
        }
    }

    #[test]
    fn test_quotes_sorted_by_emi() {
        let out = compare_bank_offers(&sample_input()).unwrap();
        let quotes = &out.result.quotes;
        assert_eq!(quotes.len(), 5);
        assert_eq!(quotes[0].name, "State Bank of India");
        assert_eq!(quotes[4].name, "Axis Bank");
        for pair in quotes.windows(2) {
            assert!(pair[0].monthly_emi <= pair[1].monthly_emi);
        }
    }

    #[test]
    fn test_emi_matches_shared_formula() {
        let out = compare_bank_offers(&sample_input()).unwrap();
        let sbi = &out.result.quotes[0];
        // 50 lakh at 8.5% for 20 years ≈ 43,391.16
        assert!((sbi.monthly_emi - dec!(43391.16)).abs() < dec!(0.01));
        assert_eq!(sbi.monthly_emi, emi(dec!(5000000), dec!(8.5), 240).unwrap());
        assert_eq!(sbi.monthly_emi_display, "₹43,391");
    }

    #[test]
    fn test_best_value_flag_and_saving() {
        let out = compare_bank_offers(&sample_input()).unwrap();
        let quotes = &out.result.quotes;
        assert!(quotes[0].best_value);
        assert_eq!(quotes.iter().filter(|q| q.best_value).count(), 1);
        assert_eq!(
            out.result.max_monthly_saving,
            quotes[4].monthly_emi - quotes[0].monthly_emi
        );
    }

    #[test]
    fn test_limit_excludes_offers() {
        let mut input = sample_input();
        // 8 Cr: above SBI, ICICI and Axis ceilings
        input.loan_amount = dec!(80000000);
        let out = compare_bank_offers(&input).unwrap();
        let best = out.result.quotes.iter().find(|q| q.best_value).unwrap();
        assert_eq!(best.name, "LIC Housing Finance");
        assert_eq!(
            out.result.quotes.iter().filter(|q| !q.within_limit).count(),
            3
        );
        assert_eq!(out.warnings.len(), 3);
    }

    #[test]
    fn test_no_offer_covers_amount() {
        let mut input = sample_input();
        input.loan_amount = dec!(500000000);
        let out = compare_bank_offers(&input).unwrap();
        assert!(out.result.quotes.iter().all(|q| !q.best_value));
        assert_eq!(out.result.max_monthly_saving, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("No offer")));
    }

    #[test]
    fn test_default_offers_applied_when_omitted() {
        let input: OfferComparisonInput =
            serde_json::from_str(r#"{"loan_amount": "2500000", "loan_term_years": 15}"#).unwrap();
        assert_eq!(input.offers.len(), 5);
    }

    #[test]
    fn test_empty_offer_list_rejected() {
        let mut input = sample_input();
        input.offers.clear();
        assert!(compare_bank_offers(&input).is_err());
    }

    #[test]
    fn test_negative_offer_rate_names_the_offer() {
        let mut input = sample_input();
        input.offers[0].annual_interest_rate_percent = dec!(-1);
        match compare_bank_offers(&input) {
            Err(PropCalcError::InvalidParameter { field, .. }) => {
                assert!(field.contains("State Bank of India"))
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}
