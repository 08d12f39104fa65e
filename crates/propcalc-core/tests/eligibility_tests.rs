use propcalc_core::eligibility::calculator::{compute_eligibility, EligibilityParameters};
use propcalc_core::eligibility::offers::{
    compare_bank_offers, default_bank_offers, BankOffer, OfferComparisonInput,
};
use propcalc_core::time_value::emi;
use propcalc_core::PropCalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Eligibility
// ===========================================================================

#[test]
fn test_eligibility_from_json_payload() {
    let json = r#"{
        "age": 40,
        "monthly_income": "75,000",
        "annual_interest_rate_percent": 8.5,
        "loan_term_years": 15
    }"#;
    // Grouped strings are a caller concern; the engine rejects them
    assert!(serde_json::from_str::<EligibilityParameters>(json).is_err());

    let json = r#"{
        "age": 40,
        "monthly_income": "75000",
        "annual_interest_rate_percent": 8.5,
        "loan_term_years": 15
    }"#;
    let params: EligibilityParameters = serde_json::from_str(json).unwrap();
    assert_eq!(params.existing_monthly_emi, Decimal::ZERO);

    let r = compute_eligibility(&params).unwrap().result;
    // 75000 * (50 - 4) = 34.5 lakh
    assert_eq!(r.max_loan_amount, dec!(3_450_000));
    assert_eq!(r.monthly_emi, emi(dec!(3_450_000), dec!(8.5), 180).unwrap());
}

#[test]
fn test_eligibility_crore_display() {
    let params = EligibilityParameters {
        age: dec!(30),
        monthly_income: dec!(500_000),
        existing_monthly_emi: Decimal::ZERO,
        annual_interest_rate_percent: dec!(8.5),
        loan_term_years: 30,
    };
    let r = compute_eligibility(&params).unwrap().result;
    // 5 lakh * 47 = 2.35 Cr
    assert_eq!(r.max_loan_amount, dec!(23_500_000));
    assert_eq!(r.display.max_loan_amount, "₹2.35 Cr");
    assert!(r.display.monthly_emi.ends_with(" L"));
    assert!(r.display.total_payable.ends_with(" Cr"));
}

// ===========================================================================
// Bank offers
// ===========================================================================

#[test]
fn test_offer_emi_per_bank() {
    let input = OfferComparisonInput {
        loan_amount: dec!(3_000_000),
        loan_term_years: 20,
        offers: default_bank_offers(),
    };
    let out = compare_bank_offers(&input).unwrap();
    for q in &out.result.quotes {
        let expected = emi(dec!(3_000_000), q.annual_interest_rate_percent, 240).unwrap();
        assert_eq!(q.monthly_emi, expected, "{}", q.name);
        assert_eq!(q.total_payable, expected * dec!(240));
    }
}

#[test]
fn test_custom_offer_table() {
    let input = OfferComparisonInput {
        loan_amount: dec!(1_000_000),
        loan_term_years: 10,
        offers: vec![
            BankOffer {
                name: "Co-op Bank".into(),
                annual_interest_rate_percent: dec!(10),
                processing_fee_description: "Nil".into(),
                max_loan_amount: dec!(2_000_000),
            },
            BankOffer {
                name: "Staff Scheme".into(),
                annual_interest_rate_percent: Decimal::ZERO,
                processing_fee_description: "Nil".into(),
                max_loan_amount: dec!(1_000_000),
            },
        ],
    };
    let out = compare_bank_offers(&input).unwrap();
    let best = &out.result.quotes[0];
    assert_eq!(best.name, "Staff Scheme");
    assert!(best.best_value);
    assert!(best.total_interest < dec!(0.000001));
}

// ===========================================================================
// Out-of-range inputs
// ===========================================================================

#[test]
fn test_eligibility_extreme_income_is_overflow_not_panic() {
    let params = EligibilityParameters {
        age: dec!(30),
        monthly_income: Decimal::MAX / dec!(10),
        existing_monthly_emi: Decimal::ZERO,
        annual_interest_rate_percent: dec!(9),
        loan_term_years: 20,
    };
    assert!(matches!(
        compute_eligibility(&params),
        Err(PropCalcError::ArithmeticOverflow { .. })
    ));
}

#[test]
fn test_eligibility_huge_term_rejected() {
    let params = EligibilityParameters {
        age: dec!(30),
        monthly_income: dec!(100_000),
        existing_monthly_emi: Decimal::ZERO,
        annual_interest_rate_percent: dec!(9),
        loan_term_years: 400_000_000,
    };
    assert!(matches!(
        compute_eligibility(&params),
        Err(PropCalcError::InvalidParameter { .. })
    ));
}

#[test]
fn test_offers_extreme_loan_is_overflow_not_panic() {
    let input = OfferComparisonInput {
        loan_amount: Decimal::MAX,
        loan_term_years: 20,
        offers: default_bank_offers(),
    };
    assert!(matches!(
        compare_bank_offers(&input),
        Err(PropCalcError::ArithmeticOverflow { .. })
    ));
}

#[test]
fn test_offers_huge_term_rejected() {
    let input = OfferComparisonInput {
        loan_amount: dec!(5_000_000),
        loan_term_years: 400_000_000,
        offers: default_bank_offers(),
    };
    assert!(matches!(
        compare_bank_offers(&input),
        Err(PropCalcError::InvalidParameter { .. })
    ));
}
