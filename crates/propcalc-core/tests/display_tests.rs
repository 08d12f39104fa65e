use pretty_assertions::assert_eq;
use propcalc_core::display::{format_currency, format_emi, group_indian, CRORE, LAKH};
use propcalc_core::parse::parse_amount;
use rust_decimal_macros::dec;

#[test]
fn test_crore_threshold() {
    assert!(format_currency(dec!(12_000_000)).contains("Cr"));
    assert!(format_emi(dec!(12_000_000)).contains("Cr"));
    assert_eq!(format_currency(CRORE), "₹1.00 Cr");
    assert_eq!(format_currency(CRORE - dec!(1)), "₹99,99,999");
}

#[test]
fn test_lakh_threshold_for_emi_only() {
    assert!(format_emi(dec!(150_000)).contains("L"));
    assert!(!format_currency(dec!(150_000)).contains("L"));
    assert_eq!(format_emi(LAKH), "₹1.00 L");
    assert_eq!(format_emi(LAKH - dec!(1)), "₹99,999");
}

#[test]
fn test_plain_grouped_integer() {
    let s = format_currency(dec!(5_000));
    assert_eq!(s, "₹5,000");
    assert!(!s.contains("Cr") && !s.contains(" L"));
    assert_eq!(format_emi(dec!(5_000)), "₹5,000");
}

#[test]
fn test_parse_then_format_round_trip_of_form_value() {
    let v = parse_amount("37,50,000").unwrap();
    assert_eq!(group_indian(v), "37,50,000");
    assert_eq!(format_currency(v), "₹37,50,000");
    assert_eq!(format_emi(v), "₹37.50 L");
}
