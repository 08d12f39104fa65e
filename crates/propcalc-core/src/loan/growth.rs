use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropCalcError;
use crate::loan::DISPLAY_YEARS_CAP;
use crate::time_value::compound_growth;
use crate::types::{Money, Percent, Years};
use crate::PropCalcResult;

/// One point of the property value / owner equity line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeriesPoint {
    /// 0-based; year 0 is the purchase date
    pub year: Years,
    pub property_value: Money,
    pub equity: Money,
}

/// Property value and owner equity for years `0..=min(term_years, 10)`.
///
/// Equity is the chart approximation
/// `value_y - loan * (1 - 12 * emi / loan)^y`, not a balance taken from the
/// amortization schedule. Year 0 equity is the down payment. With no loan
/// outstanding the owner holds the full value.
pub fn generate_growth_series(
    property_value: Money,
    appreciation_rate_pct: Percent,
    term_years: Years,
    down_payment: Money,
    loan_amount: Money,
    emi: Money,
) -> PropCalcResult<Vec<GrowthSeriesPoint>> {
    let years = term_years.min(DISPLAY_YEARS_CAP);
    let mut series = Vec::with_capacity(years as usize + 1);

    // Fraction of the loan left after one year under the approximation
    let retained = if loan_amount > Decimal::ZERO {
        let repaid = emi
            .checked_mul(dec!(12))
            .and_then(|yearly| yearly.checked_div(loan_amount))
            .ok_or_else(|| PropCalcError::overflow("equity approximation"))?;
        Some(Decimal::ONE - repaid)
    } else {
        None
    };

    for year in 0..=years {
        let value_at_year = compound_growth(property_value, appreciation_rate_pct, year)?;

        let equity = match (year, retained) {
            (0, _) => down_payment,
            (_, None) => value_at_year,
            (_, Some(base)) => {
                let outstanding = base
                    .checked_powu(u64::from(year))
                    .and_then(|f| f.checked_mul(loan_amount))
                    .ok_or_else(|| PropCalcError::overflow("equity approximation"))?;
                value_at_year
                    .checked_sub(outstanding)
                    .ok_or_else(|| PropCalcError::overflow("equity approximation"))?
            }
        };

        series.push(GrowthSeriesPoint {
            year,
            property_value: value_at_year,
            equity,
        });
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::emi;
    use rust_decimal_macros::dec;

    #[test]
    fn test_includes_year_zero_and_caps_at_ten() {
        let payment = emi(dec!(400000), dec!(8.5), 360).unwrap();
        let series =
            generate_growth_series(dec!(500000), dec!(5), 30, dec!(100000), dec!(400000), payment)
                .unwrap();
        assert_eq!(series.len(), 11);
        assert_eq!(series[0].year, 0);
        assert_eq!(series[10].year, 10);
    }

    #[test]
    fn test_year_zero_values() {
        let series =
            generate_growth_series(dec!(500000), dec!(5), 20, dec!(100000), dec!(400000), dec!(3471))
                .unwrap();
        assert_eq!(series[0].property_value, dec!(500000));
        assert_eq!(series[0].equity, dec!(100000));
    }

    #[test]
    fn test_property_value_compounds() {
        let series =
            generate_growth_series(dec!(100000), dec!(10), 2, dec!(20000), dec!(80000), dec!(1000))
                .unwrap();
        assert_eq!(series[1].property_value, dec!(110000));
        assert_eq!(series[2].property_value, dec!(121000));
    }

    #[test]
    fn test_equity_uses_approximate_curve() {
        // loan 80000, emi 1000 -> retained = 1 - 12000/80000 = 0.85
        let series =
            generate_growth_series(dec!(100000), dec!(10), 2, dec!(20000), dec!(80000), dec!(1000))
                .unwrap();
        // year 1: 110000 - 80000 * 0.85 = 42000
        assert_eq!(series[1].equity, dec!(42000));
        // year 2: 121000 - 80000 * 0.7225 = 63200
        assert_eq!(series[2].equity, dec!(63200));
    }

    #[test]
    fn test_no_loan_equity_is_full_value() {
        let series =
            generate_growth_series(dec!(100000), dec!(10), 3, dec!(100000), Decimal::ZERO, Decimal::ZERO)
                .unwrap();
        assert_eq!(series[0].equity, dec!(100000));
        assert_eq!(series[2].equity, series[2].property_value);
    }

    #[test]
    fn test_zero_term_has_only_year_zero() {
        let series =
            generate_growth_series(dec!(100000), dec!(10), 0, dec!(20000), dec!(80000), dec!(1000))
                .unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_runaway_equity_curve_is_overflow_error() {
        // retained = 1 - 12 * 1e27 / 1 is hugely negative; its powers overflow
        let huge_emi = dec!(1_000_000_000_000_000_000_000_000_000);
        let result = generate_growth_series(dec!(100), dec!(5), 10, dec!(0), Decimal::ONE, huge_emi);
        assert!(matches!(result, Err(PropCalcError::ArithmeticOverflow { .. })));
    }
}
