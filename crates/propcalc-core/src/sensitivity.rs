use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::time_value::{emi, require_positive, total_months, MAX_TERM_YEARS};
use crate::types::*;
use crate::PropCalcResult;

/// Guard against accidental million-cell grids from a tiny step
const MAX_SWEEP_POINTS: usize = 200;

/// A `min..=max` sweep in fixed steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

/// Input for the rate x term EMI grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiSensitivityInput {
    pub loan_amount: Money,
    /// Annual interest rates in percent
    pub rate_range: SweepRange,
    /// Loan terms in whole years
    pub term_range: SweepRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiSensitivityOutput {
    pub rates: Vec<Percent>,
    pub terms: Vec<Years>,
    /// matrix[i][j] = EMI at rates[i] over terms[j]
    pub matrix: Vec<Vec<Money>>,
    /// Lowest and highest EMI in the grid
    pub emi_range: (Money, Money),
}

/// Generate the sweep values from min to max with step, always ending on max.
fn generate_sweep_values(name: &str, range: &SweepRange) -> PropCalcResult<Vec<Decimal>> {
    if range.step <= Decimal::ZERO {
        return Err(PropCalcError::invalid(name, "Step must be positive"));
    }
    if range.min > range.max {
        return Err(PropCalcError::invalid(name, "Min must be <= max"));
    }

    let mut values = Vec::new();
    let mut push = |value: Decimal| {
        if values.len() == MAX_SWEEP_POINTS {
            return Err(PropCalcError::invalid(
                name,
                format!("Sweep produces more than {MAX_SWEEP_POINTS} points"),
            ));
        }
        values.push(value);
        Ok(())
    };

    // Stepping past Decimal::MAX ends the walk; max is appended below
    let mut current = Some(range.min);
    let mut last = range.min;
    while let Some(value) = current.filter(|v| *v <= range.max) {
        push(value)?;
        last = value;
        current = value.checked_add(range.step);
    }
    if last < range.max {
        push(range.max)?;
    }

    Ok(values)
}

fn to_term_years(value: Decimal) -> PropCalcResult<Years> {
    if value.fract() != Decimal::ZERO
        || value < Decimal::ONE
        || value > Decimal::from(MAX_TERM_YEARS)
    {
        return Err(PropCalcError::invalid(
            "term_range",
            format!("Term {value} must be a whole number of years between 1 and {MAX_TERM_YEARS}"),
        ));
    }
    value.to_u32().ok_or_else(|| PropCalcError::invalid("term_range", "Term out of range"))
}

/// EMI for every (rate, term) pair of the two sweeps.
pub fn emi_sensitivity(
    input: &EmiSensitivityInput,
) -> PropCalcResult<ComputationOutput<EmiSensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("loan_amount", input.loan_amount)?;

    let rates = generate_sweep_values("rate_range", &input.rate_range)?;
    if rates[0] < Decimal::ZERO {
        return Err(PropCalcError::invalid(
            "rate_range",
            "Interest rates cannot be negative",
        ));
    }
    if rates[0].is_zero() {
        warnings.push("Rate sweep includes 0%: straight-line EMI for that row".into());
    }

    let terms = generate_sweep_values("term_range", &input.term_range)?
        .into_iter()
        .map(to_term_years)
        .collect::<PropCalcResult<Vec<Years>>>()?;

    let mut matrix = Vec::with_capacity(rates.len());
    for rate in &rates {
        let row = terms
            .iter()
            .map(|t| emi(input.loan_amount, *rate, total_months(*t)?))
            .collect::<PropCalcResult<Vec<Money>>>()?;
        matrix.push(row);
    }

    let flat = matrix.iter().flatten().copied();
    let low = flat.clone().min().unwrap_or(Decimal::ZERO);
    let high = flat.max().unwrap_or(Decimal::ZERO);

    let output = EmiSensitivityOutput {
        rates,
        terms,
        matrix,
        emi_range: (low, high),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "2-Way EMI Sensitivity (interest rate x tenure)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> EmiSensitivityInput {
        EmiSensitivityInput {
            loan_amount: dec!(4000000),
            rate_range: SweepRange {
                min: dec!(8),
                max: dec!(10),
                step: dec!(0.5),
            },
            term_range: SweepRange {
                min: dec!(10),
                max: dec!(30),
                step: dec!(5),
            },
        }
    }

    #[test]
    fn test_grid_dimensions() {
        let out = emi_sensitivity(&sample_input()).unwrap().result;
        assert_eq!(out.rates.len(), 5);
        assert_eq!(out.terms, vec![10, 15, 20, 25, 30]);
        assert_eq!(out.matrix.len(), 5);
        assert!(out.matrix.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn test_emi_rises_with_rate_and_falls_with_term() {
        let out = emi_sensitivity(&sample_input()).unwrap().result;
        for i in 0..out.rates.len() {
            for j in 0..out.terms.len() {
                if i > 0 {
                    assert!(out.matrix[i][j] > out.matrix[i - 1][j]);
                }
                if j > 0 {
                    assert!(out.matrix[i][j] < out.matrix[i][j - 1]);
                }
            }
        }
        // Cheapest: lowest rate, longest term
        assert_eq!(out.emi_range.0, out.matrix[0][4]);
        assert_eq!(out.emi_range.1, out.matrix[4][0]);
    }

    #[test]
    fn test_max_included_when_step_overshoots() {
        let mut input = sample_input();
        input.rate_range.step = dec!(0.75);
        let out = emi_sensitivity(&input).unwrap().result;
        assert_eq!(out.rates, vec![dec!(8), dec!(8.75), dec!(9.5), dec!(10)]);
    }

    #[test]
    fn test_fractional_term_rejected() {
        let mut input = sample_input();
        input.term_range.step = dec!(2.5);
        assert!(emi_sensitivity(&input).is_err());
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut input = sample_input();
        input.rate_range.step = Decimal::ZERO;
        assert!(emi_sensitivity(&input).is_err());
    }

    #[test]
    fn test_min_above_max_rejected() {
        let mut input = sample_input();
        input.rate_range.min = dec!(12);
        assert!(emi_sensitivity(&input).is_err());
    }

    #[test]
    fn test_sweep_point_limit_counts_closing_max() {
        let exact = SweepRange {
            min: Decimal::ZERO,
            max: dec!(199),
            step: Decimal::ONE,
        };
        assert_eq!(generate_sweep_values("rate_range", &exact).unwrap().len(), 200);

        // 200 stepped points plus the appended max would be 201
        let overshoot = SweepRange {
            min: Decimal::ZERO,
            max: dec!(199.5),
            step: Decimal::ONE,
        };
        assert!(generate_sweep_values("rate_range", &overshoot).is_err());
    }

    #[test]
    fn test_sweep_near_decimal_max_does_not_overflow() {
        let range = SweepRange {
            min: Decimal::MAX - dec!(1),
            max: Decimal::MAX,
            step: dec!(10),
        };
        let values = generate_sweep_values("rate_range", &range).unwrap();
        assert_eq!(values, vec![Decimal::MAX - dec!(1), Decimal::MAX]);
    }
}
