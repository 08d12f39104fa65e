use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::display::{format_currency, format_emi, format_percent};
use crate::loan::amortization::{generate_amortization_series, YearlySeriesPoint};
use crate::loan::growth::{generate_growth_series, GrowthSeriesPoint};
use crate::loan::metrics::{point_metrics, PointMetrics};
use crate::loan::{validate_loan_parameters, LoanParameters};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One slice of the monthly outgo pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub label: String,
    pub monthly_amount: Money,
    /// Share of the total monthly payment
    pub share_percent: Percent,
}

/// Principal versus interest over the whole term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifetimeSplit {
    pub principal: Money,
    pub interest: Money,
    pub principal_share_percent: Percent,
    pub interest_share_percent: Percent,
}

/// Headline figures already formatted for the summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDisplay {
    pub down_payment: String,
    pub loan_amount: String,
    pub monthly_emi: String,
    pub total_monthly_payment: String,
    pub total_interest_paid: String,
    pub monthly_rental_income: String,
    pub monthly_cash_flow: String,
    pub future_property_value: String,
    pub total_appreciation: String,
    pub return_on_investment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutput {
    pub metrics: PointMetrics,
    pub amortization: Vec<YearlySeriesPoint>,
    pub growth: Vec<GrowthSeriesPoint>,
    pub cost_breakdown: Vec<CostComponent>,
    pub lifetime_split: LifetimeSplit,
    pub display: ProjectionDisplay,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Everything the investment calculator screen renders for one set of
/// inputs: point metrics, both chart series, pie-chart breakdowns and the
/// formatted summary.
pub fn project_investment(
    params: &LoanParameters,
) -> PropCalcResult<ComputationOutput<ProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_parameters(params, &mut warnings)?;
    let metrics = point_metrics(params, &mut warnings)?;

    let amortization = generate_amortization_series(
        metrics.loan_amount,
        params.annual_interest_rate_percent,
        metrics.monthly_emi,
        params.loan_term_years,
    );

    let growth = generate_growth_series(
        params.property_value,
        params.annual_appreciation_rate_percent,
        params.loan_term_years,
        metrics.down_payment,
        metrics.loan_amount,
        metrics.monthly_emi,
    )?;

    if params.loan_term_years > params.display_years() {
        warnings.push(format!(
            "Charts cover the first {} of {} loan years",
            params.display_years(),
            params.loan_term_years
        ));
    }

    let cost_breakdown = cost_breakdown(&metrics);
    let lifetime_split = lifetime_split(&metrics);
    let display = display_block(&metrics);

    let output = ProjectionOutput {
        metrics,
        amortization,
        growth,
        cost_breakdown,
        lifetime_split,
        display,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Property Investment Projection (EMI amortisation, compound appreciation, approximate equity curve)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Chart helpers
// ---------------------------------------------------------------------------

fn share(part: Money, total: Money) -> Percent {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        part / total * dec!(100)
    }
}

fn cost_breakdown(m: &PointMetrics) -> Vec<CostComponent> {
    let total = m.total_monthly_payment;
    [
        ("EMI", m.monthly_emi),
        ("Property Tax", m.monthly_property_tax),
        ("Maintenance", m.monthly_maintenance),
        ("Insurance", m.monthly_insurance),
    ]
    .into_iter()
    .map(|(label, amount)| CostComponent {
        label: label.to_string(),
        monthly_amount: amount,
        share_percent: share(amount, total),
    })
    .collect()
}

fn lifetime_split(m: &PointMetrics) -> LifetimeSplit {
    let principal = m.loan_amount.max(Decimal::ZERO);
    let interest = m.total_interest_paid.max(Decimal::ZERO);
    let total = principal + interest;
    LifetimeSplit {
        principal,
        interest,
        principal_share_percent: share(principal, total),
        interest_share_percent: share(interest, total),
    }
}

fn display_block(m: &PointMetrics) -> ProjectionDisplay {
    ProjectionDisplay {
        down_payment: format_currency(m.down_payment),
        loan_amount: format_currency(m.loan_amount),
        monthly_emi: format_emi(m.monthly_emi),
        total_monthly_payment: format_emi(m.total_monthly_payment),
        total_interest_paid: format_currency(m.total_interest_paid),
        monthly_rental_income: format_currency(m.monthly_rental_income),
        monthly_cash_flow: format_currency(m.monthly_cash_flow),
        future_property_value: format_currency(m.future_property_value),
        total_appreciation: format_currency(m.total_appreciation),
        return_on_investment: format_percent(m.return_on_investment_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_projection_default_inputs() {
        let out = project_investment(&LoanParameters::default()).unwrap();
        let p = &out.result;

        assert_eq!(p.amortization.len(), 10);
        assert_eq!(p.growth.len(), 11);
        assert_eq!(p.metrics.down_payment, dec!(1000000));
        assert_eq!(p.display.down_payment, "₹10,00,000");
        assert_eq!(p.display.loan_amount, "₹40,00,000");
        assert!(out.warnings.iter().any(|w| w.contains("first 10 of 20")));
    }

    #[test]
    fn test_cost_breakdown_shares_sum_to_hundred() {
        let out = project_investment(&LoanParameters::default()).unwrap();
        let total: Decimal = out
            .result
            .cost_breakdown
            .iter()
            .map(|c| c.share_percent)
            .sum();
        assert!((total - dec!(100)).abs() < dec!(0.0001));
        assert_eq!(out.result.cost_breakdown[0].label, "EMI");
    }

    #[test]
    fn test_lifetime_split() {
        let out = project_investment(&LoanParameters::default()).unwrap();
        let split = &out.result.lifetime_split;
        assert_eq!(split.principal, dec!(4000000));
        assert_eq!(split.interest, out.result.metrics.total_interest_paid);
        assert!(
            (split.principal_share_percent + split.interest_share_percent - dec!(100)).abs()
                < dec!(0.0001)
        );
    }

    #[test]
    fn test_series_use_metric_figures() {
        let out = project_investment(&LoanParameters::default()).unwrap();
        let p = &out.result;
        let first = &p.amortization[0];
        let paid = first.principal_paid_this_year + first.interest_paid_this_year;
        assert!((paid - p.metrics.monthly_emi * dec!(12)).abs() < dec!(0.0001));
        assert_eq!(p.growth[0].equity, p.metrics.down_payment);
    }

    #[test]
    fn test_cash_purchase_split_is_all_zero() {
        let mut params = LoanParameters::default();
        params.down_payment_percentage = dec!(100);
        let out = project_investment(&params).unwrap();
        let split = &out.result.lifetime_split;
        assert_eq!(split.principal_share_percent, Decimal::ZERO);
        assert_eq!(split.interest_share_percent, Decimal::ZERO);
        assert_eq!(out.result.display.monthly_emi, "₹0");
    }

    #[test]
    fn test_invalid_parameters_short_circuit() {
        let mut params = LoanParameters::default();
        params.loan_term_years = 0;
        assert!(project_investment(&params).is_err());
    }
}
