use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loan::DISPLAY_YEARS_CAP;
use crate::time_value::monthly_rate;
use crate::types::{Money, Percent, Years};

/// Principal/interest split of one loan year, for the stacked bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySeriesPoint {
    /// 1-based loan year
    pub year: Years,
    pub principal_paid_this_year: Money,
    pub interest_paid_this_year: Money,
    /// Outstanding balance after the year's last instalment
    pub closing_balance: Money,
}

/// Walk the loan month by month and bucket each instalment into principal
/// and interest per year.
///
/// Only the first `min(term_years, 10)` years are produced. The running
/// balance carries across years; once it reaches zero no further principal
/// or interest accrues, and the final instalment repays at most the balance
/// left. Figures beyond the range of `Decimal` saturate instead of
/// failing.
pub fn generate_amortization_series(
    loan_amount: Money,
    annual_rate_pct: Percent,
    emi: Money,
    term_years: Years,
) -> Vec<YearlySeriesPoint> {
    let years = term_years.min(DISPLAY_YEARS_CAP);
    let r = monthly_rate(annual_rate_pct);

    let mut series = Vec::with_capacity(years as usize);
    let mut remaining_balance = loan_amount;

    for year in 1..=years {
        let mut yearly_principal = Decimal::ZERO;
        let mut yearly_interest = Decimal::ZERO;

        for _ in 0..12 {
            if remaining_balance <= Decimal::ZERO {
                break;
            }
            let interest_payment = remaining_balance.saturating_mul(r);
            let principal_payment = emi.saturating_sub(interest_payment).min(remaining_balance);

            yearly_interest = yearly_interest.saturating_add(interest_payment);
            yearly_principal = yearly_principal.saturating_add(principal_payment);
            remaining_balance = remaining_balance.saturating_sub(principal_payment);
        }

        series.push(YearlySeriesPoint {
            year,
            principal_paid_this_year: yearly_principal,
            interest_paid_this_year: yearly_interest,
            closing_balance: remaining_balance.max(Decimal::ZERO),
        });
    }

    log::debug!(
        "amortization series: {} years, balance after display window {}",
        series.len(),
        remaining_balance
    );

    series
}
