use super::annuity::annuity_factor;
use super::income::effective_monthly_return;
use super::types::{RoiResult, RoiYear};

#[derive(Debug, Clone, Copy)]
pub struct RoiInputs {
    pub starting_capital: f64,
    pub monthly_savings: f64,
    pub compounding_rate_percent: f64,
    pub years: u32,
    pub leverage: f64,
    pub roi_threshold_percent: f64,
}

impl RoiInputs {
    fn annual_rate(&self) -> f64 {
        self.compounding_rate_percent / 100.0
    }

    fn capital_growth(&self, years: u32) -> f64 {
        self.starting_capital * (1.0 + self.annual_rate()).powf(f64::from(years))
    }

    fn savings_growth(&self, years: u32) -> f64 {
        let monthly_rate = effective_monthly_return(self.compounding_rate_percent);
        self.monthly_savings * annuity_factor(monthly_rate, f64::from(years * 12))
    }
}

/// Return on capital plus monthly savings, both scaled by `leverage`.
///
/// Requires `years >= 1`; the annualised return is undefined over a zero horizon.
pub fn calculate_roi(inputs: &RoiInputs) -> RoiResult {
    let capital_growth = inputs.capital_growth(inputs.years);
    let savings_growth = inputs.savings_growth(inputs.years);
    let final_value = (capital_growth + savings_growth) * inputs.leverage;
    let total_invested =
        inputs.starting_capital + inputs.monthly_savings * f64::from(inputs.years * 12);
    let total_return = final_value - total_invested;

    let (roi_percent, annualized_return_percent) = if total_invested > 0.0 {
        (
            total_return / total_invested * 100.0,
            annualized_percent(final_value, total_invested, inputs.years),
        )
    } else {
        (0.0, 0.0)
    };
    let unleveraged_value = capital_growth + savings_growth;

    RoiResult {
        final_value,
        total_invested,
        total_return,
        roi_percent,
        annualized_return_percent,
        unleveraged_value,
        leverage_impact: final_value - unleveraged_value,
        threshold_breach_year: threshold_breach_year(inputs),
    }
}

// First year in which the savings-only annualised return drops below the threshold.
fn threshold_breach_year(inputs: &RoiInputs) -> Option<u32> {
    if inputs.monthly_savings <= 0.0 {
        return None;
    }
    (1..=inputs.years).find(|&year| {
        let invested = inputs.monthly_savings * f64::from(year * 12);
        let annualized = annualized_percent(inputs.savings_growth(year), invested, year);
        annualized < inputs.roi_threshold_percent
    })
}

pub fn roi_growth(inputs: &RoiInputs) -> Vec<RoiYear> {
    (0..=inputs.years)
        .map(|year| {
            let capital = inputs.capital_growth(year);
            let savings = inputs.savings_growth(year);
            RoiYear {
                year,
                leveraged_value: (capital + savings) * inputs.leverage,
                unleveraged_value: capital + savings,
                starting_capital_only: capital,
                monthly_savings_only: savings,
            }
        })
        .collect()
}

fn annualized_percent(final_value: f64, invested: f64, years: u32) -> f64 {
    ((final_value / invested).powf(1.0 / f64::from(years)) - 1.0) * 100.0
}
