use super::annuity::{annuity_factor, monthly_rate};
use super::types::{RetirementPlan, RetirementScenario};

pub const SCENARIO_MAX_YEARS: u32 = 30;

#[derive(Debug, Clone, Copy)]
pub struct RetirementInputs {
    pub desired_annual_income: f64,
    pub current_assets: f64,
    pub years_to_retirement: f64,
    pub annual_rate_percent: f64,
    pub withdrawal_rate_percent: f64,
}

pub fn plan_retirement(inputs: &RetirementInputs) -> RetirementPlan {
    let total_needed = total_needed(inputs);
    let future_assets = grown_assets(inputs, inputs.years_to_retirement);
    let additional_needed = total_needed - future_assets;
    let monthly_investment =
        monthly_investment_for(inputs, additional_needed, inputs.years_to_retirement);
    let total_invested = monthly_investment * inputs.years_to_retirement * 12.0;

    RetirementPlan {
        total_needed,
        future_assets,
        additional_needed,
        monthly_investment,
        total_invested,
        investment_growth: total_needed - total_invested - inputs.current_assets,
    }
}

// Monthly investment required for each horizon from 1 to 30 years, same nest egg target.
pub fn retirement_scenarios(inputs: &RetirementInputs) -> Vec<RetirementScenario> {
    let total_needed = total_needed(inputs);
    (1..=SCENARIO_MAX_YEARS)
        .map(|years| {
            let horizon = f64::from(years);
            let additional_needed = total_needed - grown_assets(inputs, horizon);
            RetirementScenario {
                years,
                monthly_investment: monthly_investment_for(inputs, additional_needed, horizon),
            }
        })
        .collect()
}

fn total_needed(inputs: &RetirementInputs) -> f64 {
    inputs.desired_annual_income / (inputs.withdrawal_rate_percent / 100.0)
}

// Current assets compound annually.
fn grown_assets(inputs: &RetirementInputs, years: f64) -> f64 {
    inputs.current_assets * (1.0 + inputs.annual_rate_percent / 100.0).powf(years)
}

fn monthly_investment_for(inputs: &RetirementInputs, additional_needed: f64, years: f64) -> f64 {
    if additional_needed <= 0.0 {
        return 0.0;
    }
    let months = years * 12.0;
    additional_needed / annuity_factor(monthly_rate(inputs.annual_rate_percent), months)
}
