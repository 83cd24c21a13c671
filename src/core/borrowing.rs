use super::income::effective_monthly_return;
use super::types::{BorrowingPlan, BorrowingYear, LtvRisk};

pub const PROJECTION_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct BorrowingInputs {
    pub asset_value: f64,
    pub loan_to_value_percent: f64,
    pub interest_rate_percent: f64,
    pub asset_growth_percent: f64,
    pub desired_monthly_income: f64,
    pub years: u32,
}

pub fn plan_borrowing(inputs: &BorrowingInputs) -> BorrowingPlan {
    let max_loan = inputs.asset_value * inputs.loan_to_value_percent / 100.0;
    let monthly_interest_rate = effective_monthly_return(inputs.interest_rate_percent);
    let monthly_interest_payment = max_loan * monthly_interest_rate;
    let future_asset_value = grown_asset_value(inputs, inputs.years);
    let future_ltv_percent = if future_asset_value > 0.0 {
        max_loan / future_asset_value * 100.0
    } else {
        0.0
    };

    BorrowingPlan {
        max_loan,
        monthly_interest_rate,
        monthly_interest_payment,
        net_monthly_income: max_loan - monthly_interest_payment,
        future_asset_value,
        future_ltv_percent,
    }
}

/// Fifty-year path of borrowing the desired income every year against the asset instead of
/// selling it. The loan accrues interest on its whole balance and is never repaid.
pub fn borrowing_projection(inputs: &BorrowingInputs) -> Vec<BorrowingYear> {
    let annual_withdrawal = inputs.desired_monthly_income * 12.0;
    let interest_rate = inputs.interest_rate_percent / 100.0;
    let mut loan_balance = 0.0;

    (0..=PROJECTION_YEARS)
        .map(|year| {
            let asset_value = grown_asset_value(inputs, year);
            if year > 0 {
                loan_balance += annual_withdrawal + loan_balance * interest_rate;
            }
            let ltv_percent = if asset_value > 0.0 {
                loan_balance / asset_value * 100.0
            } else {
                0.0
            };
            BorrowingYear {
                year,
                asset_value,
                loan_balance,
                net_worth: asset_value - loan_balance,
                ltv_percent,
                risk: ltv_risk(ltv_percent),
            }
        })
        .collect()
}

pub fn ltv_risk(ltv_percent: f64) -> LtvRisk {
    if ltv_percent < 30.0 {
        LtvRisk::Low
    } else if ltv_percent < 50.0 {
        LtvRisk::Elevated
    } else {
        LtvRisk::High
    }
}

fn grown_asset_value(inputs: &BorrowingInputs, years: u32) -> f64 {
    inputs.asset_value * (1.0 + inputs.asset_growth_percent / 100.0).powf(f64::from(years))
}
