use super::types::{DepletionPlan, DepletionPoint, IncomeFromAssets, YieldPoint};

const YIELD_CURVE: (f64, f64) = (1.0, 15.0);
const DEPLETION_CURVE: (f64, f64) = (2.0, 24.0);
const CURVE_STEP: f64 = 0.5;

pub fn income_from_assets(
    desired_monthly_income: f64,
    dividend_yield_percent: f64,
) -> IncomeFromAssets {
    let dividend_yield = dividend_yield_percent / 100.0;
    let annual_income = desired_monthly_income * 12.0;
    let total_assets = if dividend_yield > 0.0 {
        annual_income / dividend_yield
    } else {
        0.0
    };

    IncomeFromAssets {
        annual_income,
        total_assets,
        monthly_dividends: total_assets * dividend_yield / 12.0,
        income_per_thousand: 1_000.0 * dividend_yield / 12.0,
    }
}

pub fn yield_curve(desired_monthly_income: f64) -> Vec<YieldPoint> {
    let annual_income = desired_monthly_income * 12.0;
    curve_points(YIELD_CURVE)
        .map(|yield_percent| YieldPoint {
            yield_percent,
            assets_needed: annual_income / (yield_percent / 100.0),
        })
        .collect()
}

/// Assets needed to fund `desired_monthly_income` at a fixed monthly withdrawal rate, and
/// what is left after `years` of withdrawing that income while the rest earns
/// `annual_return_percent` (converted to an effective monthly return).
pub fn asset_depletion(
    desired_monthly_income: f64,
    monthly_withdrawal_rate_percent: f64,
    annual_return_percent: f64,
    years: u32,
) -> DepletionPlan {
    let withdrawal_rate = monthly_withdrawal_rate_percent / 100.0;
    let monthly_return = effective_monthly_return(annual_return_percent);
    let initial_assets = initial_assets_for(desired_monthly_income, withdrawal_rate);

    DepletionPlan {
        initial_assets,
        final_assets: walk_withdrawals(
            initial_assets,
            desired_monthly_income,
            monthly_return,
            years,
        ),
        annual_withdrawal_rate_percent: monthly_withdrawal_rate_percent * 12.0,
        monthly_return,
        depletes: withdrawal_rate > monthly_return,
    }
}

// Annual withdrawal rates 2%..24% in half-point steps.
pub fn depletion_curve(
    desired_monthly_income: f64,
    annual_return_percent: f64,
    years: u32,
) -> Vec<DepletionPoint> {
    let monthly_return = effective_monthly_return(annual_return_percent);
    curve_points(DEPLETION_CURVE)
        .map(|annual_rate| {
            let initial_assets =
                initial_assets_for(desired_monthly_income, annual_rate / 12.0 / 100.0);
            DepletionPoint {
                annual_withdrawal_rate_percent: annual_rate,
                initial_assets,
                final_assets: walk_withdrawals(
                    initial_assets,
                    desired_monthly_income,
                    monthly_return,
                    years,
                ),
            }
        })
        .collect()
}

pub(crate) fn effective_monthly_return(annual_percent: f64) -> f64 {
    (1.0 + annual_percent / 100.0).powf(1.0 / 12.0) - 1.0
}

fn initial_assets_for(desired_monthly_income: f64, monthly_withdrawal_rate: f64) -> f64 {
    if monthly_withdrawal_rate > 0.0 {
        desired_monthly_income / monthly_withdrawal_rate
    } else {
        0.0
    }
}

fn walk_withdrawals(initial: f64, monthly_income: f64, monthly_return: f64, years: u32) -> f64 {
    let mut balance = initial;
    for _ in 0..years * 12 {
        balance = balance * (1.0 + monthly_return) - monthly_income;
    }
    balance.max(0.0)
}

fn curve_points((start, end): (f64, f64)) -> impl Iterator<Item = f64> {
    let steps = ((end - start) / CURVE_STEP).round() as u32;
    (0..=steps).map(move |i| start + f64::from(i) * CURVE_STEP)
}
