use super::types::{IncomeStrategy, StrategyComparison, StrategyYear};

pub const DEFAULT_PROJECTION_YEARS: u32 = 30;

#[derive(Debug, Clone, Copy)]
pub struct StrategyInputs {
    pub desired_monthly_income: f64,
    pub compounding_rate_percent: f64,
    pub dividend_yield_percent: f64,
    pub withdrawal_rate_percent: f64,
    // Doubles as the loan-to-value ratio for buy-borrow-die.
    pub borrowing_rate_percent: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy)]
struct Rates {
    compounding: f64,
    dividend_yield: f64,
    withdrawal: f64,
    loan_to_value: f64,
}

impl Rates {
    fn from_inputs(inputs: &StrategyInputs) -> Self {
        Self {
            compounding: inputs.compounding_rate_percent / 100.0,
            dividend_yield: inputs.dividend_yield_percent / 100.0,
            withdrawal: inputs.withdrawal_rate_percent / 100.0,
            loan_to_value: inputs.borrowing_rate_percent / 100.0,
        }
    }
}

/// Capital each income strategy needs up front, and how assets, net worth and monthly income
/// evolve under each one. Zero yield, withdrawal or borrowing rates make the matching
/// strategy's required capital infinite; callers reject them.
pub fn compare_strategies(inputs: &StrategyInputs) -> StrategyComparison {
    let rates = Rates::from_inputs(inputs);
    let annual_income = inputs.desired_monthly_income * 12.0;

    let dividend_assets = annual_income / rates.dividend_yield;
    let depletion_assets = annual_income / rates.withdrawal;
    let buy_borrow_die_assets = annual_income / rates.loan_to_value;

    let best_strategy = [
        (IncomeStrategy::IncomeFromAssets, dividend_assets),
        (IncomeStrategy::AssetDepletion, depletion_assets),
        (IncomeStrategy::BuyBorrowDie, buy_borrow_die_assets),
    ]
    .into_iter()
    .reduce(|best, candidate| if candidate.1 < best.1 { candidate } else { best })
    .map(|(strategy, _)| strategy)
    .unwrap_or(IncomeStrategy::IncomeFromAssets);

    let years = (0..=inputs.years)
        .map(|year| {
            project_year(
                year,
                rates,
                annual_income,
                dividend_assets,
                depletion_assets,
                buy_borrow_die_assets,
            )
        })
        .collect();

    StrategyComparison {
        dividend_assets,
        depletion_assets,
        buy_borrow_die_assets,
        best_strategy,
        years,
    }
}

fn project_year(
    year: u32,
    rates: Rates,
    annual_income: f64,
    dividend_assets: f64,
    depletion_assets: f64,
    buy_borrow_die_assets: f64,
) -> StrategyYear {
    let exponent = f64::from(year);

    // Dividends are paid out, so only the excess return compounds.
    let dividend_value =
        dividend_assets * (1.0 + rates.compounding - rates.dividend_yield).powf(exponent);

    let mut depletion_fixed = depletion_assets;
    let mut depletion_proportional = depletion_assets;
    for _ in 0..year {
        depletion_fixed = depletion_fixed * (1.0 + rates.compounding) - annual_income;
        depletion_proportional = depletion_proportional * (1.0 + rates.compounding)
            - depletion_proportional * rates.withdrawal;
    }
    let depletion_fixed = depletion_fixed.max(0.0);
    let depletion_proportional = depletion_proportional.max(0.0);

    let buy_borrow_die_value = buy_borrow_die_assets * (1.0 + rates.compounding).powf(exponent);
    let initial_debt = buy_borrow_die_assets * rates.loan_to_value;
    let buy_borrow_die_equity = (buy_borrow_die_value - initial_debt).max(0.0);

    StrategyYear {
        year,
        dividend_value,
        depletion_value: depletion_fixed,
        buy_borrow_die_value,
        dividend_net_worth: dividend_value,
        depletion_net_worth: depletion_proportional,
        buy_borrow_die_net_worth: buy_borrow_die_equity,
        dividend_monthly_income: dividend_value * rates.dividend_yield / 12.0,
        depletion_monthly_income: depletion_proportional * rates.withdrawal / 12.0,
        buy_borrow_die_monthly_income: buy_borrow_die_equity * rates.dividend_yield / 12.0,
    }
}
