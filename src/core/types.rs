use serde::Serialize;

/// The target cannot be met inside the solver's search domain
/// (rate up to 100%, horizon up to 100 years).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Unreachable;

impl std::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("target amount is impossible to reach with these parameters")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub year: u32,
    pub starting_balance: f64,
    pub contributions: f64,
    pub interest_earned: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSummary {
    pub future_value: f64,
    pub starting_amount: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    pub total_needed: f64,
    pub future_assets: f64,
    pub additional_needed: f64,
    pub monthly_investment: f64,
    pub total_invested: f64,
    pub investment_growth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementScenario {
    pub years: u32,
    pub monthly_investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeFromAssets {
    pub annual_income: f64,
    pub total_assets: f64,
    pub monthly_dividends: f64,
    pub income_per_thousand: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPoint {
    pub yield_percent: f64,
    pub assets_needed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionPlan {
    pub initial_assets: f64,
    pub final_assets: f64,
    pub annual_withdrawal_rate_percent: f64,
    pub monthly_return: f64,
    pub depletes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionPoint {
    pub annual_withdrawal_rate_percent: f64,
    pub initial_assets: f64,
    pub final_assets: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LtvRisk {
    Low,
    Elevated,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingPlan {
    pub max_loan: f64,
    pub monthly_interest_rate: f64,
    pub monthly_interest_payment: f64,
    pub net_monthly_income: f64,
    pub future_asset_value: f64,
    pub future_ltv_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingYear {
    pub year: u32,
    pub asset_value: f64,
    pub loan_balance: f64,
    pub net_worth: f64,
    pub ltv_percent: f64,
    pub risk: LtvRisk,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeStrategy {
    IncomeFromAssets,
    AssetDepletion,
    BuyBorrowDie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub dividend_assets: f64,
    pub depletion_assets: f64,
    pub buy_borrow_die_assets: f64,
    pub best_strategy: IncomeStrategy,
    pub years: Vec<StrategyYear>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyYear {
    pub year: u32,
    pub dividend_value: f64,
    pub depletion_value: f64,
    pub buy_borrow_die_value: f64,
    pub dividend_net_worth: f64,
    pub depletion_net_worth: f64,
    pub buy_borrow_die_net_worth: f64,
    pub dividend_monthly_income: f64,
    pub depletion_monthly_income: f64,
    pub buy_borrow_die_monthly_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub final_value: f64,
    pub total_invested: f64,
    pub total_return: f64,
    pub roi_percent: f64,
    pub annualized_return_percent: f64,
    pub unleveraged_value: f64,
    pub leverage_impact: f64,
    pub threshold_breach_year: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiYear {
    pub year: u32,
    pub leveraged_value: f64,
    pub unleveraged_value: f64,
    pub starting_capital_only: f64,
    pub monthly_savings_only: f64,
}
