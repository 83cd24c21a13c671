use clap::Args;
use serde::{Deserialize, Serialize};

use crate::core::{
    BorrowingInputs, BorrowingPlan, BorrowingYear, DEFAULT_PROJECTION_YEARS, DepletionPlan,
    DepletionPoint, GrowthSummary, IncomeFromAssets, RATE_SEARCH_MAX, RetirementInputs,
    RetirementPlan, RetirementScenario, RoiInputs, RoiResult, RoiYear, StrategyComparison,
    StrategyInputs, Unreachable, YEARS_SEARCH_MAX, YearRecord, YieldPoint, asset_depletion,
    borrowing_projection, calculate_roi, compare_strategies, depletion_curve, future_value,
    growth_summary, income_from_assets, plan_borrowing, plan_retirement, required_contribution,
    required_principal, required_rate, required_years, retirement_scenarios, roi_growth,
    yearly_breakdown, yield_curve,
};
use crate::error::{InputError, ensure_in_range, ensure_non_negative, ensure_positive};

const MAX_WITHDRAWAL_RATE_PERCENT: f64 = 8.0;

/// A request the CLI and the HTTP API can both serve: validate, then evaluate.
pub trait Calculator {
    type Output: Serialize;

    fn name(&self) -> &'static str;
    fn validate(&self) -> Result<(), InputError>;
    /// Only called on validated input.
    fn evaluate(&self) -> Self::Output;
}

pub fn run_calculator<C: Calculator>(request: &C) -> Result<C::Output, InputError> {
    request.validate()?;
    Ok(request.evaluate())
}

fn ensure_percent(field: &'static str, value: f64) -> Result<(), InputError> {
    ensure_in_range(field, value, 0.0, 100.0)
}

fn ensure_years(field: &'static str, years: u32, min: u32) -> Result<(), InputError> {
    ensure_in_range(field, f64::from(years), f64::from(min), YEARS_SEARCH_MAX)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentMode {
    FutureValue,
    RequiredContribution,
    RequiredPrincipal,
    RequiredRate,
    RequiredYears,
}

impl InvestmentMode {
    fn name(self) -> &'static str {
        match self {
            InvestmentMode::FutureValue => "future-value",
            InvestmentMode::RequiredContribution => "required-contribution",
            InvestmentMode::RequiredPrincipal => "required-principal",
            InvestmentMode::RequiredRate => "required-rate",
            InvestmentMode::RequiredYears => "required-years",
        }
    }
}

/// The five annuity quantities. Each investment mode solves for one of them and
/// ignores whatever was passed for it.
#[derive(Args, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestmentArgs {
    /// Starting lump sum
    #[arg(long, default_value_t = INVESTMENT_DEFAULTS.principal)]
    pub principal: f64,
    /// Contribution added at the end of every month
    #[arg(long, default_value_t = INVESTMENT_DEFAULTS.monthly_contribution)]
    pub monthly_contribution: f64,
    /// Nominal annual rate in percent, compounded monthly
    #[arg(long, default_value_t = INVESTMENT_DEFAULTS.annual_rate_percent)]
    pub annual_rate_percent: f64,
    /// Investment horizon; fractions of a year are allowed
    #[arg(long, default_value_t = INVESTMENT_DEFAULTS.years)]
    pub years: f64,
    #[arg(long, default_value_t = INVESTMENT_DEFAULTS.target_amount)]
    pub target_amount: f64,
}

const INVESTMENT_DEFAULTS: InvestmentArgs = InvestmentArgs {
    principal: 10_000.0,
    monthly_contribution: 500.0,
    annual_rate_percent: 7.0,
    years: 10.0,
    target_amount: 100_000.0,
};

impl Default for InvestmentArgs {
    fn default() -> Self {
        INVESTMENT_DEFAULTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentRequest {
    pub mode: InvestmentMode,
    pub args: InvestmentArgs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResponse {
    pub mode: InvestmentMode,
    pub reachable: bool,
    /// The solved quantity: ending balance, contribution, principal, rate or years.
    pub value: Option<f64>,
    pub summary: Option<GrowthSummary>,
    pub yearly_breakdown: Vec<YearRecord>,
    pub message: Option<String>,
}

impl InvestmentRequest {
    // Solved value plus the full set of inputs with that value filled in.
    fn solve(&self) -> Result<(f64, InvestmentArgs), Unreachable> {
        let mut plan = self.args;
        let InvestmentArgs {
            principal,
            monthly_contribution,
            annual_rate_percent,
            years,
            target_amount,
        } = self.args;

        let value = match self.mode {
            InvestmentMode::FutureValue => {
                future_value(principal, monthly_contribution, annual_rate_percent, years)
            }
            InvestmentMode::RequiredContribution => {
                let value =
                    required_contribution(principal, target_amount, annual_rate_percent, years);
                plan.monthly_contribution = value;
                value
            }
            InvestmentMode::RequiredPrincipal => {
                let value = required_principal(
                    target_amount,
                    monthly_contribution,
                    annual_rate_percent,
                    years,
                );
                plan.principal = value;
                value
            }
            InvestmentMode::RequiredRate => {
                let value = required_rate(principal, target_amount, monthly_contribution, years)?;
                plan.annual_rate_percent = value;
                value
            }
            InvestmentMode::RequiredYears => {
                let value = required_years(
                    principal,
                    target_amount,
                    monthly_contribution,
                    annual_rate_percent,
                )?;
                plan.years = value;
                value
            }
        };
        Ok((value, plan))
    }
}

impl Calculator for InvestmentRequest {
    type Output = InvestmentResponse;

    fn name(&self) -> &'static str {
        self.mode.name()
    }

    fn validate(&self) -> Result<(), InputError> {
        let args = &self.args;
        let mode = self.mode;

        if mode != InvestmentMode::RequiredPrincipal {
            ensure_non_negative("--principal", args.principal)?;
        }
        if mode != InvestmentMode::RequiredContribution {
            ensure_non_negative("--monthly-contribution", args.monthly_contribution)?;
        }
        if mode != InvestmentMode::RequiredRate {
            ensure_in_range(
                "--annual-rate-percent",
                args.annual_rate_percent,
                0.0,
                RATE_SEARCH_MAX,
            )?;
        }
        match mode {
            InvestmentMode::RequiredYears => {}
            InvestmentMode::RequiredRate => {
                ensure_positive("--years", args.years)?;
                ensure_in_range("--years", args.years, 0.0, YEARS_SEARCH_MAX)?;
            }
            _ => ensure_in_range("--years", args.years, 0.0, YEARS_SEARCH_MAX)?,
        }
        if mode != InvestmentMode::FutureValue {
            ensure_non_negative("--target-amount", args.target_amount)?;
        }
        Ok(())
    }

    fn evaluate(&self) -> InvestmentResponse {
        match self.solve() {
            Ok((value, plan)) => InvestmentResponse {
                mode: self.mode,
                reachable: true,
                value: Some(value),
                summary: Some(growth_summary(
                    plan.principal,
                    plan.monthly_contribution,
                    plan.annual_rate_percent,
                    plan.years,
                )),
                yearly_breakdown: yearly_breakdown(
                    plan.principal,
                    plan.monthly_contribution,
                    plan.annual_rate_percent,
                    plan.years,
                ),
                message: None,
            },
            Err(unreachable) => InvestmentResponse {
                mode: self.mode,
                reachable: false,
                value: None,
                summary: None,
                yearly_breakdown: Vec::new(),
                message: Some(unreachable.to_string()),
            },
        }
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetirementArgs {
    /// Income wanted each year once retired
    #[arg(long, default_value_t = RETIREMENT_DEFAULTS.desired_annual_income)]
    pub desired_annual_income: f64,
    #[arg(long, default_value_t = RETIREMENT_DEFAULTS.current_assets)]
    pub current_assets: f64,
    #[arg(long, default_value_t = RETIREMENT_DEFAULTS.years_to_retirement)]
    pub years_to_retirement: f64,
    /// Expected annual return in percent
    #[arg(long, default_value_t = RETIREMENT_DEFAULTS.annual_rate_percent)]
    pub annual_rate_percent: f64,
    /// Safe withdrawal rate in percent, at most 8
    #[arg(long, default_value_t = RETIREMENT_DEFAULTS.withdrawal_rate_percent)]
    pub withdrawal_rate_percent: f64,
}

const RETIREMENT_DEFAULTS: RetirementArgs = RetirementArgs {
    desired_annual_income: 60_000.0,
    current_assets: 50_000.0,
    years_to_retirement: 20.0,
    annual_rate_percent: 7.0,
    withdrawal_rate_percent: 4.0,
};

impl Default for RetirementArgs {
    fn default() -> Self {
        RETIREMENT_DEFAULTS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResponse {
    pub plan: RetirementPlan,
    pub scenarios: Vec<RetirementScenario>,
}

impl RetirementArgs {
    fn inputs(&self) -> RetirementInputs {
        RetirementInputs {
            desired_annual_income: self.desired_annual_income,
            current_assets: self.current_assets,
            years_to_retirement: self.years_to_retirement,
            annual_rate_percent: self.annual_rate_percent,
            withdrawal_rate_percent: self.withdrawal_rate_percent,
        }
    }
}

impl Calculator for RetirementArgs {
    type Output = RetirementResponse;

    fn name(&self) -> &'static str {
        "retirement"
    }

    fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("--desired-annual-income", self.desired_annual_income)?;
        ensure_non_negative("--current-assets", self.current_assets)?;
        ensure_positive("--years-to-retirement", self.years_to_retirement)?;
        ensure_in_range(
            "--years-to-retirement",
            self.years_to_retirement,
            0.0,
            YEARS_SEARCH_MAX,
        )?;
        ensure_percent("--annual-rate-percent", self.annual_rate_percent)?;
        ensure_positive("--withdrawal-rate-percent", self.withdrawal_rate_percent)?;
        ensure_in_range(
            "--withdrawal-rate-percent",
            self.withdrawal_rate_percent,
            0.0,
            MAX_WITHDRAWAL_RATE_PERCENT,
        )
    }

    fn evaluate(&self) -> RetirementResponse {
        let inputs = self.inputs();
        RetirementResponse {
            plan: plan_retirement(&inputs),
            scenarios: retirement_scenarios(&inputs),
        }
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeArgs {
    #[arg(long, default_value_t = INCOME_DEFAULTS.desired_monthly_income)]
    pub desired_monthly_income: f64,
    /// Annual dividend yield in percent
    #[arg(long, default_value_t = INCOME_DEFAULTS.dividend_yield_percent)]
    pub dividend_yield_percent: f64,
}

const INCOME_DEFAULTS: IncomeArgs = IncomeArgs {
    desired_monthly_income: 5_000.0,
    dividend_yield_percent: 4.0,
};

impl Default for IncomeArgs {
    fn default() -> Self {
        INCOME_DEFAULTS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResponse {
    pub income: IncomeFromAssets,
    pub yield_curve: Vec<YieldPoint>,
}

impl Calculator for IncomeArgs {
    type Output = IncomeResponse;

    fn name(&self) -> &'static str {
        "income"
    }

    fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("--desired-monthly-income", self.desired_monthly_income)?;
        ensure_percent("--dividend-yield-percent", self.dividend_yield_percent)
    }

    fn evaluate(&self) -> IncomeResponse {
        IncomeResponse {
            income: income_from_assets(self.desired_monthly_income, self.dividend_yield_percent),
            yield_curve: yield_curve(self.desired_monthly_income),
        }
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepletionArgs {
    #[arg(long, default_value_t = DEPLETION_DEFAULTS.desired_monthly_income)]
    pub desired_monthly_income: f64,
    /// Share of the starting assets withdrawn each month, in percent
    #[arg(long, default_value_t = DEPLETION_DEFAULTS.monthly_withdrawal_rate_percent)]
    pub monthly_withdrawal_rate_percent: f64,
    #[arg(long, default_value_t = DEPLETION_DEFAULTS.annual_return_percent)]
    pub annual_return_percent: f64,
    #[arg(long, default_value_t = DEPLETION_DEFAULTS.years)]
    pub years: u32,
}

const DEPLETION_DEFAULTS: DepletionArgs = DepletionArgs {
    desired_monthly_income: 5_000.0,
    monthly_withdrawal_rate_percent: 0.5,
    annual_return_percent: 7.0,
    years: 30,
};

impl Default for DepletionArgs {
    fn default() -> Self {
        DEPLETION_DEFAULTS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionResponse {
    pub plan: DepletionPlan,
    pub curve: Vec<DepletionPoint>,
}

impl Calculator for DepletionArgs {
    type Output = DepletionResponse;

    fn name(&self) -> &'static str {
        "depletion"
    }

    fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("--desired-monthly-income", self.desired_monthly_income)?;
        ensure_percent(
            "--monthly-withdrawal-rate-percent",
            self.monthly_withdrawal_rate_percent,
        )?;
        ensure_percent("--annual-return-percent", self.annual_return_percent)?;
        ensure_years("--years", self.years, 0)
    }

    fn evaluate(&self) -> DepletionResponse {
        DepletionResponse {
            plan: asset_depletion(
                self.desired_monthly_income,
                self.monthly_withdrawal_rate_percent,
                self.annual_return_percent,
                self.years,
            ),
            curve: depletion_curve(
                self.desired_monthly_income,
                self.annual_return_percent,
                self.years,
            ),
        }
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorrowingArgs {
    #[arg(long, default_value_t = BORROWING_DEFAULTS.asset_value)]
    pub asset_value: f64,
    /// Share of the asset a lender will advance, in percent
    #[arg(long, default_value_t = BORROWING_DEFAULTS.loan_to_value_percent)]
    pub loan_to_value_percent: f64,
    /// Annual loan interest in percent
    #[arg(long, default_value_t = BORROWING_DEFAULTS.interest_rate_percent)]
    pub interest_rate_percent: f64,
    #[arg(long, default_value_t = BORROWING_DEFAULTS.asset_growth_percent)]
    pub asset_growth_percent: f64,
    #[arg(long, default_value_t = BORROWING_DEFAULTS.desired_monthly_income)]
    pub desired_monthly_income: f64,
    /// Horizon for the future asset value and LTV
    #[arg(long, default_value_t = BORROWING_DEFAULTS.years)]
    pub years: u32,
}

const BORROWING_DEFAULTS: BorrowingArgs = BorrowingArgs {
    asset_value: 1_000_000.0,
    loan_to_value_percent: 50.0,
    interest_rate_percent: 6.0,
    asset_growth_percent: 7.0,
    desired_monthly_income: 5_000.0,
    years: 10,
};

impl Default for BorrowingArgs {
    fn default() -> Self {
        BORROWING_DEFAULTS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingResponse {
    pub plan: BorrowingPlan,
    pub projection: Vec<BorrowingYear>,
}

impl Calculator for BorrowingArgs {
    type Output = BorrowingResponse;

    fn name(&self) -> &'static str {
        "borrowing"
    }

    fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("--asset-value", self.asset_value)?;
        ensure_percent("--loan-to-value-percent", self.loan_to_value_percent)?;
        ensure_percent("--interest-rate-percent", self.interest_rate_percent)?;
        ensure_percent("--asset-growth-percent", self.asset_growth_percent)?;
        ensure_non_negative("--desired-monthly-income", self.desired_monthly_income)?;
        ensure_years("--years", self.years, 0)
    }

    fn evaluate(&self) -> BorrowingResponse {
        let inputs = BorrowingInputs {
            asset_value: self.asset_value,
            loan_to_value_percent: self.loan_to_value_percent,
            interest_rate_percent: self.interest_rate_percent,
            asset_growth_percent: self.asset_growth_percent,
            desired_monthly_income: self.desired_monthly_income,
            years: self.years,
        };
        BorrowingResponse {
            plan: plan_borrowing(&inputs),
            projection: borrowing_projection(&inputs),
        }
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyArgs {
    #[arg(long, default_value_t = STRATEGY_DEFAULTS.desired_monthly_income)]
    pub desired_monthly_income: f64,
    #[arg(long, default_value_t = STRATEGY_DEFAULTS.compounding_rate_percent)]
    pub compounding_rate_percent: f64,
    #[arg(long, default_value_t = STRATEGY_DEFAULTS.dividend_yield_percent)]
    pub dividend_yield_percent: f64,
    #[arg(long, default_value_t = STRATEGY_DEFAULTS.withdrawal_rate_percent)]
    pub withdrawal_rate_percent: f64,
    /// Annual borrowing rate in percent; also used as the loan-to-value ratio
    #[arg(long, default_value_t = STRATEGY_DEFAULTS.borrowing_rate_percent)]
    pub borrowing_rate_percent: f64,
    #[arg(long, default_value_t = STRATEGY_DEFAULTS.years)]
    pub years: u32,
}

const STRATEGY_DEFAULTS: StrategyArgs = StrategyArgs {
    desired_monthly_income: 5_000.0,
    compounding_rate_percent: 7.0,
    dividend_yield_percent: 3.0,
    withdrawal_rate_percent: 4.0,
    borrowing_rate_percent: 5.0,
    years: DEFAULT_PROJECTION_YEARS,
};

impl Default for StrategyArgs {
    fn default() -> Self {
        STRATEGY_DEFAULTS
    }
}

impl Calculator for StrategyArgs {
    type Output = StrategyComparison;

    fn name(&self) -> &'static str {
        "strategies"
    }

    fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("--desired-monthly-income", self.desired_monthly_income)?;
        ensure_percent("--compounding-rate-percent", self.compounding_rate_percent)?;
        for (field, value) in [
            ("--dividend-yield-percent", self.dividend_yield_percent),
            ("--withdrawal-rate-percent", self.withdrawal_rate_percent),
            ("--borrowing-rate-percent", self.borrowing_rate_percent),
        ] {
            ensure_positive(field, value)?;
            ensure_percent(field, value)?;
        }
        ensure_years("--years", self.years, 0)
    }

    fn evaluate(&self) -> StrategyComparison {
        compare_strategies(&StrategyInputs {
            desired_monthly_income: self.desired_monthly_income,
            compounding_rate_percent: self.compounding_rate_percent,
            dividend_yield_percent: self.dividend_yield_percent,
            withdrawal_rate_percent: self.withdrawal_rate_percent,
            borrowing_rate_percent: self.borrowing_rate_percent,
            years: self.years,
        })
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoiArgs {
    #[arg(long, default_value_t = ROI_DEFAULTS.starting_capital)]
    pub starting_capital: f64,
    #[arg(long, default_value_t = ROI_DEFAULTS.monthly_savings)]
    pub monthly_savings: f64,
    #[arg(long, default_value_t = ROI_DEFAULTS.compounding_rate_percent)]
    pub compounding_rate_percent: f64,
    #[arg(long, default_value_t = ROI_DEFAULTS.years)]
    pub years: u32,
    /// Multiplier applied to the final value; 1 means no leverage
    #[arg(long, default_value_t = ROI_DEFAULTS.leverage)]
    pub leverage: f64,
    /// Warn from the first year the savings-only annualised return drops below this
    #[arg(long, default_value_t = ROI_DEFAULTS.roi_threshold_percent)]
    pub roi_threshold_percent: f64,
}

const ROI_DEFAULTS: RoiArgs = RoiArgs {
    starting_capital: 10_000.0,
    monthly_savings: 500.0,
    compounding_rate_percent: 7.0,
    years: 10,
    leverage: 1.0,
    roi_threshold_percent: 5.0,
};

impl Default for RoiArgs {
    fn default() -> Self {
        ROI_DEFAULTS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResponse {
    pub result: RoiResult,
    pub growth: Vec<RoiYear>,
}

impl Calculator for RoiArgs {
    type Output = RoiResponse;

    fn name(&self) -> &'static str {
        "roi"
    }

    fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("--starting-capital", self.starting_capital)?;
        ensure_non_negative("--monthly-savings", self.monthly_savings)?;
        ensure_percent("--compounding-rate-percent", self.compounding_rate_percent)?;
        ensure_years("--years", self.years, 1)?;
        ensure_positive("--leverage", self.leverage)?;
        ensure_in_range("--roi-threshold-percent", self.roi_threshold_percent, -100.0, 100.0)
    }

    fn evaluate(&self) -> RoiResponse {
        let inputs = RoiInputs {
            starting_capital: self.starting_capital,
            monthly_savings: self.monthly_savings,
            compounding_rate_percent: self.compounding_rate_percent,
            years: self.years,
            leverage: self.leverage,
            roi_threshold_percent: self.roi_threshold_percent,
        };
        RoiResponse {
            result: calculate_roi(&inputs),
            growth: roi_growth(&inputs),
        }
    }
}
