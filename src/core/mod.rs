mod annuity;
mod borrowing;
mod income;
mod retirement;
mod roi;
mod solver;
mod strategy;
mod types;

pub use annuity::{
    RATE_SEARCH_MAX, YEARS_SEARCH_MAX, future_value, growth_summary, monthly_rate,
    required_contribution, required_principal, required_rate, required_years, yearly_breakdown,
};
pub use borrowing::{
    BorrowingInputs, PROJECTION_YEARS, borrowing_projection, ltv_risk, plan_borrowing,
};
pub use income::{asset_depletion, depletion_curve, income_from_assets, yield_curve};
pub use retirement::{
    RetirementInputs, SCENARIO_MAX_YEARS, plan_retirement, retirement_scenarios,
};
pub use roi::{RoiInputs, calculate_roi, roi_growth};
pub use solver::{BISECTION_ITERATIONS, CONVERGENCE_TOLERANCE, SearchBounds, bisect_increasing};
pub use strategy::{DEFAULT_PROJECTION_YEARS, StrategyInputs, compare_strategies};
pub use types::{
    BorrowingPlan, BorrowingYear, DepletionPlan, DepletionPoint, GrowthSummary, IncomeFromAssets,
    IncomeStrategy, LtvRisk, RetirementPlan, RetirementScenario, RoiResult, RoiYear,
    StrategyComparison, StrategyYear, Unreachable, YearRecord, YieldPoint,
};
