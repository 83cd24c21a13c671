//! Time-value-of-money relationships between starting principal, a fixed end-of-month
//! contribution, a nominal annual rate compounded monthly, a horizon in years and a target
//! balance.
//!
//! Every function assumes finite, non-negative inputs with the annual rate in `[0, 100]`.
//! Nothing here validates; callers reject bad input first. Outside that domain results are
//! unspecified and may be NaN or infinite.
//!
//! Months are always `years * 12` without rounding. Fractional months are valid exponents in
//! the closed form and the yearly walk steps through a trailing partial month with the same
//! closed form, so both agree for any horizon.

use super::solver::{SearchBounds, bisect_increasing};
use super::types::{GrowthSummary, Unreachable, YearRecord};

pub const RATE_SEARCH_MAX: f64 = 100.0;
pub const YEARS_SEARCH_MAX: f64 = 100.0;

// Float noise left over from `years * 12`; smaller trailing months are dropped.
const MONTH_EPSILON: f64 = 1e-9;

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

pub(crate) fn growth_factor(rate: f64, periods: f64) -> f64 {
    (periods * rate.ln_1p()).exp()
}

// ((1 + i)^n - 1) / i
pub(crate) fn annuity_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return periods;
    }
    (periods * rate.ln_1p()).exp_m1() / rate
}

fn total_contributions(contribution: f64, years: f64) -> f64 {
    contribution * years * 12.0
}

/// Ending balance after `years` of monthly compounding with a contribution at the end of
/// each month. A zero rate is plain addition.
pub fn future_value(
    principal: f64,
    contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> f64 {
    let rate = monthly_rate(annual_rate_percent);
    if rate == 0.0 {
        return principal + total_contributions(contribution, years);
    }

    let months = years * 12.0;
    principal * growth_factor(rate, months) + contribution * annuity_factor(rate, months)
}

/// Monthly contribution needed to grow `principal` into `target`.
///
/// Never negative: `0` means either the principal alone already gets there or, with a zero
/// horizon, no contribution can help. Callers that need to tell those apart compare
/// `principal` with `target` themselves.
pub fn required_contribution(
    principal: f64,
    target: f64,
    annual_rate_percent: f64,
    years: f64,
) -> f64 {
    let months = years * 12.0;
    if months <= 0.0 {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_percent);
    let required = if rate == 0.0 {
        (target - principal) / months
    } else {
        (target - principal * growth_factor(rate, months)) / annuity_factor(rate, months)
    };
    required.max(0.0)
}

/// Starting lump sum needed to reach `target`. Exactly `0` when the contributions alone
/// already cover it.
pub fn required_principal(
    target: f64,
    contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> f64 {
    let contributions = total_contributions(contribution, years);
    if contributions >= target {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_percent);
    if rate == 0.0 {
        return target - contributions;
    }

    let months = years * 12.0;
    let required =
        (target - contribution * annuity_factor(rate, months)) / growth_factor(rate, months);
    required.max(0.0)
}

/// Annual rate in percent that grows `principal` and the contributions into `target`.
///
/// `Ok(0.0)` when the undiscounted sum already reaches the target; `Unreachable` when even
/// a 100% rate falls short. Otherwise a bisection estimate within a cent of the target where
/// the search allows it.
pub fn required_rate(
    principal: f64,
    target: f64,
    contribution: f64,
    years: f64,
) -> Result<f64, Unreachable> {
    if principal + total_contributions(contribution, years) >= target {
        return Ok(0.0);
    }
    if future_value(principal, contribution, RATE_SEARCH_MAX, years) < target {
        return Err(Unreachable);
    }

    Ok(bisect_increasing(
        |rate| future_value(principal, contribution, rate, years),
        target,
        SearchBounds::new(0.0, RATE_SEARCH_MAX),
    ))
}

/// Horizon in years needed to reach `target`.
///
/// `Ok(0.0)` when the principal already meets it; `Unreachable` when the balance after 100
/// years still falls short, which includes a zero contribution with nothing to compound.
/// A zero contribution with a positive rate is solved from compounding alone rather than
/// being rejected outright.
pub fn required_years(
    principal: f64,
    target: f64,
    contribution: f64,
    annual_rate_percent: f64,
) -> Result<f64, Unreachable> {
    if principal >= target {
        return Ok(0.0);
    }
    if future_value(principal, contribution, annual_rate_percent, YEARS_SEARCH_MAX) < target {
        return Err(Unreachable);
    }

    // Reachable at zero rate implies contribution > 0.
    if monthly_rate(annual_rate_percent) == 0.0 {
        return Ok((target - principal) / contribution / 12.0);
    }

    Ok(bisect_increasing(
        |years| future_value(principal, contribution, annual_rate_percent, years),
        target,
        SearchBounds::new(0.0, YEARS_SEARCH_MAX),
    ))
}

pub fn growth_summary(
    principal: f64,
    contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> GrowthSummary {
    let future_value = future_value(principal, contribution, annual_rate_percent, years);
    let total_contributions = total_contributions(contribution, years);
    GrowthSummary {
        future_value,
        starting_amount: principal,
        total_contributions,
        total_interest: future_value - principal - total_contributions,
    }
}

/// One record per whole or partial year, `ceil(years)` in total, walked month by month.
pub fn yearly_breakdown(
    principal: f64,
    contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> Vec<YearRecord> {
    let rate = monthly_rate(annual_rate_percent);
    let total_months = years * 12.0;
    let year_count = years.ceil().max(0.0) as u32;

    let mut records = Vec::with_capacity(year_count as usize);
    let mut balance = principal;
    for year in 1..=year_count {
        let starting_balance = balance;
        let months_this_year = (total_months - 12.0 * f64::from(year - 1)).min(12.0);
        let whole_months = months_this_year.floor();
        let mut contributions = 0.0;
        let mut interest_earned = 0.0;

        for _ in 0..whole_months as u32 {
            let monthly_interest = balance * rate;
            interest_earned += monthly_interest;
            contributions += contribution;
            balance += monthly_interest + contribution;
        }

        let fraction = months_this_year - whole_months;
        if fraction > MONTH_EPSILON {
            let grown = balance * growth_factor(rate, fraction)
                + contribution * annuity_factor(rate, fraction);
            let added = contribution * fraction;
            interest_earned += grown - balance - added;
            contributions += added;
            balance = grown;
        }

        records.push(YearRecord {
            year,
            starting_balance,
            contributions,
            interest_earned,
            ending_balance: balance,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn relative_tol(expected: f64) -> f64 {
        1e-9 * expected.abs().max(1.0)
    }

    #[test]
    fn future_value_matches_pinned_fixture() {
        // 1000 up front, 100 a month, 7% nominal, 10 years.
        let fv = future_value(1_000.0, 100.0, 7.0, 10.0);
        assert_close(fv, 19_318.142_120_049_237, 1e-6);
    }

    #[test]
    fn future_value_with_fractional_horizon() {
        let fv = future_value(10_000.0, 500.0, 6.0, 2.5);
        assert_close(fv, 27_754.009_118_488_04, 1e-6);
    }

    #[test]
    fn future_value_zero_rate_is_plain_sum() {
        assert_eq!(future_value(2_500.0, 125.0, 0.0, 3.0), 2_500.0 + 125.0 * 3.0 * 12.0);
        assert_eq!(future_value(0.0, 0.0, 0.0, 40.0), 0.0);
    }

    #[test]
    fn future_value_zero_horizon_is_principal() {
        assert_close(future_value(1_234.0, 100.0, 8.0, 0.0), 1_234.0, 1e-12);
    }

    #[test]
    fn required_contribution_recovers_fixture_contribution() {
        let target = future_value(1_000.0, 100.0, 7.0, 10.0);
        assert_close(required_contribution(1_000.0, target, 7.0, 10.0), 100.0, 1e-9);
    }

    #[test]
    fn required_contribution_at_zero_rate() {
        assert_close(required_contribution(1_000.0, 13_000.0, 0.0, 10.0), 100.0, 1e-12);
    }

    #[test]
    fn required_contribution_clamps_when_principal_already_exceeds_target() {
        assert_eq!(required_contribution(50_000.0, 10_000.0, 5.0, 10.0), 0.0);
        assert_eq!(required_contribution(50_000.0, 10_000.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn required_contribution_with_zero_horizon_is_zero() {
        assert_eq!(required_contribution(0.0, 10_000.0, 5.0, 0.0), 0.0);
        assert_eq!(required_contribution(0.0, 10_000.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn required_principal_is_zero_when_contributions_cover_target() {
        assert_eq!(required_principal(10_000.0, 100.0, 7.0, 10.0), 0.0);
        assert_eq!(required_principal(12_000.0, 100.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn required_principal_recovers_fixture_principal() {
        let target = future_value(1_000.0, 100.0, 7.0, 10.0);
        assert_close(required_principal(target, 100.0, 7.0, 10.0), 1_000.0, 1e-8);
        assert_close(required_principal(20_000.0, 100.0, 0.0, 10.0), 8_000.0, 1e-12);
    }

    #[test]
    fn required_rate_recovers_fixture_rate() {
        let target = future_value(1_000.0, 100.0, 7.0, 10.0);
        let rate = required_rate(1_000.0, target, 100.0, 10.0).expect("reachable");
        assert_close(rate, 7.0, 1e-3);
        assert_close(future_value(1_000.0, 100.0, rate, 10.0), target, 0.05);
    }

    #[test]
    fn required_rate_is_zero_without_growth_needed() {
        assert_eq!(required_rate(1_000.0, 13_000.0, 100.0, 10.0), Ok(0.0));
        assert_eq!(required_rate(20_000.0, 10_000.0, 0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn required_rate_reports_unreachable_target() {
        assert_eq!(required_rate(0.0, 1_000_000.0, 1.0, 1.0), Err(Unreachable));
    }

    #[test]
    fn required_years_recovers_fixture_horizon() {
        let target = future_value(1_000.0, 100.0, 7.0, 10.0);
        let years = required_years(1_000.0, target, 100.0, 7.0).expect("reachable");
        assert_close(years, 10.0, 1e-3);
    }

    #[test]
    fn required_years_zero_when_principal_meets_target() {
        assert_eq!(required_years(5_000.0, 5_000.0, 0.0, 0.0), Ok(0.0));
        assert_eq!(required_years(9_000.0, 5_000.0, 100.0, 7.0), Ok(0.0));
    }

    #[test]
    fn required_years_uses_closed_form_at_zero_rate() {
        assert_eq!(required_years(1_000.0, 13_000.0, 100.0, 0.0), Ok(10.0));
    }

    #[test]
    fn required_years_allows_compounding_principal_without_contributions() {
        let years = required_years(1_000.0, 2_000.0, 0.0, 7.0).expect("compounds to target");
        assert_close(years, 9.93, 0.01);
        assert_close(future_value(1_000.0, 0.0, 7.0, years), 2_000.0, 0.05);
    }

    #[test]
    fn required_years_unreachable_without_growth_path() {
        assert_eq!(required_years(1_000.0, 2_000.0, 0.0, 0.0), Err(Unreachable));
        assert_eq!(required_years(0.0, 2_000.0, 0.0, 7.0), Err(Unreachable));
    }

    #[test]
    fn required_years_unreachable_beyond_search_horizon() {
        assert_eq!(required_years(0.0, 1e9, 1.0, 1.0), Err(Unreachable));
        // 100 years at zero rate covers 120_000 of contributions, not more.
        assert_eq!(required_years(0.0, 120_001.0, 100.0, 0.0), Err(Unreachable));
    }

    #[test]
    fn growth_summary_splits_future_value() {
        let summary = growth_summary(1_000.0, 100.0, 7.0, 10.0);
        assert_close(summary.future_value, 19_318.142_120_049_237, 1e-6);
        assert_eq!(summary.starting_amount, 1_000.0);
        assert_close(summary.total_contributions, 12_000.0, 1e-9);
        assert_close(summary.total_interest, 6_318.142_120_049_237, 1e-6);
    }

    #[test]
    fn yearly_breakdown_whole_years() {
        let records = yearly_breakdown(1_000.0, 100.0, 7.0, 10.0);
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].year, 1);
        assert_eq!(records[9].year, 10);
        assert_close(records[0].starting_balance, 1_000.0, 1e-12);
        assert_close(records[0].contributions, 1_200.0, 1e-9);
        for pair in records.windows(2) {
            assert_close(pair[1].starting_balance, pair[0].ending_balance, 1e-9);
        }
        for record in &records {
            assert_close(
                record.ending_balance,
                record.starting_balance + record.contributions + record.interest_earned,
                1e-6,
            );
        }
        assert_close(records[9].ending_balance, 19_318.142_120_049_237, 1e-6);
    }

    #[test]
    fn yearly_breakdown_partial_final_year() {
        let records = yearly_breakdown(10_000.0, 500.0, 6.0, 2.5);
        assert_eq!(records.len(), 3);
        assert_close(records[2].contributions, 3_000.0, 1e-9);
        assert_close(records[2].ending_balance, future_value(10_000.0, 500.0, 6.0, 2.5), 1e-6);
    }

    #[test]
    fn yearly_breakdown_fractional_month() {
        // 0.1 years is 1.2 months: one whole month plus a fifth.
        let records = yearly_breakdown(1_000.0, 100.0, 12.0, 0.1);
        assert_eq!(records.len(), 1);
        assert_close(records[0].contributions, 120.0, 1e-9);
        assert_close(records[0].ending_balance, future_value(1_000.0, 100.0, 12.0, 0.1), 1e-9);
    }

    #[test]
    fn yearly_breakdown_zero_horizon_is_empty() {
        assert!(yearly_breakdown(1_000.0, 100.0, 7.0, 0.0).is_empty());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_required_contribution_round_trips(
            principal in 0.0f64..1_000_000.0,
            contribution in 0.0f64..10_000.0,
            rate in 0.0f64..=100.0,
            // A zero horizon identifies no contribution; covered by its own unit test.
            years in 1e-4f64..=100.0
        ) {
            let fv = future_value(principal, contribution, rate, years);
            let solved = required_contribution(principal, fv, rate, years);
            prop_assert!(
                (solved - contribution).abs() <= 1e-2,
                "solved {solved}, expected {contribution}"
            );
        }

        #[test]
        fn prop_required_principal_round_trips(
            principal in 0.0f64..1_000_000.0,
            contribution in 0.0f64..10_000.0,
            rate in 0.0f64..=100.0,
            years in 0.0f64..=100.0
        ) {
            let fv = future_value(principal, contribution, rate, years);
            let solved = required_principal(fv, contribution, rate, years);
            prop_assert!(
                (solved - principal).abs() <= 1e-2,
                "solved {solved}, expected {principal}"
            );
        }

        #[test]
        fn prop_future_value_is_monotone_in_each_input(
            principal in 0.0f64..1_000_000.0,
            contribution in 0.0f64..10_000.0,
            rate in 0.0f64..90.0,
            years in 0.0f64..90.0,
            bump in 0.0f64..10.0
        ) {
            let base = future_value(principal, contribution, rate, years);
            let slack = relative_tol(base);
            prop_assert!(future_value(principal + bump, contribution, rate, years) >= base - slack);
            prop_assert!(future_value(principal, contribution + bump, rate, years) >= base - slack);
            prop_assert!(future_value(principal, contribution, rate + bump, years) >= base - slack);
            prop_assert!(future_value(principal, contribution, rate, years + bump) >= base - slack);
        }

        #[test]
        fn prop_zero_rate_has_no_compounding(
            principal in 0.0f64..1_000_000.0,
            contribution in 0.0f64..10_000.0,
            years in 0.0f64..=100.0
        ) {
            prop_assert_eq!(
                future_value(principal, contribution, 0.0, years),
                principal + contribution * years * 12.0
            );
        }

        #[test]
        fn prop_breakdown_ends_at_future_value(
            principal in 0.0f64..1_000_000.0,
            contribution in 0.0f64..10_000.0,
            rate in 0.0f64..=100.0,
            years in 0.01f64..=100.0
        ) {
            let records = yearly_breakdown(principal, contribution, rate, years);
            prop_assert_eq!(records.len(), years.ceil() as usize);
            let fv = future_value(principal, contribution, rate, years);
            let last = records.last().expect("at least one record");
            prop_assert!(
                (last.ending_balance - fv).abs() <= relative_tol(fv),
                "breakdown {}, closed form {fv}",
                last.ending_balance
            );
        }

        #[test]
        fn prop_solvers_are_idempotent(
            principal in 0.0f64..100_000.0,
            contribution in 0.0f64..5_000.0,
            rate in 0.0f64..=100.0,
            years in 0.0f64..=60.0,
            target in 0.0f64..5_000_000.0
        ) {
            prop_assert_eq!(
                future_value(principal, contribution, rate, years).to_bits(),
                future_value(principal, contribution, rate, years).to_bits()
            );
            prop_assert_eq!(
                required_contribution(principal, target, rate, years).to_bits(),
                required_contribution(principal, target, rate, years).to_bits()
            );
            prop_assert_eq!(
                required_principal(target, contribution, rate, years).to_bits(),
                required_principal(target, contribution, rate, years).to_bits()
            );
            prop_assert_eq!(
                required_rate(principal, target, contribution, years).map(f64::to_bits),
                required_rate(principal, target, contribution, years).map(f64::to_bits)
            );
            prop_assert_eq!(
                required_years(principal, target, contribution, rate).map(f64::to_bits),
                required_years(principal, target, contribution, rate).map(f64::to_bits)
            );
        }
    }
}
