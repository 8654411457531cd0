//! Closed-form annuity-due formulas
//!
//! Contributions are made at the start of each month, so every payment
//! compounds for the remaining periods including its own month.

use super::plan::ProjectionResult;

/// Convert an annual nominal rate in percent to a monthly fraction
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// Future value of one unit contributed at the start of each of `months` periods
///
/// `((1 + r)^n - 1) / r × (1 + r)`. Callers must not pass `r == 0`.
pub fn annuity_due_factor(monthly_rate: f64, months: u32) -> f64 {
    let growth = (1.0 + monthly_rate).powf(f64::from(months));
    (growth - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// Inputs for which the annuity formula is skipped in favour of the linear,
/// zero-growth result. Also the only guard against dividing by a zero rate.
fn is_degenerate(amount: f64, annual_rate_percent: f64, months: u32) -> bool {
    amount <= 0.0 || annual_rate_percent <= 0.0 || months == 0
}

/// Project the maturity value of a recurring monthly contribution
///
/// # Arguments
/// * `periodic_amount` - Contribution made at the start of every month
/// * `annual_rate_percent` - Expected annual return (12.0 for 12%)
/// * `duration_months` - Number of contributions
///
/// Any of the three being non-positive yields zero growth and a maturity
/// value equal to the capital contributed. NaN and infinite inputs are not
/// rejected and propagate into the result.
pub fn project_future_value(
    periodic_amount: f64,
    annual_rate_percent: f64,
    duration_months: u32,
) -> ProjectionResult {
    if is_degenerate(periodic_amount, annual_rate_percent, duration_months) {
        let total_contributed = if periodic_amount > 0.0 {
            periodic_amount * f64::from(duration_months)
        } else {
            0.0
        };
        return ProjectionResult {
            total_contributed,
            total_growth: 0.0,
            maturity_value: total_contributed,
        };
    }

    let rate = monthly_rate(annual_rate_percent);
    let maturity_value = periodic_amount * annuity_due_factor(rate, duration_months);
    let total_contributed = periodic_amount * f64::from(duration_months);

    ProjectionResult {
        total_contributed,
        total_growth: maturity_value - total_contributed,
        maturity_value,
    }
}

/// Monthly contribution needed to reach `target_maturity_value`
///
/// The forward formula is linear in the contribution, so this is an exact
/// inverse of [`project_future_value`]. Returns 0 when the target, rate or
/// duration is non-positive.
pub fn solve_required_periodic_contribution(
    target_maturity_value: f64,
    annual_rate_percent: f64,
    duration_months: u32,
) -> f64 {
    if is_degenerate(target_maturity_value, annual_rate_percent, duration_months) {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_percent);
    target_maturity_value / annuity_due_factor(rate, duration_months)
}
