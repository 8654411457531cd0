//! Request and response values for a single calculation

use serde::{Deserialize, Serialize};

use super::annuity::{project_future_value, solve_required_periodic_contribution};

/// A recurring monthly contribution stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPlan {
    /// Amount contributed at the start of each month
    pub periodic_amount: f64,
    /// Expected annual return in percent (12.0 = 12%)
    pub annual_rate_percent: f64,
    /// Number of monthly contributions
    pub duration_months: u32,
}

impl ContributionPlan {
    pub fn new(periodic_amount: f64, annual_rate_percent: f64, duration_months: u32) -> Self {
        Self {
            periodic_amount,
            annual_rate_percent,
            duration_months,
        }
    }

    /// Build a plan from a horizon in whole years
    pub fn from_years(periodic_amount: f64, annual_rate_percent: f64, years: u32) -> Self {
        Self::new(periodic_amount, annual_rate_percent, years.saturating_mul(12))
    }

    /// Project this plan to maturity
    pub fn project(&self) -> ProjectionResult {
        project_future_value(
            self.periodic_amount,
            self.annual_rate_percent,
            self.duration_months,
        )
    }
}

/// Outcome of a forward projection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_contributed: f64,
    pub total_growth: f64,
    pub maturity_value: f64,
}

/// Target corpus for the goal-planning calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTarget {
    pub target_maturity_value: f64,
}

impl GoalTarget {
    pub fn new(target_maturity_value: f64) -> Self {
        Self { target_maturity_value }
    }

    /// Solve for the monthly contribution and project it back to maturity
    pub fn solve(&self, annual_rate_percent: f64, duration_months: u32) -> GoalResult {
        let required_periodic_amount = solve_required_periodic_contribution(
            self.target_maturity_value,
            annual_rate_percent,
            duration_months,
        );
        log::debug!(
            "goal {:.2} at {}% over {} months needs {:.2}/month",
            self.target_maturity_value,
            annual_rate_percent,
            duration_months,
            required_periodic_amount
        );
        GoalResult {
            required_periodic_amount,
            projection: project_future_value(
                required_periodic_amount,
                annual_rate_percent,
                duration_months,
            ),
        }
    }
}

/// Required contribution for a goal, with the projection it produces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResult {
    pub required_periodic_amount: f64,
    pub projection: ProjectionResult,
}
