//! Projection engine for SIP and goal-based calculators

mod annuity;
mod plan;
pub mod schedule;
pub mod sweep;

pub use annuity::{
    annuity_due_factor, monthly_rate, project_future_value, solve_required_periodic_contribution,
};
pub use plan::{ContributionPlan, GoalResult, GoalTarget, ProjectionResult};
pub use schedule::{export_schedule_csv, write_schedule_csv, yearly_schedule, YearRow};
pub use sweep::{sweep, SweepCell};

