//! SIP Planner - Projection engine for systematic investment plans
//!
//! This library provides:
//! - Annuity-due projections and the inverse goal solve
//! - Year-by-year schedules and rate/duration sensitivity sweeps
//! - Input normalization and Indian-style currency formatting for the site's forms
//! - The quote-list and contact-submission boundaries consumed by the site

pub mod api;
pub mod calculator;
pub mod config;
pub mod contact;
pub mod error;
pub mod format;
pub mod input;
pub mod quotes;

// Re-export commonly used types
pub use calculator::{
    project_future_value, solve_required_periodic_contribution, ContributionPlan, GoalResult,
    GoalTarget, ProjectionResult,
};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
