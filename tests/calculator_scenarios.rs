//! End-to-end calculator scenarios through the public API

use approx::assert_relative_eq;
use sip_planner::calculator::{sweep, yearly_schedule};
use sip_planner::format::format_inr;
use sip_planner::input::{FieldBounds, PlanInput};
use sip_planner::quotes::{load_quotes, CsvQuoteSource, Freshness, QuoteBoard};
use sip_planner::{
    project_future_value, solve_required_periodic_contribution, ContributionPlan, GoalTarget,
};

#[test]
fn ten_year_sip_at_twelve_percent() {
    let result = project_future_value(5_000.0, 12.0, 120);

    assert_eq!(result.total_contributed, 600_000.0);
    assert_relative_eq!(result.maturity_value, 1_161_695.38, max_relative = 1e-8);
    assert_eq!(format_inr(result.maturity_value), "₹11,61,695");
    assert_eq!(format_inr(result.total_growth), "₹5,61,695");
}

#[test]
fn degenerate_inputs_give_linear_result() {
    for (amount, rate, months) in [(0.0, 12.0, 120u32), (5_000.0, 0.0, 120), (5_000.0, 12.0, 0)] {
        let result = project_future_value(amount, rate, months);
        assert_eq!(result.total_growth, 0.0);
        assert_eq!(result.maturity_value, result.total_contributed);
        assert!(result.maturity_value.is_finite());
    }
}

#[test]
fn one_crore_goal_round_trips() {
    let required = solve_required_periodic_contribution(10_000_000.0, 12.0, 120);
    let back = project_future_value(required, 12.0, 120);
    assert_relative_eq!(back.maturity_value, 10_000_000.0, max_relative = 1e-9);

    let goal = GoalTarget::new(10_000_000.0).solve(12.0, 120);
    assert_eq!(goal.required_periodic_amount, required);
}

#[test]
fn typed_form_to_schedule() {
    let plan = PlanInput::new("₹2,500", "10", "5").normalize_clamped(
        &FieldBounds::monthly_amount(),
        &FieldBounds::annual_rate(),
        &FieldBounds::years(),
    );
    assert_eq!(plan, ContributionPlan::new(2_500.0, 10.0, 60));

    let rows = yearly_schedule(&plan);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4].value, plan.project().maturity_value);
}

#[test]
fn sweep_matches_individual_projections() {
    let cells = sweep(5_000.0, &[10.0, 12.0], &[60, 120]);
    for cell in &cells {
        assert_eq!(
            cell.result,
            project_future_value(5_000.0, cell.annual_rate_percent, cell.duration_months)
        );
    }
}

#[test]
fn bundled_quote_feed_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/quotes.csv");
    let quotes = load_quotes(path).unwrap();
    assert_eq!(quotes.len(), 4);
    assert_eq!(quotes[1].name, "S&P BSE Sensex");

    let board = QuoteBoard::with_static_fallback(
        Box::new(CsvQuoteSource::new(path)),
        chrono::Duration::seconds(60),
    );
    let snapshot = board.current().unwrap();
    assert_eq!(snapshot.freshness, Freshness::Live);
    assert_eq!(snapshot.quotes, quotes);
}
