//! Sensitivity sweep over expected returns and horizons
//!
//! Backs the "what if" comparison table next to the SIP calculator.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::annuity::project_future_value;
use super::plan::ProjectionResult;

/// One cell of the rate × duration grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepCell {
    pub annual_rate_percent: f64,
    pub duration_months: u32,
    pub result: ProjectionResult,
}

/// Project `periodic_amount` for every combination of rate and duration
///
/// Cells are returned row-major: all durations for the first rate, then the
/// next rate, and so on.
pub fn sweep(periodic_amount: f64, rates: &[f64], durations: &[u32]) -> Vec<SweepCell> {
    let grid: Vec<(f64, u32)> = rates
        .iter()
        .flat_map(|&rate| durations.iter().map(move |&months| (rate, months)))
        .collect();

    log::debug!(
        "sweeping {} cells ({} rates × {} durations)",
        grid.len(),
        rates.len(),
        durations.len()
    );

    grid.par_iter()
        .map(|&(annual_rate_percent, duration_months)| SweepCell {
            annual_rate_percent,
            duration_months,
            result: project_future_value(periodic_amount, annual_rate_percent, duration_months),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape_and_order() {
        let rates = [8.0, 10.0, 12.0];
        let durations = [60, 120];
        let cells = sweep(5_000.0, &rates, &durations);

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].annual_rate_percent, 8.0);
        assert_eq!(cells[0].duration_months, 60);
        assert_eq!(cells[1].duration_months, 120);
        assert_eq!(cells[5].annual_rate_percent, 12.0);
        assert_eq!(cells[5].result, project_future_value(5_000.0, 12.0, 120));
    }

    #[test]
    fn test_empty_axes() {
        assert!(sweep(5_000.0, &[], &[60]).is_empty());
        assert!(sweep(5_000.0, &[12.0], &[]).is_empty());
    }

    #[test]
    fn test_rows_monotone_in_rate() {
        let cells = sweep(1_000.0, &[6.0, 9.0, 12.0, 15.0], &[240]);
        for pair in cells.windows(2) {
            assert!(pair[1].result.maturity_value > pair[0].result.maturity_value);
        }
    }
}
