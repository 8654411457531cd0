//! Year-by-year breakdown of a plan, used for the growth chart and CSV export

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::annuity::project_future_value;
use super::plan::ContributionPlan;

/// Position of the plan at the end of a plan year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRow {
    pub year: u32,
    /// Contributions made up to the end of this year
    pub months: u32,
    pub invested: f64,
    pub value: f64,
    pub growth: f64,
}

/// Build one row per (possibly partial) year of the plan
///
/// Each row is the closed-form projection truncated at that year's horizon,
/// so the final row matches [`ContributionPlan::project`] exactly.
pub fn yearly_schedule(plan: &ContributionPlan) -> Vec<YearRow> {
    let months = plan.duration_months;
    let years = months.div_ceil(12);

    (1..=years)
        .map(|year| {
            let horizon = year.saturating_mul(12).min(months);
            let result =
                project_future_value(plan.periodic_amount, plan.annual_rate_percent, horizon);
            YearRow {
                year,
                months: horizon,
                invested: result.total_contributed,
                value: result.maturity_value,
                growth: result.total_growth,
            }
        })
        .collect()
}

/// Write the schedule as CSV: `Year,Months,Invested,Value,Growth`
pub fn write_schedule_csv<W: Write>(rows: &[YearRow], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Year", "Months", "Invested", "Value", "Growth"])?;

    for row in rows {
        out.write_record([
            row.year.to_string(),
            row.months.to_string(),
            format!("{:.2}", row.invested),
            format!("{:.2}", row.value),
            format!("{:.2}", row.growth),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// Write the plan's schedule to a CSV file, returning the number of rows
pub fn export_schedule_csv<P: AsRef<Path>>(plan: &ContributionPlan, path: P) -> crate::Result<usize> {
    let rows = yearly_schedule(plan);
    let file = File::create(path.as_ref())?;
    write_schedule_csv(&rows, file)?;
    log::info!("wrote {} schedule rows to {}", rows.len(), path.as_ref().display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_length() {
        assert_eq!(yearly_schedule(&ContributionPlan::new(5_000.0, 12.0, 120)).len(), 10);
        assert_eq!(yearly_schedule(&ContributionPlan::new(5_000.0, 12.0, 121)).len(), 11);
        assert_eq!(yearly_schedule(&ContributionPlan::new(5_000.0, 12.0, 5)).len(), 1);
        assert!(yearly_schedule(&ContributionPlan::new(5_000.0, 12.0, 0)).is_empty());
    }

    #[test]
    fn test_last_row_matches_projection() {
        let plan = ContributionPlan::new(5_000.0, 12.0, 125);
        let rows = yearly_schedule(&plan);
        let last = rows.last().unwrap();
        let full = plan.project();

        assert_eq!(last.months, 125);
        assert_eq!(last.value, full.maturity_value);
        assert_eq!(last.invested, full.total_contributed);
        assert_eq!(last.growth, full.total_growth);
    }

    #[test]
    fn test_rows_are_increasing() {
        let rows = yearly_schedule(&ContributionPlan::new(2_000.0, 10.0, 240));
        for pair in rows.windows(2) {
            assert!(pair[1].value > pair[0].value);
            assert!(pair[1].invested > pair[0].invested);
            assert!(pair[1].growth > pair[0].growth);
        }
    }

    #[test]
    fn test_zero_rate_schedule_has_no_growth() {
        let rows = yearly_schedule(&ContributionPlan::new(1_000.0, 0.0, 36));
        assert!(rows.iter().all(|r| r.growth == 0.0));
        assert_eq!(rows[2].value, 36_000.0);
    }

    #[test]
    fn test_export_to_missing_directory_is_io_error() {
        let plan = ContributionPlan::new(1_000.0, 8.0, 24);
        let err = export_schedule_csv(&plan, "/nonexistent/dir/schedule.csv").unwrap_err();
        assert!(matches!(err, crate::PlannerError::Io(_)));
    }

    #[test]
    fn test_csv_output() {
        let rows = yearly_schedule(&ContributionPlan::new(1_000.0, 0.0, 24));
        let mut buf = Vec::new();
        write_schedule_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Year,Months,Invested,Value,Growth");
        assert_eq!(lines[1], "1,12,12000.00,12000.00,0.00");
        assert_eq!(lines[2], "2,24,24000.00,24000.00,0.00");
        assert_eq!(lines.len(), 3);
    }
}
