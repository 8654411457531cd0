//! Form input normalization
//!
//! The site's calculator fields accept free text and sliders. Everything is
//! coerced to a non-negative number here, before the engine is called, so
//! the engine's signature stays strictly numeric.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::ContributionPlan;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("'{field}' is empty")]
    Empty { field: String },

    #[error("'{field}' is not a number: {value}")]
    NotANumber { field: String, value: String },

    #[error("'{field}' must not be negative: {value}")]
    Negative { field: String, value: f64 },
}

/// Strip currency markers, grouping separators and whitespace
fn clean(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("Rs.")
        .or_else(|| trimmed.strip_prefix("Rs"))
        .unwrap_or(trimmed);

    trimmed
        .chars()
        .filter(|c| !matches!(c, '₹' | '$' | ',' | '_') && !c.is_whitespace())
        .collect()
}

/// Lenient coercion used for live keystrokes
///
/// Empty, unparsable, negative and non-finite text all become 0, which the
/// engine treats as the degenerate zero-growth case.
pub fn normalize_amount(text: &str) -> f64 {
    match clean(text).parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Strict parse used by the command-line calculator
pub fn parse_amount(field: &str, text: &str) -> Result<f64, InputError> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Err(InputError::Empty { field: field.to_string() });
    }

    let value = cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            field: field.to_string(),
            value: text.to_string(),
        })?;

    if value < 0.0 {
        return Err(InputError::Negative { field: field.to_string(), value });
    }
    Ok(value)
}

/// Slider range for a calculator field
///
/// `step` is the slider increment; it is sent to the site with the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Monthly SIP amount: ₹500 to ₹1,00,000
    pub const fn monthly_amount() -> Self {
        Self::new(500.0, 100_000.0, 500.0)
    }

    /// Expected annual return: 1% to 30%
    pub const fn annual_rate() -> Self {
        Self::new(1.0, 30.0, 0.1)
    }

    /// Investment horizon: 1 to 40 years
    pub const fn years() -> Self {
        Self::new(1.0, 40.0, 1.0)
    }

    /// Pin a value into `[min, max]`. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }
}

/// Raw calculator form state as typed by the visitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub years: String,
}

impl PlanInput {
    pub fn new(amount: &str, rate: &str, years: &str) -> Self {
        Self {
            amount: amount.to_string(),
            rate: rate.to_string(),
            years: years.to_string(),
        }
    }

    /// Coerce the form into a plan without clamping
    ///
    /// Cleared fields become 0 so the result shows the zero-growth case.
    pub fn normalize(&self) -> ContributionPlan {
        let years = normalize_amount(&self.years).floor();
        ContributionPlan::from_years(
            normalize_amount(&self.amount),
            normalize_amount(&self.rate),
            years_to_u32(years),
        )
    }

    /// Coerce and pin each field to its slider range
    ///
    /// A cleared field stays 0 rather than jumping to the slider minimum.
    pub fn normalize_clamped(
        &self,
        amount: &FieldBounds,
        rate: &FieldBounds,
        years: &FieldBounds,
    ) -> ContributionPlan {
        ContributionPlan::from_years(
            clamp_entered(amount, &self.amount),
            clamp_entered(rate, &self.rate),
            years_to_u32(clamp_entered(years, &self.years).floor()),
        )
    }
}

fn clamp_entered(bounds: &FieldBounds, text: &str) -> f64 {
    match normalize_amount(text) {
        value if value > 0.0 => bounds.clamp(value),
        _ => 0.0,
    }
}

fn years_to_u32(years: f64) -> u32 {
    if years >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        years as u32
    }
}
