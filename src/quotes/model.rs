//! Quote data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single ticker entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// Absolute change since previous close
    pub change: f64,
    /// Change since previous close in percent
    pub change_percent: f64,
}

impl Quote {
    pub fn new(symbol: &str, name: &str, price: f64, change: f64) -> Self {
        let previous = price - change;
        let change_percent = if previous != 0.0 {
            change / previous * 100.0
        } else {
            0.0
        };
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change,
            change_percent,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// Where a snapshot's quotes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Fetched from the primary source for this request
    Live,
    /// Served from the primary source's last result, still within TTL
    Cached,
    /// Primary source failed; static list substituted
    Fallback,
}

/// Quote list plus provenance, as returned to the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub quotes: Vec<Quote>,
    pub as_of: DateTime<Utc>,
    pub freshness: Freshness,
    /// Name of the source that produced `quotes`
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_change_percent() {
        let quote = Quote::new("TCS", "Tata Consultancy Services", 110.0, 10.0);
        assert_relative_eq!(quote.change_percent, 10.0, epsilon = 1e-12);
        assert!(quote.is_up());

        let down = Quote::new("INFY", "Infosys", 90.0, -10.0);
        assert_relative_eq!(down.change_percent, -10.0, epsilon = 1e-12);
        assert!(!down.is_up());
    }

    #[test]
    fn test_zero_previous_close() {
        let quote = Quote::new("NEW", "New Listing", 5.0, 5.0);
        assert_eq!(quote.change_percent, 0.0);
    }
}
