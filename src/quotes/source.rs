//! Quote sources: CSV feed files and the static fallback list

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::model::Quote;
use super::FetchError;

/// Anything that can produce the ticker list
pub trait QuoteSource: Send + Sync {
    /// Human-readable name used in logs and snapshots
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<Vec<Quote>, FetchError>;
}

/// Row layout of a quote feed file
#[derive(Debug, Deserialize)]
struct QuoteRecord {
    symbol: String,
    name: String,
    price: f64,
    change: f64,
    #[serde(default)]
    change_percent: Option<f64>,
}

impl From<QuoteRecord> for Quote {
    fn from(record: QuoteRecord) -> Self {
        let mut quote = Quote::new(&record.symbol, &record.name, record.price, record.change);
        if let Some(pct) = record.change_percent {
            quote.change_percent = pct;
        }
        quote
    }
}

/// Parse quotes from CSV with a `symbol,name,price,change[,change_percent]` header
pub fn load_quotes_from_reader<R: Read>(reader: R) -> Result<Vec<Quote>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut quotes = Vec::new();
    for result in rdr.deserialize() {
        let record: QuoteRecord = result?;
        quotes.push(record.into());
    }
    Ok(quotes)
}

/// Parse quotes from a CSV file
pub fn load_quotes<P: AsRef<Path>>(path: P) -> Result<Vec<Quote>, csv::Error> {
    let file = File::open(path)?;
    load_quotes_from_reader(file)
}

/// Quote feed written to disk by an upstream job; re-read on every fetch
#[derive(Debug, Clone)]
pub struct CsvQuoteSource {
    path: PathBuf,
    name: String,
}

impl CsvQuoteSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = format!("csv:{}", path.display());
        Self { path, name }
    }
}

impl QuoteSource for CsvQuoteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<Quote>, FetchError> {
        let quotes = load_quotes(&self.path).map_err(|error| FetchError::Csv {
            source_name: self.name.clone(),
            error,
        })?;

        if quotes.is_empty() {
            return Err(FetchError::Empty { source_name: self.name.clone() });
        }
        Ok(quotes)
    }
}

/// Fixed reference list shown when no feed is reachable
///
/// Prices are indicative closing levels, not live data; the board marks
/// them as [`Freshness::Fallback`](super::Freshness::Fallback).
#[derive(Debug, Clone)]
pub struct StaticQuotes {
    quotes: Vec<Quote>,
}

impl Default for StaticQuotes {
    fn default() -> Self {
        Self {
            quotes: vec![
                Quote::new("NIFTY 50", "Nifty 50 Index", 24_350.50, 112.35),
                Quote::new("SENSEX", "S&P BSE Sensex", 80_120.75, 356.10),
                Quote::new("BANKNIFTY", "Nifty Bank Index", 51_820.40, -145.60),
                Quote::new("RELIANCE", "Reliance Industries", 2_945.30, 18.45),
                Quote::new("TCS", "Tata Consultancy Services", 4_120.15, -22.80),
                Quote::new("HDFCBANK", "HDFC Bank", 1_655.90, 9.70),
                Quote::new("INFY", "Infosys", 1_880.25, -6.15),
                Quote::new("ICICIBANK", "ICICI Bank", 1_245.60, 11.20),
            ],
        }
    }
}

impl StaticQuotes {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }
}

impl QuoteSource for StaticQuotes {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<Vec<Quote>, FetchError> {
        if self.quotes.is_empty() {
            return Err(FetchError::Empty { source_name: self.name().to_string() });
        }
        Ok(self.quotes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reader() {
        let data = "\
symbol,name,price,change,change_percent
TCS, Tata Consultancy Services ,110.0,10.0,
INFY,Infosys,90.0,-10.0,-9.5
";
        let quotes = load_quotes_from_reader(data.as_bytes()).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].name, "Tata Consultancy Services");
        assert!((quotes[0].change_percent - 10.0).abs() < 1e-9);
        assert_eq!(quotes[1].change_percent, -9.5);
    }

    #[test]
    fn test_load_rejects_bad_price() {
        let data = "symbol,name,price,change\nTCS,TCS,abc,1.0\n";
        assert!(load_quotes_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_is_csv_error() {
        let source = CsvQuoteSource::new("/nonexistent/quotes.csv");
        assert!(matches!(source.fetch(), Err(FetchError::Csv { .. })));
        assert_eq!(source.name(), "csv:/nonexistent/quotes.csv");
    }

    #[test]
    fn test_static_list() {
        let quotes = StaticQuotes::default().fetch().unwrap();
        assert_eq!(quotes.len(), 8);
        assert_eq!(quotes[0].symbol, "NIFTY 50");
        // Deterministic: two fetches agree
        assert_eq!(quotes, StaticQuotes::default().fetch().unwrap());
    }

    #[test]
    fn test_empty_static_list_errors() {
        assert!(matches!(
            StaticQuotes::new(Vec::new()).fetch(),
            Err(FetchError::Empty { .. })
        ));
    }
}
