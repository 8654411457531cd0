//! Quote-list boundary for the market ticker widget
//!
//! Sources are tried through a [`QuoteBoard`], which reports whether the
//! list is live, cached or the static fallback instead of silently
//! substituting placeholder data.

mod board;
mod model;
mod source;

pub use board::{QuoteBoard, DEFAULT_QUOTE_TTL_SECS};
pub use model::{Freshness, Quote, QuoteSnapshot};
pub use source::{load_quotes, load_quotes_from_reader, CsvQuoteSource, QuoteSource, StaticQuotes};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{source_name} returned no quotes")]
    Empty { source_name: String },

    #[error("failed to read quotes from {source_name}: {error}")]
    Csv {
        source_name: String,
        #[source]
        error: csv::Error,
    },

    #[error("{source_name} is unavailable: {message}")]
    Unavailable { source_name: String, message: String },
}
