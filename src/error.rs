//! Crate-wide error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::contact::ContactError;
use crate::input::InputError;
use crate::quotes::FetchError;

/// Errors surfaced by the planner's boundaries.
///
/// The projection engine itself is total and never produces one of these.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("quote fetch failed: {0}")]
    Quotes(#[from] FetchError),

    #[error("contact submission failed: {0}")]
    Contact(#[from] ContactError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
