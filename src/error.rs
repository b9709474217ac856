//! # Error Taxonomy
//!
//! Every fallible operation in the library returns [`TideError`]. Errors are raised to the
//! immediate caller; the prediction engine itself never retries because its computations are
//! pure and deterministic.

use std::io;
use thiserror::Error;

/// Errors raised by site loading, region parsing and display-time conversion.
#[derive(Error, Debug)]
pub enum TideError {
    /// Site could not be resolved from the resource (missing, empty or malformed record)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Site resource could not be read
    #[error("site resource IO: {0}")]
    Io(#[from] io::Error),

    /// Unrecognized daylight-saving region tag
    #[error("invalid daylight-saving region: {0:?}")]
    InvalidRegion(String),

    /// Display time falls inside the repeated fall-back hour
    #[error("local time {0} is ambiguous (repeated fall-back hour)")]
    AmbiguousLocalTime(i64),
}
