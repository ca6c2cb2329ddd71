//! Feed data acquisition module
//!
//! Fetches the five NOAA SWPC documents, extracts the fields each one owns, and
//! falls back to zero defaults per field-group when anything goes wrong.
//!
//! ```text
//! FeedTransport (HTTP GET + JSON) ──> extract (schema paths) ──> FetchOutcome<T>
//!                                                                   │
//!                      FieldFetcher::fetch_all joins all five ──────┘──> RawMeasurement
//! ```

mod extract;
mod fetcher;
mod transport;

pub use extract::*;
pub use fetcher::{FetchedMeasurement, FieldFetcher};
pub use transport::{FeedTransport, HttpTransport};

use crate::types::FieldGroup;
use thiserror::Error;

/// Everything that can go wrong fetching and reading one feed document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Type mismatch for {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },
}

/// A field-group that could not be read this cycle.
#[derive(Debug, Error)]
#[error("Error getting {group}: {error}")]
pub struct FetchFailure {
    pub group: FieldGroup,
    #[source]
    pub error: FetchError,
}

/// Result of fetching one field-group.
///
/// A failed group still yields a value (its zero defaults) so the cycle can
/// proceed; the failure travels alongside it for logging and reporting.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Fallback { value: T, failure: FetchFailure },
}

impl<T> FetchOutcome<T> {
    /// The fetched value, or the defaults substituted for it.
    pub fn value(&self) -> &T {
        match self {
            FetchOutcome::Fetched(value) | FetchOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback { .. })
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchOutcome::Fetched(_) => None,
            FetchOutcome::Fallback { failure, .. } => Some(failure),
        }
    }

    /// Split into the value and the failure, if any.
    pub fn into_parts(self) -> (T, Option<FetchFailure>) {
        match self {
            FetchOutcome::Fetched(value) => (value, None),
            FetchOutcome::Fallback { value, failure } => (value, Some(failure)),
        }
    }
}
