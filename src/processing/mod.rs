//! Signal processing module - raw feed values to 0-5 severity scores

mod scale;
mod severity;

pub use scale::scale_and_clip;
pub use severity::compute_severity;

use thiserror::Error;

/// Errors in severity normalization.
///
/// These indicate a misconfigured scale range, not bad feed data, and are
/// treated as fatal by the poll loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("Invalid scale range: max_input must be finite and > 0, got {max_input}")]
    InvalidRange { max_input: f64 },
}
