//! Aurora Ring: space-weather severity ring
//!
//! Polls NOAA SWPC solar wind and geomagnetic feeds, scores them 0-5, lights a
//! 24-pixel ring, and raises an alert whenever a score rises.
//!
//! ## Architecture
//!
//! - **Acquisition**: per-feed fetch with isolated zero-default fallbacks
//! - **Processing**: scale-and-clip normalization into severity scores
//! - **Display**: fixed five-segment ring layout and display sinks
//! - **Notify**: rising-edge change detection and alert sinks
//! - **Pipeline**: the poll loop tying the stages together

pub mod acquisition;
pub mod config;
pub mod display;
pub mod notify;
pub mod pipeline;
pub mod processing;
pub mod types;

// Re-export configuration
pub use config::AuroraConfig;

// Re-export commonly used types
pub use types::{FieldGroup, Frame, NotifierState, RawMeasurement, Rgb, SeverityScores};

// Re-export the pipeline
pub use pipeline::{CycleReport, PollLoop, PollStats};
