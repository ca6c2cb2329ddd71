//! Shared data structures for the space-weather ring pipeline
//!
//! This module defines the per-cycle types passed between stages:
//! - Acquisition: RawMeasurement (one reading per feed, independently defaulted)
//! - Processing: SeverityScores (0-5 values driving the ring)
//! - Notification: NotifierState (scores carried from the previous cycle)
//! - Display: Rgb / Frame (24 pixel colours)

mod measurement;
mod severity;
mod ring;

pub use measurement::*;
pub use severity::*;
pub use ring::*;
