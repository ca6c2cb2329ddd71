//! Ring display module
//!
//! [`render`] turns severity scores into a 24-pixel frame; a [`DisplaySink`]
//! pushes frames and the heartbeat to whatever is showing them.

mod console;
mod ring;

pub use console::{frame_to_text, segment_counts, ConsoleRing, NullDisplay};
pub use ring::{render, RingSegment, RING_LAYOUT};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Frame;

/// Display collaborator errors. Never fatal to the poll loop.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Render sink unavailable: {0}")]
    RenderSinkUnavailable(String),
}

/// Output for rendered frames and the liveness indicator.
#[async_trait]
pub trait DisplaySink: Send {
    /// Write all pixels of `frame` and flush them to the device.
    async fn show(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Set the heartbeat indicator. `true` means lit.
    async fn heartbeat(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Human-readable name for logging.
    fn sink_name(&self) -> &str;
}
