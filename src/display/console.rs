//! Desktop stand-ins for the LED ring.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{DisplayError, DisplaySink, RING_LAYOUT};
use crate::types::{palette, Frame, Rgb};

/// Draws each frame to the log as one character per pixel.
///
/// `Y` yellow, `R` red, `G` green, `B` blue, `M` magenta, `.` off, `*` other.
#[derive(Debug, Default)]
pub struct ConsoleRing {
    frames_shown: u64,
}

impl ConsoleRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }
}

/// Text rendering of a frame, one character per pixel.
pub fn frame_to_text(frame: &Frame) -> String {
    frame.iter().map(|&p| pixel_char(p)).collect()
}

/// Lit pixel count per segment, e.g. `G=3 Bt=5 Bz=0 Density=1 Speed=2`.
pub fn segment_counts(frame: &Frame) -> String {
    RING_LAYOUT
        .iter()
        .map(|segment| {
            let lit = frame.iter().filter(|&&p| p == segment.colour).count();
            format!("{}={}", segment.label, lit)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pixel_char(pixel: Rgb) -> char {
    match pixel {
        palette::YELLOW => 'Y',
        palette::RED => 'R',
        palette::GREEN => 'G',
        palette::BLUE => 'B',
        palette::MAGENTA => 'M',
        palette::OFF => '.',
        _ => '*',
    }
}

#[async_trait]
impl DisplaySink for ConsoleRing {
    async fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.frames_shown += 1;
        info!("Ring [{}]", frame_to_text(frame));
        debug!(segments = %segment_counts(frame), "Ring segments");
        Ok(())
    }

    async fn heartbeat(&mut self, on: bool) -> Result<(), DisplayError> {
        debug!(on, "Heartbeat");
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "console"
    }
}

/// Discards frames. Used when no display is configured.
#[derive(Debug, Default)]
pub struct NullDisplay;

#[async_trait]
impl DisplaySink for NullDisplay {
    async fn show(&mut self, _frame: &Frame) -> Result<(), DisplayError> {
        Ok(())
    }

    async fn heartbeat(&mut self, _on: bool) -> Result<(), DisplayError> {
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "none"
    }
}
