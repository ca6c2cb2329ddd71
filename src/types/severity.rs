//! Severity scores and the notifier's carried state

use serde::{Deserialize, Serialize};

/// Upper bound of every clipped severity score.
pub const SEVERITY_MAX: u8 = 5;

/// Normalized 0-5 severity values for one cycle.
///
/// `bt`, `bz`, `density` and `speed` are always within `[0, 5]`. `g` is the NOAA
/// G-scale passed through unchanged; the feed publishes it on the same 0-5 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityScores {
    pub g: i64,
    pub bt: u8,
    pub bz: u8,
    pub density: u8,
    pub speed: u8,
}

impl std::fmt::Display for SeverityScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scaled Values : Bt={} G={} Bz={} Density={} Speed={}",
            self.bt, self.g, self.bz, self.density, self.speed
        )
    }
}

/// Scores observed at the end of the previous cycle.
///
/// Starts all-zero at process start and is replaced wholesale once per cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierState {
    pub last: SeverityScores,
}

impl NotifierState {
    pub fn new(last: SeverityScores) -> Self {
        Self { last }
    }
}
