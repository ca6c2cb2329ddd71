//! Severity calculation - raw measurement to ring scores

use super::{scale_and_clip, ScaleError};
use crate::config::SeverityRanges;
use crate::types::{RawMeasurement, SeverityScores, SEVERITY_MAX};

/// Convert one cycle's raw measurement into severity scores.
///
/// - `g` passes through unchanged (already on the G0-G5 scale).
/// - `bt`, `density` and `speed` scale linearly from `[0, max]` onto `[0, 5]`.
/// - `bz` is 0 whenever it points north (`bz > 0`); a southward field scales by
///   its magnitude over `[0, bz_max]`.
///
/// Pure: identical input always yields identical scores.
pub fn compute_severity(
    raw: &RawMeasurement,
    ranges: &SeverityRanges,
) -> Result<SeverityScores, ScaleError> {
    let bz = if raw.bz > 0 {
        0
    } else {
        scale_and_clip(raw.bz.unsigned_abs() as f64, ranges.bz_max, SEVERITY_MAX)?
    };

    Ok(SeverityScores {
        g: raw.g,
        bt: scale_and_clip(raw.bt as f64, ranges.bt_max, SEVERITY_MAX)?,
        bz,
        density: scale_and_clip(raw.density, ranges.density_max, SEVERITY_MAX)?,
        speed: scale_and_clip(raw.speed, ranges.speed_max, SEVERITY_MAX)?,
    })
}
