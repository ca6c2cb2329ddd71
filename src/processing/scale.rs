//! Linear scaling with clipping onto a small integer range.

use super::ScaleError;

/// Scale `value` from `[0, max_input]` onto `[0, scale_max]`, rounding to the
/// nearest integer and clipping the result into range.
///
/// Rounding is half away from zero (`f64::round`), so a value landing exactly on
/// `x.5` moves up: `scale_and_clip(10.0, 20.0, 5) == 3`.
///
/// Out-of-range inputs never escape the output range: negative values clip to 0,
/// values beyond `max_input` clip to `scale_max`, NaN maps to 0.
///
/// # Errors
///
/// [`ScaleError::InvalidRange`] if `max_input` is zero, negative, or not finite.
///
/// # Examples
///
/// ```
/// use aurora_ring::processing::scale_and_clip;
///
/// assert_eq!(scale_and_clip(600.0, 1000.0, 5).unwrap(), 3);
/// assert_eq!(scale_and_clip(-4.0, 20.0, 5).unwrap(), 0);
/// assert_eq!(scale_and_clip(90.0, 20.0, 5).unwrap(), 5);
/// ```
pub fn scale_and_clip(value: f64, max_input: f64, scale_max: u8) -> Result<u8, ScaleError> {
    if !max_input.is_finite() || max_input <= 0.0 {
        return Err(ScaleError::InvalidRange { max_input });
    }

    let scaled = (value / max_input * f64::from(scale_max)).round();
    if scaled.is_nan() {
        return Ok(0);
    }

    // Clamped into [0, scale_max] so the cast is exact.
    Ok(scaled.clamp(0.0, f64::from(scale_max)) as u8)
}
