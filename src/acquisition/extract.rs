//! Schema extraction from SWPC feed documents.
//!
//! Two document shapes are used:
//! - **Tables**: a JSON array whose first row holds column names and whose
//!   remaining rows hold values, oldest first. The latest value is read from
//!   the last row at the header's column index.
//! - **Objects**: nested keyed objects read by a fixed key path.
//!
//! Most SWPC values are published as strings (`"-3.21"`), so numeric readers
//! accept either JSON numbers or numeric strings.

use serde_json::Value;

use super::FetchError;
use crate::types::{KpReading, MagneticFieldReading, PlasmaReading, ScaleReading, SummaryReading};

// ============================================================================
// Generic readers
// ============================================================================

/// Value in the last row of a table, at the column labelled `column`.
pub fn last_row_column<'a>(table: &'a Value, column: &str) -> Result<&'a Value, FetchError> {
    let rows = table
        .as_array()
        .ok_or_else(|| mismatch("table", "array", table))?;

    let header = rows
        .first()
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::MissingData("table has no header row".to_string()))?;

    let index = header
        .iter()
        .position(|h| h.as_str() == Some(column))
        .ok_or_else(|| FetchError::MissingField(format!("column '{column}'")))?;

    if rows.len() < 2 {
        return Err(FetchError::MissingData(format!(
            "table has no data rows for '{column}'"
        )));
    }

    rows.last()
        .and_then(Value::as_array)
        .and_then(|row| row.get(index))
        .ok_or_else(|| FetchError::MissingData(format!("last row has no '{column}' cell")))
}

/// Value at a key path through nested objects, e.g. `["0", "G", "Scale"]`.
pub fn value_at_path<'a>(doc: &'a Value, path: &[&str]) -> Result<&'a Value, FetchError> {
    path.iter().try_fold(doc, |node, key| {
        node.get(*key)
            .ok_or_else(|| FetchError::MissingField(path.join(".")))
    })
}

/// Read a float from a JSON number or numeric string.
pub fn as_float(value: &Value, field: &str) -> Result<f64, FetchError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| mismatch(field, "float", value)),
        Value::String(s) => s.trim().parse().map_err(|_| mismatch(field, "float", value)),
        _ => Err(mismatch(field, "float", value)),
    }
}

/// Read an integer from a JSON number or integer string.
///
/// Fractional JSON numbers truncate toward zero. Fractional strings such as
/// `"2.33"` are rejected.
pub fn as_int(value: &Value, field: &str) -> Result<i64, FetchError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < 9.0e18 => Ok(f.trunc() as i64),
                _ => Err(mismatch(field, "integer", value)),
            }
        }
        Value::String(s) => s.trim().parse().map_err(|_| mismatch(field, "integer", value)),
        _ => Err(mismatch(field, "integer", value)),
    }
}

/// Read a string field.
pub fn as_text(value: &Value, field: &str) -> Result<String, FetchError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(field, "string", value))
}

fn mismatch(field: &str, expected: &'static str, found: &Value) -> FetchError {
    let mut found = found.to_string();
    if found.chars().count() > 40 {
        found = found.chars().take(37).collect::<String>() + "...";
    }
    FetchError::TypeMismatch {
        field: field.to_string(),
        expected,
        found,
    }
}

// ============================================================================
// Per-feed extractors
// ============================================================================

/// `mag-5-minute.json`: last `bz_gsm`.
pub fn extract_magnetic_field(doc: &Value) -> Result<MagneticFieldReading, FetchError> {
    let bz_gsm = as_float(last_row_column(doc, "bz_gsm")?, "bz_gsm")?;
    Ok(MagneticFieldReading { bz_gsm })
}

/// `noaa-scales.json`: current G scale at `"0"."G"."Scale"`.
pub fn extract_scale(doc: &Value) -> Result<ScaleReading, FetchError> {
    let g = as_int(value_at_path(doc, &["0", "G", "Scale"])?, "G.Scale")?;
    Ok(ScaleReading { g })
}

/// `solar-wind-mag-field.json`: `Bz`, `Bt` and `TimeStamp`, all or nothing.
pub fn extract_summary(doc: &Value) -> Result<SummaryReading, FetchError> {
    let bz = as_int(value_at_path(doc, &["Bz"])?, "Bz")?;
    let bt = as_int(value_at_path(doc, &["Bt"])?, "Bt")?;
    let timestamp = as_text(value_at_path(doc, &["TimeStamp"])?, "TimeStamp")?;
    Ok(SummaryReading { bz, bt, timestamp })
}

/// `noaa-planetary-k-index.json`: last `Kp`.
pub fn extract_kp_index(doc: &Value) -> Result<KpReading, FetchError> {
    let kp = as_int(last_row_column(doc, "Kp")?, "Kp")?;
    Ok(KpReading { kp })
}

/// `plasma-5-minute.json`: last `density` and `speed`, all or nothing.
pub fn extract_plasma(doc: &Value) -> Result<PlasmaReading, FetchError> {
    let density = as_float(last_row_column(doc, "density")?, "density")?;
    let speed = as_float(last_row_column(doc, "speed")?, "speed")?;
    Ok(PlasmaReading { density, speed })
}
