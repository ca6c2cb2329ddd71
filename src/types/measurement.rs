//! Raw feed values and the field-groups they are fetched in

use serde::{Deserialize, Serialize};

/// Timestamp recorded when the summary feed could not be read.
pub const TIMESTAMP_UNAVAILABLE: &str = "Error";

// ============================================================================
// Field Groups
// ============================================================================

/// An independently fetchable cluster of raw fields sharing one feed document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    /// 5-minute magnetometer table (`bz_gsm`)
    MagneticField,
    /// NOAA space weather scales (`G`)
    Scales,
    /// Solar wind magnetic field summary (`Bz`, `Bt`, `TimeStamp`)
    Summary,
    /// Planetary K-index table (`Kp`)
    KpIndex,
    /// 5-minute plasma table (`density`, `speed`)
    Plasma,
}

impl FieldGroup {
    /// All groups, in the order they are reported.
    pub const ALL: [FieldGroup; 5] = [
        FieldGroup::MagneticField,
        FieldGroup::Scales,
        FieldGroup::Summary,
        FieldGroup::KpIndex,
        FieldGroup::Plasma,
    ];
}

impl std::fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldGroup::MagneticField => write!(f, "bz_gsm"),
            FieldGroup::Scales => write!(f, "g"),
            FieldGroup::Summary => write!(f, "Bz/Bt"),
            FieldGroup::KpIndex => write!(f, "Kp"),
            FieldGroup::Plasma => write!(f, "Density/Speed"),
        }
    }
}

// ============================================================================
// Per-group payloads
// ============================================================================

/// Payload of the magnetometer table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MagneticFieldReading {
    pub bz_gsm: f64,
}

/// Payload of the scales document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleReading {
    pub g: i64,
}

/// Payload of the magnetic field summary. The three values share one document
/// and fall back together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReading {
    pub bz: i64,
    pub bt: i64,
    pub timestamp: String,
}

impl Default for SummaryReading {
    fn default() -> Self {
        Self {
            bz: 0,
            bt: 0,
            timestamp: TIMESTAMP_UNAVAILABLE.to_string(),
        }
    }
}

/// Payload of the planetary K-index table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpReading {
    pub kp: i64,
}

/// Payload of the plasma table. Density and speed fall back together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlasmaReading {
    pub density: f64,
    pub speed: f64,
}

// ============================================================================
// Raw Measurement
// ============================================================================

/// One poll cycle's worth of raw feed values.
///
/// Every field is filled from its own group; a failed group leaves only its own
/// fields at their zero defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurement {
    /// Planetary K-index
    pub kp: i64,
    /// NOAA geomagnetic storm scale (G0-G5)
    pub g: i64,
    /// Interplanetary magnetic field north-south component (nT)
    pub bz: i64,
    /// Bz in GSM coordinates from the 5-minute table (nT)
    pub bz_gsm: f64,
    /// Total interplanetary magnetic field strength (nT)
    pub bt: i64,
    /// Solar wind proton density (p/cm³)
    pub density: f64,
    /// Solar wind bulk speed (km/s)
    pub speed: f64,
    /// Summary feed timestamp, or `"Error"` when unavailable
    pub timestamp: String,
}

impl Default for RawMeasurement {
    fn default() -> Self {
        Self::from_readings(
            MagneticFieldReading::default(),
            ScaleReading::default(),
            SummaryReading::default(),
            KpReading::default(),
            PlasmaReading::default(),
        )
    }
}

impl RawMeasurement {
    /// Assemble a measurement from the five group payloads.
    pub fn from_readings(
        magnetic: MagneticFieldReading,
        scale: ScaleReading,
        summary: SummaryReading,
        kp: KpReading,
        plasma: PlasmaReading,
    ) -> Self {
        Self {
            kp: kp.kp,
            g: scale.g,
            bz: summary.bz,
            bz_gsm: magnetic.bz_gsm,
            bt: summary.bt,
            density: plasma.density,
            speed: plasma.speed,
            timestamp: summary.timestamp,
        }
    }
}

impl std::fmt::Display for RawMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Timestamp {} : kp={} g={} bz={} bz_gsm={} bt={} den={} spd={}",
            self.timestamp,
            self.kp,
            self.g,
            self.bz,
            self.bz_gsm,
            self.bt,
            self.density,
            self.speed
        )
    }
}
