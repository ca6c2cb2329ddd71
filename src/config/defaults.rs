//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Feeds (NOAA Space Weather Prediction Center)
// ============================================================================

/// 5-minute solar wind magnetometer table (`bz_gsm` column).
pub const MAG_5_MINUTE_URL: &str =
    "http://services.swpc.noaa.gov/products/solar-wind/mag-5-minute.json";

/// NOAA space weather scales, keyed by period (`"0"` is current).
pub const NOAA_SCALES_URL: &str = "http://services.swpc.noaa.gov/products/noaa-scales.json";

/// Solar wind magnetic field summary (`Bz`, `Bt`, `TimeStamp`).
pub const MAG_SUMMARY_URL: &str =
    "http://services.swpc.noaa.gov/products/summary/solar-wind-mag-field.json";

/// Planetary K-index table (`Kp` column).
pub const PLANETARY_K_INDEX_URL: &str =
    "http://services.swpc.noaa.gov/products/noaa-planetary-k-index.json";

/// 5-minute solar wind plasma table (`density` and `speed` columns).
pub const PLASMA_5_MINUTE_URL: &str =
    "http://services.swpc.noaa.gov/products/solar-wind/plasma-5-minute.json";

/// Per-request timeout for feed fetches (seconds).
///
/// Bounds how long one slow feed can hold up a cycle.
pub const FEED_HTTP_TIMEOUT_SECS: u64 = 10;

/// User agent sent with every feed request.
pub const FEED_USER_AGENT: &str = concat!("aurora-ring/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Poll Loop
// ============================================================================

/// Seconds between the start of consecutive poll cycles.
pub const POLL_INTERVAL_SECS: u64 = 60;

/// Duration of the heartbeat blink at the middle of the idle period (ms).
pub const HEARTBEAT_BLINK_MS: u64 = 100;

// ============================================================================
// Severity Ranges
// ============================================================================

/// Bt (nT) mapped to severity 5.
pub const BT_MAX_NT: f64 = 20.0;

/// Southward Bz magnitude (nT) mapped to severity 5.
pub const BZ_MAX_NT: f64 = 20.0;

/// Proton density (p/cm³) mapped to severity 5.
pub const DENSITY_MAX_PER_CM3: f64 = 50.0;

/// Bulk speed (km/s) mapped to severity 5.
pub const SPEED_MAX_KM_S: f64 = 1000.0;

// ============================================================================
// Notification
// ============================================================================

/// HTTP client timeout for webhook deliveries (seconds).
pub const WEBHOOK_HTTP_TIMEOUT_SECS: u64 = 15;
