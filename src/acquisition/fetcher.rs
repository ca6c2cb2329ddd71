//! Per-field-group fetching with isolated fallbacks

use serde_json::Value;
use tracing::{debug, warn};

use super::extract::{
    extract_kp_index, extract_magnetic_field, extract_plasma, extract_scale, extract_summary,
};
use super::{FeedTransport, FetchError, FetchFailure, FetchOutcome};
use crate::config::FeedConfig;
use crate::types::{
    FieldGroup, KpReading, MagneticFieldReading, PlasmaReading, RawMeasurement, ScaleReading,
    SummaryReading,
};

/// One joined cycle of fetches.
#[derive(Debug)]
pub struct FetchedMeasurement {
    pub raw: RawMeasurement,
    /// Groups that fell back to defaults this cycle, in [`FieldGroup::ALL`] order.
    pub failures: Vec<FetchFailure>,
}

impl FetchedMeasurement {
    pub fn failed_groups(&self) -> Vec<FieldGroup> {
        self.failures.iter().map(|f| f.group).collect()
    }
}

/// Reads each field-group from its own feed.
///
/// Groups never share a failure: every operation is attempted on every call and
/// a failed group only zeroes the fields it owns.
pub struct FieldFetcher<T: FeedTransport> {
    transport: T,
    feeds: FeedConfig,
}

impl<T: FeedTransport> FieldFetcher<T> {
    pub fn new(transport: T, feeds: FeedConfig) -> Self {
        Self { transport, feeds }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Latest `bz_gsm` from the 5-minute magnetometer table.
    pub async fn fetch_magnetic_field(&self) -> FetchOutcome<MagneticFieldReading> {
        self.fetch_group(
            FieldGroup::MagneticField,
            &self.feeds.mag_5_minute_url,
            extract_magnetic_field,
        )
        .await
    }

    /// Current G scale.
    pub async fn fetch_scale(&self) -> FetchOutcome<ScaleReading> {
        self.fetch_group(FieldGroup::Scales, &self.feeds.scales_url, extract_scale)
            .await
    }

    /// `Bz`, `Bt` and `TimeStamp` from the magnetic field summary.
    pub async fn fetch_summary(&self) -> FetchOutcome<SummaryReading> {
        self.fetch_group(
            FieldGroup::Summary,
            &self.feeds.mag_summary_url,
            extract_summary,
        )
        .await
    }

    /// Latest planetary K-index.
    pub async fn fetch_kp_index(&self) -> FetchOutcome<KpReading> {
        self.fetch_group(FieldGroup::KpIndex, &self.feeds.k_index_url, extract_kp_index)
            .await
    }

    /// Latest `density` and `speed` from the 5-minute plasma table.
    pub async fn fetch_plasma(&self) -> FetchOutcome<PlasmaReading> {
        self.fetch_group(
            FieldGroup::Plasma,
            &self.feeds.plasma_5_minute_url,
            extract_plasma,
        )
        .await
    }

    /// Fetch all five groups concurrently and join them into one measurement.
    ///
    /// Only returns once every group has either succeeded or fallen back.
    pub async fn fetch_all(&self) -> FetchedMeasurement {
        let (magnetic, scale, summary, kp, plasma) = tokio::join!(
            self.fetch_magnetic_field(),
            self.fetch_scale(),
            self.fetch_summary(),
            self.fetch_kp_index(),
            self.fetch_plasma(),
        );

        let (magnetic, magnetic_err) = magnetic.into_parts();
        let (scale, scale_err) = scale.into_parts();
        let (summary, summary_err) = summary.into_parts();
        let (kp, kp_err) = kp.into_parts();
        let (plasma, plasma_err) = plasma.into_parts();

        let failures = [magnetic_err, scale_err, summary_err, kp_err, plasma_err]
            .into_iter()
            .flatten()
            .collect();

        FetchedMeasurement {
            raw: RawMeasurement::from_readings(magnetic, scale, summary, kp, plasma),
            failures,
        }
    }

    async fn fetch_group<R, F>(&self, group: FieldGroup, url: &str, extract: F) -> FetchOutcome<R>
    where
        R: Default + std::fmt::Debug,
        F: FnOnce(&Value) -> Result<R, FetchError>,
    {
        let result = match self.transport.get_json(url).await {
            Ok(doc) => extract(&doc),
            Err(e) => Err(e),
        };

        match result {
            Ok(value) => {
                debug!(group = %group, value = ?value, "Feed read");
                FetchOutcome::Fetched(value)
            }
            Err(error) => {
                warn!(group = %group, url, error = %error, "Error getting {}", group);
                FetchOutcome::Fallback {
                    value: R::default(),
                    failure: FetchFailure { group, error },
                }
            }
        }
    }
}
