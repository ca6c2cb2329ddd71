//! The fetch -> score -> render -> notify loop.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::acquisition::{FeedTransport, FieldFetcher};
use crate::config::defaults::{HEARTBEAT_BLINK_MS, POLL_INTERVAL_SECS};
use crate::config::SeverityRanges;
use crate::display::{render, DisplaySink};
use crate::notify::{ChangeNotifier, NotificationSink};
use crate::processing::{compute_severity, ScaleError};
use crate::types::{FieldGroup, Frame, RawMeasurement, SeverityScores};

// ============================================================================
// Reports
// ============================================================================

/// Everything one cycle produced.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub raw: RawMeasurement,
    pub scores: SeverityScores,
    pub frame: Frame,
    /// Alert text, if any score rose since the previous cycle.
    pub message: Option<String>,
    /// Groups that fell back to defaults this cycle.
    pub failed_groups: Vec<FieldGroup>,
}

/// Counters accumulated over the life of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub cycles: u64,
    pub fetch_failures: u64,
    pub display_failures: u64,
    pub notifications_sent: u64,
    pub notification_failures: u64,
}

// ============================================================================
// Poll Loop
// ============================================================================

/// Owns all state carried between cycles.
///
/// Built with [`new()`](PollLoop::new), optionally adjusted with
/// [`with_interval()`](PollLoop::with_interval) and
/// [`with_ranges()`](PollLoop::with_ranges), then driven by
/// [`run()`](PollLoop::run) or one [`run_cycle()`](PollLoop::run_cycle) at a time.
pub struct PollLoop<T: FeedTransport> {
    fetcher: FieldFetcher<T>,
    ranges: SeverityRanges,
    notifier: ChangeNotifier,
    display: Box<dyn DisplaySink>,
    notifications: Box<dyn NotificationSink>,
    interval: Duration,
    cancel_token: CancellationToken,
    stats: PollStats,
}

impl<T: FeedTransport> PollLoop<T> {
    pub fn new(
        fetcher: FieldFetcher<T>,
        display: Box<dyn DisplaySink>,
        notifications: Box<dyn NotificationSink>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            fetcher,
            ranges: SeverityRanges::default(),
            notifier: ChangeNotifier::new(),
            display,
            notifications,
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
            cancel_token,
            stats: PollStats::default(),
        }
    }

    /// Time between the start of consecutive cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Raw values mapped to the top of each severity scale.
    pub fn with_ranges(mut self, ranges: SeverityRanges) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Run one full cycle: fetch, score, render, notify.
    ///
    /// Feed, display and notification failures are logged and absorbed. Only a
    /// misconfigured scale range is returned as an error.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, ScaleError> {
        self.set_heartbeat(true).await;

        let fetched = self.fetcher.fetch_all().await;
        let failed_groups = fetched.failed_groups();
        self.stats.fetch_failures += failed_groups.len() as u64;

        let raw = fetched.raw;
        let scores = compute_severity(&raw, &self.ranges)?;

        info!("{}", raw);
        info!("{}", scores);

        let frame = render(&scores);
        if let Err(e) = self.display.show(&frame).await {
            self.stats.display_failures += 1;
            warn!(sink = self.display.sink_name(), error = %e, "Display update failed");
        }

        let message = self.notifier.observe(&scores);
        if let Some(ref text) = message {
            match self.notifications.send(text).await {
                Ok(()) => self.stats.notifications_sent += 1,
                Err(e) => {
                    self.stats.notification_failures += 1;
                    warn!(sink = self.notifications.sink_name(), error = %e, "Alert delivery failed");
                }
            }
        }

        self.set_heartbeat(false).await;
        self.stats.cycles += 1;

        Ok(CycleReport {
            raw,
            scores,
            frame,
            message,
            failed_groups,
        })
    }

    /// Run cycles until the cancellation token fires.
    ///
    /// A cycle already in progress always completes; cancellation only takes
    /// effect between cycles or while idle. Returns final statistics, or the
    /// scale error that stopped the loop.
    pub async fn run(mut self) -> Result<PollStats, ScaleError> {
        info!(
            interval_secs = self.interval.as_secs(),
            display = self.display.sink_name(),
            notify = self.notifications.sink_name(),
            "📡 Polling space-weather feeds"
        );

        while !self.cancel_token.is_cancelled() {
            let cycle_start = Instant::now();
            let report = self.run_cycle().await?;

            if !report.failed_groups.is_empty() {
                info!(
                    failed = report.failed_groups.len(),
                    cycle = self.stats.cycles,
                    "Cycle completed with fallback values"
                );
            }

            if !self.idle_until_next(cycle_start).await {
                info!("[PollLoop] Shutdown signal received");
                break;
            }
        }

        let stats = self.stats;
        info!(
            cycles = stats.cycles,
            alerts = stats.notifications_sent,
            fetch_failures = stats.fetch_failures,
            "Poll loop stopped"
        );
        Ok(stats)
    }

    /// Sleep until the next cycle boundary, blinking the heartbeat halfway.
    ///
    /// Returns `false` if cancelled while waiting.
    async fn idle_until_next(&mut self, cycle_start: Instant) -> bool {
        let midpoint = cycle_start + self.interval / 2;
        let next_cycle = cycle_start + self.interval;

        if !sleep_until(&self.cancel_token, midpoint).await {
            return false;
        }

        self.set_heartbeat(true).await;
        let blink_end = Instant::now() + Duration::from_millis(HEARTBEAT_BLINK_MS);
        let still_running = sleep_until(&self.cancel_token, blink_end.min(next_cycle)).await;
        self.set_heartbeat(false).await;

        still_running && sleep_until(&self.cancel_token, next_cycle).await
    }

    async fn set_heartbeat(&mut self, on: bool) {
        if let Err(e) = self.display.heartbeat(on).await {
            warn!(sink = self.display.sink_name(), error = %e, "Heartbeat update failed");
        }
    }
}

/// Sleep until `deadline`. Returns `false` if cancelled first.
async fn sleep_until(cancel_token: &CancellationToken, deadline: Instant) -> bool {
    tokio::select! {
        () = cancel_token.cancelled() => false,
        () = tokio::time::sleep_until(deadline) => true,
    }
}
