//! Poll Cycle Tests
//!
//! Drives the full fetch -> score -> render -> notify cycle through the public
//! library API with an in-memory feed transport and recording sinks.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use aurora_ring::acquisition::{FeedTransport, FetchError, FieldFetcher};
use aurora_ring::config::{FeedConfig, SeverityRanges};
use aurora_ring::display::{DisplayError, DisplaySink};
use aurora_ring::notify::{NotificationSink, NotifyError};
use aurora_ring::pipeline::PollLoop;
use aurora_ring::types::{palette, FieldGroup, Frame, SeverityScores};

// ============================================================================
// Fakes
// ============================================================================

/// Serves documents from a shared, mutable URL map so tests can change the
/// feeds between cycles.
#[derive(Clone, Default)]
struct FakeFeeds {
    docs: Arc<Mutex<HashMap<String, Value>>>,
}

impl FakeFeeds {
    fn set(&self, url: &str, doc: Value) {
        self.docs.lock().unwrap().insert(url.to_string(), doc);
    }
}

#[async_trait]
impl FeedTransport for FakeFeeds {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.docs
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("no route to {url}")))
    }
}

#[derive(Clone, Default)]
struct RecordingDisplay {
    frames: Arc<Mutex<Vec<Frame>>>,
    heartbeats: Arc<Mutex<Vec<bool>>>,
    cancel_after_first_frame: Option<CancellationToken>,
}

#[async_trait]
impl DisplaySink for RecordingDisplay {
    async fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.frames.lock().unwrap().push(*frame);
        if let Some(ref token) = self.cancel_after_first_frame {
            token.cancel();
        }
        Ok(())
    }

    async fn heartbeat(&mut self, on: bool) -> Result<(), DisplayError> {
        self.heartbeats.lock().unwrap().push(on);
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "recording"
    }
}

/// A ring that has been unplugged.
struct BrokenDisplay;

#[async_trait]
impl DisplaySink for BrokenDisplay {
    async fn show(&mut self, _frame: &Frame) -> Result<(), DisplayError> {
        Err(DisplayError::RenderSinkUnavailable("ring unplugged".to_string()))
    }

    async fn heartbeat(&mut self, _on: bool) -> Result<(), DisplayError> {
        Err(DisplayError::RenderSinkUnavailable("led unplugged".to_string()))
    }

    fn sink_name(&self) -> &str {
        "broken"
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(NotifyError::NotifySinkUnavailable("chat service down".to_string()));
        }
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "recording"
    }
}

// ============================================================================
// Feed documents
// ============================================================================

fn mag_table(bz_gsm: &str) -> Value {
    json!([
        ["time_tag", "bx_gsm", "by_gsm", "bz_gsm", "bt"],
        ["2024-05-10 17:50:00.000", "1.0", "2.0", "-1.00", "5.0"],
        ["2024-05-10 17:55:00.000", "1.1", "2.1", bz_gsm, "5.2"]
    ])
}

fn scales(g: &str) -> Value {
    json!({
        "-1": {"G": {"Scale": "1", "Text": "minor"}},
        "0": {"G": {"Scale": g, "Text": "current"}},
        "1": {"G": {"Scale": null}}
    })
}

fn summary(bz: &str, bt: &str) -> Value {
    json!({"Bt": bt, "Bz": bz, "TimeStamp": "2024-05-10 18:00:00.000"})
}

fn kp_table(kp: &str) -> Value {
    json!([["time_tag", "Kp", "a_running", "station_count"], ["2024-05-10 18:00:00.000", kp, "207", "8"]])
}

fn plasma_table(density: &str, speed: &str) -> Value {
    json!([
        ["time_tag", "density", "speed", "temperature"],
        ["2024-05-10 17:55:00.000", density, speed, "412000"]
    ])
}

fn storm_feeds() -> FakeFeeds {
    let urls = FeedConfig::default();
    let feeds = FakeFeeds::default();
    feeds.set(&urls.mag_5_minute_url, mag_table("-19.80"));
    feeds.set(&urls.scales_url, scales("3"));
    feeds.set(&urls.mag_summary_url, summary("-20", "20"));
    feeds.set(&urls.k_index_url, kp_table("7"));
    feeds.set(&urls.plasma_5_minute_url, plasma_table("50.00", "1000.0"));
    feeds
}

fn build_loop(
    feeds: FakeFeeds,
    display: RecordingDisplay,
    notifier: RecordingNotifier,
    token: CancellationToken,
) -> PollLoop<FakeFeeds> {
    PollLoop::new(
        FieldFetcher::new(feeds, FeedConfig::default()),
        Box::new(display),
        Box::new(notifier),
        token,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn storm_cycle_scores_renders_and_alerts() {
    let display = RecordingDisplay::default();
    let notifier = RecordingNotifier::default();
    let mut poll = build_loop(
        storm_feeds(),
        display.clone(),
        notifier.clone(),
        CancellationToken::new(),
    );

    let report = poll.run_cycle().await.unwrap();

    assert!(report.failed_groups.is_empty());
    assert_eq!(report.raw.kp, 7);
    assert_eq!(report.raw.bz_gsm, -19.8);
    assert_eq!(
        report.scores,
        SeverityScores {
            g: 3,
            bt: 5,
            bz: 5,
            density: 5,
            speed: 5,
        }
    );

    let frame = report.frame;
    assert_eq!(&frame[0..3], &[palette::YELLOW; 3]);
    assert_eq!(frame[3], palette::OFF);
    assert_eq!(&frame[4..9], &[palette::RED; 5]);
    assert_eq!(&frame[9..14], &[palette::GREEN; 5]);
    assert_eq!(&frame[14..19], &[palette::BLUE; 5]);
    assert_eq!(&frame[19..24], &[palette::MAGENTA; 5]);

    assert_eq!(display.frames.lock().unwrap().as_slice(), &[frame]);
    assert_eq!(display.heartbeats.lock().unwrap().as_slice(), &[true, false]);

    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0],
        "G increased from 0 to 3\n\
         Bz increased from 0 to 5\n\
         Bt increased from 0 to 5\n\
         Speed increased from 0 to 5\n\
         Density increased from 0 to 5"
    );
}

#[tokio::test]
async fn plasma_parse_error_only_zeroes_density_and_speed() {
    let urls = FeedConfig::default();
    let feeds = storm_feeds();
    feeds.set(&urls.plasma_5_minute_url, json!({"error": "upstream timeout"}));

    let mut poll = build_loop(
        feeds,
        RecordingDisplay::default(),
        RecordingNotifier::default(),
        CancellationToken::new(),
    );
    let report = poll.run_cycle().await.unwrap();

    assert_eq!(report.failed_groups, vec![FieldGroup::Plasma]);
    assert_eq!(report.raw.density, 0.0);
    assert_eq!(report.raw.speed, 0.0);
    assert_eq!(report.raw.g, 3);
    assert_eq!(report.raw.bz, -20);
    assert_eq!(report.raw.bt, 20);
    assert_eq!(report.raw.kp, 7);
    assert_eq!(report.raw.bz_gsm, -19.8);
    assert_eq!(report.raw.timestamp, "2024-05-10 18:00:00.000");
    assert_eq!(report.scores.density, 0);
    assert_eq!(report.scores.speed, 0);
    assert_eq!(poll.stats().fetch_failures, 1);
}

#[tokio::test]
async fn all_feeds_down_renders_dark_ring_without_alert() {
    let display = RecordingDisplay::default();
    let notifier = RecordingNotifier::default();
    let mut poll = build_loop(
        FakeFeeds::default(),
        display.clone(),
        notifier.clone(),
        CancellationToken::new(),
    );

    let report = poll.run_cycle().await.unwrap();

    assert_eq!(report.failed_groups, FieldGroup::ALL.to_vec());
    assert_eq!(report.raw.timestamp, "Error");
    assert!(report.frame.iter().all(|&p| p == palette::OFF));
    assert!(report.message.is_none());
    assert!(notifier.messages.lock().unwrap().is_empty());
    assert_eq!(display.frames.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn only_rising_scores_alert_across_cycles() {
    let urls = FeedConfig::default();
    let feeds = storm_feeds();
    feeds.set(&urls.mag_summary_url, summary("4", "4"));
    feeds.set(&urls.scales_url, scales("0"));
    feeds.set(&urls.plasma_5_minute_url, plasma_table("5.0", "400.0"));

    let notifier = RecordingNotifier::default();
    let mut poll = build_loop(
        feeds.clone(),
        RecordingDisplay::default(),
        notifier.clone(),
        CancellationToken::new(),
    );

    // Cycle 1: Bt 1, Speed 2, Density 1 rise from the all-zero start state
    let first = poll.run_cycle().await.unwrap();
    assert_eq!(
        first.message.as_deref(),
        Some("Bt increased from 0 to 1\nSpeed increased from 0 to 2\nDensity increased from 0 to 1")
    );

    // Cycle 2: identical feeds, no alert but state refreshed
    let second = poll.run_cycle().await.unwrap();
    assert!(second.message.is_none());
    assert_eq!(poll.notifier().state().last, second.scores);

    // Cycle 3: Bz turns south (-10 -> round(2.5) = 3), speed drops
    feeds.set(&urls.mag_summary_url, summary("-10", "4"));
    feeds.set(&urls.plasma_5_minute_url, plasma_table("5.0", "150.0"));
    let third = poll.run_cycle().await.unwrap();
    assert_eq!(third.scores.bz, 3);
    assert_eq!(third.scores.speed, 1);
    assert_eq!(third.message.as_deref(), Some("Bz increased from 0 to 3"));

    // Cycle 4: speed climbs back to 2
    feeds.set(&urls.plasma_5_minute_url, plasma_table("5.0", "400.0"));
    let fourth = poll.run_cycle().await.unwrap();
    assert_eq!(fourth.message.as_deref(), Some("Speed increased from 1 to 2"));

    assert_eq!(notifier.messages.lock().unwrap().len(), 3);
    assert_eq!(poll.stats().notifications_sent, 3);
    assert_eq!(poll.stats().cycles, 4);
}

#[tokio::test]
async fn sink_failures_never_stop_the_cycle() {
    let notifier = RecordingNotifier {
        fail: true,
        ..RecordingNotifier::default()
    };
    let mut poll = PollLoop::new(
        FieldFetcher::new(storm_feeds(), FeedConfig::default()),
        Box::new(BrokenDisplay),
        Box::new(notifier.clone()),
        CancellationToken::new(),
    );

    let report = poll.run_cycle().await.unwrap();
    assert!(report.message.is_some());

    let stats = poll.stats();
    assert_eq!(stats.cycles, 1);
    assert_eq!(stats.display_failures, 1);
    assert_eq!(stats.notification_failures, 1);
    assert_eq!(stats.notifications_sent, 0);

    // State still advanced: an identical second cycle does not re-alert
    let again = poll.run_cycle().await.unwrap();
    assert!(again.message.is_none());
}

#[tokio::test]
async fn invalid_scale_range_is_fatal() {
    let mut poll = build_loop(
        storm_feeds(),
        RecordingDisplay::default(),
        RecordingNotifier::default(),
        CancellationToken::new(),
    )
    .with_ranges(SeverityRanges {
        bt_max: 0.0,
        ..SeverityRanges::default()
    });

    assert!(poll.run_cycle().await.is_err());
}

#[tokio::test]
async fn run_stops_after_in_flight_cycle_when_cancelled() {
    let token = CancellationToken::new();
    let display = RecordingDisplay {
        cancel_after_first_frame: Some(token.clone()),
        ..RecordingDisplay::default()
    };
    let notifier = RecordingNotifier::default();
    let poll = build_loop(storm_feeds(), display.clone(), notifier.clone(), token)
        .with_interval(Duration::from_secs(3600));

    let stats = tokio::time::timeout(Duration::from_secs(5), poll.run())
        .await
        .expect("loop should stop promptly after cancellation")
        .unwrap();

    assert_eq!(stats.cycles, 1);
    assert_eq!(stats.notifications_sent, 1);
    assert_eq!(display.frames.lock().unwrap().len(), 1);
    // The cycle that was cancelled mid-flight still finished notifying
    assert_eq!(notifier.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn run_with_cancelled_token_does_nothing() {
    let token = CancellationToken::new();
    token.cancel();
    let display = RecordingDisplay::default();
    let poll = build_loop(
        storm_feeds(),
        display.clone(),
        RecordingNotifier::default(),
        token,
    );

    let stats = poll.run().await.unwrap();
    assert_eq!(stats.cycles, 0);
    assert!(display.frames.lock().unwrap().is_empty());
}
