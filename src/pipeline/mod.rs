//! Poll Pipeline Module
//!
//! ## Cycle
//!
//! ```text
//! 1. Heartbeat on (fetching)
//! 2. Fetch all five feed groups (concurrently, joined)
//! 3. Severity scores from the joined measurement
//! 4. Render ring frame -> DisplaySink
//! 5. Rising-edge alert -> NotificationSink (only if something rose)
//! 6. Heartbeat off, sleep to next cycle start (blink at the midpoint)
//! ```
//!
//! Partial results are never rendered: step 3 only runs once every fetch in
//! step 2 has succeeded or fallen back.

pub mod poll_loop;

pub use poll_loop::{CycleReport, PollLoop, PollStats};
