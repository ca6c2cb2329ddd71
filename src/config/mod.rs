//! Aurora Ring Configuration Module
//!
//! Provides node configuration loaded from a TOML file: feed URLs, the poll
//! interval, severity scale ranges, and the notification / display sinks.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `AURORA_CONFIG` environment variable (path to TOML file)
//! 3. `aurora.toml` in the current working directory
//! 4. Built-in defaults (NOAA SWPC feeds, 60 s interval)
//!
//! The loaded [`AuroraConfig`] is passed by value into the poll loop; there is
//! no process-wide configuration singleton.

mod aurora_config;
pub mod defaults;
pub mod validation;

pub use aurora_config::*;
