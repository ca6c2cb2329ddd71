//! Typo detection for `aurora.toml`.
//!
//! The raw file is read once as a plain `toml::Value` tree so every dotted key
//! can be checked against the fields `AuroraConfig` understands. Anything
//! unrecognised becomes a warning, with the nearest known key offered when one
//! is close enough. Loading carries on regardless.

use std::collections::HashSet;

/// A non-fatal config warning (typo, unknown section).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `AuroraConfig`.
///
/// Maintained by hand to match the struct hierarchy in `aurora_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [poll]
        "poll",
        "poll.interval_secs",
        // [feeds]
        "feeds",
        "feeds.mag_5_minute_url",
        "feeds.scales_url",
        "feeds.mag_summary_url",
        "feeds.k_index_url",
        "feeds.plasma_5_minute_url",
        "feeds.timeout_secs",
        "feeds.user_agent",
        // [scales]
        "scales",
        "scales.bt_max",
        "scales.bz_max",
        "scales.density_max",
        "scales.speed_max",
        // [notify]
        "notify",
        "notify.webhook_url",
        // [display]
        "display",
        "display.console",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Every dotted key path in a TOML document, tables before their children.
///
/// `[scales]` with `bt_max = 20.0` yields `["scales", "scales.bt_max"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };

    table
        .iter()
        .flat_map(|(key, child)| {
            let path = match prefix {
                "" => key.clone(),
                _ => format!("{prefix}.{key}"),
            };
            let nested = walk_toml_keys(child, &path);
            std::iter::once(path).chain(nested)
        })
        .collect()
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance (insert, delete, substitute) counted in chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Nearest known key within three edits; ties go to the alphabetically first.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Entry Point
// ============================================================================

/// Warnings for every key in `raw_toml` that `AuroraConfig` does not define.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        // Syntax errors surface from the real deserialize
        Err(_) => return Vec::new(),
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
