//! Change detection between consecutive cycles.

use crate::types::{NotifierState, SeverityScores};

/// Compare `current` with the previous cycle and compose the alert.
///
/// A line is added for each field that strictly increased, in the order
/// G, Bz, Bt, Speed, Density. The returned state holds `current` in full,
/// whether or not anything increased.
pub fn evaluate(current: &SeverityScores, state: &NotifierState) -> (String, NotifierState) {
    let last = &state.last;
    let changes = [
        ("G", last.g, current.g),
        ("Bz", i64::from(last.bz), i64::from(current.bz)),
        ("Bt", i64::from(last.bt), i64::from(current.bt)),
        ("Speed", i64::from(last.speed), i64::from(current.speed)),
        ("Density", i64::from(last.density), i64::from(current.density)),
    ];

    let message = changes
        .iter()
        .filter(|(_, old, new)| new > old)
        .map(|(label, old, new)| format!("{label} increased from {old} to {new}"))
        .collect::<Vec<_>>()
        .join("\n");

    (message, NotifierState::new(*current))
}

/// Owns the previous cycle's scores for the lifetime of the process.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    state: NotifierState,
}

impl ChangeNotifier {
    /// Starts from all-zero scores, so the first non-zero reading alerts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NotifierState {
        &self.state
    }

    /// Record this cycle's scores, returning an alert if any field rose.
    pub fn observe(&mut self, current: &SeverityScores) -> Option<String> {
        let (message, next) = evaluate(current, &self.state);
        self.state = next;
        (!message.is_empty()).then_some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(g: i64, bt: u8, bz: u8, density: u8, speed: u8) -> SeverityScores {
        SeverityScores { g, bt, bz, density, speed }
    }

    #[test]
    fn single_increase_yields_one_line() {
        let state = NotifierState::new(scores(1, 0, 0, 0, 0));
        let current = scores(2, 0, 0, 0, 0);

        let (message, next) = evaluate(&current, &state);

        assert_eq!(message, "G increased from 1 to 2");
        assert_eq!(message.lines().count(), 1);
        assert_eq!(next.last, current);
    }

    #[test]
    fn unchanged_scores_yield_empty_message_and_same_state() {
        let state = NotifierState::new(scores(2, 3, 1, 4, 2));
        let (message, next) = evaluate(&state.last, &state);
        assert!(message.is_empty());
        assert_eq!(next, state);
    }

    #[test]
    fn lines_follow_fixed_field_order() {
        let state = NotifierState::default();
        let (message, _) = evaluate(&scores(1, 2, 3, 4, 5), &state);
        let labels: Vec<&str> = message
            .lines()
            .map(|l| l.split_whitespace().next().unwrap_or_default())
            .collect();
        assert_eq!(labels, vec!["G", "Bz", "Bt", "Speed", "Density"]);
    }

    #[test]
    fn decreases_do_not_alert_but_update_state() {
        let state = NotifierState::new(scores(3, 4, 5, 2, 2));
        let current = scores(1, 2, 0, 2, 3);
        let (message, next) = evaluate(&current, &state);
        assert_eq!(message, "Speed increased from 2 to 3");
        assert_eq!(next.last, current);
    }

    #[test]
    fn plateau_does_not_realert() {
        let mut notifier = ChangeNotifier::new();
        assert!(notifier.observe(&scores(0, 0, 4, 0, 0)).is_some());
        assert!(notifier.observe(&scores(0, 0, 4, 0, 0)).is_none());
        assert!(notifier.observe(&scores(0, 0, 4, 0, 0)).is_none());
    }

    #[test]
    fn new_rise_below_earlier_peak_realerts() {
        let mut notifier = ChangeNotifier::new();
        notifier.observe(&scores(0, 5, 0, 0, 0));
        assert!(notifier.observe(&scores(0, 1, 0, 0, 0)).is_none());
        let alert = notifier.observe(&scores(0, 3, 0, 0, 0));
        assert_eq!(alert.as_deref(), Some("Bt increased from 1 to 3"));
        assert_eq!(notifier.state().last.bt, 3);
    }
}
