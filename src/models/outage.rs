//! Outage/recovery state machine.
//!
//! Grounded exactly on `SiteMonitor.update_availability` in the system this
//! crate is modeled on: the availability threshold is 0.8, and a transition
//! backdates its timestamp by 120 seconds so it is attributed to the start of
//! the window that triggered it, not the instant the recompute ran.

/// Outage/recovery state for one site. At most one of `since`/`at` is ever
/// populated at a time, by construction of the enum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutageState {
    #[default]
    Up,
    Down {
        since: f64,
    },
    Recovered {
        at: f64,
    },
}

/// Availability below this fraction counts as unavailable.
pub const AVAILABILITY_THRESHOLD: f64 = 0.8;

impl OutageState {
    /// Applies one 120s-window availability reading, returning the next
    /// state. `now` is the instant the recompute ran; on a transition the
    /// recorded timestamp is backdated by 120 seconds.
    #[must_use]
    pub fn transition(self, availability: f64, now: f64) -> Self {
        let backdated = now - 120.0;
        match (self, availability >= AVAILABILITY_THRESHOLD) {
            (OutageState::Down { .. }, true) => OutageState::Recovered { at: backdated },
            (OutageState::Recovered { .. }, false) => OutageState::Down { since: backdated },
            (OutageState::Up, false) => OutageState::Down { since: backdated },
            (state, _) => state,
        }
    }

    #[must_use]
    pub fn unavailable_since(&self) -> Option<f64> {
        match self {
            OutageState::Down { since } => Some(*since),
            _ => None,
        }
    }

    #[must_use]
    pub fn recovered_at(&self) -> Option<f64> {
        match self {
            OutageState::Recovered { at } => Some(*at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_stays_up_while_available() {
        assert_eq!(OutageState::Up.transition(1.0, 1000.0), OutageState::Up);
    }

    #[test]
    fn up_to_down_backdates_since() {
        let next = OutageState::Up.transition(0.0, 1000.0);
        assert_eq!(next, OutageState::Down { since: 880.0 });
    }

    #[test]
    fn down_to_recovered_backdates_at() {
        let down = OutageState::Down { since: 880.0 };
        let next = down.transition(1.0, 2000.0);
        assert_eq!(next, OutageState::Recovered { at: 1880.0 });
    }

    #[test]
    fn recovered_to_down_again() {
        let recovered = OutageState::Recovered { at: 1880.0 };
        let next = recovered.transition(0.0, 3000.0);
        assert_eq!(next, OutageState::Down { since: 2880.0 });
    }

    #[test]
    fn recovered_stays_recovered_while_available() {
        let recovered = OutageState::Recovered { at: 1880.0 };
        assert_eq!(recovered.transition(0.95, 3000.0), recovered);
    }

    #[test]
    fn exclusivity_by_construction() {
        let down = OutageState::Down { since: 1.0 };
        assert_eq!(down.unavailable_since(), Some(1.0));
        assert_eq!(down.recovered_at(), None);
    }
}
