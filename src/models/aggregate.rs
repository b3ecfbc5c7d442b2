//! The computed state for one monitoring window.
//!
//! The system this crate is modeled on stores each window's result as a loose
//! dict whose keys vary by window (`time`/`codes_count`/`max_elapsed`/
//! `avg_elapsed` for the short windows, `time`/`availability`/optional
//! `unavailable_since`/`recovered_at` for the long one). Replaced here with a
//! tagged enum so the two shapes can never be confused at a call site.

use std::collections::BTreeMap;

/// The result of recomputing one window.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    /// Result of a 10s or 60s window recompute.
    Counts {
        /// The instant this aggregate was computed (`last_update` after the update).
        time: f64,
        avg_elapsed: f64,
        max_elapsed: f64,
        /// Response status code to count of occurrences, in the lookback range.
        codes_count: BTreeMap<u16, usize>,
    },
    /// Result of a 120s window recompute; also drives outage detection.
    Availability {
        time: f64,
        availability: f64,
        unavailable_since: Option<f64>,
        recovered_at: Option<f64>,
    },
}

impl Aggregate {
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            Aggregate::Counts { time, .. } | Aggregate::Availability { time, .. } => *time,
        }
    }
}
