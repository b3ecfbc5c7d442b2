//! The three aggregation windows a `SiteMonitor` maintains.
//!
//! The system this crate is modeled on keys its window state off a dict with
//! keys `{10, 60, 120}`; this closed enum carries the same three cases, with
//! `delay()` and `duration()` kept as independent knobs rather than one value
//! (they only happen to coincide for the 120s window).

/// One of the three recompute cadences a site is monitored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Window {
    /// Recomputed every 10s, over the last 600s.
    Ten,
    /// Recomputed every 60s, over the last 3600s.
    Sixty,
    /// Recomputed every 120s, over the last 120s; drives outage detection.
    OneTwenty,
}

impl Window {
    /// All three windows, in recompute-cadence order.
    pub const ALL: [Window; 3] = [Window::Ten, Window::Sixty, Window::OneTwenty];

    /// How often this window is recomputed, in seconds.
    #[must_use]
    pub const fn delay(self) -> f64 {
        match self {
            Window::Ten => 10.0,
            Window::Sixty => 60.0,
            Window::OneTwenty => 120.0,
        }
    }

    /// The lookback length of this window, in seconds.
    #[must_use]
    pub const fn duration(self) -> f64 {
        match self {
            Window::Ten => 600.0,
            Window::Sixty => 3600.0,
            Window::OneTwenty => 120.0,
        }
    }

    /// The lookback length used when rendering this window's counts/average
    /// lines to the formatted log (distinct from `duration()`: the log
    /// reports the recompute-cadence-scaled window, e.g. "last 60 seconds"
    /// for the 10s-cadence window).
    #[must_use]
    pub const fn report_seconds(self) -> Option<u64> {
        match self {
            Window::Ten => Some(60),
            Window::Sixty => Some(600),
            Window::OneTwenty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_seconds_matches_mapping() {
        assert_eq!(Window::Ten.report_seconds(), Some(60));
        assert_eq!(Window::Sixty.report_seconds(), Some(600));
        assert_eq!(Window::OneTwenty.report_seconds(), None);
    }
}
