//! Static per-site configuration, parsed once at startup.

use std::time::Duration;

/// One line of the site list: a name, a URL, and probe cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub name: String,
    pub url: String,
    pub interval: Duration,
    pub timeout: Duration,
}

impl SiteConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>, interval: Duration, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            interval,
            timeout,
        }
    }

    /// Capacity of the `ResponseStore` this site's probes are kept in:
    /// enough entries to cover the longest lookback window (600s) at this
    /// site's own interval.
    #[must_use]
    pub fn store_capacity(&self) -> usize {
        let interval_secs = self.interval.as_secs_f64().max(f64::EPSILON);
        (600.0 / interval_secs).ceil() as usize
    }

    /// The site's configured interval, rendered the way the formatted log
    /// file name embeds it: the decimal point stripped out (`1.5` -> `"15"`).
    #[must_use]
    pub fn interval_tag(&self) -> String {
        format!("{:?}", self.interval.as_secs_f64()).replace('.', "")
    }
}
