//! Renders one `(Window, Aggregate)` pair into its human-readable log line(s).
//!
//! Grounded on `GlobalMonitor.log` in the system this crate is modeled on,
//! including its exact line shapes. The `wait=60/600` lookup keyed on window
//! duration there is a closed match here over `Window::report_seconds`,
//! turning that function's `ValueError` fallback into an unreachable compile
//! time guarantee instead of a runtime bug.

use crate::models::{Aggregate, Window};
use crate::time_utils::to_local_string;

/// Formats `aggregate` as the line(s) appended to `<name>_<interval>.txt`.
#[must_use]
pub fn render(window: Window, aggregate: &Aggregate) -> String {
    match aggregate {
        Aggregate::Availability {
            time,
            availability,
            unavailable_since,
            recovered_at,
        } => render_availability(*time, *availability, *unavailable_since, *recovered_at),
        Aggregate::Counts {
            time,
            avg_elapsed,
            max_elapsed,
            codes_count,
        } => render_counts(window, *time, *avg_elapsed, *max_elapsed, codes_count),
    }
}

fn render_availability(time: f64, availability: f64, unavailable_since: Option<f64>, recovered_at: Option<f64>) -> String {
    let ts = to_local_string(time);
    let pct = (availability * 100.0).round();
    let mut out = format!("[{ts}] Website availability is {pct:.0}%\n");
    if let Some(since) = unavailable_since {
        out.push_str(&format!("[{ts}] Website is unavailable since {}\n", to_local_string(since)));
    }
    if let Some(at) = recovered_at {
        out.push_str(&format!("[{ts}] Website recovered at {}\n", to_local_string(at)));
    }
    out
}

fn render_counts(window: Window, time: f64, avg_elapsed: f64, max_elapsed: f64, codes_count: &std::collections::BTreeMap<u16, usize>) -> String {
    let ts = to_local_string(time);
    let seconds = window
        .report_seconds()
        .expect("counts aggregate only produced for 10s/60s windows");

    let codes = codes_count
        .iter()
        .map(|(code, count)| format!("{code} : {count}"))
        .collect::<Vec<_>>()
        .join(" ,");

    format!(
        "[{ts}] The average response time for the last {seconds} seconds is {avg_elapsed:.6}\n\
         [{ts}] The maximum response time for the last {seconds} seconds is {max_elapsed:.6}\n\
         [{ts}] The response codes counts for the last {seconds} seconds is {{{codes} }}\n"
    )
}
