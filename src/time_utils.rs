//! Time representation shared across the crate.
//!
//! Window arithmetic (`last_update + delay - duration - timeout`) is plain
//! floating-point second math in the system this crate follows, so the
//! canonical timestamp type here is `f64` seconds since the Unix epoch rather
//! than `chrono::DateTime`. `chrono` is used only at the edges, to render a
//! timestamp for a human to read.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, matching `time.time()` in the system this
/// crate is modeled on.
pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Renders an epoch-seconds timestamp in local time as `%Y-%m-%d %H:%M:%S`.
#[must_use]
pub fn to_local_string(epoch_secs: f64) -> String {
    let millis = (epoch_secs * 1000.0).round() as i64;
    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(utc) => chrono::DateTime::<chrono::Local>::from(utc)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => format!("<invalid timestamp {epoch_secs}>"),
    }
}
