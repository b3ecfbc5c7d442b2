//! Minimal live console renderer.
//!
//! The full interactive terminal UI is outside the core's budget; this is a
//! thin external collaborator in the spirit of `display.rs`/`ui_utils.rs` in
//! the teacher, kept deliberately small: one re-drawn status line per site,
//! plus a background "press q to quit" stdin poll that sets the shared stop
//! flag.

use std::collections::BTreeMap;
use std::io::Read;

use colored::Colorize;

use crate::fatal::StopFlag;
use crate::models::{Aggregate, OutageState, Window};

/// The latest known state for one site, assembled from successive
/// `read_metrics()` snapshots (later snapshots only update the windows they
/// carry, leaving the others as last observed).
#[derive(Debug, Clone, Default)]
pub struct SiteStatus {
    pub avg_elapsed: Option<f64>,
    pub max_elapsed: Option<f64>,
    pub availability: Option<f64>,
    pub outage: Option<OutageState>,
}

/// Console renderer state: the latest status per site name.
pub struct Console {
    statuses: BTreeMap<String, SiteStatus>,
}

impl Console {
    #[must_use]
    pub fn new(site_names: impl IntoIterator<Item = String>) -> Self {
        Self {
            statuses: site_names.into_iter().map(|name| (name, SiteStatus::default())).collect(),
        }
    }

    /// Folds one site's freshly read snapshots into its running status, then
    /// redraws the whole table.
    pub fn update(&mut self, site: &str, metrics: &[(Window, Aggregate)]) {
        let status = self.statuses.entry(site.to_string()).or_default();
        for (window, aggregate) in metrics {
            match aggregate {
                Aggregate::Counts { avg_elapsed, max_elapsed, .. } => {
                    status.avg_elapsed = Some(*avg_elapsed);
                    status.max_elapsed = Some(*max_elapsed);
                    let _ = window;
                }
                Aggregate::Availability {
                    availability,
                    unavailable_since,
                    recovered_at,
                    ..
                } => {
                    status.availability = Some(*availability);
                    status.outage = Some(if unavailable_since.is_some() {
                        OutageState::Down { since: unavailable_since.unwrap() }
                    } else if recovered_at.is_some() {
                        OutageState::Recovered { at: recovered_at.unwrap() }
                    } else {
                        OutageState::Up
                    });
                }
            }
        }
        self.redraw();
    }

    fn redraw(&self) {
        println!("{}", "--- site status ---".bold());
        for (name, status) in &self.statuses {
            let availability = status
                .availability
                .map(|a| format!("{:.0}%", a * 100.0))
                .unwrap_or_else(|| "?".to_string());
            let outage_label = match status.outage {
                Some(OutageState::Down { .. }) => "DOWN".red().to_string(),
                Some(OutageState::Recovered { .. }) | Some(OutageState::Up) | None => "UP".green().to_string(),
            };
            println!(
                "{name:<20} avail={availability:<6} avg={:<8} max={:<8} {outage_label}",
                status.avg_elapsed.map(|v| format!("{v:.3}s")).unwrap_or_else(|| "?".into()),
                status.max_elapsed.map(|v| format!("{v:.3}s")).unwrap_or_else(|| "?".into()),
            );
        }
    }
}

/// Spawns a blocking stdin reader that sets `stop` when the user presses `q`.
pub fn spawn_quit_listener(stop: StopFlag) {
    std::thread::spawn(move || {
        let mut byte = [0u8; 1];
        loop {
            if std::io::stdin().read_exact(&mut byte).is_err() {
                return;
            }
            if byte[0] == b'q' {
                stop.stop();
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;

    #[test]
    fn update_tracks_latest_counts_and_availability() {
        let mut console = Console::new(["site".to_string()]);
        let mut codes_count = Map::new();
        codes_count.insert(200, 1);
        console.update(
            "site",
            &[(
                Window::Ten,
                Aggregate::Counts {
                    time: 0.0,
                    avg_elapsed: 0.1,
                    max_elapsed: 0.2,
                    codes_count,
                },
            )],
        );
        assert_eq!(console.statuses["site"].avg_elapsed, Some(0.1));
    }
}
