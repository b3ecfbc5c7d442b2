//! Per-site probe scheduling, multi-window aggregation, and outage detection.
//!
//! Grounded on `SiteMonitor` in the system this crate is modeled on: a single
//! loop checks three deadlines no less often than every 10ms, recomputing the
//! 10s/60s windows on their own cadence and the 120s window (which also
//! drives `OutageState`) on its. Window bounds use `last_update + delay -
//! duration - timeout`; `last_update` always advances to the instant the
//! recompute actually ran, not to the previous deadline plus `delay`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::fatal::StopFlag;
use crate::models::{Aggregate, OutageState, ProbeResult, SiteConfig, Window};
use crate::prober::Prober;
use crate::response_store::ResponseStore;
use crate::scheduler::ProbeScheduler;
use crate::time_utils::now_secs;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

struct WindowState {
    last_update: f64,
    unread: bool,
    aggregate: Option<Aggregate>,
}

impl WindowState {
    fn new(start: f64) -> Self {
        Self {
            last_update: start,
            unread: false,
            aggregate: None,
        }
    }
}

struct SiteState {
    windows: [WindowState; 3],
    outage: OutageState,
}

fn window_slot(window: Window) -> usize {
    match window {
        Window::Ten => 0,
        Window::Sixty => 1,
        Window::OneTwenty => 2,
    }
}

impl SiteState {
    fn new(start: f64) -> Self {
        Self {
            windows: [WindowState::new(start), WindowState::new(start), WindowState::new(start)],
            outage: OutageState::Up,
        }
    }

    fn last_update(&self, window: Window) -> f64 {
        self.windows[window_slot(window)].last_update
    }
}

/// Owns one site's `ResponseStore`, `ProbeScheduler`, and aggregate/outage
/// state, and exposes the read-once snapshot interface.
pub struct SiteMonitor {
    pub name: String,
    /// The site's configured interval, formatted for the log file name.
    pub interval_tag: String,
    timeout: f64,
    store: Arc<ResponseStore>,
    state: Mutex<SiteState>,
}

impl SiteMonitor {
    /// Builds the monitor and its probe scheduler. Returns the monitor (to
    /// be shared via `Arc` with the caller) and the scheduler, which the
    /// caller spawns separately so its lifetime can be controlled independently.
    pub fn new(config: &SiteConfig) -> reqwest::Result<(Arc<Self>, ProbeScheduler, StopFlag)> {
        let now = now_secs();
        let store = Arc::new(ResponseStore::new(config.store_capacity()));
        let prober = Prober::new(config.url.clone(), config.timeout)?;
        let stop = StopFlag::new();
        let scheduler = ProbeScheduler::new(prober, Arc::clone(&store), config.interval, stop.clone());

        let monitor = Arc::new(Self {
            name: config.name.clone(),
            interval_tag: config.interval_tag(),
            timeout: config.timeout.as_secs_f64(),
            store,
            state: Mutex::new(SiteState::new(now)),
        });

        Ok((monitor, scheduler, stop))
    }

    /// Read-only access to this site's raw probe results, for collaborators
    /// like the raw log writer.
    #[must_use]
    pub fn store(&self) -> &ResponseStore {
        &self.store
    }

    /// Runs the three-deadline aggregation loop until `stop` is observed.
    pub async fn run(self: Arc<Self>, stop: StopFlag) {
        loop {
            if stop.is_stopped() {
                return;
            }

            let now = now_secs();
            for window in Window::ALL {
                let due = {
                    let state = self.state.lock().expect("site state mutex poisoned");
                    now - state.last_update(window) > window.delay()
                };
                if due {
                    self.recompute(window, now);
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Recomputes one window's aggregate, updating outage state in addition
    /// when `window` is the 120s window. A no-op if the query range is empty:
    /// neither the aggregate nor `last_update` advance in that case, matching
    /// the "wait for more data" behavior of the system this is modeled on.
    fn recompute(&self, window: Window, now: f64) {
        let last_update = {
            let state = self.state.lock().expect("site state mutex poisoned");
            state.last_update(window)
        };

        let delay = window.delay();
        let duration = window.duration();
        let lo = last_update + delay - duration - self.timeout;
        let hi = last_update + delay - self.timeout;
        let results = self.store.range(lo, hi);

        if results.is_empty() {
            return;
        }

        let aggregate = match window {
            Window::OneTwenty => self.availability_aggregate(&results, now),
            Window::Ten | Window::Sixty => counts_aggregate(&results, now),
        };

        let mut state = self.state.lock().expect("site state mutex poisoned");
        if window == Window::OneTwenty {
            let availability = match &aggregate {
                Aggregate::Availability { availability, .. } => *availability,
                Aggregate::Counts { .. } => unreachable!("120s window always yields Aggregate::Availability"),
            };
            state.outage = state.outage.transition(availability, now);
        }

        let slot = &mut state.windows[window_slot(window)];
        slot.last_update = now;
        slot.unread = true;
        slot.aggregate = Some(rebuild_with_outage(aggregate, window, &state.outage));
    }

    fn availability_aggregate(&self, results: &[ProbeResult], now: f64) -> Aggregate {
        let available = results.iter().filter(|r| r.is_available()).count();
        let availability = available as f64 / results.len() as f64;
        Aggregate::Availability {
            time: now,
            availability,
            unavailable_since: None,
            recovered_at: None,
        }
    }

    /// Returns every aggregate not yet delivered to a caller, ordered by its
    /// `time` ascending, and atomically clears the `unread` flag on each.
    /// A second call before the next update returns an empty list.
    pub fn read_metrics(&self) -> Vec<(Window, Aggregate)> {
        let mut state = self.state.lock().expect("site state mutex poisoned");
        let mut out = Vec::new();
        for window in Window::ALL {
            let slot = &mut state.windows[window_slot(window)];
            if slot.unread {
                if let Some(aggregate) = slot.aggregate.clone() {
                    out.push((window, aggregate));
                }
                slot.unread = false;
            }
        }
        out.sort_by(|a, b| a.1.time().partial_cmp(&b.1.time()).unwrap_or(std::cmp::Ordering::Equal));
        out
    }
}

/// The 120s recompute yields availability before outage state is known;
/// this fills in `unavailable_since`/`recovered_at` from the (already
/// updated) outage state once it is computed.
fn rebuild_with_outage(aggregate: Aggregate, window: Window, outage: &OutageState) -> Aggregate {
    match (window, aggregate) {
        (Window::OneTwenty, Aggregate::Availability { time, availability, .. }) => Aggregate::Availability {
            time,
            availability,
            unavailable_since: outage.unavailable_since(),
            recovered_at: outage.recovered_at(),
        },
        (_, aggregate) => aggregate,
    }
}

fn counts_aggregate(results: &[ProbeResult], now: f64) -> Aggregate {
    let mut codes_count: BTreeMap<u16, usize> = BTreeMap::new();
    let mut max_elapsed = f64::MIN;
    let mut sum_elapsed = 0.0;

    for r in results {
        *codes_count.entry(r.status).or_insert(0) += 1;
        max_elapsed = max_elapsed.max(r.elapsed);
        sum_elapsed += r.elapsed;
    }

    Aggregate::Counts {
        time: now,
        avg_elapsed: sum_elapsed / results.len() as f64,
        max_elapsed,
        codes_count,
    }
}
