//! Fires one probe per configured interval, independent of probe latency.
//!
//! Grounded on `RequestScheduler` in the system this crate is modeled on: on
//! each wake, if `now() - t > interval`, a probe is dispatched and `t` is
//! reset to the dispatch instant, so the next threshold is `t + interval`
//! again rather than accumulating drift from a fixed start. A probe that
//! takes longer than `interval` to notice does not cause a burst of catch-up
//! dispatches afterward, but it also does not fire more than once per
//! `interval`. Kept exactly as specified; this is not a bug.

use std::sync::Arc;
use std::time::Duration;

use crate::fatal::StopFlag;
use crate::prober::Prober;
use crate::response_store::ResponseStore;
use crate::time_utils::now_secs;

/// Drives one site's `Prober` on a fixed interval.
pub struct ProbeScheduler {
    prober: Prober,
    store: Arc<ResponseStore>,
    interval: Duration,
    stop: StopFlag,
}

impl ProbeScheduler {
    #[must_use]
    pub fn new(prober: Prober, store: Arc<ResponseStore>, interval: Duration, stop: StopFlag) -> Self {
        Self {
            prober,
            store,
            interval,
            stop,
        }
    }

    /// Runs until `stop` is observed. Dispatched probes are fire-and-forget
    /// `tokio::spawn` tasks: they are allowed to complete after this loop
    /// returns, so an in-flight probe at shutdown is never interrupted.
    pub async fn run(self) {
        let wake = (self.interval.as_secs_f64() / 1000.0).max(0.001);
        let wake = Duration::from_secs_f64(wake);
        let interval = self.interval.as_secs_f64();
        let mut next_fire = now_secs() + interval;

        loop {
            if self.stop.is_stopped() {
                return;
            }

            let now = now_secs();
            if now >= next_fire {
                let prober = self.prober.clone();
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    prober.probe_once(&store).await;
                });
                next_fire = now_secs() + interval;
            }

            tokio::time::sleep(wake).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fires_roughly_once_per_interval() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let prober = Prober::new(server.uri(), Duration::from_secs(5)).unwrap();
        let store = Arc::new(ResponseStore::new(100));
        let stop = StopFlag::new();
        let scheduler = ProbeScheduler::new(prober, Arc::clone(&store), Duration::from_millis(50), stop.clone());

        let handle = tokio::spawn(scheduler.run());
        tokio::time::sleep(Duration::from_millis(260)).await;
        stop.stop();
        let _ = handle.await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let count = store.len();
        assert!((3..=8).contains(&count), "expected a handful of fires, got {count}");
    }

    #[tokio::test]
    async fn stop_flag_halts_new_dispatches() {
        let prober = Prober::new("http://127.0.0.1:1", Duration::from_millis(50)).unwrap();
        let store = Arc::new(ResponseStore::new(100));
        let stop = StopFlag::new();
        stop.stop();
        let scheduler = ProbeScheduler::new(prober, Arc::clone(&store), Duration::from_millis(10), stop);

        scheduler.run().await;
        assert_eq!(store.len(), 0);
    }
}
