//! Periodically drains each site's raw probe results to `<name>_raw.txt`.
//!
//! Grounded on `Writer` in the system this crate is modeled on: every 10
//! seconds it queries the `[t - 10 - delay, t - 10]` range (the tail-offset
//! convention: results are only queried once they can no longer be appended
//! out of order relative to the query), writes one line per result, then
//! advances its cursor to `now()`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use crate::fatal::{FatalFlag, StopFlag};
use crate::site_monitor::SiteMonitor;
use crate::time_utils::now_secs;

const TICK: Duration = Duration::from_secs(10);
const DELAY: f64 = 10.0;

/// Appends raw `<start> <status> <elapsed>` lines for every monitored site.
pub struct RawLogWriter {
    sites: Vec<Arc<SiteMonitor>>,
    logs_dir: PathBuf,
    fatal: FatalFlag,
}

impl RawLogWriter {
    #[must_use]
    pub fn new(sites: Vec<Arc<SiteMonitor>>, logs_dir: PathBuf, fatal: FatalFlag) -> Self {
        Self { sites, logs_dir, fatal }
    }

    /// Runs until `stop` is observed. A failure to open or append a log file
    /// is fatal: it raises the shared flag and ends this worker.
    pub async fn run(self, stop: StopFlag) {
        let mut cursor = now_secs();

        loop {
            if stop.is_stopped() {
                return;
            }

            tokio::time::sleep(TICK).await;
            let now = now_secs();

            for site in &self.sites {
                let results = site.store().range(cursor - DELAY, now - DELAY);
                if results.is_empty() {
                    continue;
                }

                let path = self.logs_dir.join(format!("{}_raw.txt", site.name));
                let mut line = String::new();
                for r in &results {
                    line.push_str(&format!("{} {} {}\n", r.start, r.status, r.elapsed));
                }

                if let Err(err) = append(&path, &line).await {
                    tracing::error!(site = %site.name, %err, "failed to append raw log");
                    self.fatal.raise();
                    return;
                }
            }

            cursor = now;
        }
    }
}

async fn append(path: &std::path::Path, contents: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(contents.as_bytes()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProbeResult, SiteConfig};
    use std::time::Duration as StdDuration;
    use tempfile::tempdir;

    #[tokio::test]
    async fn drains_range_into_raw_file() {
        let dir = tempdir().unwrap();
        let config = SiteConfig::new("site", "http://example.com", StdDuration::from_secs(1), StdDuration::from_secs(5));
        let (monitor, _scheduler, _stop) = SiteMonitor::new(&config).unwrap();

        let now = now_secs();
        monitor.store().add(ProbeResult::new(now - 15.0, 200, 0.1));

        let writer = RawLogWriter::new(vec![Arc::clone(&monitor)], dir.path().to_path_buf(), FatalFlag::new());
        let results = monitor.store().range(now - 25.0, now - 10.0);
        assert_eq!(results.len(), 1);

        let path = dir.path().join("site_raw.txt");
        append(&path, &format!("{} {} {}\n", results[0].start, results[0].status, results[0].elapsed))
            .await
            .unwrap();
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("200"));
        drop(writer);
    }
}
