//! Supervises every `SiteMonitor`, the raw log writer, and the console UI.
//!
//! Grounded on `GlobalMonitor` in the system this crate is modeled on: a 1s
//! loop reads each site's metrics snapshot, hands the combined result to the
//! UI, and hands each returned `(Window, Aggregate)` pair to the formatted
//! log writer. The system this is modeled on calls `read_metrics` a second
//! time inside its own `log()` step; that second call always observes an
//! already-cleared read-once flag and returns nothing, so it is folded here
//! into the single call per site per tick.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use crate::error::{MonitorError, Result};
use crate::fatal::{FatalFlag, StopFlag};
use crate::models::SiteConfig;
use crate::raw_log_writer::RawLogWriter;
use crate::site_monitor::SiteMonitor;
use crate::ui::{self, Console};

const TICK: Duration = Duration::from_secs(1);

/// Owns the full set of workers for one run of the monitor.
pub struct GlobalMonitor {
    sites: Vec<Arc<SiteMonitor>>,
    site_stops: Vec<StopFlag>,
    logs_dir: PathBuf,
    fatal: FatalFlag,
    stop: StopFlag,
}

impl GlobalMonitor {
    /// Builds one `SiteMonitor` + `ProbeScheduler` per configured site and
    /// ensures the logs directory exists.
    pub fn new(configs: &[SiteConfig], logs_dir: PathBuf) -> Result<(Self, Vec<tokio::task::JoinHandle<()>>)> {
        std::fs::create_dir_all(&logs_dir)?;

        let fatal = FatalFlag::new();
        let stop = StopFlag::new();
        let mut sites = Vec::with_capacity(configs.len());
        let mut site_stops = Vec::with_capacity(configs.len());
        let mut handles = Vec::new();

        for config in configs {
            let (monitor, scheduler, scheduler_stop) = SiteMonitor::new(config)?;
            let monitor_stop = StopFlag::new();

            handles.push(tokio::spawn(scheduler.run()));
            handles.push(tokio::spawn(Arc::clone(&monitor).run(monitor_stop.clone())));

            sites.push(monitor);
            site_stops.push(scheduler_stop);
            site_stops.push(monitor_stop);
        }

        Ok((
            Self {
                sites,
                site_stops,
                logs_dir,
                fatal,
                stop,
            },
            handles,
        ))
    }

    #[must_use]
    pub fn fatal_flag(&self) -> FatalFlag {
        self.fatal.clone()
    }

    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Runs the supervising loop until a quit, a fatal worker error, or an
    /// external signal stops it, then cascades the stop to every child.
    pub async fn run(self) -> Result<()> {
        let writer = RawLogWriter::new(self.sites.clone(), self.logs_dir.clone(), self.fatal.clone());
        let writer_stop = StopFlag::new();
        let writer_handle = tokio::spawn(writer.run(writer_stop.clone()));

        let mut console = Console::new(self.sites.iter().map(|s| s.name.clone()));
        ui::spawn_quit_listener(self.stop.clone());

        let result = loop {
            if self.stop.is_stopped() {
                break Ok(());
            }
            if self.fatal.is_raised() {
                break Err(MonitorError::worker("a worker hit a fatal error"));
            }

            tokio::select! {
                _ = tokio::time::sleep(TICK) => {}
                signal = tokio::signal::ctrl_c() => {
                    if signal.is_ok() {
                        break Ok(());
                    }
                }
            }

            for site in &self.sites {
                let metrics = site.read_metrics();
                if metrics.is_empty() {
                    continue;
                }
                console.update(&site.name, &metrics);

                let path = self.logs_dir.join(format!("{}_{}.txt", site.name, site.interval_tag));
                let mut combined = String::new();
                for (window, aggregate) in &metrics {
                    combined.push_str(&crate::formatted_log::render(*window, aggregate));
                }
                if let Err(err) = append(&path, &combined).await {
                    tracing::error!(site = %site.name, %err, "failed to append formatted log");
                    self.fatal.raise();
                }
            }
        };

        writer_stop.stop();
        for stop in &self.site_stops {
            stop.stop();
        }
        let _ = writer_handle.await;

        result
    }
}

async fn append(path: &std::path::Path, contents: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(contents.as_bytes()).await
}
