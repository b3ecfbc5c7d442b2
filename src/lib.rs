//! A concurrent website uptime and latency monitor.
//!
//! Probes a list of sites on independent schedules, keeps a bounded
//! time-ordered history of each site's responses, rolls that history up into
//! 10s/60s/120s windows, and tracks outage/recovery transitions from the
//! 120s window's availability.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use site_monitor::{global_monitor::GlobalMonitor, input_parser};
//!
//! # #[tokio::main]
//! # async fn main() -> site_monitor::error::Result<()> {
//! let sites = input_parser::parse_sites(&PathBuf::from("sites.csv"))?;
//! let (monitor, _handles) = GlobalMonitor::new(&sites, PathBuf::from("logfiles"))?;
//! monitor.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fatal;
pub mod formatted_log;
pub mod global_monitor;
pub mod input_parser;
pub mod models;
pub mod prober;
pub mod raw_log_writer;
pub mod response_store;
pub mod scheduler;
pub mod site_monitor;
pub mod time_utils;
pub mod ui;

pub use config::AppConfig;
pub use error::{MonitorError, Result};
pub use global_monitor::GlobalMonitor;

/// Crate version, as declared in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
