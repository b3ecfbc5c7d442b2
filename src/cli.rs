//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// Monitor a list of websites for uptime and latency.
#[derive(Debug, Parser)]
#[command(name = "site-monitor", version, about)]
pub struct Cli {
    /// Path to the site list file (one `name,url,interval,timeout` per line).
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Directory to write formatted and raw logs under. Created if absent.
    #[arg(short = 'l', long = "logs", default_value = "logfiles")]
    pub logs: PathBuf,
}
