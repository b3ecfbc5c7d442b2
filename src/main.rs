use clap::Parser;
use console::style;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use site_monitor::cli::Cli;
use site_monitor::error::Result;
use site_monitor::global_monitor::GlobalMonitor;
use site_monitor::{input_parser, AppConfig, VERSION};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("{}: failed to load config, using defaults: {e}", style("Warning").yellow());
        AppConfig::default()
    });

    let logs_dir = cli.logs.clone();

    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("{}: could not create logs directory {}: {e}", style("Error").red().bold(), logs_dir.display());
        std::process::exit(1);
    }

    let _guard = init_logging(&config, &logs_dir);

    if let Err(e) = run(cli, logs_dir).await {
        eprintln!("{}: {e}", style("Error").red().bold());
        tracing::error!(%e, "fatal error, shutting down");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, logs_dir: std::path::PathBuf) -> Result<()> {
    info!("starting site-monitor v{VERSION}");

    let sites = input_parser::parse_sites(&cli.file)?;
    info!(count = sites.len(), "loaded site list");

    let (monitor, _handles) = GlobalMonitor::new(&sites, logs_dir)?;
    monitor.run().await
}

/// Sets up structured logging to stderr plus a process-lifecycle log file
/// named with the launch timestamp. The returned guard must be held for the
/// lifetime of the process, or the file writer's background thread is torn
/// down before it flushes.
fn init_logging(config: &AppConfig, logs_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    let launch_stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_appender = tracing_appender::rolling::never(logs_dir, format!("run_{launch_stamp}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    guard
}
