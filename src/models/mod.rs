//! Core data types shared across the monitoring engine.

mod aggregate;
mod outage;
mod probe_result;
mod site_config;
mod window;

pub use aggregate::Aggregate;
pub use outage::OutageState;
pub use probe_result::ProbeResult;
pub use site_config::SiteConfig;
pub use window::Window;
