//! Application configuration, layered over sane defaults.
//!
//! Grounded on `AppConfig` in the teacher: built with the `config` crate,
//! defaults first, then `SITE_MONITOR_*` environment overrides, validated
//! once after load.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Process-wide settings not specific to any one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory formatted and raw logs are written under.
    pub logs_dir: String,
    /// `tracing` env-filter directive for the process-lifecycle log.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logs_dir: "logfiles".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads defaults layered with `SITE_MONITOR_*` environment overrides.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("logs_dir", defaults.logs_dir.clone())?
            .set_default("log_level", defaults.log_level.clone())?
            .add_source(config::Environment::with_prefix("SITE_MONITOR"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_sane_logs_dir() {
        let config = AppConfig::default();
        assert_eq!(config.logs_dir, "logfiles");
    }
}
