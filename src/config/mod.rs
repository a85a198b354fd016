// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::liveness::FileLivenessCheck;
use crate::supervisor::Supervisor;

pub const PROD: &str = "prod";
#[allow(dead_code)]
pub const DEV: &str = "dev";
#[allow(dead_code)]
pub const DEBUG: &str = "debug";
#[allow(dead_code)]
pub const TEST: &str = "test";

const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Watchdog {
    #[serde(rename = "watchdog")]
    pub watchdog: WatchdogBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchdogBox {
    pub env: String,
    pub logs: Option<Logs>,
    /// Supervision period.
    #[serde(with = "humantime_serde")]
    pub period: Duration,
    #[serde(rename = "shutdown_timeout", default, with = "humantime_serde")]
    pub shutdown_timeout: Option<Duration>,
    #[serde(default)]
    pub checks: Vec<Check>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

/// A heartbeat file the monitored process keeps touching.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Check {
    pub name: String,
    pub path: PathBuf,
    #[serde(with = "humantime_serde")]
    pub window: Duration,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    #[allow(dead_code)]
    fn is_debug(&self) -> bool;
    #[allow(dead_code)]
    fn is_dev(&self) -> bool;
    #[allow(dead_code)]
    fn is_test(&self) -> bool;
    fn period(&self) -> Duration;
    fn shutdown_timeout(&self) -> Duration;
    fn checks(&self) -> &[Check];
}

// Config type alias for convenience
pub type Config = Watchdog;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.watchdog.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.watchdog.env == PROD
    }

    fn is_debug(&self) -> bool {
        self.watchdog.env == DEBUG
    }

    fn is_dev(&self) -> bool {
        self.watchdog.env == DEV
    }

    fn is_test(&self) -> bool {
        self.watchdog.env == TEST
    }

    fn period(&self) -> Duration {
        self.watchdog.period
    }

    fn shutdown_timeout(&self) -> Duration {
        self.watchdog
            .shutdown_timeout
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    fn checks(&self) -> &[Check] {
        &self.watchdog.checks
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("load config from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Watchdog = serde_yaml::from_str(data).context("unmarshal yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.watchdog.period.is_zero() {
            anyhow::bail!("watchdog.period must be greater than zero");
        }

        let mut seen = HashSet::new();
        for check in &self.watchdog.checks {
            if check.name.is_empty() {
                anyhow::bail!("watchdog.checks: name must not be empty");
            }
            if check.path.as_os_str().is_empty() {
                anyhow::bail!("watchdog.checks[{}]: path must not be empty", check.name);
            }
            if !seen.insert(check.name.as_str()) {
                warn!(
                    component = "config",
                    event = "duplicate_check",
                    check = %check.name,
                    "check configured more than once, the last one wins"
                );
            }
        }

        Ok(())
    }

    /// Builds a supervisor with one heartbeat-file check per configured entry.
    pub fn build_supervisor(&self) -> Result<Supervisor> {
        let supervisor = Supervisor::new();
        for check in self.checks() {
            let liveness = FileLivenessCheck::new(&check.name, &check.path, check.window)
                .with_context(|| format!("build check {:?}", check.name))?;
            supervisor.add(liveness);
        }
        Ok(supervisor)
    }
}

#[cfg(test)]
mod test_config;
#[cfg(test)]
mod config_test;
#[cfg(test)]
pub use test_config::new_test_config;
