use super::{Check, Config, WatchdogBox};
use std::path::Path;
use std::time::Duration;

/// Creates a new test configuration with heartbeat files under `root`.
pub fn new_test_config(root: &Path, checks: &[(&str, Duration)]) -> Config {
    Config {
        watchdog: WatchdogBox {
            env: super::TEST.to_string(),
            logs: Some(super::Logs {
                level: Some("debug".to_string()),
            }),
            period: Duration::from_millis(5),
            shutdown_timeout: Some(Duration::from_secs(1)),
            checks: checks
                .iter()
                .map(|(name, window)| Check {
                    name: name.to_string(),
                    path: root.join(format!("{name}.heartbeat")),
                    window: *window,
                })
                .collect(),
        },
    }
}
