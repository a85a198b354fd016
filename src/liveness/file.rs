// Heartbeat-file liveness check.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::warn;

use super::{InvalidConfiguration, LivenessCheck};

/// Expires when the heartbeat file has not been modified for longer than `window`.
///
/// The monitored process proves liveness by touching the file. A file that is
/// missing or unreadable counts as expired. A modification time in the future
/// (clock skew) counts as fresh.
#[derive(Debug, Clone)]
pub struct FileLivenessCheck {
    name: String,
    path: PathBuf,
    window: Duration,
}

impl FileLivenessCheck {
    /// Creates the check and touches the file once, creating it if needed.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        window: Duration,
    ) -> Result<Self, InvalidConfiguration> {
        let name = name.into();
        let path = path.into();
        if name.is_empty() {
            return Err(InvalidConfiguration::new("liveness check name must not be empty"));
        }
        if path.as_os_str().is_empty() {
            return Err(InvalidConfiguration::new(format!(
                "heartbeat path of check {name:?} must not be empty"
            )));
        }

        let check = Self { name, path, window };
        check.reset();
        Ok(check)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time since the file was last touched, `None` if it cannot be read.
    pub fn age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.path).and_then(|meta| meta.modified()).ok()?;
        Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        )
    }

    fn touch(&self) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.set_modified(SystemTime::now())
    }
}

impl LivenessCheck for FileLivenessCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&self) {
        if let Err(err) = self.touch() {
            warn!(
                component = "liveness",
                event = "touch_failed",
                check = %self.name,
                path = ?self.path,
                error = %err,
                "failed to touch heartbeat file"
            );
        }
    }

    fn expired(&self) -> bool {
        match self.age() {
            Some(age) => age > self.window,
            None => true,
        }
    }
}
