// Timer-based liveness check.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{InvalidConfiguration, LivenessCheck};

/// Largest accepted window. Keeps deadline offsets well inside u64 nanoseconds.
pub const MAX_WINDOW: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

struct Inner {
    name: String,
    duration: Duration,
    origin: Instant,
    // Nanoseconds since `origin`.
    deadline: AtomicU64,
}

/// Expires once `duration` has passed since the last reset.
///
/// Cloning is cheap and clones share a single deadline, so a component can keep
/// one handle to whack while the registry owns another. Reset and expiry only
/// touch an atomic, never the registry lock.
#[derive(Clone)]
pub struct TimedLivenessCheck {
    inner: Arc<Inner>,
}

impl TimedLivenessCheck {
    /// Creates an armed check.
    pub fn new(name: impl Into<String>, duration: Duration) -> Result<Self, InvalidConfiguration> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidConfiguration::new("liveness check name must not be empty"));
        }
        if duration > MAX_WINDOW {
            return Err(InvalidConfiguration::new(format!(
                "window of check {name:?} exceeds {}",
                humantime::format_duration(MAX_WINDOW)
            )));
        }

        let check = Self {
            inner: Arc::new(Inner {
                name,
                duration,
                origin: Instant::now(),
                deadline: AtomicU64::new(0),
            }),
        };
        check.reset();
        Ok(check)
    }

    /// Creates an armed check from a window in fractional seconds.
    /// Negative, NaN and infinite windows are rejected.
    pub fn from_secs_f64(name: impl Into<String>, secs: f64) -> Result<Self, InvalidConfiguration> {
        let name = name.into();
        let duration = Duration::try_from_secs_f64(secs).map_err(|err| {
            InvalidConfiguration::new(format!("window of check {name:?} is {secs}s: {err}"))
        })?;
        Self::new(name, duration)
    }

    pub fn duration(&self) -> Duration {
        self.inner.duration
    }

    /// Absolute instant after which the check reports expired.
    pub fn deadline(&self) -> Instant {
        self.inner.origin + Duration::from_nanos(self.inner.deadline.load(Ordering::Acquire))
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.deadline().saturating_duration_since(Instant::now())
    }

    fn now_nanos(&self) -> u64 {
        self.inner.origin.elapsed().as_nanos() as u64
    }
}

impl LivenessCheck for TimedLivenessCheck {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn reset(&self) {
        let deadline = self
            .now_nanos()
            .saturating_add(self.inner.duration.as_nanos() as u64);
        self.inner.deadline.store(deadline, Ordering::Release);
    }

    fn expired(&self) -> bool {
        self.now_nanos() > self.inner.deadline.load(Ordering::Acquire)
    }
}

impl fmt::Debug for TimedLivenessCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedLivenessCheck")
            .field("name", &self.inner.name)
            .field("duration", &self.inner.duration)
            .field("remaining", &self.remaining())
            .finish()
    }
}
