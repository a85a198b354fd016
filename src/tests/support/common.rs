// Common test utilities for scenario tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::liveness::{LivenessCheck, TimedLivenessCheck};

/// Builds an armed timed check, panicking on invalid input.
pub fn timed(name: &str, window: Duration) -> TimedLivenessCheck {
    TimedLivenessCheck::new(name, window).unwrap()
}

/// Whacks `check` every `every` until `stop` is cancelled.
pub fn spawn_heartbeat(
    check: TimedLivenessCheck,
    every: Duration,
    stop: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            tokio::select! {
                _ = stop.cancelled() => break,
                _ = ticker.tick() => check.reset(),
            }
        }
    })
}

/// Check that fails on demand and counts how often it was asked.
pub struct Flaky {
    name: String,
    expired: AtomicBool,
    probes: AtomicUsize,
}

impl Flaky {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            expired: AtomicBool::new(false),
            probes: AtomicUsize::new(0),
        })
    }

    pub fn fail(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl LivenessCheck for Flaky {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&self) {
        self.expired.store(false, Ordering::SeqCst);
    }

    fn expired(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.expired.load(Ordering::SeqCst)
    }
}
