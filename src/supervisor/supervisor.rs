// Package supervisor drives periodic aggregate checks over a registry.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::liveness::{AggregateFailure, LivenessCheck};
use crate::registry::Registry;

/// Watches a registry until terminated or until a check expires.
///
/// Clones share the registry and the stop signal, so one clone can run
/// [`Supervisor::watch`] on a background task while others add checks or call
/// [`Supervisor::terminate`].
#[derive(Clone, Default)]
pub struct Supervisor {
    registry: Arc<Registry>,
    stop_token: CancellationToken,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing registry.
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            stop_token: CancellationToken::new(),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn add<C>(&self, check: C)
    where
        C: LivenessCheck + 'static,
    {
        self.registry.add(check);
    }

    pub fn add_shared(&self, check: Arc<dyn LivenessCheck>) {
        self.registry.add_shared(check);
    }

    pub fn remove(&self, name: &str) {
        self.registry.remove(name);
    }

    pub fn whack(&self, name: &str) -> bool {
        self.registry.whack(name)
    }

    pub fn check_all(&self) -> Result<(), AggregateFailure> {
        self.registry.check_all()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Checks every `period` until terminated or until a check expires.
    ///
    /// Returns `Ok(())` once termination is observed, including when
    /// [`Supervisor::terminate`] ran before this call (no check is made then).
    /// The first failing pass is returned as is; nothing is retried.
    pub async fn watch(&self, period: Duration) -> Result<(), AggregateFailure> {
        info!(
            component = "supervisor",
            event = "watch_started",
            period = %humantime::format_duration(period),
            checks = self.registry.len(),
            "supervision started"
        );

        loop {
            if self.stop_token.is_cancelled() {
                break;
            }

            if let Err(err) = self.check_all_blocking().await {
                warn!(
                    component = "supervisor",
                    event = "check_failed",
                    expired = ?err.names(),
                    "{}",
                    err
                );
                return Err(err);
            }

            tokio::select! {
                biased;
                _ = self.stop_token.cancelled() => break,
                _ = tokio::time::sleep(period) => {}
            }
        }

        info!(
            component = "supervisor",
            event = "watch_terminated",
            "supervision terminated"
        );
        Ok(())
    }

    // Checks may touch the filesystem, so a pass runs on the blocking pool.
    async fn check_all_blocking(&self) -> Result<(), AggregateFailure> {
        let registry = Arc::clone(&self.registry);
        match tokio::task::spawn_blocking(move || registry.check_all()).await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            // Runtime is shutting down.
            Err(_) => Ok(()),
        }
    }

    /// Runs [`Supervisor::watch`] on a background task.
    pub fn spawn(&self, period: Duration) -> JoinHandle<Result<(), AggregateFailure>> {
        let supervisor = self.clone();
        tokio::task::spawn(async move { supervisor.watch(period).await })
    }

    /// Stops the watch loop at its next check or immediately if it is waiting.
    /// Safe to call any number of times and from any thread.
    pub fn terminate(&self) {
        if !self.stop_token.is_cancelled() {
            debug!(
                component = "supervisor",
                event = "terminate_requested",
                "supervision termination requested"
            );
        }
        self.stop_token.cancel();
    }

    pub fn is_terminated(&self) -> bool {
        self.stop_token.is_cancelled()
    }
}
