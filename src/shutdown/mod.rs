// Package shutdown stops supervision on OS signal or cancellation.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::liveness::AggregateFailure;
use crate::supervisor::Supervisor;

#[derive(Debug, thiserror::Error)]
#[error("graceful shutdown timeout exceeded")]
pub struct TimeoutError;

/// Graceful shutdown handler for a running supervisor.
#[derive(Clone)]
pub struct GracefulShutdown {
    shutdown_token: CancellationToken,
    supervisor: Supervisor,
    timeout: Duration,
}

impl GracefulShutdown {
    pub fn new(shutdown_token: CancellationToken, supervisor: Supervisor) -> Self {
        Self {
            shutdown_token,
            supervisor,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the graceful shutdown timeout.
    pub fn set_graceful_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Waits until the watch task ends on its own or a stop is requested.
    ///
    /// An aggregate failure from the watch task is returned as the error.
    /// Otherwise the supervisor is terminated and the task is awaited for at
    /// most the graceful timeout.
    pub async fn await_shutdown(
        &self,
        mut watch: JoinHandle<Result<(), AggregateFailure>>,
    ) -> Result<()> {
        tokio::select! {
            joined = &mut watch => {
                return Self::finish(joined);
            }
            _ = signal::ctrl_c() => {
                info!(
                    component = "graceful-shutdown",
                    event = "os_signal",
                    signal = "SIGINT",
                    "cancellation started"
                );
            }
            _ = self.shutdown_token.cancelled() => {
                info!(
                    component = "graceful-shutdown",
                    event = "ctx_done",
                    "cancellation started"
                );
            }
        }

        self.terminate_and_await_with_timeout(watch).await
    }

    async fn terminate_and_await_with_timeout(
        &self,
        watch: JoinHandle<Result<(), AggregateFailure>>,
    ) -> Result<()> {
        self.shutdown_token.cancel();
        self.supervisor.terminate();

        match timeout(self.timeout, watch).await {
            Ok(joined) => {
                Self::finish(joined)?;
                info!(
                    component = "graceful-shutdown",
                    event = "shutdown_success",
                    "watchdog was gracefully shut down"
                );
                Ok(())
            }
            Err(_) => {
                warn!(
                    component = "graceful-shutdown",
                    event = "shutdown_timeout",
                    timeout_ms = self.timeout.as_millis() as u64,
                    "supervision did not stop within timeout"
                );
                Err(TimeoutError.into())
            }
        }
    }

    fn finish(
        joined: Result<Result<(), AggregateFailure>, tokio::task::JoinError>,
    ) -> Result<()> {
        joined.context("supervision task failed")??;
        Ok(())
    }
}
