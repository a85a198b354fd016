// Error definitions for liveness checks and supervision.

use std::fmt;

/// Returned when a liveness check cannot be built from the given parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid liveness check configuration: {reason}")]
pub struct InvalidConfiguration {
    pub reason: String,
}

impl InvalidConfiguration {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One or more checks expired during an aggregate pass.
///
/// Names are sorted so the rendered message is stable between calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct AggregateFailure {
    names: Vec<String>,
}

impl AggregateFailure {
    pub(crate) fn new(mut names: Vec<String>) -> Self {
        debug_assert!(!names.is_empty(), "aggregate failure without expired checks");
        names.sort_unstable();
        Self { names }
    }

    /// Names of every expired check, ascending.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "watchdog timed out on the following services: {}",
            self.names.join(", ")
        )
    }
}
