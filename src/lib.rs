//! Liveness-monitoring registry.
//!
//! Components register named heartbeat checks with a [`Supervisor`] and whack
//! them periodically. The supervisor scans every check on a fixed period and
//! stops with an [`AggregateFailure`] naming every check whose window elapsed.

pub mod config;
pub mod liveness;
pub mod registry;
pub mod shutdown;
pub mod supervisor;
#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub use liveness::{
    AggregateFailure, FileLivenessCheck, InvalidConfiguration, LivenessCheck, TimedLivenessCheck,
};
pub use registry::Registry;
pub use supervisor::Supervisor;
