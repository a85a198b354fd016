//! Liveness checks: named heartbeats that expire when nobody whacks them.

pub mod error;
pub mod file;
pub mod service;
pub mod timed;


pub use error::{AggregateFailure, InvalidConfiguration};
pub use file::FileLivenessCheck;
pub use service::LivenessCheck;
pub use timed::TimedLivenessCheck;
