//! Named liveness checks behind a single lock.

pub mod registry;


pub use registry::Registry;
