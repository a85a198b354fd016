//! Periodic supervision of a liveness registry.

pub mod supervisor;


pub use supervisor::Supervisor;
