// Shared test support code for scenario tests.

pub mod common;

pub use common::*;
