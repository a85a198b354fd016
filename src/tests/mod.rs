//! Scenario tests for the watchdog.
//!
//! These exercise the supervisor end to end: components whacking their
//! checks, silent components, termination and concurrent registry changes.


pub mod support;
