//! Deterministic, pure logic for the evidence checks.
//!
//! Core modules must be free of I/O side effects. They operate on records that
//! were already loaded by `io` and return plain values suitable for tests.

pub mod duration;
pub mod thresholds;
pub mod timestamp;
pub mod types;
pub mod vte;
