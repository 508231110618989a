//! PolicyRoller CLI library exports for integration testing.
//!
//! This module exposes command implementations for use in integration tests.

pub mod commands;
pub mod errors;
pub mod report;
