//! Command modules for the PolicyRoller CLI.
//!
//! This module contains all the command implementations for the CLI
//! application. Each submodule handles a specific command:
//!
//! - `apply_cmd`: Applies the policy baseline to the selected projects
//! - `defaults_cmd`: Prints the default policy as a TOML document

pub mod apply_cmd;
pub mod defaults_cmd;
