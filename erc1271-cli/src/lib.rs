//! Library side of the `erc1271validate` command.
//!
//! Split out of the binary so argument parsing and the validation run can be
//! tested without spawning a process.

pub mod app;
pub mod config;
pub mod report;
