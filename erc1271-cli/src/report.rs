//! Validation result as printed by the CLI.

use std::fmt;

use alloy_primitives::{Address, FixedBytes};
use serde::Serialize;

/// Outcome of one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Claimed signer.
    pub signer: Address,
    /// Contract that was asked; differs from `signer` with `--validator`.
    pub target: Address,
    /// Whether the signature was accepted.
    pub valid: bool,
    /// Return value that was required for acceptance.
    pub magic_value: FixedBytes<4>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.valid)
    }
}
