//! Error types for ERC-1271 validation.
//!
//! A rejected signature is not an error: [`Validator`](crate::Validator)
//! reports it as `Ok(false)`. The types here describe the cases where validity
//! could not be determined at all.

use std::time::Duration;

use alloy_primitives::hex::FromHexError;
use alloy_transport::TransportError;

/// Failure to determine whether a signature is valid.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The signer or validator address is not a 20-byte hex value.
    #[error("invalid address {input:?}: {source}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Underlying hex decoding failure.
        #[source]
        source: FromHexError,
    },
    /// The signature is not valid hex.
    #[error("invalid signature hex: {0}")]
    InvalidSignatureHex(#[source] FromHexError),
    /// RPC transport error, or a node rejection unrelated to contract execution.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// An RPC round-trip did not complete within the configured limit.
    #[error("RPC request timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors from a single `isValidSignature` call.
///
/// Returned verbatim by [`ContractCaller`](crate::ContractCaller); deciding
/// which of these mean "rejected" is left to the validator.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The `eth_call` failed, either in transport or by EVM revert.
    #[error(transparent)]
    Rpc(#[from] TransportError),
    /// The call succeeded but its return data is not an ABI-encoded `bytes4`.
    #[error("failed to decode isValidSignature return data: {0}")]
    Decode(#[from] alloy_sol_types::Error),
}
