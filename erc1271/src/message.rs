//! Message hashing and signature decoding.

use alloy_primitives::{B256, Bytes, eip191_hash_message, hex};

use crate::error::ValidationError;

/// Computes the EIP-191 "personal sign" digest of `message`:
/// `keccak256("\x19Ethereum Signed Message:\n" ++ len(message) ++ message)`.
///
/// ERC-1271 contracts are always handed this digest, never the raw message.
#[must_use]
pub fn personal_digest(message: &[u8]) -> B256 {
    eip191_hash_message(message)
}

/// Decodes a hex signature, with or without `0x` prefix.
///
/// The signature is an opaque blob: its length is not checked, and an empty
/// input yields empty bytes.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidSignatureHex`] on odd length or non-hex
/// characters.
pub fn decode_signature(signature: &str) -> Result<Bytes, ValidationError> {
    hex::decode(signature.trim())
        .map(Bytes::from)
        .map_err(ValidationError::InvalidSignatureHex)
}
