//! Protocol constants.

use alloy_primitives::FixedBytes;
use alloy_sol_types::SolCall;

use crate::contract::IERC1271;

/// The value a conforming contract returns from `isValidSignature` to accept
/// a signature: `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`, i.e.
/// `0x1626ba7e`.
pub const MAGIC_VALUE: FixedBytes<4> = FixedBytes(IERC1271::isValidSignatureCall::SELECTOR);
