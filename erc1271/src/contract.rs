//! Solidity interface definitions for on-chain interactions.
//!
//! - [`IERC1271`] - the standard contract-signature validation interface

use alloy_sol_types::sol;

sol! {
    /// ERC-1271 standard signature validation method for contracts.
    ///
    /// Reference: <https://eips.ethereum.org/EIPS/eip-1271>
    #[allow(missing_docs)]
    #[derive(Debug)]
    interface IERC1271 {
        function isValidSignature(bytes32 hash, bytes signature) external view returns (bytes4 magicValue);
    }
}
