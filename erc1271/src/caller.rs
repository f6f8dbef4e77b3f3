//! ABI adapter for `isValidSignature(bytes32,bytes) returns (bytes4)`.

use std::fmt;

use alloy_primitives::{Address, B256, Bytes, FixedBytes};
use alloy_rpc_types_eth::BlockId;
use alloy_sol_types::SolCall;

use crate::contract::IERC1271;
use crate::error::CallError;
use crate::provider::{ContractCall, ContractReader};

/// Per-call options for a read-only contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Account the call is made from. ERC-1271 wallets may inspect
    /// `msg.sender`, so the validator sets this to the signer.
    pub from: Option<Address>,
    /// Block the call executes against.
    pub block: BlockId,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            from: None,
            block: BlockId::latest(),
        }
    }
}

impl CallOptions {
    /// Options for a call from `from` against the latest block.
    #[must_use]
    pub fn from_account(from: Address) -> Self {
        Self {
            from: Some(from),
            ..Self::default()
        }
    }
}

/// Calls `isValidSignature` on a single contract.
///
/// The adapter only encodes, dispatches and decodes. Whether a failed call
/// means "signature rejected" or "could not check" is for the caller to
/// decide; every failure is returned as-is.
pub struct ContractCaller<'a, R: ?Sized> {
    address: Address,
    reader: &'a R,
}

impl<R: ?Sized> fmt::Debug for ContractCaller<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractCaller")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl<'a, R: ContractReader + ?Sized> ContractCaller<'a, R> {
    /// Binds the ERC-1271 interface to `address`.
    ///
    /// The ABI is fixed at compile time, so binding cannot fail.
    pub const fn new(address: Address, reader: &'a R) -> Self {
        Self { address, reader }
    }

    /// The contract this caller targets.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// ABI-encodes `isValidSignature(hash, signature)`.
    #[must_use]
    pub fn calldata(hash: B256, signature: Bytes) -> Bytes {
        IERC1271::isValidSignatureCall { hash, signature }
            .abi_encode()
            .into()
    }

    /// Performs `isValidSignature(hash, signature)` as a read-only call and
    /// returns the raw 4-byte answer.
    ///
    /// # Errors
    ///
    /// - [`CallError::Rpc`] if the call fails, including EVM reverts
    /// - [`CallError::Decode`] if the output is not an ABI-encoded `bytes4`
    pub async fn is_valid_signature(
        &self,
        options: &CallOptions,
        hash: B256,
        signature: Bytes,
    ) -> Result<FixedBytes<4>, CallError> {
        let call = ContractCall {
            from: options.from,
            to: self.address,
            input: Self::calldata(hash, signature),
        };
        let output = self.reader.call_contract(call, options.block).await?;
        let magic: FixedBytes<4> = IERC1271::isValidSignatureCall::abi_decode_returns(&output)?;
        Ok(magic)
    }
}
