//! End-to-end ERC-1271 signature validation.
//!
//! [`Validator::validate`] resolves which contract to ask, checks that it
//! holds code, calls `isValidSignature` with the personal-sign digest of the
//! message, and compares the answer with the expected magic value.
//!
//! Only failures to reach a verdict are errors. An address without code, a
//! reverting contract, undecodable return data and a wrong magic value all
//! produce `Ok(false)`.

use std::future::Future;
use std::time::Duration;

use alloy_json_rpc::RpcError;
use alloy_primitives::{Address, B256, Bytes, FixedBytes};
use alloy_rpc_types_eth::BlockId;
use alloy_transport::TransportError;
#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::address::{is_zero_address, parse_address};
use crate::caller::{CallOptions, ContractCaller};
use crate::constants::MAGIC_VALUE;
use crate::error::{CallError, ValidationError};
use crate::message::{decode_signature, personal_digest};
use crate::provider::ContractReader;

/// JSON-RPC error code geth and most clients use for `execution reverted`.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Node error messages that report a failed EVM execution rather than a
/// rejected request.
const EXECUTION_FAILURE_MARKERS: &[&str] = &[
    "revert",
    "invalid opcode",
    "out of gas",
    "stack underflow",
    "stack overflow",
    "invalid jump",
    "write protection",
];

/// Validator settings. Fixed once the [`Validator`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Contract to ask instead of the signer itself, e.g. when the signer is
    /// fronted by a proxy. `None` or the zero address means "the signer".
    pub validator_address: Option<Address>,
    /// Return value that counts as acceptance.
    pub magic_value: FixedBytes<4>,
    /// Block both RPC queries run against.
    pub block: BlockId,
    /// Upper bound for each RPC round-trip.
    pub timeout: Option<Duration>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            validator_address: None,
            magic_value: MAGIC_VALUE,
            block: BlockId::latest(),
            timeout: None,
        }
    }
}

/// Checks signatures against ERC-1271 contracts through a [`ContractReader`].
///
/// Holds no mutable state: one instance may serve concurrent validations as
/// long as the reader can. The `with_*` methods consume the validator and
/// return a reconfigured one.
///
/// # Example
///
/// ```ignore
/// let validator = Validator::new(provider)
///     .with_validator_address(proxy)
///     .with_timeout(Duration::from_secs(10));
/// let valid = validator.validate(b"hello", signer, signature).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Validator<R> {
    reader: R,
    config: ValidatorConfig,
}

impl<R: ContractReader> Validator<R> {
    /// Creates a validator with the standard magic value and no address
    /// override.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ValidatorConfig::default())
    }

    /// Creates a validator with explicit settings.
    pub const fn with_config(reader: R, config: ValidatorConfig) -> Self {
        Self { reader, config }
    }

    /// Calls `address` instead of the signer. The zero address restores the
    /// default.
    #[must_use]
    pub fn with_validator_address(mut self, address: Address) -> Self {
        self.config.validator_address = Some(address);
        self
    }

    /// Accepts `magic` instead of `0x1626ba7e`, for contracts that predate or
    /// deviate from the standard. Only the final comparison changes.
    #[must_use]
    pub fn with_custom_magic_value(mut self, magic: FixedBytes<4>) -> Self {
        self.config.magic_value = magic;
        self
    }

    /// Runs both RPC queries against `block` instead of `latest`.
    #[must_use]
    pub fn with_block(mut self, block: BlockId) -> Self {
        self.config.block = block;
        self
    }

    /// Fails with [`ValidationError::Timeout`] when an RPC round-trip takes
    /// longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// The active settings.
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The underlying RPC capability.
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// The contract that will be asked about `signer`'s signatures.
    #[must_use]
    pub fn target_for(&self, signer: Address) -> Address {
        self.config
            .validator_address
            .filter(|address| !is_zero_address(address))
            .unwrap_or(signer)
    }

    /// Returns whether `address` holds contract code at the configured block.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Transport`] or [`ValidationError::Timeout`] if the
    /// code could not be fetched.
    pub async fn is_contract(&self, address: Address) -> Result<bool, ValidationError> {
        let code = self
            .bounded(self.reader.code_at(address, self.config.block))
            .await??;
        Ok(!code.is_empty())
    }

    /// Validates a hex `signature` by `signer` (hex address) over `message`.
    ///
    /// The signature is decoded only once the target is known to be a
    /// contract.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidAddress`] if `signer` is not an address
    /// - [`ValidationError::InvalidSignatureHex`] if `signature` is not hex
    /// - [`ValidationError::Transport`] / [`ValidationError::Timeout`] if the
    ///   node could not be queried
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(signer = %signer)))]
    pub async fn validate(
        &self,
        message: &[u8],
        signer: &str,
        signature: &str,
    ) -> Result<bool, ValidationError> {
        let signer = parse_address(signer)?;
        let Some(target) = self.contract_target(signer).await? else {
            return Ok(false);
        };
        let hash = personal_digest(message);
        let signature = decode_signature(signature)?;
        self.check(target, signer, hash, signature).await
    }

    /// Validates raw `signature` bytes by `signer` over `message`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Transport`] or [`ValidationError::Timeout`] if the
    /// node could not be queried.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(signer = %signer)))]
    pub async fn validate_signature(
        &self,
        message: &[u8],
        signer: Address,
        signature: &[u8],
    ) -> Result<bool, ValidationError> {
        let Some(target) = self.contract_target(signer).await? else {
            return Ok(false);
        };
        let hash = personal_digest(message);
        self.check(target, signer, hash, Bytes::copy_from_slice(signature))
            .await
    }

    /// Validates `signature` over a caller-computed 32-byte digest, skipping
    /// personal-sign hashing.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Transport`] or [`ValidationError::Timeout`] if the
    /// node could not be queried.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(signer = %signer, hash = %hash)))]
    pub async fn validate_hash(
        &self,
        hash: B256,
        signer: Address,
        signature: &[u8],
    ) -> Result<bool, ValidationError> {
        let Some(target) = self.contract_target(signer).await? else {
            return Ok(false);
        };
        self.check(target, signer, hash, Bytes::copy_from_slice(signature))
            .await
    }

    /// Resolves the target for `signer`; `None` when it holds no code.
    async fn contract_target(&self, signer: Address) -> Result<Option<Address>, ValidationError> {
        let target = self.target_for(signer);
        #[cfg(feature = "telemetry")]
        tracing::debug!(%signer, %target, overridden = target != signer, "Resolved validator address");

        let is_contract = match self.is_contract(target).await {
            Ok(is_contract) => is_contract,
            Err(err) => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(address = %target, error = %err, "Failed to check if address is a contract");
                return Err(err);
            }
        };
        if !is_contract {
            #[cfg(feature = "telemetry")]
            tracing::debug!(address = %target, "Address is not a contract");
            return Ok(None);
        }
        Ok(Some(target))
    }

    async fn check(
        &self,
        target: Address,
        signer: Address,
        hash: B256,
        signature: Bytes,
    ) -> Result<bool, ValidationError> {
        let caller = ContractCaller::new(target, &self.reader);
        let options = CallOptions {
            from: Some(signer),
            block: self.config.block,
        };
        let magic = match self
            .bounded(caller.is_valid_signature(&options, hash, signature))
            .await?
        {
            Ok(magic) => magic,
            Err(err) => return interpret_call_failure(err),
        };

        let valid = magic == self.config.magic_value;
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            returned = %magic,
            expected = %self.config.magic_value,
            valid,
            "Compared isValidSignature result"
        );
        Ok(valid)
    }

    /// Applies the configured timeout to one RPC round-trip.
    async fn bounded<F: Future>(&self, fut: F) -> Result<F::Output, ValidationError> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| ValidationError::Timeout(limit)),
            None => Ok(fut.await),
        }
    }
}

/// Splits a failed `isValidSignature` call into a verdict or an error.
///
/// A contract that reverts or answers with garbage has rejected the
/// signature. Anything else means the node was never able to run the call.
fn interpret_call_failure(err: CallError) -> Result<bool, ValidationError> {
    match err {
        CallError::Decode(err) => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(error = %err, "Contract returned malformed data, treating signature as invalid");
            let _ = err;
            Ok(false)
        }
        CallError::Rpc(err) if is_execution_failure(&err) => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(error = %err, "Contract rejected signature");
            Ok(false)
        }
        CallError::Rpc(err) => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(error = %err, "isValidSignature call failed");
            Err(err.into())
        }
    }
}

/// Whether `err` is the node reporting a failed EVM execution.
fn is_execution_failure(err: &TransportError) -> bool {
    let RpcError::ErrorResp(payload) = err else {
        return false;
    };
    if payload.code == EXECUTION_REVERTED_CODE || payload.as_revert_data().is_some() {
        return true;
    }
    let message = payload.message.to_ascii_lowercase();
    EXECUTION_FAILURE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}
