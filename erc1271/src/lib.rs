#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! ERC-1271 signature validation for smart contract wallets.
//!
//! A plain key-pair account proves a signature by ECDSA recovery. A smart
//! contract wallet cannot: it exposes `isValidSignature(bytes32,bytes)` and
//! answers with a 4-byte magic value when it accepts the signature. This crate
//! asks the contract, over Ethereum JSON-RPC, and reduces the answer to a
//! boolean.
//!
//! # Outcomes
//!
//! - `Ok(true)` - the contract returned the expected magic value.
//! - `Ok(false)` - the address holds no code, the contract reverted, or it
//!   returned anything else.
//! - `Err(_)` - validity could not be determined (transport failure, timeout,
//!   malformed input).
//!
//! # Architecture
//!
//! - [`validator`] - [`Validator`], the end-to-end check
//! - [`caller`] - [`ContractCaller`], the `isValidSignature` ABI adapter
//! - [`provider`] - [`ContractReader`], the RPC capability consumed by both
//! - [`contract`] - Solidity interface definitions
//! - [`address`], [`message`], [`constants`] - supporting utilities
//!
//! # Feature Flags
//!
//! - `rpc` (default) - HTTP endpoint builder with throttling and fallback
//! - `telemetry` - `tracing` spans and events at each decision point
//!
//! # Example
//!
//! ```no_run
//! use alloy_provider::ProviderBuilder;
//! use erc1271::Validator;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().connect_http("https://cloudflare-eth.com".parse()?);
//! let validator = Validator::new(provider);
//! let valid = validator
//!     .validate(
//!         b"Hello go test!",
//!         "0x607377F587B1BDc68Bec3E19316D56bA8929d5eB",
//!         "0xbcf08f9c64a93a58935c31e308b6e384cb72458e54cdb507a18c9b58fa7f910c6fb272c563e9aeaedf1e84fc8ecc8f2e840599ce612c8ade449004c1f575f89f1c",
//!     )
//!     .await?;
//! assert!(valid);
//! # Ok(())
//! # }
//! ```
pub mod address;
pub mod caller;
pub mod constants;
pub mod contract;
pub mod error;
pub mod message;
pub mod provider;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use address::{AddressLike, is_zero_address};
pub use caller::{CallOptions, ContractCaller};
pub use constants::MAGIC_VALUE;
pub use error::{CallError, ValidationError};
pub use message::personal_digest;
pub use provider::{ContractCall, ContractReader};
pub use validator::{Validator, ValidatorConfig};
