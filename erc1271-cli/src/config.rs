//! Command-line arguments.
//!
//! Values not given as flags fall back to environment variables, which may
//! come from a `.env` file in the working directory.
//!
//! # Environment Variables
//!
//! - `ERC1271_RPC_URL` - RPC endpoint(s), comma-separated (default: `https://cloudflare-eth.com`)
//! - `ERC1271_RATE_LIMIT` - Requests per second per endpoint
//! - `ERC1271_VALIDATOR` - Validator contract to call instead of the signer
//! - `ERC1271_TIMEOUT` - Per-request timeout in seconds
//! - `RUST_LOG` - Log level filter (default: `info`)

use std::time::Duration;

use alloy_primitives::{Address, B256, FixedBytes};
use alloy_rpc_types_eth::{BlockId, BlockNumberOrTag};
use clap::Parser;
use erc1271::MAGIC_VALUE;
use url::Url;

/// Default public mainnet endpoint.
pub const DEFAULT_RPC_URL: &str = "https://cloudflare-eth.com";

/// Validates an ERC-1271 (smart contract wallet) signature.
///
/// Prints `true` if the contract accepts the signature, `false` otherwise.
#[derive(Debug, Clone, Parser)]
#[command(name = "erc1271validate", version, about)]
pub struct Args {
    /// RPC endpoint URL. Repeat or comma-separate for fallback endpoints.
    #[arg(
        short,
        long = "rpc",
        env = "ERC1271_RPC_URL",
        value_delimiter = ',',
        default_value = DEFAULT_RPC_URL
    )]
    pub rpc: Vec<Url>,

    /// Maximum requests per second sent to each endpoint.
    #[arg(long, env = "ERC1271_RATE_LIMIT")]
    pub rate_limit: Option<u32>,

    /// Message that was signed.
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Address of the signer (the smart contract wallet).
    #[arg(short, long)]
    pub address: String,

    /// Hex-encoded signature.
    #[arg(short, long, visible_alias = "sig")]
    pub signature: String,

    /// Contract to ask instead of the signer.
    #[arg(short, long, env = "ERC1271_VALIDATOR")]
    pub validator: Option<Address>,

    /// Return value that counts as a valid signature.
    #[arg(long, visible_alias = "vs", default_value_t = MAGIC_VALUE)]
    pub valid_signature: FixedBytes<4>,

    /// Block to validate at: a tag, a number or a block hash.
    #[arg(short, long, value_parser = parse_block, default_value = "latest")]
    pub block: BlockId,

    /// Per-request timeout in seconds.
    #[arg(short, long, env = "ERC1271_TIMEOUT", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Print a JSON report instead of `true`/`false`.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// RPC endpoints paired with the configured rate limit.
    #[must_use]
    pub fn endpoints(&self) -> Vec<(Url, Option<u32>)> {
        self.rpc
            .iter()
            .map(|url| (url.clone(), self.rate_limit))
            .collect()
    }
}

/// Parses `latest`/`earliest`/`pending`/`safe`/`finalized`, a decimal or
/// `0x` block number, or a 32-byte block hash.
///
/// # Errors
///
/// Returns a message describing the rejected input.
pub fn parse_block(input: &str) -> Result<BlockId, String> {
    let input = input.trim();
    let tag = match input.to_ascii_lowercase().as_str() {
        "latest" => Some(BlockNumberOrTag::Latest),
        "earliest" => Some(BlockNumberOrTag::Earliest),
        "pending" => Some(BlockNumberOrTag::Pending),
        "safe" => Some(BlockNumberOrTag::Safe),
        "finalized" => Some(BlockNumberOrTag::Finalized),
        _ => None,
    };
    if let Some(tag) = tag {
        return Ok(BlockId::Number(tag));
    }
    if let Some(digits) = input.strip_prefix("0x") {
        if digits.len() == 64 {
            return input
                .parse::<B256>()
                .map(BlockId::from)
                .map_err(|e| format!("invalid block hash {input:?}: {e}"));
        }
        return u64::from_str_radix(digits, 16)
            .map(BlockId::number)
            .map_err(|e| format!("invalid block number {input:?}: {e}"));
    }
    input
        .parse::<u64>()
        .map(BlockId::number)
        .map_err(|_| format!("invalid block {input:?}: expected a tag, number or hash"))
}

/// Parses a positive number of seconds, fractions allowed.
///
/// # Errors
///
/// Returns a message describing the rejected input.
pub fn parse_timeout(input: &str) -> Result<Duration, String> {
    let seconds: f64 = input
        .trim()
        .parse()
        .map_err(|e| format!("invalid timeout {input:?}: {e}"))?;
    if seconds <= 0.0 {
        return Err(format!("timeout must be positive, got {input:?}"));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("invalid timeout {input:?}: {e}"))
}
