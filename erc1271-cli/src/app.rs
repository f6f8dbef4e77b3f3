//! One validation run, from parsed arguments to a [`Report`].

use erc1271::address::parse_address;
use erc1271::provider::{ConnectError, connect};
use erc1271::{ValidationError, Validator, ValidatorConfig};

use crate::config::Args;
use crate::report::Report;

/// Failure of a CLI run. Reported on stderr with exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// No usable RPC endpoint.
    #[error(transparent)]
    Connect(#[from] ConnectError),
    /// Validity could not be determined.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Builds a validator from `args` and validates the given signature.
///
/// # Errors
///
/// Returns [`CliError`] if no endpoint is usable, an input is malformed, or
/// the node could not be queried. A rejected signature is a report with
/// `valid: false`, not an error.
pub async fn run(args: &Args) -> Result<Report, CliError> {
    let signer = parse_address(&args.address)?;
    let provider = connect(&args.endpoints())?;
    let config = ValidatorConfig {
        validator_address: args.validator,
        magic_value: args.valid_signature,
        block: args.block,
        timeout: args.timeout,
    };
    let validator = Validator::with_config(provider, config);
    let target = validator.target_for(signer);
    tracing::debug!(%signer, %target, block = ?args.block, "Validating signature");

    let valid = validator
        .validate(args.message.as_bytes(), &args.address, &args.signature)
        .await?;

    Ok(Report {
        signer,
        target,
        valid,
        magic_value: args.valid_signature,
    })
}
