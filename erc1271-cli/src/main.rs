//! `erc1271validate`: checks a smart contract wallet signature over JSON-RPC.
//!
//! # Usage
//!
//! ```bash
//! erc1271validate -m "Hello go test!" \
//!     -a 0x607377F587B1BDc68Bec3E19316D56bA8929d5eB \
//!     -s 0xbcf08f9c...1c
//!
//! # JSON output, custom endpoint, debug logs on stderr
//! erc1271validate --json -d -r https://eth.llamarpc.com -a ... -s ...
//! ```
//!
//! Prints `true` or `false` and exits 0 once validity is known. Exits 1 when
//! it could not be determined, 2 on invalid arguments.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use erc1271_cli::app::run;
use erc1271_cli::config::Args;

#[tokio::main]
#[allow(clippy::print_stdout)]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.debug);
    tracing::debug!(?args, "Parsed arguments");

    let report = match run(&args).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Validation failed: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        signer = %report.signer,
        target = %report.target,
        valid = report.valid,
        "Validation finished"
    );

    let output = if args.json {
        match serde_json::to_string(&report) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        report.to_string()
    };
    println!("{output}");
}

/// Logs to stderr so stdout carries only the result.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
