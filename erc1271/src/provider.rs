//! The RPC capability consumed by [`ContractCaller`](crate::ContractCaller)
//! and [`Validator`](crate::Validator).
//!
//! [`ContractReader`] is the whole surface the core needs from a node: read
//! bytecode, and make a read-only call. Every alloy [`Provider`] implements
//! it; tests substitute a fake.
//!
//! With the `rpc` feature, [`connect`] builds a provider over one or more HTTP
//! endpoints, each throttled independently and combined behind a fallback
//! layer.

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockId, TransactionRequest};
use alloy_transport::TransportResult;

/// A read-only contract call (the `eth_call` request object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Account the call is made from, if any.
    pub from: Option<Address>,
    /// Contract being called.
    pub to: Address,
    /// ABI-encoded calldata.
    pub input: Bytes,
}

impl From<ContractCall> for TransactionRequest {
    fn from(call: ContractCall) -> Self {
        let request = Self::default().with_to(call.to).with_input(call.input);
        match call.from {
            Some(from) => request.with_from(from),
            None => request,
        }
    }
}

/// Read access to chain state needed for contract signature validation.
///
/// Implementations must be safe to share between concurrent validations.
#[cfg_attr(target_family = "wasm", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_family = "wasm"), async_trait::async_trait)]
pub trait ContractReader: Send + Sync {
    /// Returns the deployed bytecode at `address` as of `block`. Empty means
    /// no contract.
    async fn code_at(&self, address: Address, block: BlockId) -> TransportResult<Bytes>;

    /// Executes `call` against `block` without creating a transaction and
    /// returns the raw output.
    ///
    /// An EVM revert surfaces as a JSON-RPC error response.
    async fn call_contract(&self, call: ContractCall, block: BlockId) -> TransportResult<Bytes>;
}

#[cfg_attr(target_family = "wasm", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_family = "wasm"), async_trait::async_trait)]
impl<P: Provider> ContractReader for P {
    async fn code_at(&self, address: Address, block: BlockId) -> TransportResult<Bytes> {
        self.get_code_at(address).block_id(block).await
    }

    async fn call_contract(&self, call: ContractCall, block: BlockId) -> TransportResult<Bytes> {
        self.call(call.into()).block(block).await
    }
}

#[cfg(feature = "rpc")]
pub use endpoints::{ConnectError, connect, rpc_client};

#[cfg(feature = "rpc")]
mod endpoints {
    use std::num::NonZeroUsize;

    use alloy_provider::RootProvider;
    use alloy_rpc_client::RpcClient;
    use alloy_transport::layers::{FallbackLayer, ThrottleLayer};
    use alloy_transport_http::Http;
    use tower::ServiceBuilder;
    use url::Url;

    /// Errors building an RPC client.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
    pub enum ConnectError {
        /// None of the configured endpoints is an HTTP(S) URL.
        #[error("no HTTP(S) RPC endpoint configured")]
        NoHttpEndpoints,
    }

    /// Creates an RPC client from HTTP endpoint URLs with optional
    /// per-endpoint rate limits (requests per second).
    ///
    /// Non-HTTP(S) URLs are skipped. Requests go to the best-ranked healthy
    /// endpoint, falling back to the others on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::NoHttpEndpoints`] if no usable endpoint remains.
    pub fn rpc_client(endpoints: &[(Url, Option<u32>)]) -> Result<RpcClient, ConnectError> {
        let transports = endpoints
            .iter()
            .filter_map(|(url, rate_limit)| {
                let scheme = url.scheme();
                let is_http = scheme == "http" || scheme == "https";
                if !is_http {
                    #[cfg(feature = "telemetry")]
                    tracing::warn!(rpc_url = %url, "Skipping non-HTTP RPC endpoint");
                    return None;
                }
                #[cfg(feature = "telemetry")]
                tracing::debug!(rpc_url = %url, rate_limit = ?rate_limit, "Using HTTP transport");
                let limit = rate_limit.unwrap_or(u32::MAX);
                let service = ServiceBuilder::new()
                    .layer(ThrottleLayer::new(limit))
                    .service(Http::new(url.clone()));
                Some(service)
            })
            .collect::<Vec<_>>();
        let active = NonZeroUsize::new(transports.len()).ok_or(ConnectError::NoHttpEndpoints)?;
        let fallback = ServiceBuilder::new()
            .layer(FallbackLayer::default().with_active_transport_count(active))
            .service(transports);
        Ok(RpcClient::new(fallback, false))
    }

    /// Creates a read-only provider over the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::NoHttpEndpoints`] if no usable endpoint remains.
    pub fn connect(endpoints: &[(Url, Option<u32>)]) -> Result<RootProvider, ConnectError> {
        rpc_client(endpoints).map(RootProvider::new)
    }
}
