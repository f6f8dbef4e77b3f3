//! Test doubles for [`ContractReader`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_json_rpc::{ErrorPayload, RpcError};
use alloy_primitives::{Address, B256, Bytes, FixedBytes, bytes};
use alloy_rpc_types_eth::BlockId;
use alloy_sol_types::{SolCall, SolValue};
use alloy_transport::{TransportErrorKind, TransportResult};

use crate::constants::MAGIC_VALUE;
use crate::contract::IERC1271;
use crate::provider::{ContractCall, ContractReader};

/// Minimal runtime bytecode, enough to count as "a contract".
pub(crate) const CONTRACT_CODE: Bytes = bytes!("6080604052");

/// ABI-encodes a `bytes4` return value.
pub(crate) fn encode_magic(magic: FixedBytes<4>) -> Bytes {
    magic.abi_encode().into()
}

/// A JSON-RPC error response as a node reports it.
pub(crate) fn error_response(code: i64, message: &str) -> alloy_transport::TransportError {
    RpcError::ErrorResp(ErrorPayload {
        code,
        message: message.to_owned().into(),
        data: None,
    })
}

#[derive(Debug, Clone)]
enum CallOutcome {
    Return(Bytes),
    /// Returns the magic value for one digest and reverts for any other.
    AcceptDigest(B256),
    ErrorResponse { code: i64, message: String },
    Transport(String),
}

#[derive(Debug)]
struct State {
    code: HashMap<Address, Bytes>,
    outcome: CallOutcome,
    unreachable: bool,
    delay: Option<Duration>,
    code_queries: Vec<(Address, BlockId)>,
    calls: Vec<(ContractCall, BlockId)>,
}

/// In-memory chain: a code table plus one scripted `eth_call` outcome.
///
/// Clones share state, so a test can keep a handle after moving one into a
/// validator.
#[derive(Debug, Clone)]
pub(crate) struct FakeReader {
    state: Arc<Mutex<State>>,
}

impl Default for FakeReader {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                code: HashMap::new(),
                outcome: CallOutcome::Return(encode_magic(MAGIC_VALUE)),
                unreachable: false,
                delay: None,
                code_queries: Vec::new(),
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeReader {
    fn update(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub(crate) fn with_contract(self, address: Address) -> Self {
        self.update(|s| {
            s.code.insert(address, CONTRACT_CODE);
        })
    }

    pub(crate) fn returning(self, output: Bytes) -> Self {
        self.update(|s| s.outcome = CallOutcome::Return(output))
    }

    pub(crate) fn returning_magic(self, magic: FixedBytes<4>) -> Self {
        self.returning(encode_magic(magic))
    }

    pub(crate) fn accepting_digest(self, digest: B256) -> Self {
        self.update(|s| s.outcome = CallOutcome::AcceptDigest(digest))
    }

    pub(crate) fn reverting(self) -> Self {
        self.failing_with_response(3, "execution reverted")
    }

    pub(crate) fn failing_with_response(self, code: i64, message: &str) -> Self {
        let message = message.to_owned();
        self.update(|s| s.outcome = CallOutcome::ErrorResponse { code, message })
    }

    pub(crate) fn failing_call_transport(self) -> Self {
        self.update(|s| s.outcome = CallOutcome::Transport("connection reset".to_owned()))
    }

    /// Every request fails at the transport level.
    pub(crate) fn unreachable(self) -> Self {
        self.update(|s| s.unreachable = true)
    }

    pub(crate) fn delayed(self, delay: Duration) -> Self {
        self.update(|s| s.delay = Some(delay))
    }

    pub(crate) fn code_queries(&self) -> Vec<(Address, BlockId)> {
        self.state.lock().unwrap().code_queries.clone()
    }

    pub(crate) fn calls(&self) -> Vec<(ContractCall, BlockId)> {
        self.state.lock().unwrap().calls.clone()
    }

    async fn pause(&self) {
        let delay = self.state.lock().unwrap().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait::async_trait]
impl ContractReader for FakeReader {
    async fn code_at(&self, address: Address, block: BlockId) -> TransportResult<Bytes> {
        self.pause().await;
        let mut state = self.state.lock().unwrap();
        state.code_queries.push((address, block));
        if state.unreachable {
            return Err(TransportErrorKind::custom_str("connection refused"));
        }
        Ok(state.code.get(&address).cloned().unwrap_or_default())
    }

    async fn call_contract(&self, call: ContractCall, block: BlockId) -> TransportResult<Bytes> {
        self.pause().await;
        let mut state = self.state.lock().unwrap();
        state.calls.push((call.clone(), block));
        if state.unreachable {
            return Err(TransportErrorKind::custom_str("connection refused"));
        }
        match &state.outcome {
            CallOutcome::Return(output) => Ok(output.clone()),
            CallOutcome::AcceptDigest(digest) => {
                let decoded = IERC1271::isValidSignatureCall::abi_decode(&call.input)
                    .map_err(|e| TransportErrorKind::custom_str(&e.to_string()))?;
                if decoded.hash == *digest {
                    Ok(encode_magic(MAGIC_VALUE))
                } else {
                    Err(error_response(3, "execution reverted: invalid signature"))
                }
            }
            CallOutcome::ErrorResponse { code, message } => Err(error_response(*code, message)),
            CallOutcome::Transport(message) => Err(TransportErrorKind::custom_str(message)),
        }
    }
}
