//! EVM calls and the Aragon `CallsScript` encoding.
//!
//! A calls script is the spec ID `0x00000001` followed by one entry per call: the 20 byte
//! target, the calldata length as a 4 byte big-endian integer, then the calldata.

use crate::{IAgent, NamedContract, ScriptError};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use derive_more::Constructor;

/// The spec ID prefixing every `CallsScript` encoded script.
pub const CALLS_SCRIPT_SPEC_ID: u32 = 1;

/// A single contract call.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct EvmCall {
    /// The called contract.
    pub to: Address,
    /// The ABI encoded calldata.
    pub data: Bytes,
}

/// Encodes `call` as a call to `contract`.
pub fn call<C: SolCall>(contract: &NamedContract, call: C) -> EvmCall {
    EvmCall::new(contract.address(), call.abi_encode().into())
}

/// Wraps `calls` into a single `forward` call on the agent, so they run with the agent as sender.
pub fn forward(agent: &NamedContract, calls: &[EvmCall]) -> Result<EvmCall, ScriptError> {
    Ok(call(agent, IAgent::forwardCall { _evmScript: encode_calls_script(calls)? }))
}

/// Encodes `calls` as a `CallsScript` EVM script.
///
/// Fails if the calldata of a call does not fit the 4 byte length field.
pub fn encode_calls_script(calls: &[EvmCall]) -> Result<Bytes, ScriptError> {
    let len = 4 + calls.iter().map(|call| 24 + call.data.len()).sum::<usize>();
    let mut script = Vec::with_capacity(len);
    script.extend_from_slice(&CALLS_SCRIPT_SPEC_ID.to_be_bytes());
    for call in calls {
        script.extend_from_slice(call.to.as_slice());
        script.extend_from_slice(&calldata_len(call.data.len())?.to_be_bytes());
        script.extend_from_slice(&call.data);
    }
    Ok(script.into())
}

fn calldata_len(len: usize) -> Result<u32, ScriptError> {
    u32::try_from(len).map_err(|_| ScriptError::CalldataTooLong(len))
}

/// Decodes a `CallsScript` EVM script back into its calls.
pub fn decode_calls_script(script: &[u8]) -> Result<Vec<EvmCall>, ScriptError> {
    let Some((spec_id, mut rest)) = script.split_first_chunk::<4>() else {
        return Err(ScriptError::MissingSpecId);
    };
    let spec_id = u32::from_be_bytes(*spec_id);
    if spec_id != CALLS_SCRIPT_SPEC_ID {
        return Err(ScriptError::UnsupportedSpecId(spec_id));
    }

    let mut calls = Vec::new();
    while !rest.is_empty() {
        let offset = script.len() - rest.len();
        let (to, tail) = rest.split_first_chunk::<20>().ok_or(ScriptError::Truncated(offset))?;
        let (len, tail) = tail.split_first_chunk::<4>().ok_or(ScriptError::Truncated(offset))?;
        let len = u32::from_be_bytes(*len) as usize;
        if tail.len() < len {
            return Err(ScriptError::Truncated(offset));
        }
        let (data, tail) = tail.split_at(len);
        calls.push(EvmCall::new(Address::from(*to), Bytes::copy_from_slice(data)));
        rest = tail;
    }
    Ok(calls)
}
