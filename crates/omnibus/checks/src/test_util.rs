//! Test utilities for `omnibus-checks`.

#![allow(missing_docs, unreachable_pub, unused)]

use crate::{ConfigurationError, ExpectedEvent, HookError, OmnibusAction, StateProvider};
use alloc::{boxed::Box, string::String, vec::Vec};
use alloy_primitives::{Address, Bytes, Log};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use omnibus_contracts::{Contracts, EvmCall, NetworkConfig};
use std::collections::HashMap;

/// Builds the log `event` emitted by `emitter`.
pub fn log_of(emitter: Address, event: &impl SolEvent) -> Log {
    Log { address: emitter, data: event.encode_log_data() }
}

/// A network with a distinct, recognizable address per contract.
pub fn test_contracts() -> Contracts {
    let config = NetworkConfig {
        chain_id: 1,
        voting: Address::repeat_byte(0x10),
        agent: Address::repeat_byte(0x20),
        calls_script: Address::repeat_byte(0x30),
        finance: Address::repeat_byte(0x40),
        curated_staking_module: Address::repeat_byte(0x50),
        ldo: Address::repeat_byte(0x60),
        contracts: Default::default(),
    };
    Contracts::from_config("testnet", &config)
}

/// An action with a fixed list of expected events.
#[derive(Debug, Clone)]
pub struct MockAction {
    pub title: String,
    pub calls: Vec<EvmCall>,
    pub events: Vec<ExpectedEvent>,
}

impl MockAction {
    pub fn new(title: impl Into<String>, events: Vec<ExpectedEvent>) -> Self {
        Self { title: title.into(), calls: Vec::new(), events }
    }
}

#[async_trait]
impl OmnibusAction for MockAction {
    fn name(&self) -> &'static str {
        "MockAction"
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn evm_calls(&self, _contracts: &Contracts) -> Result<Vec<EvmCall>, ConfigurationError> {
        Ok(self.calls.clone())
    }

    fn expected_events(
        &self,
        _contracts: &Contracts,
    ) -> Result<Vec<ExpectedEvent>, ConfigurationError> {
        Ok(self.events.clone())
    }
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
#[error("No state for call to {0}")]
pub struct MissingStateError(pub Address);

/// Serves canned outputs keyed by target and calldata.
#[derive(Debug, Clone, Default)]
pub struct MockStateProvider {
    pub outputs: HashMap<(Address, Bytes), Bytes>,
}

impl MockStateProvider {
    pub fn insert(&mut self, to: Address, call: impl SolCall, output: impl Into<Bytes>) {
        self.outputs.insert((to, call.abi_encode().into()), output.into());
    }
}

#[async_trait]
impl StateProvider for MockStateProvider {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, HookError> {
        self.outputs
            .get(&(to, input))
            .cloned()
            .ok_or_else(|| HookError::Provider(Box::new(MissingStateError(to))))
    }
}
