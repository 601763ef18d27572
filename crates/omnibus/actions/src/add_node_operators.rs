//! Adding node operators to the curated staking module.

use alloc::{format, string::String, vec, vec::Vec};
use alloy_primitives::Address;
use async_trait::async_trait;
use omnibus_checks::{
    ArgSpec, ConfigurationError, EventParams, ExpectedEvent, OmnibusAction, event,
};
use omnibus_contracts::{Contracts, EvmCall, INodeOperatorsRegistry, call, forward};
use serde::{Deserialize, Serialize};

/// A node operator to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNodeOperator {
    /// The operator name.
    pub name: String,
    /// The address receiving the operator's rewards.
    pub reward_address: Address,
}

/// Registers node operators in the curated staking module, forwarded through the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNodeOperators {
    operators: Vec<NewNodeOperator>,
}

impl AddNodeOperators {
    /// Creates the action for the given operators.
    pub const fn new(operators: Vec<NewNodeOperator>) -> Self {
        Self { operators }
    }

    /// The operators to register.
    pub fn operators(&self) -> &[NewNodeOperator] {
        &self.operators
    }
}

#[async_trait]
impl OmnibusAction for AddNodeOperators {
    fn name(&self) -> &'static str {
        "AddNodeOperators"
    }

    fn title(&self) -> String {
        let mut title = format!("Add {} node operators:", self.operators.len());
        for operator in &self.operators {
            title.push_str("\n - ");
            title.push_str(&operator.name);
        }
        title
    }

    fn evm_calls(&self, contracts: &Contracts) -> Result<Vec<EvmCall>, ConfigurationError> {
        let calls: Vec<_> = self
            .operators
            .iter()
            .map(|operator| {
                call(
                    &contracts.curated_staking_module,
                    INodeOperatorsRegistry::addNodeOperatorCall {
                        _name: operator.name.clone(),
                        _rewardAddress: operator.reward_address,
                    },
                )
            })
            .collect();
        Ok(vec![forward(&contracts.agent, &calls)?])
    }

    fn expected_events(
        &self,
        contracts: &Contracts,
    ) -> Result<Vec<ExpectedEvent>, ConfigurationError> {
        let mut events = Vec::with_capacity(2 * self.operators.len() + 2);
        events.push(event(
            &contracts.calls_script,
            "LogScriptCall",
            EventParams::default().emitter(&contracts.voting),
        )?);

        for operator in &self.operators {
            events.push(event(
                &contracts.calls_script,
                "LogScriptCall",
                EventParams::default().emitter(&contracts.agent),
            )?);
            events.push(event(
                &contracts.curated_staking_module,
                "NodeOperatorAdded",
                EventParams::default().args([
                    ArgSpec::Wildcard,
                    operator.name.as_str().into(),
                    operator.reward_address.into(),
                    0u64.into(),
                ]),
            )?);
        }

        events.push(event(&contracts.agent, "ScriptResult", EventParams::default())?);
        Ok(events)
    }
}
