//! An omnibus: a governance vote bundling several actions.

use alloc::{boxed::Box, format, string::String, vec::Vec};
use alloy_primitives::{Bytes, Log};
use omnibus_checks::{
    CheckReport, ConfigurationError, HookCheck, HookCtx, HookError, OmnibusAction,
    OmnibusCheckError, OmnibusEventChecker, StateProvider,
};
use omnibus_contracts::{Contracts, EvmCall, encode_calls_script};
use tracing::info;

/// The actions of one vote, bound to the contracts of the network it targets.
#[derive(Debug)]
pub struct Omnibus {
    contracts: Contracts,
    actions: Vec<Box<dyn OmnibusAction>>,
}

impl Omnibus {
    /// Creates an omnibus from resolved actions.
    pub const fn new(contracts: Contracts, actions: Vec<Box<dyn OmnibusAction>>) -> Self {
        Self { contracts, actions }
    }

    /// The contracts of the targeted network.
    pub const fn contracts(&self) -> &Contracts {
        &self.contracts
    }

    /// The actions, in execution order.
    pub fn actions(&self) -> &[Box<dyn OmnibusAction>] {
        &self.actions
    }

    /// The calls of every action, in execution order.
    pub fn calls(&self) -> Result<Vec<EvmCall>, ConfigurationError> {
        let mut calls = Vec::new();
        for action in &self.actions {
            calls.extend(action.evm_calls(&self.contracts)?);
        }
        Ok(calls)
    }

    /// The `CallsScript` encoded script the vote executes.
    pub fn vote_script(&self) -> Result<Bytes, ConfigurationError> {
        Ok(encode_calls_script(&self.calls()?)?)
    }

    /// The vote description: one numbered line per action title.
    pub fn description(&self) -> String {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| format!("{}. {}", i + 1, action.title()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Checks the logs of the executed vote against the declared events.
    pub fn check_events(&self, logs: &[Log]) -> Result<CheckReport, OmnibusCheckError> {
        OmnibusEventChecker::new(&self.contracts).check(&self.actions, logs)
    }

    /// Runs the pre-execution hook of every action, one after another.
    pub async fn before(
        &mut self,
        provider: &dyn StateProvider,
    ) -> Result<Vec<HookCheck>, HookError> {
        let Self { contracts, actions } = self;
        let mut ctx = HookCtx::new(contracts, provider);
        for action in actions.iter_mut() {
            action.before(&mut ctx).await?;
        }
        Ok(ctx.into_checks())
    }

    /// Runs the post-execution hook of every action, one after another.
    pub async fn after(&self, provider: &dyn StateProvider) -> Result<Vec<HookCheck>, HookError> {
        let mut ctx = HookCtx::new(&self.contracts, provider);
        for action in &self.actions {
            action.after(&mut ctx).await?;
        }
        let checks = ctx.into_checks();
        info!(
            target: "omnibus::hooks",
            total = checks.len(),
            failed = checks.iter().filter(|check| !check.passed).count(),
            "Ran post-execution hooks",
        );
        Ok(checks)
    }
}
