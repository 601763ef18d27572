//! The action capability and the hook context.

use crate::{ConfigurationError, ExpectedEvent, HookError};
use alloc::{string::String, vec::Vec};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use core::fmt::Debug;
use derive_more::Constructor;
use omnibus_contracts::{Contracts, EvmCall};
use tracing::{debug, warn};

/// Read access to chain state for action hooks.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait StateProvider: Debug + Send + Sync {
    /// Executes a read-only call of `input` against `to` and returns the raw output.
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, HookError>;
}

/// One auxiliary assertion recorded by a hook.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct HookCheck {
    /// What was asserted.
    pub title: String,
    /// Whether the assertion holds.
    pub passed: bool,
    /// Diagnostic detail, e.g. the observed and expected values.
    pub detail: String,
}

/// The context handed to action hooks.
#[derive(Debug)]
pub struct HookCtx<'a> {
    /// The contracts of the network the omnibus targets.
    pub contracts: &'a Contracts,
    /// Chain state access.
    pub provider: &'a dyn StateProvider,
    checks: Vec<HookCheck>,
}

impl<'a> HookCtx<'a> {
    /// Creates a context with no recorded checks.
    pub const fn new(contracts: &'a Contracts, provider: &'a dyn StateProvider) -> Self {
        Self { contracts, provider, checks: Vec::new() }
    }

    /// Records an assertion.
    pub fn it(&mut self, title: impl Into<String>, passed: bool, detail: impl Into<String>) {
        let check = HookCheck::new(title.into(), passed, detail.into());
        if check.passed {
            debug!(target: "omnibus::hooks", title = %check.title, "Hook check passed");
        } else {
            warn!(
                target: "omnibus::hooks",
                title = %check.title,
                detail = %check.detail,
                "Hook check failed",
            );
        }
        self.checks.push(check);
    }

    /// Records an equality assertion between an observed and an expected value.
    pub fn it_eq<T: PartialEq + Debug>(
        &mut self,
        title: impl Into<String>,
        actual: T,
        expected: T,
    ) {
        let detail = alloc::format!("actual: {actual:?}, expected: {expected:?}");
        self.it(title, actual == expected, detail);
    }

    /// The checks recorded so far.
    pub fn checks(&self) -> &[HookCheck] {
        &self.checks
    }

    /// Consumes the context, returning the recorded checks.
    pub fn into_checks(self) -> Vec<HookCheck> {
        self.checks
    }

    /// Executes a typed read-only call against `to` and decodes its return value.
    pub async fn static_call<C: SolCall + Send>(
        &self,
        to: Address,
        call: C,
    ) -> Result<C::Return, HookError> {
        let output = self.provider.call(to, call.abi_encode().into()).await?;
        Ok(C::abi_decode_returns(&output)?)
    }
}

/// A declared on-chain effect of an omnibus.
///
/// Every action produces the calls it needs and the events a correct execution emits. The
/// optional hooks run sequentially around the vote execution and record auxiliary assertions.
#[async_trait]
pub trait OmnibusAction: Debug + Send + Sync {
    /// Identifies the action kind.
    fn name(&self) -> &'static str;

    /// Human readable description of this action instance.
    fn title(&self) -> String;

    /// The calls executing the action, in order.
    fn evm_calls(&self, contracts: &Contracts) -> Result<Vec<EvmCall>, ConfigurationError>;

    /// The events a correct execution emits, in emission order.
    fn expected_events(&self, contracts: &Contracts)
    -> Result<Vec<ExpectedEvent>, ConfigurationError>;

    /// Runs before the vote is executed.
    async fn before(&mut self, _ctx: &mut HookCtx<'_>) -> Result<(), HookError> {
        Ok(())
    }

    /// Runs after the vote is executed.
    async fn after(&self, _ctx: &mut HookCtx<'_>) -> Result<(), HookError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{MockStateProvider, test_contracts};
    use alloy_primitives::U256;
    use alloy_sol_types::SolValue;
    use omnibus_contracts::IERC20;

    #[test]
    fn test_records_checks() {
        let contracts = test_contracts();
        let provider = MockStateProvider::default();
        let mut ctx = HookCtx::new(&contracts, &provider);

        ctx.it("holds", true, "");
        ctx.it_eq("balance", 1u64, 2u64);

        assert_eq!(ctx.checks().len(), 2);
        let checks = ctx.into_checks();
        assert!(checks[0].passed);
        assert!(!checks[1].passed);
        assert_eq!(checks[1].detail, "actual: 1, expected: 2");
    }

    #[tokio::test]
    async fn test_static_call_decodes_return() {
        let contracts = test_contracts();
        let holder = Address::repeat_byte(0x42);
        let mut provider = MockStateProvider::default();
        provider.insert(
            contracts.ldo.address(),
            IERC20::balanceOfCall { account: holder },
            U256::from(1_000).abi_encode(),
        );

        let ctx = HookCtx::new(&contracts, &provider);
        let balance = ctx
            .static_call(contracts.ldo.address(), IERC20::balanceOfCall { account: holder })
            .await
            .unwrap();
        assert_eq!(balance, U256::from(1_000));
    }

    #[tokio::test]
    async fn test_static_call_propagates_provider_errors() {
        let contracts = test_contracts();
        let provider = MockStateProvider::default();
        let ctx = HookCtx::new(&contracts, &provider);

        let err = ctx
            .static_call(contracts.ldo.address(), IERC20::balanceOfCall { account: Address::ZERO })
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::Provider(_)));
    }

    #[tokio::test]
    async fn test_static_call_rejects_malformed_output() {
        let contracts = test_contracts();
        let mut provider = MockStateProvider::default();
        provider.insert(
            contracts.ldo.address(),
            IERC20::balanceOfCall { account: Address::ZERO },
            vec![0x01u8, 0x02],
        );

        let ctx = HookCtx::new(&contracts, &provider);
        let err = ctx
            .static_call(contracts.ldo.address(), IERC20::balanceOfCall { account: Address::ZERO })
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::Decode(_)));
    }
}
