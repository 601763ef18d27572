//! Paying assets out of the treasury.

use alloc::{format, string::String, vec, vec::Vec};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use omnibus_checks::{
    ArgSpec, ConfigurationError, EventParams, ExpectedEvent, HookCtx, HookError, OmnibusAction,
    event,
};
use omnibus_contracts::{Contracts, EvmCall, IERC20, IFinance, NamedContract, call};
use tracing::debug;

/// Transfers `amount` of `token` from the agent to `to` with an immediate finance payment.
///
/// The hooks snapshot the recipient balance before the vote and check it grew by exactly
/// `amount` afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAssets {
    title: String,
    to: Address,
    token: NamedContract,
    amount: U256,
    balance_before: Option<U256>,
}

impl TransferAssets {
    /// Creates the action. The title doubles as the payment reference.
    pub fn new(title: impl Into<String>, to: Address, token: NamedContract, amount: U256) -> Self {
        Self { title: title.into(), to, token, amount, balance_before: None }
    }

    /// The recipient.
    pub const fn to(&self) -> Address {
        self.to
    }

    /// The transferred token.
    pub const fn token(&self) -> &NamedContract {
        &self.token
    }

    /// The transferred amount.
    pub const fn amount(&self) -> U256 {
        self.amount
    }

    async fn balance_of_recipient(&self, ctx: &HookCtx<'_>) -> Result<U256, HookError> {
        ctx.static_call(self.token.address(), IERC20::balanceOfCall { account: self.to }).await
    }
}

#[async_trait]
impl OmnibusAction for TransferAssets {
    fn name(&self) -> &'static str {
        "TransferAssets"
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn evm_calls(&self, contracts: &Contracts) -> Result<Vec<EvmCall>, ConfigurationError> {
        Ok(vec![call(
            &contracts.finance,
            IFinance::newImmediatePaymentCall {
                _token: self.token.address(),
                _receiver: self.to,
                _amount: self.amount,
                _reference: self.title.clone(),
            },
        )])
    }

    fn expected_events(
        &self,
        contracts: &Contracts,
    ) -> Result<Vec<ExpectedEvent>, ConfigurationError> {
        Ok(vec![
            event(
                &contracts.finance,
                "NewTransaction",
                EventParams::default().args([
                    ArgSpec::Wildcard,
                    false.into(),
                    self.to.into(),
                    self.amount.into(),
                    self.title.as_str().into(),
                ]),
            )?,
            event(
                &self.token,
                "Transfer",
                EventParams::default().args([
                    (&contracts.agent).into(),
                    self.to.into(),
                    self.amount.into(),
                ]),
            )?,
        ])
    }

    async fn before(&mut self, ctx: &mut HookCtx<'_>) -> Result<(), HookError> {
        let balance = self.balance_of_recipient(ctx).await?;
        debug!(
            target: "omnibus::actions",
            token = %self.token,
            to = %self.to,
            %balance,
            "Recorded recipient balance",
        );
        self.balance_before = Some(balance);
        Ok(())
    }

    async fn after(&self, ctx: &mut HookCtx<'_>) -> Result<(), HookError> {
        let balance_after = self.balance_of_recipient(ctx).await?;
        let expected = self.balance_before.unwrap_or_default().saturating_add(self.amount);
        ctx.it(
            format!("{} transferred to {}", self.token.name(), self.to),
            balance_after == expected,
            format!("balance after: {balance_after}, expected: {expected}"),
        );
        Ok(())
    }
}
