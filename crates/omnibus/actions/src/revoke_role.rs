//! Revoking an access control role.

use alloc::{format, string::String, vec, vec::Vec};
use alloy_primitives::{Address, B256, keccak256};
use async_trait::async_trait;
use omnibus_checks::{
    ArgSpec, ConfigurationError, EventParams, ExpectedEvent, HookCtx, HookError, OmnibusAction,
    event,
};
use omnibus_contracts::{Contracts, EvmCall, IAccessControl, NamedContract, call, forward};

/// Revokes `role` from `from` on an access controlled contract, forwarded through the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControlRevokeRole {
    on: NamedContract,
    from: Address,
    role: String,
}

impl AccessControlRevokeRole {
    /// Creates the action. `role` is the role name, e.g. `STAKING_CONTROL_ROLE`.
    pub fn new(on: NamedContract, from: Address, role: impl Into<String>) -> Self {
        Self { on, from, role: role.into() }
    }

    /// The role identifier, the keccak-256 hash of the role name.
    pub fn role_id(&self) -> B256 {
        keccak256(self.role.as_bytes())
    }
}

#[async_trait]
impl OmnibusAction for AccessControlRevokeRole {
    fn name(&self) -> &'static str {
        "AccessControlRevokeRole"
    }

    fn title(&self) -> String {
        format!("Revoke role \"{}\" from {} on {}", self.role, self.from, self.on)
    }

    fn evm_calls(&self, contracts: &Contracts) -> Result<Vec<EvmCall>, ConfigurationError> {
        let revoke = call(
            &self.on,
            IAccessControl::revokeRoleCall { role: self.role_id(), account: self.from },
        );
        Ok(vec![forward(&contracts.agent, &[revoke])?])
    }

    fn expected_events(
        &self,
        _contracts: &Contracts,
    ) -> Result<Vec<ExpectedEvent>, ConfigurationError> {
        Ok(vec![event(
            &self.on,
            "RoleRevoked",
            EventParams::default().args([
                self.role_id().into(),
                self.from.into(),
                ArgSpec::Wildcard,
            ]),
        )?])
    }

    async fn after(&self, ctx: &mut HookCtx<'_>) -> Result<(), HookError> {
        let has_role = ctx
            .static_call(
                self.on.address(),
                IAccessControl::hasRoleCall { role: self.role_id(), account: self.from },
            )
            .await?;
        ctx.it(
            format!(
                "Role \"{}\" was revoked from account {} on contract {}",
                self.role,
                self.from,
                self.on.address()
            ),
            !has_role,
            "Invalid state after role revoking",
        );
        Ok(())
    }
}
