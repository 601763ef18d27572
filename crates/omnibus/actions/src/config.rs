//! TOML description of an omnibus.

use crate::{
    AccessControlRevokeRole, AddNodeOperators, NewNodeOperator, Omnibus, OmnibusConfigError,
    TransferAssets,
};
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
use alloy_primitives::{Address, U256};
use omnibus_checks::{ConfigurationError, OmnibusAction};
use omnibus_contracts::{ContractKind, Contracts, NamedContract, RegistryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// An account given either literally or by its registry name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountRef {
    /// A literal address.
    Address(Address),
    /// The symbolic name of a registered contract.
    Contract(String),
}

impl AccountRef {
    /// Resolves the reference to a contract handle bound to `kind`.
    pub fn resolve(
        &self,
        contracts: &Contracts,
        kind: ContractKind,
    ) -> Result<NamedContract, ConfigurationError> {
        match self {
            Self::Address(address) => {
                let name = contracts
                    .name_of(*address)
                    .map_or_else(|| address.to_string(), ToString::to_string);
                Ok(NamedContract::new(name, *address, kind))
            }
            Self::Contract(name) => {
                let contract = contracts.resolve(name)?;
                Ok(NamedContract::new(contract.name(), contract.address(), kind))
            }
        }
    }

    /// Resolves the reference to an address.
    pub fn address(&self, contracts: &Contracts) -> Result<Address, ConfigurationError> {
        match self {
            Self::Address(address) => Ok(*address),
            Self::Contract(name) => Ok(contracts.resolve(name)?.address()),
        }
    }
}

/// One action of an omnibus file, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ActionConfig {
    /// See [`AddNodeOperators`].
    AddNodeOperators {
        /// The operators to register.
        operators: Vec<NewNodeOperator>,
    },
    /// See [`TransferAssets`].
    TransferAssets {
        /// The payment reference.
        title: String,
        /// The recipient.
        to: AccountRef,
        /// The registry name of the token.
        token: String,
        /// The amount in base units, as a decimal or `0x` prefixed string.
        amount: U256,
    },
    /// See [`AccessControlRevokeRole`].
    AccessControlRevokeRole {
        /// The access controlled contract.
        on: AccountRef,
        /// The account losing the role.
        from: AccountRef,
        /// The role name.
        role: String,
    },
}

impl ActionConfig {
    /// Builds the action, resolving symbolic names against `contracts`.
    pub fn build(
        &self,
        contracts: &Contracts,
    ) -> Result<Box<dyn OmnibusAction>, ConfigurationError> {
        let action: Box<dyn OmnibusAction> = match self {
            Self::AddNodeOperators { operators } => {
                Box::new(AddNodeOperators::new(operators.clone()))
            }
            Self::TransferAssets { title, to, token, amount } => Box::new(TransferAssets::new(
                title.clone(),
                to.address(contracts)?,
                contracts.resolve(token)?.clone(),
                *amount,
            )),
            Self::AccessControlRevokeRole { on, from, role } => {
                Box::new(AccessControlRevokeRole::new(
                    on.resolve(contracts, ContractKind::AccessControl)?,
                    from.address(contracts)?,
                    role.clone(),
                ))
            }
        };
        Ok(action)
    }
}

/// An omnibus file.
///
/// ```toml
/// network = "mainnet"
///
/// [[actions]]
/// type = "access-control-revoke-role"
/// on = "staking_router"
/// from = "0x8B3f33234ABD88493c0Cd28De33D583B70beDe35"
/// role = "MANAGE_WITHDRAWAL_CREDENTIALS_ROLE"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmnibusConfig {
    /// The registry network the omnibus targets.
    pub network: String,
    /// The actions, in execution order.
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

impl OmnibusConfig {
    /// Parses an omnibus from TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self, OmnibusConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses an omnibus TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OmnibusConfigError> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        debug!(
            target: "omnibus::config",
            path = %path.display(),
            network = %config.network,
            actions = config.actions.len(),
            "Loaded omnibus",
        );
        Ok(config)
    }

    /// Resolves the omnibus against the network it targets.
    pub fn build(&self, registry: &RegistryConfig) -> Result<Omnibus, OmnibusConfigError> {
        let contracts = registry.contracts(&self.network).map_err(ConfigurationError::from)?;
        let actions = self
            .actions
            .iter()
            .map(|action| action.build(&contracts))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Omnibus::new(contracts, actions))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::io::Write;

    pub(crate) const REGISTRY: &str = r#"
        [networks.mainnet]
        chain_id = 1
        voting = "0x2e59A20f205bB85a89C53f1936454680651E618e"
        agent = "0x3e40D73EB977Dc6a537aF587D48316feE66E9C8c"
        calls_script = "0x5cEb19e1890f677c3676d5ecDF7c501eBA01A054"
        finance = "0xB9E5CBB9CA5b0d659238807E84D0176930753d86"
        curated_staking_module = "0x55032650b14df07b85bF18A3a3eC8E0Af2e028d5"
        ldo = "0x5A98FcBEA516Cf06857215779Fd812CA3beF1B32"

        [networks.mainnet.contracts.staking_router]
        address = "0xFdDf38947aFB03C621C71b06C9C70bce73f12999"
        kind = "access-control"
    "#;

    pub(crate) const OMNIBUS: &str = r#"
        network = "mainnet"

        [[actions]]
        type = "add-node-operators"
        operators = [
            { name = "Alpha", reward_address = "0x000000000000000000000000000000000000a1a1" },
        ]

        [[actions]]
        type = "transfer-assets"
        title = "Fund grants"
        to = "0x12a43b049A7D330cB8aEAB5113032D18AE9a9030"
        token = "ldo"
        amount = "1000000000000000000000"

        [[actions]]
        type = "access-control-revoke-role"
        on = "staking_router"
        from = "agent"
        role = "MANAGE_WITHDRAWAL_CREDENTIALS_ROLE"
    "#;

    #[test]
    fn test_parse_actions() {
        let config = OmnibusConfig::from_toml_str(OMNIBUS).unwrap();
        assert_eq!(config.network, "mainnet");
        assert_eq!(config.actions.len(), 3);
        assert!(matches!(
            &config.actions[1],
            ActionConfig::TransferAssets { token, amount, .. }
                if token == "ldo" && *amount == U256::from(10).pow(U256::from(21))
        ));
        assert_eq!(
            config.actions[2],
            ActionConfig::AccessControlRevokeRole {
                on: AccountRef::Contract("staking_router".into()),
                from: AccountRef::Contract("agent".into()),
                role: "MANAGE_WITHDRAWAL_CREDENTIALS_ROLE".into(),
            }
        );
    }

    #[test]
    fn test_build_resolves_names() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        let omnibus = OmnibusConfig::from_toml_str(OMNIBUS).unwrap().build(&registry).unwrap();
        let names: Vec<_> = omnibus.actions().iter().map(|action| action.name()).collect();
        assert_eq!(names, ["AddNodeOperators", "TransferAssets", "AccessControlRevokeRole"]);
        assert_eq!(omnibus.contracts().network, "mainnet");
    }

    #[test]
    fn test_account_ref_resolution() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        let contracts = registry.contracts("mainnet").unwrap();

        let agent = AccountRef::Contract("agent".into());
        assert_eq!(agent.address(&contracts).unwrap(), contracts.agent.address());

        let literal = AccountRef::Address(address!("0xFdDf38947aFB03C621C71b06C9C70bce73f12999"));
        let on = literal.resolve(&contracts, ContractKind::AccessControl).unwrap();
        assert_eq!(on.name(), "staking_router");
        assert_eq!(on.kind(), ContractKind::AccessControl);
    }

    #[test]
    fn test_unknown_token_fails_to_build() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        let omnibus = OMNIBUS.replace("token = \"ldo\"", "token = \"steth\"");
        let err = OmnibusConfig::from_toml_str(&omnibus).unwrap().build(&registry).unwrap_err();
        assert!(matches!(err, OmnibusConfigError::Configuration(ConfigurationError::Registry(_))));
    }

    #[test]
    fn test_unknown_network_fails_to_build() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        let omnibus = OMNIBUS.replace("network = \"mainnet\"", "network = \"holesky\"");
        assert!(OmnibusConfig::from_toml_str(&omnibus).unwrap().build(&registry).is_err());
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let omnibus = OMNIBUS.replace("transfer-assets", "burn-assets");
        assert!(matches!(OmnibusConfig::from_toml_str(&omnibus), Err(OmnibusConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(OMNIBUS.as_bytes()).unwrap();
        let config = OmnibusConfig::from_file(file.path()).unwrap();
        assert_eq!(config.actions.len(), 3);
    }
}
