//! Per-network contract registry.
//!
//! The registry is an explicit configuration object: callers load it once and hand the resolved
//! [`Contracts`] for one network to the actions and the event checker.

use crate::{ContractKind, EventDescriptor, NamedContract, RegistryError};
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use alloy_primitives::{Address, ChainId, Log};
use core::fmt;
use omnibus_primitives::ArgValue;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

/// Registry configuration keyed by network name.
///
/// ```toml
/// [networks.mainnet]
/// chain_id = 1
/// voting = "0x2e59A20f205bB85a89C53f1936454680651E618e"
/// # ...
///
/// [networks.mainnet.contracts.steth]
/// address = "0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84"
/// kind = "erc20"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Network configurations by network name.
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

/// The contract set of one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// The chain ID of the network.
    pub chain_id: ChainId,
    /// The voting app.
    pub voting: Address,
    /// The agent app.
    pub agent: Address,
    /// The `CallsScript` executor.
    pub calls_script: Address,
    /// The finance app.
    pub finance: Address,
    /// The curated staking module.
    pub curated_staking_module: Address,
    /// The governance token.
    pub ldo: Address,
    /// Additional named contracts.
    #[serde(default)]
    pub contracts: BTreeMap<String, ContractEntry>,
}

/// An additional named contract of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    /// The contract address.
    pub address: Address,
    /// The interface bound to the address.
    pub kind: ContractKind,
}

impl RegistryConfig {
    /// Parses a registry from TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self, RegistryError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a registry TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(
            target: "omnibus::registry",
            path = %path.display(),
            networks = config.networks.len(),
            "Loaded contract registry",
        );
        Ok(config)
    }

    /// Resolves the contracts of the network named `network`.
    pub fn contracts(&self, network: &str) -> Result<Contracts, RegistryError> {
        self.networks
            .get(network)
            .map(|config| Contracts::from_config(network, config))
            .ok_or_else(|| RegistryError::UnknownNetwork(network.to_string()))
    }

    /// Resolves the contracts of the network with the given chain ID.
    pub fn contracts_by_chain_id(&self, chain_id: ChainId) -> Result<Contracts, RegistryError> {
        self.networks
            .iter()
            .find(|(_, config)| config.chain_id == chain_id)
            .map(|(name, config)| Contracts::from_config(name, config))
            .ok_or(RegistryError::UnknownChainId(chain_id))
    }
}

/// The resolved contract handles of one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contracts {
    /// The network name.
    pub network: String,
    /// The chain ID of the network.
    pub chain_id: ChainId,
    /// The voting app.
    pub voting: NamedContract,
    /// The agent app.
    pub agent: NamedContract,
    /// The `CallsScript` executor.
    pub calls_script: NamedContract,
    /// The finance app.
    pub finance: NamedContract,
    /// The curated staking module.
    pub curated_staking_module: NamedContract,
    /// The governance token.
    pub ldo: NamedContract,
    extra: BTreeMap<String, NamedContract>,
}

impl Contracts {
    /// Builds the handles described by a [`NetworkConfig`].
    pub fn from_config(network: &str, config: &NetworkConfig) -> Self {
        let extra = config
            .contracts
            .iter()
            .map(|(name, entry)| {
                (name.clone(), NamedContract::new(name, entry.address, entry.kind))
            })
            .collect();

        Self {
            network: network.to_string(),
            chain_id: config.chain_id,
            voting: NamedContract::new("voting", config.voting, ContractKind::Voting),
            agent: NamedContract::new("agent", config.agent, ContractKind::Agent),
            calls_script: NamedContract::new(
                "calls_script",
                config.calls_script,
                ContractKind::CallsScript,
            ),
            finance: NamedContract::new("finance", config.finance, ContractKind::Finance),
            curated_staking_module: NamedContract::new(
                "curated_staking_module",
                config.curated_staking_module,
                ContractKind::NodeOperatorsRegistry,
            ),
            ldo: NamedContract::new("ldo", config.ldo, ContractKind::Erc20),
            extra,
        }
    }

    /// Looks a contract up by its symbolic name.
    pub fn get(&self, name: &str) -> Option<&NamedContract> {
        match name {
            "voting" => Some(&self.voting),
            "agent" => Some(&self.agent),
            "calls_script" => Some(&self.calls_script),
            "finance" => Some(&self.finance),
            "curated_staking_module" => Some(&self.curated_staking_module),
            "ldo" => Some(&self.ldo),
            _ => self.extra.get(name),
        }
    }

    /// Looks a contract up by its symbolic name, failing if it is not registered.
    pub fn resolve(&self, name: &str) -> Result<&NamedContract, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::UnknownContract {
            network: self.network.clone(),
            name: name.to_string(),
        })
    }

    /// Returns the registered contract at `address`.
    pub fn at(&self, address: Address) -> Option<&NamedContract> {
        [
            &self.voting,
            &self.agent,
            &self.calls_script,
            &self.finance,
            &self.curated_staking_module,
            &self.ldo,
        ]
        .into_iter()
        .chain(self.extra.values())
        .find(|contract| contract.address() == address)
    }

    /// Returns the symbolic name of the contract at `address`, if it is registered.
    pub fn name_of(&self, address: Address) -> Option<&str> {
        self.at(address).map(NamedContract::name)
    }

    /// Decodes `log` against the interface of the registered contract that emitted it.
    ///
    /// Returns `None` for unregistered emitters, anonymous logs, topics the interface does not
    /// declare and logs that fail to decode.
    pub fn parse_log(&self, log: &Log) -> Option<ParsedLog<'_>> {
        let contract = self.at(log.address)?;
        let topic = log.topics().first()?;
        let event = contract.interface().event_by_topic(topic)?;
        match event.decode(&log.data) {
            Ok(args) => Some(ParsedLog { contract, event, args }),
            Err(err) => {
                trace!(
                    target: "omnibus::registry",
                    contract = %contract,
                    event = event.signature(),
                    %err,
                    "Failed to decode log",
                );
                None
            }
        }
    }
}

/// A log decoded against the interface of its registered emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog<'a> {
    /// The emitting contract.
    pub contract: &'a NamedContract,
    /// The emitted event.
    pub event: &'static EventDescriptor,
    /// The decoded fields in declaration order.
    pub args: Vec<ArgValue>,
}

impl fmt::Display for ParsedLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.contract.name(), self.event.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IERC20, IVoting};
    use alloy_primitives::{Bytes, LogData, U256, address};
    use alloy_sol_types::SolEvent;
    use std::io::Write;

    const REGISTRY: &str = r#"
        [networks.mainnet]
        chain_id = 1
        voting = "0x2e59A20f205bB85a89C53f1936454680651E618e"
        agent = "0x3e40D73EB977Dc6a537aF587D48316feE66E9C8c"
        calls_script = "0x5cEb19e1890f677c3676d5ecDF7c501eBA01A054"
        finance = "0xB9E5CBB9CA5b0d659238807E84D0176930753d86"
        curated_staking_module = "0x55032650b14df07b85bF18A3a3eC8E0Af2e028d5"
        ldo = "0x5A98FcBEA516Cf06857215779Fd812CA3beF1B32"

        [networks.mainnet.contracts.steth]
        address = "0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84"
        kind = "erc20"

        [networks.holesky]
        chain_id = 17000
        voting = "0xdA7d2573Df555002503F29aA4003e398d28cc00f"
        agent = "0xE92329EC7ddB11D25e25b3c21eeBf11f15eB325d"
        calls_script = "0xAa8B4F258a4817bfb0058b861447878168ddf7B0"
        finance = "0xf0F281E5d7FBc54EAFcE0dA225CDbde04173AB16"
        curated_staking_module = "0x595F64Ddc3856a3b5Ff4f4CC1d1fb4B46cFd2bAC"
        ldo = "0x14ae7daeecdf57034f3E9db8564e46Dba8D97344"
    "#;

    #[test]
    fn test_parse_registry() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        assert_eq!(registry.networks.len(), 2);

        let mainnet = registry.contracts("mainnet").unwrap();
        assert_eq!(mainnet.chain_id, 1);
        assert_eq!(mainnet.ldo.address(), address!("0x5a98fcbea516cf06857215779fd812ca3bef1b32"));
        assert_eq!(mainnet.ldo.kind(), ContractKind::Erc20);

        let steth = mainnet.resolve("steth").unwrap();
        assert_eq!(steth.kind(), ContractKind::Erc20);
        assert_eq!(mainnet.name_of(steth.address()), Some("steth"));
    }

    #[test]
    fn test_lookup_by_chain_id() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        let holesky = registry.contracts_by_chain_id(17000).unwrap();
        assert_eq!(holesky.network, "holesky");
        assert!(matches!(
            registry.contracts_by_chain_id(5),
            Err(RegistryError::UnknownChainId(5))
        ));
    }

    #[test]
    fn test_unknown_names() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        assert!(matches!(registry.contracts("sepolia"), Err(RegistryError::UnknownNetwork(_))));

        let mainnet = registry.contracts("mainnet").unwrap();
        assert!(mainnet.get("wsteth").is_none());
        assert!(matches!(
            mainnet.resolve("wsteth"),
            Err(RegistryError::UnknownContract { name, .. }) if name == "wsteth"
        ));
    }

    #[test]
    fn test_invalid_kind_is_rejected() {
        let config = REGISTRY.replace("kind = \"erc20\"", "kind = \"erc721\"");
        assert!(matches!(RegistryConfig::from_toml_str(&config), Err(RegistryError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REGISTRY.as_bytes()).unwrap();
        let registry = RegistryConfig::from_file(file.path()).unwrap();
        assert!(registry.networks.contains_key("mainnet"));
    }

    #[test]
    fn test_parse_log() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        let mainnet = registry.contracts("mainnet").unwrap();
        let transfer = IERC20::Transfer {
            from: mainnet.agent.address(),
            to: Address::repeat_byte(0x42),
            value: U256::from(7),
        };
        let log = Log { address: mainnet.ldo.address(), data: transfer.encode_log_data() };

        let parsed = mainnet.parse_log(&log).unwrap();
        assert_eq!(parsed.contract, &mainnet.ldo);
        assert_eq!(parsed.event.signature(), "Transfer(address,address,uint256)");
        assert_eq!(
            parsed.args,
            vec![
                ArgValue::from(mainnet.agent.address()),
                ArgValue::from(Address::repeat_byte(0x42)),
                ArgValue::from(U256::from(7)),
            ]
        );
        assert_eq!(parsed.to_string(), "ldo.Transfer");
    }

    #[test]
    fn test_parse_log_rejects_unknown_logs() {
        let registry = RegistryConfig::from_toml_str(REGISTRY).unwrap();
        let mainnet = registry.contracts("mainnet").unwrap();
        let execute = IVoting::ExecuteVote { voteId: U256::from(1) }.encode_log_data();

        let unregistered = Log { address: Address::repeat_byte(0x01), data: execute.clone() };
        assert!(mainnet.parse_log(&unregistered).is_none());

        let undeclared = Log { address: mainnet.ldo.address(), data: execute.clone() };
        assert!(mainnet.parse_log(&undeclared).is_none());

        let anonymous = Log {
            address: mainnet.voting.address(),
            data: LogData::new_unchecked(vec![], Bytes::new()),
        };
        assert!(mainnet.parse_log(&anonymous).is_none());

        let undecodable = Log {
            address: mainnet.voting.address(),
            data: LogData::new_unchecked(execute.topics()[..1].to_vec(), Bytes::new()),
        };
        assert!(mainnet.parse_log(&undecodable).is_none());

        let voting = Log { address: mainnet.voting.address(), data: execute };
        assert_eq!(mainnet.parse_log(&voting).unwrap().to_string(), "voting.ExecuteVote");
    }
}
