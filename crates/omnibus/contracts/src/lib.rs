#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

extern crate alloc;

mod abi;
pub use abi::{
    IAccessControl, IAgent, ICallsScript, IERC20, IFinance, INodeOperatorsRegistry, IVoting,
};

mod interface;
pub use interface::{
    ACCESS_CONTROL, AGENT, ArgsDecoder, CALLS_SCRIPT, ContractInterface, ContractKind, ERC20,
    EventArgs, EventDescriptor, EventLookup, FINANCE, NODE_OPERATORS_REGISTRY, VOTING,
};

mod contract;
pub use contract::NamedContract;

mod errors;
pub use errors::{RegistryError, ScriptError};

mod registry;
pub use registry::{ContractEntry, Contracts, NetworkConfig, ParsedLog, RegistryConfig};

mod script;
pub use script::{
    CALLS_SCRIPT_SPEC_ID, EvmCall, call, decode_calls_script, encode_calls_script, forward,
};
