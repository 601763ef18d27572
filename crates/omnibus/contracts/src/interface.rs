//! Static contract interfaces and their event descriptors.

use crate::abi::{
    IAccessControl, IAgent, ICallsScript, IERC20, IFinance, INodeOperatorsRegistry, IVoting,
};
use alloc::{vec, vec::Vec};
use alloy_primitives::{B256, LogData};
use alloy_sol_types::SolEvent;
use core::fmt;
use derive_more::Display;
use omnibus_primitives::ArgValue;

/// Exposes the decoded fields of an event in declaration order.
///
/// Indexed and non-indexed fields are interleaved exactly as they appear in the event
/// signature, which is the order expectations list their arguments in.
pub trait EventArgs: SolEvent {
    /// The event fields in declaration order.
    fn args(&self) -> Vec<ArgValue>;
}

macro_rules! impl_event_args {
    ($($event:ty => [$($field:ident),* $(,)?]);* $(;)?) => {
        $(
            impl EventArgs for $event {
                fn args(&self) -> Vec<ArgValue> {
                    vec![$(ArgValue::from(self.$field.clone())),*]
                }
            }
        )*
    };
}

impl_event_args! {
    IVoting::StartVote => [voteId, creator, metadata];
    IVoting::CastVote => [voteId, voter, supports, stake];
    IVoting::ExecuteVote => [voteId];
    IVoting::ScriptResult => [executor, script, input, returnData];
    IAgent::ScriptResult => [executor, script, input, returnData];
    IAgent::Execute => [sender, target, ethValue, data];
    IAgent::VaultTransfer => [token, to, amount];
    ICallsScript::LogScriptCall => [sender, src, dst];
    IFinance::NewTransaction => [transactionId, incoming, entity, amount, reference];
    INodeOperatorsRegistry::NodeOperatorAdded => [nodeOperatorId, name, rewardAddress, stakingLimit];
    IERC20::Transfer => [from, to, value];
    IERC20::Approval => [owner, spender, value];
    IAccessControl::RoleGranted => [role, account, sender];
    IAccessControl::RoleRevoked => [role, account, sender];
}

/// Decoder turning raw log data into the ordered event arguments.
pub type ArgsDecoder = fn(&LogData) -> Result<Vec<ArgValue>, alloy_sol_types::Error>;

fn decode_args<E: EventArgs>(data: &LogData) -> Result<Vec<ArgValue>, alloy_sol_types::Error> {
    E::decode_log_data(data).map(|event| event.args())
}

/// Describes one event of a contract interface.
#[derive(Clone, Copy)]
pub struct EventDescriptor {
    name: &'static str,
    signature: &'static str,
    topic_hash: B256,
    arity: usize,
    decode: ArgsDecoder,
}

impl EventDescriptor {
    /// Builds the descriptor of the event type `E`.
    pub const fn of<E: EventArgs>() -> Self {
        Self {
            name: signature_name(E::SIGNATURE),
            signature: E::SIGNATURE,
            topic_hash: E::SIGNATURE_HASH,
            arity: signature_arity(E::SIGNATURE),
            decode: decode_args::<E>,
        }
    }

    /// The bare event name, e.g. `Transfer`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The canonical signature, e.g. `Transfer(address,address,uint256)`.
    pub const fn signature(&self) -> &'static str {
        self.signature
    }

    /// The `topics[0]` value of every log emitting this event.
    pub const fn topic_hash(&self) -> B256 {
        self.topic_hash
    }

    /// The number of fields the event declares.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Decodes the arguments of a log emitting this event.
    pub fn decode(&self, data: &LogData) -> Result<Vec<ArgValue>, alloy_sol_types::Error> {
        (self.decode)(data)
    }
}

impl fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDescriptor")
            .field("signature", &self.signature)
            .field("topic_hash", &self.topic_hash)
            .finish_non_exhaustive()
    }
}

impl PartialEq for EventDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.topic_hash == other.topic_hash && self.signature == other.signature
    }
}

impl Eq for EventDescriptor {}

const fn signature_name(signature: &'static str) -> &'static str {
    let bytes = signature.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end] != b'(' {
        end += 1;
    }
    let (head, _) = bytes.split_at(end);
    match core::str::from_utf8(head) {
        Ok(name) => name,
        Err(_) => panic!("event signature is not valid utf-8"),
    }
}

/// Counts the top level parameters of a canonical signature, descending into tuples.
const fn signature_arity(signature: &'static str) -> usize {
    let bytes = signature.as_bytes();
    let mut i = 0;
    let mut depth = 0usize;
    let mut params = 0;
    let mut saw_param = false;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                if depth > 0 {
                    saw_param = true;
                }
                depth += 1;
            }
            b')' => depth -= 1,
            b',' if depth == 1 => params += 1,
            _ if depth >= 1 => saw_param = true,
            _ => {}
        }
        i += 1;
    }
    if saw_param { params + 1 } else { 0 }
}

/// Result of looking an event up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLookup<'a> {
    /// Exactly one event matches.
    Found(&'a EventDescriptor),
    /// No event with this name exists on the interface.
    Missing,
    /// The name is overloaded; the candidate signatures are listed.
    Ambiguous(Vec<&'static str>),
}

/// The event surface of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractInterface {
    /// Human readable interface name.
    pub name: &'static str,
    /// Events declared by the contract.
    pub events: &'static [EventDescriptor],
}

impl ContractInterface {
    /// Looks an event up by bare name or full signature.
    ///
    /// A full signature always selects a single event. A bare name of an overloaded event is
    /// ambiguous since its argument layout cannot be determined.
    pub fn event(&self, name: &str) -> EventLookup<'_> {
        if name.contains('(') {
            return self
                .events
                .iter()
                .find(|event| event.signature == name)
                .map_or(EventLookup::Missing, EventLookup::Found);
        }

        let candidates: Vec<_> = self.events.iter().filter(|event| event.name == name).collect();
        match candidates.as_slice() {
            [] => EventLookup::Missing,
            [event] => EventLookup::Found(event),
            many => EventLookup::Ambiguous(many.iter().map(|event| event.signature).collect()),
        }
    }

    /// Looks an event up by its topic hash.
    pub fn event_by_topic(&self, topic: &B256) -> Option<&EventDescriptor> {
        self.events.iter().find(|event| &event.topic_hash == topic)
    }
}

/// Interface of the voting app.
pub static VOTING: ContractInterface = ContractInterface {
    name: "Voting",
    events: &[
        EventDescriptor::of::<IVoting::StartVote>(),
        EventDescriptor::of::<IVoting::CastVote>(),
        EventDescriptor::of::<IVoting::ExecuteVote>(),
        EventDescriptor::of::<IVoting::ScriptResult>(),
    ],
};

/// Interface of the agent app.
pub static AGENT: ContractInterface = ContractInterface {
    name: "Agent",
    events: &[
        EventDescriptor::of::<IAgent::ScriptResult>(),
        EventDescriptor::of::<IAgent::Execute>(),
        EventDescriptor::of::<IAgent::VaultTransfer>(),
    ],
};

/// Interface of the `CallsScript` executor.
pub static CALLS_SCRIPT: ContractInterface = ContractInterface {
    name: "CallsScript",
    events: &[EventDescriptor::of::<ICallsScript::LogScriptCall>()],
};

/// Interface of the finance app.
pub static FINANCE: ContractInterface = ContractInterface {
    name: "Finance",
    events: &[EventDescriptor::of::<IFinance::NewTransaction>()],
};

/// Interface of the node operators registry.
pub static NODE_OPERATORS_REGISTRY: ContractInterface = ContractInterface {
    name: "NodeOperatorsRegistry",
    events: &[EventDescriptor::of::<INodeOperatorsRegistry::NodeOperatorAdded>()],
};

/// Interface of an ERC-20 token.
pub static ERC20: ContractInterface = ContractInterface {
    name: "ERC20",
    events: &[EventDescriptor::of::<IERC20::Transfer>(), EventDescriptor::of::<IERC20::Approval>()],
};

/// Interface of an access controlled contract.
pub static ACCESS_CONTROL: ContractInterface = ContractInterface {
    name: "AccessControl",
    events: &[
        EventDescriptor::of::<IAccessControl::RoleGranted>(),
        EventDescriptor::of::<IAccessControl::RoleRevoked>(),
    ],
};

/// The closed set of contract interfaces the registry can bind an address to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractKind {
    /// [`VOTING`].
    #[display("voting")]
    Voting,
    /// [`AGENT`].
    #[display("agent")]
    Agent,
    /// [`CALLS_SCRIPT`].
    #[display("calls-script")]
    CallsScript,
    /// [`FINANCE`].
    #[display("finance")]
    Finance,
    /// [`NODE_OPERATORS_REGISTRY`].
    #[display("node-operators-registry")]
    NodeOperatorsRegistry,
    /// [`ERC20`].
    #[display("erc20")]
    Erc20,
    /// [`ACCESS_CONTROL`].
    #[display("access-control")]
    AccessControl,
}

impl ContractKind {
    /// The interface bound to this kind.
    pub fn interface(&self) -> &'static ContractInterface {
        match self {
            Self::Voting => &VOTING,
            Self::Agent => &AGENT,
            Self::CallsScript => &CALLS_SCRIPT,
            Self::Finance => &FINANCE,
            Self::NodeOperatorsRegistry => &NODE_OPERATORS_REGISTRY,
            Self::Erc20 => &ERC20,
            Self::AccessControl => &ACCESS_CONTROL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256, keccak256};
    use alloy_sol_types::sol;
    use rstest::rstest;

    sol! {
        #[sol(all_derives)]
        interface IOverloaded {
            event Deposit(address indexed from, uint256 amount);
            event Deposit(address indexed from);
        }
    }

    impl_event_args! {
        IOverloaded::Deposit_0 => [from, amount];
        IOverloaded::Deposit_1 => [from];
    }

    const OVERLOADED: ContractInterface = ContractInterface {
        name: "Overloaded",
        events: &[
            EventDescriptor::of::<IOverloaded::Deposit_0>(),
            EventDescriptor::of::<IOverloaded::Deposit_1>(),
        ],
    };

    #[rstest]
    #[case::voting(VOTING)]
    #[case::agent(AGENT)]
    #[case::calls_script(CALLS_SCRIPT)]
    #[case::finance(FINANCE)]
    #[case::node_operators_registry(NODE_OPERATORS_REGISTRY)]
    #[case::erc20(ERC20)]
    #[case::access_control(ACCESS_CONTROL)]
    fn test_descriptors_are_consistent(#[case] interface: ContractInterface) {
        for event in interface.events {
            assert!(event.signature().starts_with(event.name()));
            assert_eq!(event.topic_hash(), keccak256(event.signature()));
            assert_eq!(interface.event(event.name()), EventLookup::Found(event));
            assert_eq!(interface.event_by_topic(&event.topic_hash()), Some(event));
        }
    }

    #[rstest]
    #[case::no_params("ExecuteVote()", 0)]
    #[case::one_param("ExecuteVote(uint256)", 1)]
    #[case::three_params("Transfer(address,address,uint256)", 3)]
    #[case::tuple_param("ExecutingMessage(bytes32,(address,uint256,uint256,uint256,uint256))", 2)]
    fn test_signature_arity(#[case] signature: &'static str, #[case] expected: usize) {
        assert_eq!(signature_arity(signature), expected);
    }

    #[test]
    fn test_arity_matches_decoded_args() {
        let event = IERC20::Transfer {
            from: Address::repeat_byte(0x01),
            to: Address::repeat_byte(0x02),
            value: U256::from(10),
        };
        let descriptor = ERC20.event("Transfer");
        let EventLookup::Found(descriptor) = descriptor else { panic!("Transfer not found") };
        let args = descriptor.decode(&event.encode_log_data()).unwrap();
        assert_eq!(args.len(), descriptor.arity());
        assert_eq!(
            args,
            vec![
                ArgValue::Address(Address::repeat_byte(0x01)),
                ArgValue::Address(Address::repeat_byte(0x02)),
                ArgValue::from(10u64),
            ]
        );
    }

    #[test]
    fn test_missing_event() {
        assert_eq!(VOTING.event("Transfer"), EventLookup::Missing);
        assert_eq!(VOTING.event("ExecuteVote(uint64)"), EventLookup::Missing);
    }

    #[test]
    fn test_overloaded_event_is_ambiguous_by_name() {
        assert_eq!(
            OVERLOADED.event("Deposit"),
            EventLookup::Ambiguous(vec!["Deposit(address,uint256)", "Deposit(address)"])
        );
        let EventLookup::Found(event) = OVERLOADED.event("Deposit(address)") else {
            panic!("signature lookup must resolve overloads")
        };
        assert_eq!(event.arity(), 1);
        assert_ne!(event.topic_hash(), B256::ZERO);
    }
}
