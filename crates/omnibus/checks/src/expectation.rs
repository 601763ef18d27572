//! The expected event model.

use crate::ConfigurationError;
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use alloy_primitives::{Address, B256, Bytes, U256};
use core::fmt;
use omnibus_contracts::{ContractInterface, EventDescriptor, EventLookup, NamedContract};
use omnibus_primitives::ArgValue;

/// The expectation for one positional event argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSpec {
    /// Matches any value.
    Wildcard,
    /// Matches a value loosely equal or byte-equivalent to the given one.
    Concrete(ArgValue),
    /// Matches the canonical address of a referenced contract.
    AddressRef(Address),
}

impl ArgSpec {
    /// Returns `true` if `actual` satisfies this expectation.
    ///
    /// Loose equality is tried first. Failing that, both sides must have a byte view and the
    /// views must be equivalent.
    pub fn matches(&self, actual: &ArgValue) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Concrete(expected) => expected.loose_eq(actual) || expected.bytes_eq(actual),
            Self::AddressRef(address) => {
                let expected = ArgValue::Address(*address);
                expected.loose_eq(actual) || expected.bytes_eq(actual)
            }
        }
    }
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("_"),
            Self::Concrete(value) => write!(f, "{value}"),
            Self::AddressRef(address) => write!(f, "&{address}"),
        }
    }
}

impl From<&NamedContract> for ArgSpec {
    fn from(contract: &NamedContract) -> Self {
        Self::AddressRef(contract.address())
    }
}

impl From<ArgValue> for ArgSpec {
    fn from(value: ArgValue) -> Self {
        Self::Concrete(value)
    }
}

macro_rules! concrete_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ArgSpec {
                fn from(value: $ty) -> Self {
                    Self::Concrete(ArgValue::from(value))
                }
            }
        )*
    };
}

concrete_arg_from!(Address, bool, u64, U256, B256, Bytes, String, &str);

/// Options recognized when building an [`ExpectedEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventParams {
    /// Positional argument expectations. Empty skips the argument check.
    pub args: Vec<ArgSpec>,
    /// Overrides the emitter, for events logged by a different account than the contract whose
    /// interface declares them.
    pub emitter: Option<Address>,
    /// Whether the event may be absent.
    pub optional: bool,
}

impl EventParams {
    /// Sets the positional argument expectations.
    pub fn args(mut self, args: impl IntoIterator<Item = ArgSpec>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Overrides the emitter.
    pub fn emitter(mut self, emitter: impl Into<Address>) -> Self {
        self.emitter = Some(emitter.into());
        self
    }

    /// Marks the event as optional.
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// An event a correctly executed action must, or may, emit.
///
/// The topic hash is resolved when the expectation is built, and the expectation is immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedEvent {
    contract: String,
    emitter: Address,
    descriptor: EventDescriptor,
    args: Vec<ArgSpec>,
    optional: bool,
}

impl ExpectedEvent {
    /// Builds an expectation for the event `name` of `contract`.
    ///
    /// `name` is either a bare event name or a full signature. Fails if the event does not exist
    /// on the contract's interface or if a bare name is overloaded.
    pub fn new(
        contract: &NamedContract,
        name: &str,
        params: EventParams,
    ) -> Result<Self, ConfigurationError> {
        Self::on_interface(contract.name(), contract.address(), contract.interface(), name, params)
    }

    /// Builds an expectation for the event `name` of `interface`, deployed at `address` under
    /// the symbolic name `contract`.
    pub fn on_interface(
        contract: &str,
        address: Address,
        interface: &'static ContractInterface,
        name: &str,
        params: EventParams,
    ) -> Result<Self, ConfigurationError> {
        let descriptor = match interface.event(name) {
            EventLookup::Found(descriptor) => *descriptor,
            EventLookup::Missing => {
                return Err(ConfigurationError::UnknownEvent {
                    contract: format!("{contract} ({address})"),
                    event: name.to_string(),
                });
            }
            EventLookup::Ambiguous(candidates) => {
                return Err(ConfigurationError::AmbiguousEvent {
                    contract: format!("{contract} ({address})"),
                    event: name.to_string(),
                    candidates,
                });
            }
        };

        Ok(Self::from_descriptor(contract, address, descriptor, params))
    }

    /// Builds an expectation from an already resolved event descriptor.
    ///
    /// `params.emitter`, when set, takes precedence over `emitter`.
    pub fn from_descriptor(
        contract: impl Into<String>,
        emitter: Address,
        descriptor: EventDescriptor,
        params: EventParams,
    ) -> Self {
        Self {
            contract: contract.into(),
            emitter: params.emitter.unwrap_or(emitter),
            descriptor,
            args: params.args,
            optional: params.optional,
        }
    }

    /// The symbolic name of the contract declaring the event.
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// The account expected to emit the log.
    pub const fn emitter(&self) -> Address {
        self.emitter
    }

    /// The event descriptor.
    pub const fn descriptor(&self) -> &EventDescriptor {
        &self.descriptor
    }

    /// The bare event name.
    pub const fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// The expected `topics[0]`.
    pub const fn topic_hash(&self) -> B256 {
        self.descriptor.topic_hash()
    }

    /// The positional argument expectations. Empty when arguments are not checked.
    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    /// Whether the event may be absent.
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

impl fmt::Display for ExpectedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.contract, self.descriptor.name())
    }
}

/// Shorthand for [`ExpectedEvent::new`].
pub fn event(
    contract: &NamedContract,
    name: &str,
    params: EventParams,
) -> Result<ExpectedEvent, ConfigurationError> {
    ExpectedEvent::new(contract, name, params)
}
