//! Address-bound contract handles.

use crate::{ContractInterface, ContractKind, EventLookup};
use alloc::string::String;
use alloy_primitives::Address;
use core::fmt;

/// A contract bound to its canonical address and interface under a symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedContract {
    name: String,
    address: Address,
    kind: ContractKind,
}

impl NamedContract {
    /// Creates a new [`NamedContract`].
    pub fn new(name: impl Into<String>, address: Address, kind: ContractKind) -> Self {
        Self { name: name.into(), address, kind }
    }

    /// The symbolic name the contract was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical address of the contract.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The interface kind the address is bound to.
    pub const fn kind(&self) -> ContractKind {
        self.kind
    }

    /// The event interface of the contract.
    pub fn interface(&self) -> &'static ContractInterface {
        self.kind.interface()
    }

    /// Looks an event of the contract's interface up by name or signature.
    pub fn event(&self, name: &str) -> EventLookup<'static> {
        self.interface().event(name)
    }
}

impl fmt::Display for NamedContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

impl From<&NamedContract> for Address {
    fn from(contract: &NamedContract) -> Self {
        contract.address
    }
}
