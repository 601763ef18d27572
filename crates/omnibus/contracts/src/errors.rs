//! Error types for the `omnibus-contracts` crate.

use alloc::string::String;
use thiserror::Error;

/// An error raised while loading or querying the contract registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No network with this name is configured.
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    /// No network with this chain ID is configured.
    #[error("No network configured for chain ID {0}")]
    UnknownChainId(u64),
    /// The symbolic contract name is not registered for the network.
    #[error("Unknown contract `{name}` on network {network}")]
    UnknownContract {
        /// The network the lookup ran against.
        network: String,
        /// The unresolved contract name.
        name: String,
    },
    /// The registry file could not be read.
    #[error("Failed to read registry file: {0}")]
    Io(#[from] std::io::Error),
    /// The registry file is not valid TOML for the registry schema.
    #[error("Invalid registry config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// An error raised while decoding a `CallsScript` EVM script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script is shorter than its spec ID.
    #[error("Script is too short to carry a spec ID")]
    MissingSpecId,
    /// The script carries an unsupported spec ID.
    #[error("Unsupported script spec ID 0x{0:08x}")]
    UnsupportedSpecId(u32),
    /// A call entry runs past the end of the script.
    #[error("Truncated call entry at offset {0}")]
    Truncated(usize),
    /// The calldata of a call does not fit the 4 byte length field.
    #[error("Calldata of {0} bytes is too long for a script entry")]
    CalldataTooLong(usize),
}
