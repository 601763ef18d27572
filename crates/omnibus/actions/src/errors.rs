//! Error types for the `omnibus-actions` crate.

use omnibus_checks::ConfigurationError;
use thiserror::Error;

/// An omnibus file could not be loaded or resolved.
#[derive(Debug, Error)]
pub enum OmnibusConfigError {
    /// The file could not be read.
    #[error("Failed to read omnibus file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid omnibus description.
    #[error("Failed to parse omnibus file: {0}")]
    Toml(#[from] toml::de::Error),
    /// An action references something the registry cannot resolve.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
