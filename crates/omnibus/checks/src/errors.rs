//! Error types for the `omnibus-checks` crate.

use alloc::{boxed::Box, format, string::String, vec::Vec};
use alloy_primitives::Address;
use omnibus_contracts::{RegistryError, ScriptError};
use thiserror::Error;

/// An expectation could not be built.
///
/// Raised while constructing expectations, before any log is inspected.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The event name does not exist on the contract's interface.
    #[error("Event `{event}` does not exist on {contract}")]
    UnknownEvent {
        /// The contract the event was looked up on.
        contract: String,
        /// The requested event name.
        event: String,
    },
    /// The event name is overloaded, so its argument layout cannot be determined.
    #[error("Event `{event}` is ambiguous on {contract}, candidates: {}", .candidates.join(", "))]
    AmbiguousEvent {
        /// The contract the event was looked up on.
        contract: String,
        /// The requested event name.
        event: String,
        /// The overloaded signatures.
        candidates: Vec<&'static str>,
    },
    /// A symbolic contract reference could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The calls of an action cannot be encoded into a script.
    #[error("Invalid action calls: {0}")]
    Script(#[from] ScriptError),
}

/// Required events of one action were never matched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Events for action {action} (#{index}) not found:\n{}", .missing.join("\n"))]
pub struct MatchFailure {
    /// Position of the action in the omnibus.
    pub index: usize,
    /// The action kind, e.g. `TransferAssets`.
    pub action: String,
    /// The title of the action instance.
    pub title: String,
    /// The unsatisfied events, as `contract.Event`.
    pub missing: Vec<String>,
}

/// Logs remained after every expectation was consumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Unexpected logs: {count} log(s) left unconsumed, the first {}",
    describe_first(.first_event, .first_emitter)
)]
pub struct UnexpectedLogError {
    /// The number of unconsumed logs.
    pub count: usize,
    /// The emitter of the first unconsumed log.
    pub first_emitter: Address,
    /// The first unconsumed log as `contract.Event`, if its emitter is registered and the log
    /// decodes.
    pub first_event: Option<String>,
}

fn describe_first(event: &Option<String>, emitter: &Address) -> String {
    match event {
        Some(event) => format!("is {event} emitted by {emitter}"),
        None => format!("emitted by {emitter}"),
    }
}

/// A single failure found by the omnibus event checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    /// Required events of an action are missing.
    #[error(transparent)]
    Match(#[from] MatchFailure),
    /// More logs were emitted than declared.
    #[error(transparent)]
    UnexpectedLogs(#[from] UnexpectedLogError),
}

/// The error returned by the omnibus event checker.
#[derive(Debug, Error)]
pub enum OmnibusCheckError {
    /// An expectation could not be built.
    #[error("Invalid expectation: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The emitted logs do not realize the declared events.
    #[error("Omnibus event check failed with {} failure(s):\n{}", .0.len(), render_failures(.0))]
    Failed(Vec<CheckFailure>),
}

impl OmnibusCheckError {
    /// The collected failures, empty for configuration errors.
    pub fn failures(&self) -> &[CheckFailure] {
        match self {
            Self::Failed(failures) => failures,
            Self::Configuration(_) => &[],
        }
    }
}

fn render_failures(failures: &[CheckFailure]) -> String {
    failures.iter().map(|failure| format!("- {failure}")).collect::<Vec<_>>().join("\n")
}

/// An error raised by an action's pre or post execution hook.
#[derive(Debug, Error)]
pub enum HookError {
    /// The state provider failed to serve a call.
    #[error("State provider error: {0}")]
    Provider(Box<dyn core::error::Error + Send + Sync>),
    /// The call output could not be decoded.
    #[error("Failed to decode call output: {0}")]
    Decode(#[from] alloy_sol_types::Error),
    /// The action's inputs could not be resolved.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn test_failed_lists_every_failure() {
        let error = OmnibusCheckError::Failed(vec![
            MatchFailure {
                index: 0,
                action: "TransferAssets".into(),
                title: "Fund grants".into(),
                missing: vec!["ldo.Transfer".into(), "finance.NewTransaction".into()],
            }
            .into(),
            UnexpectedLogError {
                count: 1,
                first_emitter: Address::repeat_byte(0x60),
                first_event: None,
            }
            .into(),
        ]);

        assert_eq!(
            error.to_string(),
            format!(
                "Omnibus event check failed with 2 failure(s):\n\
                 - Events for action TransferAssets (#0) not found:\n\
                 ldo.Transfer\n\
                 finance.NewTransaction\n\
                 - Unexpected logs: 1 log(s) left unconsumed, the first emitted by {}",
                Address::repeat_byte(0x60)
            )
        );
        assert_eq!(error.failures().len(), 2);
    }

    #[test]
    fn test_configuration_error_has_no_failures() {
        let error = OmnibusCheckError::from(ConfigurationError::Script(
            ScriptError::CalldataTooLong(usize::MAX),
        ));
        assert!(error.failures().is_empty());
        assert!(error.to_string().starts_with("Invalid expectation: Invalid action calls"));
    }
}
