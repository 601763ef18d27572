//! The omnibus event checker.

use crate::{
    CheckFailure, ConfigurationError, EventParams, ExpectedEvent, MatchFailure, OmnibusAction,
    OmnibusCheckError, UnexpectedLogError, event, match_logs_to_events,
};
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use alloy_primitives::Log;
use omnibus_contracts::Contracts;
use tracing::{debug, info, warn};

/// Label of the trailing vote execution window in reports.
pub const VOTE_EXECUTION: &str = "vote execution";

/// Per-action diagnostics of a check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    /// Position of the action in the omnibus.
    pub index: usize,
    /// The action kind, e.g. `TransferAssets`.
    pub action: String,
    /// The title of the action instance.
    pub title: String,
    /// The number of declared events.
    pub expected: usize,
    /// The number of logs the action accounted for.
    pub consumed: usize,
}

/// The outcome of a passing check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// One entry per action, in declaration order.
    pub actions: Vec<ActionReport>,
    /// The number of logs accounted for by the trailing vote execution events.
    pub trailing_consumed: usize,
}

impl CheckReport {
    /// The total number of consumed logs.
    pub fn consumed(&self) -> usize {
        self.actions.iter().map(|action| action.consumed).sum::<usize>() + self.trailing_consumed
    }
}

/// Verifies that the logs of an executed vote realize the events declared by its actions.
#[derive(Debug, Clone, Copy)]
pub struct OmnibusEventChecker<'a> {
    contracts: &'a Contracts,
}

impl<'a> OmnibusEventChecker<'a> {
    /// Creates a checker for the given network.
    pub const fn new(contracts: &'a Contracts) -> Self {
        Self { contracts }
    }

    /// The events the voting app emits once the vote script ran, after every action's events.
    pub fn trailing_events(&self) -> Result<Vec<ExpectedEvent>, ConfigurationError> {
        Ok(vec![
            event(&self.contracts.voting, "ScriptResult", EventParams::default())?,
            event(&self.contracts.voting, "ExecuteVote", EventParams::default())?,
        ])
    }

    /// Checks `logs` against the events declared by `actions`, then the trailing vote execution
    /// events, and rejects leftover logs.
    ///
    /// Each action is matched against a window of at most as many logs as it declares events,
    /// and the log cursor advances by the number of logs it consumed. Every action is evaluated
    /// and all failures are returned together. Invalid expectations fail immediately.
    pub fn check(
        &self,
        actions: &[Box<dyn OmnibusAction>],
        logs: &[Log],
    ) -> Result<CheckReport, OmnibusCheckError> {
        let mut cursor = LogCursor { remaining: logs, failures: Vec::new() };
        let mut report = CheckReport::default();

        for (index, action) in actions.iter().enumerate() {
            let expected = action.expected_events(self.contracts)?;
            let title = action.title();
            debug!(
                target: "omnibus::checker",
                index,
                action = action.name(),
                expected = expected.len(),
                remaining = cursor.remaining.len(),
                "Checking action events",
            );
            let consumed = cursor.advance(index, action.name(), &title, &expected);
            report.actions.push(ActionReport {
                index,
                action: action.name().to_string(),
                title,
                expected: expected.len(),
                consumed,
            });
        }

        let trailing = self.trailing_events()?;
        report.trailing_consumed =
            cursor.advance(actions.len(), VOTE_EXECUTION, VOTE_EXECUTION, &trailing);

        let LogCursor { remaining, mut failures } = cursor;
        if let Some(first) = remaining.first() {
            let first_event = self.contracts.parse_log(first).map(|parsed| parsed.to_string());
            warn!(
                target: "omnibus::checker",
                count = remaining.len(),
                first_emitter = %first.address,
                first_event = first_event.as_deref().unwrap_or("unknown"),
                "Logs left after all expected events",
            );
            failures.push(
                UnexpectedLogError {
                    count: remaining.len(),
                    first_emitter: first.address,
                    first_event,
                }
                .into(),
            );
        }

        if !failures.is_empty() {
            return Err(OmnibusCheckError::Failed(failures));
        }

        info!(
            target: "omnibus::checker",
            actions = actions.len(),
            logs = logs.len(),
            "All omnibus events matched",
        );
        Ok(report)
    }
}

/// The unconsumed tail of the receipt logs and the failures collected so far.
struct LogCursor<'l> {
    remaining: &'l [Log],
    failures: Vec<CheckFailure>,
}

impl LogCursor<'_> {
    /// Matches the next window against `expected` and advances past the consumed logs.
    fn advance(
        &mut self,
        index: usize,
        action: &str,
        title: &str,
        expected: &[ExpectedEvent],
    ) -> usize {
        let window = &self.remaining[..expected.len().min(self.remaining.len())];
        let result = match_logs_to_events(window, expected);

        if !result.is_satisfied() {
            let missing: Vec<String> =
                result.unsatisfied.iter().map(|event| event.to_string()).collect();
            warn!(
                target: "omnibus::checker",
                index,
                action,
                missing = ?missing,
                "Action events not found",
            );
            self.failures.push(
                MatchFailure {
                    index,
                    action: action.to_string(),
                    title: title.to_string(),
                    missing,
                }
                .into(),
            );
        }

        self.remaining = &self.remaining[result.consumed..];
        result.consumed
    }
}
