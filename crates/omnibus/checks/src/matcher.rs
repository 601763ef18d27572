//! The log matching engine.
//!
//! The engine walks one window of logs and one list of expectations with two independent
//! cursors. Every iteration takes the next expectation and tests it against the current log,
//! then applies exactly one [`MatchStep`]:
//!
//! | step              | consumed | log cursor | event cursor | reported |
//! |-------------------|----------|------------|--------------|----------|
//! | `Matched`         | +1       | +1         | +1           | no       |
//! | `SkippedOptional` |          |            | +1           | no       |
//! | `MissedRequired`  |          | +1         | +1           | yes      |
//!
//! The scan stops as soon as either side is exhausted. Expectations left over when the logs run
//! out are not reported.

use crate::ExpectedEvent;
use alloc::vec::Vec;
use alloy_primitives::Log;
use omnibus_primitives::equal_byte_slices;
use tracing::trace;

/// The transition applied after testing one expectation against one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    /// The log realizes the expectation.
    Matched,
    /// An optional expectation did not match. The same log is offered to the next expectation.
    SkippedOptional,
    /// A required expectation did not match. The log slot is scanned past without counting it
    /// as consumed.
    MissedRequired,
}

impl MatchStep {
    /// Classifies the outcome of a positional match.
    pub const fn classify(matched: bool, optional: bool) -> Self {
        match (matched, optional) {
            (true, _) => Self::Matched,
            (false, true) => Self::SkippedOptional,
            (false, false) => Self::MissedRequired,
        }
    }
}

/// The outcome of matching one log window against a list of expectations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// The number of logs accounted for from the head of the window.
    pub consumed: usize,
    /// The required expectations that were never matched, in declaration order.
    pub unsatisfied: Vec<&'a ExpectedEvent>,
}

impl MatchResult<'_> {
    /// Returns `true` if every required expectation was matched.
    pub fn is_satisfied(&self) -> bool {
        self.unsatisfied.is_empty()
    }
}

/// Returns `true` if `log` realizes `expected` at its position.
///
/// The emitter and `topics[0]` must match. When the expectation lists arguments, their count
/// must equal the event's arity and every position must satisfy its [`ArgSpec`]. A log whose
/// data cannot be decoded never matches.
///
/// [`ArgSpec`]: crate::ArgSpec
pub fn log_matches(log: &Log, expected: &ExpectedEvent) -> bool {
    if !equal_byte_slices(log.address.as_slice(), expected.emitter().as_slice()) {
        return false;
    }
    if log.data.topics().first() != Some(&expected.topic_hash()) {
        return false;
    }

    let specs = expected.args();
    if specs.is_empty() {
        return true;
    }
    if specs.len() != expected.descriptor().arity() {
        return false;
    }

    let Ok(actual) = expected.descriptor().decode(&log.data) else {
        trace!(
            target: "omnibus::matcher",
            event = %expected,
            emitter = %log.address,
            "Log data does not decode against the expected event",
        );
        return false;
    };

    specs.len() == actual.len() &&
        specs.iter().zip(&actual).all(|(spec, value)| spec.matches(value))
}

/// The two-cursor scan over one log window.
#[derive(Debug)]
pub struct LogMatcher<'l, 'e> {
    logs: &'l [Log],
    expected: &'e [ExpectedEvent],
    log_index: usize,
    event_index: usize,
    consumed: usize,
    unsatisfied: Vec<&'e ExpectedEvent>,
}

impl<'l, 'e> LogMatcher<'l, 'e> {
    /// Creates a matcher positioned at the head of both sequences.
    pub const fn new(logs: &'l [Log], expected: &'e [ExpectedEvent]) -> Self {
        Self { logs, expected, log_index: 0, event_index: 0, consumed: 0, unsatisfied: Vec::new() }
    }

    /// Returns `true` once either the logs or the expectations are exhausted.
    pub const fn is_done(&self) -> bool {
        self.event_index >= self.expected.len() || self.log_index >= self.logs.len()
    }

    /// Tests the next expectation against the current log and applies the resulting step.
    ///
    /// Returns `None` when the scan is finished.
    pub fn step(&mut self) -> Option<MatchStep> {
        if self.is_done() {
            return None;
        }

        let log = &self.logs[self.log_index];
        let expected = &self.expected[self.event_index];
        self.event_index += 1;

        let step = MatchStep::classify(log_matches(log, expected), expected.is_optional());
        match step {
            MatchStep::Matched => {
                self.consumed += 1;
                self.log_index += 1;
            }
            MatchStep::SkippedOptional => {}
            MatchStep::MissedRequired => {
                self.unsatisfied.push(expected);
                self.log_index += 1;
            }
        }

        trace!(
            target: "omnibus::matcher",
            event = %expected,
            log_index = self.log_index,
            ?step,
            "Matched expectation against log",
        );
        Some(step)
    }

    /// Runs the scan to completion and returns its result.
    pub fn finish(mut self) -> MatchResult<'e> {
        while self.step().is_some() {}
        MatchResult { consumed: self.consumed, unsatisfied: self.unsatisfied }
    }
}

/// Matches `logs` against `expected` in order.
///
/// Mismatches are reported through [`MatchResult::unsatisfied`]; the engine itself never fails.
pub fn match_logs_to_events<'e>(logs: &[Log], expected: &'e [ExpectedEvent]) -> MatchResult<'e> {
    LogMatcher::new(logs, expected).finish()
}
