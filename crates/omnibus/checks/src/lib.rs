#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

extern crate alloc;

mod errors;
pub use errors::{
    CheckFailure, ConfigurationError, HookError, MatchFailure, OmnibusCheckError,
    UnexpectedLogError,
};

mod expectation;
pub use expectation::{ArgSpec, EventParams, ExpectedEvent, event};

mod matcher;
pub use matcher::{LogMatcher, MatchResult, MatchStep, log_matches, match_logs_to_events};

mod checker;
pub use checker::{ActionReport, CheckReport, OmnibusEventChecker, VOTE_EXECUTION};

mod action;
pub use action::{HookCheck, HookCtx, OmnibusAction, StateProvider};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_util;
