//! Check Subcommand

use crate::{flags::OmnibusArgs, receipt::Receipt};
use anyhow::{Context, Result};
use clap::Parser;
use omnibus_checks::{CheckReport, VOTE_EXECUTION};
use std::path::PathBuf;
use tracing::info;

/// The `check` Subcommand
///
/// The `check` subcommand matches the logs of an executed vote, in emission order, against the
/// events declared by each action of the omnibus, then the vote execution events. Any missing
/// required event or leftover log fails the check.
///
/// # Usage
///
/// ```sh
/// omnibus check --registry <TOML> --omnibus <TOML> --receipt <JSON>
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Checks the logs of an executed vote against an omnibus")]
pub struct CheckCommand {
    /// The omnibus to check.
    #[command(flatten)]
    pub omnibus: OmnibusArgs,
    /// Path to the JSON receipt of the vote execution transaction.
    #[arg(long, env = "OMNIBUS_RECEIPT")]
    pub receipt: PathBuf,
}

impl CheckCommand {
    /// Runs the subcommand.
    pub fn run(self) -> Result<()> {
        let report = self.check()?;
        println!("{}", render_report(&report));
        Ok(())
    }

    /// Loads the inputs and runs the event check.
    pub fn check(&self) -> Result<CheckReport> {
        let omnibus = self.omnibus.load()?;
        let receipt = Receipt::from_file(&self.receipt)?;
        info!(target: "omnibus", logs = receipt.logs.len(), "Checking vote execution logs");

        let report = omnibus
            .check_events(&receipt.logs)
            .context("Vote execution logs do not match the omnibus")?;
        info!(target: "omnibus", consumed = report.consumed(), "Omnibus event check passed");
        Ok(report)
    }
}

fn render_report(report: &CheckReport) -> String {
    let mut lines: Vec<String> = report
        .actions
        .iter()
        .map(|action| {
            format!(
                "#{} {}: {}/{} log(s)",
                action.index, action.action, action.consumed, action.expected
            )
        })
        .collect();
    lines.push(format!("{VOTE_EXECUTION}: {} log(s)", report.trailing_consumed));
    lines.push(format!("OK: all {} log(s) matched", report.consumed()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::tests::{REGISTRY, TRANSFER, args, temp_file};
    use alloy_primitives::{Address, Bytes, Log, U256, address};
    use omnibus_checks::test_util::log_of;
    use omnibus_contracts::{IERC20, IFinance, IVoting};

    const VOTING: Address = address!("0x2e59A20f205bB85a89C53f1936454680651E618e");
    const AGENT: Address = address!("0x3e40D73EB977Dc6a537aF587D48316feE66E9C8c");
    const FINANCE: Address = address!("0xB9E5CBB9CA5b0d659238807E84D0176930753d86");
    const LDO: Address = address!("0x5A98FcBEA516Cf06857215779Fd812CA3beF1B32");
    const RECIPIENT: Address = address!("0x12a43b049A7D330cB8aEAB5113032D18AE9a9030");

    fn vote_logs() -> Vec<Log> {
        vec![
            log_of(
                FINANCE,
                &IFinance::NewTransaction {
                    transactionId: U256::from(9),
                    incoming: false,
                    entity: RECIPIENT,
                    amount: U256::from(500),
                    reference: "Fund grants".into(),
                },
            ),
            log_of(LDO, &IERC20::Transfer { from: AGENT, to: RECIPIENT, value: U256::from(500) }),
            log_of(
                VOTING,
                &IVoting::ScriptResult {
                    executor: address!("0x5cEb19e1890f677c3676d5ecDF7c501eBA01A054"),
                    script: Bytes::new(),
                    input: Bytes::new(),
                    returnData: Bytes::new(),
                },
            ),
            log_of(VOTING, &IVoting::ExecuteVote { voteId: U256::from(180) }),
        ]
    }

    fn command(logs: Vec<Log>) -> (CheckCommand, [tempfile::NamedTempFile; 3]) {
        let receipt = serde_json::to_string(&Receipt { logs }).unwrap();
        let files = [temp_file(REGISTRY), temp_file(TRANSFER), temp_file(&receipt)];
        let command = CheckCommand {
            omnibus: args(&files[0], &files[1]),
            receipt: files[2].path().into(),
        };
        (command, files)
    }

    #[test]
    fn test_check_passes() {
        let (command, _files) = command(vote_logs());
        let report = command.check().unwrap();
        assert_eq!(report.consumed(), 4);
        assert_eq!(
            render_report(&report),
            "#0 TransferAssets: 2/2 log(s)\nvote execution: 2 log(s)\nOK: all 4 log(s) matched"
        );
    }

    #[test]
    fn test_check_fails_on_missing_transfer() {
        let mut logs = vote_logs();
        logs.remove(1);
        let (command, _files) = command(logs);
        let err = command.check().unwrap_err();
        assert!(format!("{err:#}").contains("ldo.Transfer"), "{err:#}");
    }

    #[test]
    fn test_check_fails_on_extra_log() {
        let mut logs = vote_logs();
        logs.push(log_of(VOTING, &IVoting::ExecuteVote { voteId: U256::from(181) }));
        let (command, _files) = command(logs);
        let err = command.check().unwrap_err();
        assert!(format!("{err:#}").contains("Unexpected logs"), "{err:#}");
    }
}
