//! Contains the omnibus CLI.

use crate::commands::{CheckCommand, ScriptCommand};
use anyhow::Result;
use clap::{Parser, Subcommand};
use omnibus_cli::{LogArgs, LogConfig};
use tracing_subscriber::EnvFilter;

/// Subcommands for the CLI.
#[derive(Debug, PartialEq, Eq, Clone, Subcommand)]
pub enum Commands {
    /// Checks the logs of an executed vote against an omnibus.
    #[command(alias = "c")]
    Check(CheckCommand),
    /// Prints the description and the encoded script of an omnibus vote.
    #[command(alias = "s")]
    Script(ScriptCommand),
}

/// The omnibus CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
    /// Global log arguments.
    #[command(flatten)]
    pub global: LogArgs,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        self.init_logs()?;

        match self.subcommand {
            Commands::Check(check) => check.run(),
            Commands::Script(script) => script.run(),
        }
    }

    /// Initializes the tracing subscriber from the global log arguments.
    pub fn init_logs(&self) -> Result<()> {
        let filter = EnvFilter::from_default_env();
        LogConfig::new(self.global.clone()).init_tracing_subscriber(Some(filter))?;
        Ok(())
    }
}
