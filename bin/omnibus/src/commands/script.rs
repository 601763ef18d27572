//! Script Subcommand

use crate::flags::OmnibusArgs;
use anyhow::{Context, Result};
use clap::Parser;
use omnibus_actions::Omnibus;

/// The `script` Subcommand
///
/// The `script` subcommand prints the vote description followed by the `CallsScript` encoded
/// script the vote executes.
///
/// # Usage
///
/// ```sh
/// omnibus script --registry <TOML> --omnibus <TOML>
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Prints the description and the encoded script of an omnibus vote")]
pub struct ScriptCommand {
    /// The omnibus to encode.
    #[command(flatten)]
    pub omnibus: OmnibusArgs,
}

impl ScriptCommand {
    /// Runs the subcommand.
    pub fn run(self) -> Result<()> {
        let omnibus = self.omnibus.load()?;
        println!("{}", render(&omnibus)?);
        Ok(())
    }
}

fn render(omnibus: &Omnibus) -> Result<String> {
    let script = omnibus.vote_script().context("Failed to encode the vote script")?;
    Ok(format!("{}\n\n{}", omnibus.description(), script))
}
