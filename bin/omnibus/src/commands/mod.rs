//! Contains subcommands for the omnibus CLI.

mod check;
pub use check::CheckCommand;

mod script;
pub use script::ScriptCommand;
