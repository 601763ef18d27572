//! Logging arguments and their resolved configuration.

use crate::LogFormat;
use clap::{ArgAction, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Global logging arguments.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity: unset logs warnings and errors, `-v` adds info, `-vv` debug, `-vvv` trace.
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count, global = true)]
    pub level: u8,
    /// Silences all log output.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "level")]
    pub quiet: bool,
    /// The format of the logs printed to stdout.
    #[arg(
        long = "logs.stdout.format",
        env = "OMNIBUS_LOG_STDOUT_FORMAT",
        default_value = "full",
        global = true
    )]
    pub stdout_format: LogFormat,
    /// Directory to additionally write logs to. File logging is off when unset.
    #[arg(long = "logs.file.directory", env = "OMNIBUS_LOG_FILE_DIRECTORY", global = true)]
    pub file_directory: Option<PathBuf>,
    /// The format of the file logs.
    #[arg(long = "logs.file.format", default_value = "full", global = true)]
    pub file_format: LogFormat,
    /// How often the log file is rotated.
    #[arg(long = "logs.file.rotation", default_value = "never", global = true)]
    pub file_rotation: LogRotation,
}

/// Rotation policy of the log file.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum LogRotation {
    /// A new file every minute.
    Minutely,
    /// A new file every hour.
    Hourly,
    /// A new file every day.
    Daily,
    /// A single file.
    #[default]
    Never,
}

/// Configuration of the stdout logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdoutLogConfig {
    /// The log format.
    pub format: LogFormat,
}

/// Configuration of the file logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLogConfig {
    /// The directory the log files are written to.
    pub directory_path: PathBuf,
    /// The log format.
    pub format: LogFormat,
    /// The rotation policy.
    pub rotation: LogRotation,
}

/// The resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// The most verbose level enabled everywhere.
    pub global_level: LevelFilter,
    /// Stdout logging, if enabled.
    pub stdout_logs: Option<StdoutLogConfig>,
    /// File logging, if enabled.
    pub file_logs: Option<FileLogConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global_level: LevelFilter::INFO,
            stdout_logs: Some(StdoutLogConfig::default()),
            file_logs: None,
        }
    }
}

impl LogConfig {
    /// Resolves the command line arguments.
    pub fn new(args: LogArgs) -> Self {
        let global_level = if args.quiet {
            LevelFilter::OFF
        } else {
            match args.level {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };

        let file_logs = args.file_directory.map(|directory_path| FileLogConfig {
            directory_path,
            format: args.file_format,
            rotation: args.file_rotation,
        });

        Self {
            global_level,
            stdout_logs: (!args.quiet).then_some(StdoutLogConfig { format: args.stdout_format }),
            file_logs,
        }
    }
}
