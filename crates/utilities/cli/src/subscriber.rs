//! [tracing_subscriber] utilities.

use crate::{LogConfig, LogRotation};
use serde::{Deserialize, Serialize};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// The file name prefix of rolled log files.
const LOG_FILE_NAME: &str = "omnibus.log";

/// The format of the logs.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum LogFormat {
    /// Full format (default).
    #[default]
    Full,
    /// JSON format.
    Json,
    /// Pretty format.
    Pretty,
    /// Compact format.
    Compact,
}

impl LogRotation {
    fn appender(&self, directory: &std::path::Path) -> RollingFileAppender {
        match self {
            Self::Minutely => tracing_appender::rolling::minutely(directory, LOG_FILE_NAME),
            Self::Hourly => tracing_appender::rolling::hourly(directory, LOG_FILE_NAME),
            Self::Daily => tracing_appender::rolling::daily(directory, LOG_FILE_NAME),
            Self::Never => tracing_appender::rolling::never(directory, LOG_FILE_NAME),
        }
    }
}

impl LogConfig {
    /// Initializes the global tracing subscriber.
    ///
    /// `env_filter` defaults to the `RUST_LOG` environment filter. The configured global level
    /// is added on top of it as a directive.
    pub fn init_tracing_subscriber(
        &self,
        env_filter: Option<EnvFilter>,
    ) -> Result<(), TryInitError> {
        let file_layer = self.file_logs.as_ref().map(|file_logs| {
            let appender = file_logs.rotation.appender(&file_logs.directory_path);
            match file_logs.format {
                LogFormat::Full => tracing_subscriber::fmt::layer().with_writer(appender).boxed(),
                LogFormat::Json => {
                    tracing_subscriber::fmt::layer().json().with_writer(appender).boxed()
                }
                LogFormat::Pretty => {
                    tracing_subscriber::fmt::layer().pretty().with_writer(appender).boxed()
                }
                LogFormat::Compact => {
                    tracing_subscriber::fmt::layer().compact().with_writer(appender).boxed()
                }
            }
        });

        let stdout_layer = self.stdout_logs.as_ref().map(|stdout_logs| match stdout_logs.format {
            LogFormat::Full => tracing_subscriber::fmt::layer().boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
            LogFormat::Compact => tracing_subscriber::fmt::layer().compact().boxed(),
        });

        let env_filter = env_filter
            .unwrap_or_else(EnvFilter::from_default_env)
            .add_directive(self.global_level.into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stdout_layer)
            .try_init()?;

        tracing::debug!(
            target: "omnibus::cli",
            level = %self.global_level,
            file_logs = self.file_logs.is_some(),
            "Initialized tracing subscriber",
        );
        Ok(())
    }
}
