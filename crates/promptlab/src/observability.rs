//! Logging setup for the CLI.
//!
//! Events are written as JSON lines through a non-blocking appender. The log
//! file location is resolved from, in order: `PROMPTLAB_LOG_PATH`,
//! `PROMPTLAB_LOG_DIR`, the configured `log_dir`, then the platform data
//! directory. Stdout is never used, since `serve` speaks MCP over it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "PROMPTLAB_LOG_PATH";
const LOG_DIR_ENV: &str = "PROMPTLAB_LOG_DIR";
const LOG_FILE_NAME: &str = "promptlab.jsonl";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to `dir/file_name`.
    File {
        /// Directory holding the log file.
        dir: PathBuf,
        /// Log file name.
        file_name: String,
    },
    /// No usable directory; write to stderr.
    Stderr,
}

/// Resolved logging destination.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log destination.
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Resolve the log destination from the environment, falling back to the
    /// configured directory and then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let data_dir = promptlab_core::config::user_data_dir()
            .map(|dir| dir.join("logs").into_std_path_buf());
        Self {
            target: resolve_target(
                non_empty_env(LOG_PATH_ENV),
                non_empty_env(LOG_DIR_ENV),
                config_log_dir,
                data_dir,
            ),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn resolve_target(
    log_path: Option<String>,
    log_dir: Option<String>,
    config_log_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> LogTarget {
    if let Some(path) = log_path {
        let path = PathBuf::from(path);
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(LOG_FILE_NAME)
            .to_string();
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        return LogTarget::File { dir, file_name };
    }

    log_dir
        .map(PathBuf::from)
        .or(config_log_dir)
        .or(data_dir)
        .map_or(LogTarget::Stderr, |dir| LogTarget::File {
            dir,
            file_name: LOG_FILE_NAME.to_string(),
        })
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` forces `error`, `-v` and
/// `-vv` select `debug` and `trace`, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(quiet, verbose, default_level)))
}

fn filter_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered events on drop; keep it alive for the
/// whole run.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = match &config.target {
        LogTarget::File { dir, file_name } if std::fs::create_dir_all(dir).is_ok() => {
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        _ => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(writer),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
