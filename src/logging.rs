use std::{fs::OpenOptions, io, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LogTarget {
    /// Logging is off.
    Disabled,
    /// Log to stderr.
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub(crate) struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub target: LogTarget,
}

impl LogConfig {
    /// Pick a target: the terminal belongs to the hero unless running in plain mode.
    pub(crate) fn new(level: String, file: Option<PathBuf>, plain: bool) -> Self {
        let target = match (file, plain) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Disabled,
        };
        Self { level, target }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum LogError {
    #[error("failed to open log file {path}: {source}")]
    OpenFile { path: PathBuf, source: io::Error },

    #[error("invalid log level {0:?}")]
    InvalidLevel(String),

    #[error("failed to install logger: {0}")]
    Init(String),
}

/// Install the global subscriber.
pub(crate) fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|_| LogError::InvalidLevel(config.level.clone()))?,
    };
    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => registry.with(fmt::layer().compact().with_writer(io::stderr)).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LogError::OpenFile { path: path.clone(), source })?;
            registry.with(fmt::layer().with_ansi(false).with_target(true).with_writer(file)).try_init()
        }
    };
    result.map_err(|e| LogError::Init(e.to_string()))
}
