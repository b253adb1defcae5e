//! # Logging Utilities
//!
//! Logging setup for symdecl tools and tests, built on `tracing`.
//!
//! Supports:
//! - Pretty console output for development, JSON for machine consumption
//! - Filtering through `RUST_LOG`
//! - An optional daily-rolled log file next to the console output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use symdecl_utils::init_logging;
//!
//! // Keep the guard alive for as long as the log file should be written
//! let _guard = init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("parsing SYM stream");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Filter directives (e.g. `RUST_LOG=debug`, `RUST_LOG=symdecl_core=trace`)
//! - `SYMDECL_LOG_FORMAT`: `pretty` (default) or `json`
//! - `SYMDECL_LOG_FILE`: Optional log file path, rolled daily; if it names an
//!   existing directory, a date-stamped `symdecl.log` is written inside it
//!
//! ## Tests
//!
//! ```rust
//! symdecl_utils::init_test_logging();
//! symdecl_utils::init_test_logging(); // later calls are no-ops
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fs, io};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "SYMDECL_LOG_FORMAT";

/// Environment variable naming the optional log file.
pub const LOG_FILE_ENV: &str = "SYMDECL_LOG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Human-readable output (default)
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel
{
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    /// Per-record events from the parser passes
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig
{
    /// Used when `RUST_LOG` is unset or unparsable
    pub level: LogLevel,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl LogConfig
{
    /// Read the configuration from the environment.
    ///
    /// `RUST_LOG` may hold full filter directives, so a value that is not a
    /// plain level only falls back to `info` here; the subscriber still
    /// applies the directives.
    ///
    /// ## Errors
    ///
    /// Returns [`LoggingError::InvalidFormat`] if `SYMDECL_LOG_FORMAT` is set
    /// to an unknown format.
    pub fn from_env() -> Result<Self, LoggingError>
    {
        let format = match env::var(LOG_FORMAT_ENV) {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };
        let level = env::var("RUST_LOG")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let file = env::var_os(LOG_FILE_ENV).map(PathBuf::from);

        Ok(Self { level, format, file })
    }
}

/// Keeps the background log-file writer alive; dropping it flushes and stops
/// file output.
#[derive(Debug)]
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment
///
/// ## Errors
///
/// Returns an error if:
/// - `SYMDECL_LOG_FORMAT` is invalid
/// - A global subscriber is already installed
/// - The log file directory cannot be created
pub fn init_logging() -> Result<LoggingGuard, LoggingError>
{
    init_with_config(&LogConfig::from_env()?)
}

/// Initialize logging with an explicit level and format
///
/// `RUST_LOG` still overrides the level, and `SYMDECL_LOG_FILE` still adds a
/// file output.
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// file directory cannot be created.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    init_with_config(&LogConfig {
        level,
        format,
        file: env::var_os(LOG_FILE_ENV).map(PathBuf::from),
    })
}

/// Install a subscriber writing through the test harness capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    // Already installed by an earlier test in this binary.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// Date-stamped log file path inside `dir`, e.g. `2026-01-31-symdecl.log`.
pub fn default_log_file(dir: &Path) -> PathBuf
{
    let today = Utc::now().format("%Y-%m-%d");
    dir.join(format!("{today}-symdecl.log"))
}

/// Where file output goes for a given `SYMDECL_LOG_FILE` value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogFileTarget
{
    /// The value names a directory: one date-stamped file inside it.
    Dated(PathBuf),
    /// The value names a file: rolled daily by the appender.
    Rolling(PathBuf),
}

fn log_file_target(path: &Path) -> LogFileTarget
{
    if path.is_dir() {
        LogFileTarget::Dated(default_log_file(path))
    } else {
        LogFileTarget::Rolling(path.to_path_buf())
    }
}

fn init_with_config(config: &LogConfig) -> Result<LoggingGuard, LoggingError>
{
    let mut layers = vec![console_layer(config.format, env_filter(config.level))];
    let mut guard = None;
    if let Some(path) = &config.file {
        let (layer, file_guard) = file_layer(config.format, env_filter(config.level), path)?;
        layers.push(layer);
        guard = Some(file_guard);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;
    Ok(LoggingGuard { _file: guard })
}

fn env_filter(default_level: LogLevel) -> EnvFilter
{
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::from(default_level).to_string()))
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stderr);

    match format {
        LogFormat::Pretty => layer.with_ansi(true).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn file_layer(format: LogFormat, filter: EnvFilter, path: &Path) -> Result<(BoxedLayer, WorkerGuard), LoggingError>
{
    let (path, dated) = match log_file_target(path) {
        LogFileTarget::Dated(path) => (path, true),
        LogFileTarget::Rolling(path) => (path, false),
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InitializationFailed(format!("log file path has no file name: {}", path.display())))?;
    fs::create_dir_all(dir)?;

    // The date is already in a dated file's name.
    let appender = if dated {
        rolling::never(dir, file_name)
    } else {
        rolling::daily(dir, file_name)
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false);

    let layer = match format {
        LogFormat::Pretty => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    };
    Ok((layer, guard))
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    #[error("Invalid log format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    #[error("Invalid log level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// A global subscriber is already set, or the configuration is unusable
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
