//! # symdecl Utilities
//!
//! Logging and environment configuration shared by the symdecl crates and
//! their tests.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{
    default_log_file, init_logging, init_logging_with_level, init_test_logging, LogConfig, LogFormat, LogLevel,
    LoggingError, LoggingGuard,
};
pub use tracing::{debug, error, info, trace, warn};
