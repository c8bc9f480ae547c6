//! # listfn Utilities
//!
//! Shared utilities and logging for listfn.
//!
//! This crate provides the logging setup used by the `listfn` binary, built
//! on `tracing`, `tracing-subscriber` and `tracing-appender`.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
