//! `log_*` macros for epg-paths
//!
//! Everything the report prints besides the report itself (progress, skipped
//! records, fatal errors) goes through these, so it lands on stderr and in the
//! JSON log file set up by [`init_logging`](super::init_logging).

/// Progress line for the operator, at info level
#[macro_export]
macro_rules! log_stderr {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*);
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*);
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!($($arg)*);
    };
}
