//! Structured logging for the path report
//!
//! Console output goes to stderr (stdout carries the report). A JSON copy is
//! written to a daily rotating file under `<config dir>/epg-paths/logs/`.

pub mod macros;

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const APP_DIR: &str = "epg-paths";
const LOG_FILE_PREFIX: &str = "epg-paths.log";

/// Initialize the logging system
///
/// Set `RUST_LOG` to change the level (default `info`), e.g. `RUST_LOG=debug`
/// to see every request URL.
pub fn init_logging() -> Result<PathBuf, Box<dyn std::error::Error>> {
    init_logging_at(get_log_directory())
}

/// Install the console layer, plus the JSON file layer when `log_dir` is usable.
///
/// A log directory that cannot be resolved or created is reported as an error
/// only after the console layer is in place, so errors still reach stderr.
pub fn init_logging_at(
    log_dir: Result<PathBuf, Box<dyn std::error::Error>>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = log_dir.and_then(|dir| {
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = log_dir.as_ref().ok().map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false) // No ANSI colors in file
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .json()
    });

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let init_result = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = init_result {
        // Another subscriber (tests, embedding app) already owns the global slot.
        if !e.to_string().contains("already been set") {
            return Err(Box::new(e));
        }
    }

    let log_dir = log_dir?;
    tracing::debug!("Logging initialized. Log directory: {}", log_dir.display());

    Ok(log_dir)
}

/// `~/.config/epg-paths/logs` on Linux/macOS, `%LOCALAPPDATA%/epg-paths/logs` on Windows
fn get_log_directory() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .ok_or("Could not find APPDATA directory")?
            .join(APP_DIR)
    } else {
        dirs::config_dir()
            .ok_or("Could not find config directory")?
            .join(APP_DIR)
    };

    Ok(base_dir.join("logs"))
}

/// Path of today's log file
pub fn get_current_log_file() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = get_log_directory()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("{}.{}", LOG_FILE_PREFIX, today)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_layout() {
        let Ok(log_dir) = get_log_directory() else {
            // No HOME in some CI sandboxes.
            return;
        };
        assert!(log_dir.to_string_lossy().contains(APP_DIR));
        assert!(log_dir.ends_with("logs"));
    }

    #[test]
    fn unusable_log_directory_still_installs_console_logging() {
        // A regular file cannot have children, so `create_dir_all` fails on any platform.
        let blocker = std::env::temp_dir().join(format!("epg-paths-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = init_logging_at(Ok(blocker.join("logs")));
        std::fs::remove_file(&blocker).ok();

        assert!(result.is_err());
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn current_log_file_is_dated() {
        if let Ok(path) = get_current_log_file() {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            assert!(name.starts_with("epg-paths.log."));
        }
    }
}
