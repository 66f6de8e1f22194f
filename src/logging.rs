// Conditional logging macros - only active in debug builds

use crate::error::AppError;
use log::LevelFilter;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_DIR_NAME: &str = "pokeguess";
const LOG_FILE_NAME: &str = "pokeguess.log";

/// Where the log file lives, e.g. `~/.local/share/pokeguess/pokeguess.log`.
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

fn open_log_file(path: &PathBuf) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Sends log output to the log file so it does not garble the terminal UI.
/// Falls back to stderr when no file can be opened. `RUST_LOG` wins over
/// `level` when set.
pub fn init_logging(level: LevelFilter) -> Result<Option<PathBuf>, AppError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let path = log_file_path();
    let file = path.as_ref().and_then(|p| open_log_file(p).ok());
    let used_path = match file {
        Some(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            path
        }
        None => None,
    };

    builder
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;
    Ok(used_path)
}
