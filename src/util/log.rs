// src/util/log.rs

//! Logger Utility - file-based logging, since stdout belongs to the terminal UI
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use chrono::Local;

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Global logger instance, set once by [`init`]. Until then the macros are no-ops.
pub static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    const ALL: [LogLevel; 4] = [LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug];

    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn filename(&self) -> String {
        format!("{}.log", self.as_str().to_lowercase())
    }
}

/// One file per severity under `log_dir`, truncated on start.
pub struct Logger {
    log_dir: PathBuf,
    files: Vec<Mutex<File>>,
}

impl Logger {
    pub fn new(log_dir: &Path) -> std::io::Result<Self> {
        create_dir_all(log_dir)?;

        let files = LogLevel::ALL
            .iter()
            .map(|level| File::create(log_dir.join(level.filename())).map(Mutex::new))
            .collect::<std::io::Result<Vec<_>>>()?;

        Ok(Self {
            log_dir: log_dir.to_path_buf(),
            files,
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn write_log(&self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        // Errors are mirrored into info.log
        let targets: &[LogLevel] = match level {
            LogLevel::Error => &[LogLevel::Error, LogLevel::Info],
            LogLevel::Warn => &[LogLevel::Warn],
            LogLevel::Info => &[LogLevel::Info],
            LogLevel::Debug => &[LogLevel::Debug],
        };

        for target in targets {
            if let Ok(mut file) = self.files[*target as usize].lock() {
                let _ = file.write_all(line.as_bytes());
                let _ = file.flush();
            }
        }
    }
}

/// Install the global logger. A second call keeps the first logger.
pub fn init(log_dir: &Path, debug: bool) -> std::io::Result<()> {
    DEBUG_ENABLED.get_or_init(|| debug);
    if LOGGER.get().is_none() {
        let _ = LOGGER.set(Logger::new(log_dir)?);
    }
    Ok(())
}

pub fn write(level: LogLevel, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.write_log(level, message);
    }
}

pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get().unwrap_or(&false)
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::write($crate::util::log::LogLevel::Error, &message);
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::write($crate::util::log::LogLevel::Warn, &message);
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::write($crate::util::log::LogLevel::Info, &message);
    }};
}

/// Convenience macro for debug logging with formatting
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if $crate::util::log::debug_enabled() {
            let message = format!($($arg)*);
            $crate::util::log::write($crate::util::log::LogLevel::Debug, &message);
        }
    }};
}
