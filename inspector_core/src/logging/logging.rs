// inspector_core/src/logging/logging.rs
use crate::storage::inspector_config::LoggingConfig;
use flexi_logger::*;
use log::Record;
use once_cell::sync::Lazy;
use std::io::{Result, Write};
use std::sync::Mutex;

// Most recent onscreen message.
pub static LAST_LOG: Lazy<Mutex<String>> = Lazy::new(|| Mutex::new(String::new()));

/// Logs a message and keeps it as the last onscreen message,
/// so hosts can show it in a status line.
#[macro_export]
macro_rules! onscreen_log {
    ($lvl:expr, $($arg:tt)*) => {{
        log::log!($lvl, $($arg)*);
        if let Ok(mut buf) = $crate::logging::logging::LAST_LOG.lock() {
            *buf = format!($($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! onscreen_info  { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Info,  $($arg)*) }; }

#[macro_export]
macro_rules! onscreen_warn  { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Warn,  $($arg)*) }; }

#[macro_export]
macro_rules! onscreen_error { ($($arg:tt)*) => { $crate::onscreen_log!(log::Level::Error, $($arg)*) }; }

/// The last message logged through the onscreen macros.
pub fn last_log() -> String {
    LAST_LOG.lock().map(|buf| buf.clone()).unwrap_or_default()
}

/// Initializes the file logger. Keep the handle alive for as long as
/// messages should be written.
pub fn init_file_logger(config: &LoggingConfig) -> std::result::Result<LoggerHandle, FlexiLoggerError> {
    let log_dir = config.log_dir();

    let file_spec = FileSpec::default()
        .directory(&log_dir)
        .basename(&config.basename)
        .suffix("log");

    let handle = Logger::try_with_str(&config.level)?
        .log_to_file(file_spec)
        .format(inspector_formatter)
        .rotate(
            Criterion::Size(config.rotate_bytes),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.keep_files),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()?;

    onscreen_info!("Log dir: {}.", log_dir.display());
    Ok(handle)
}

fn inspector_formatter(write: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> Result<()> {
    write!(
        write,
        "{} {:5} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unknown>"),
        &record.args()
    )
}
