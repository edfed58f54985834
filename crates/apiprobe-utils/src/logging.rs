/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Apiprobe Logging Module
//!
//! Logger used by the probe. Everything goes to stderr so that stdout only
//! ever carries the status line.
//!
//! ## Usage
//!
//! 1. Initialize the logger:
//!    ```
//!    apiprobe_utils::logging::init("info").expect("Failed to initialize logger");
//!    ```
//!
//! 2. Use the log macros throughout your code:
//!    ```
//!    use apiprobe_utils::logging::prelude::*;
//!
//!    debug!("This is a debug message");
//!    info!("This is an info message");
//!    warn!("This is a warning message");
//!    error!("This is an error message");
//!    ```
//!
//! 3. Apply configured settings once they are known; the logger is only
//!    installed on the first call:
//!    ```
//!    apiprobe_utils::logging::init_with_format("debug", "json").expect("Failed to apply log settings");
//!    ```
//!
//! ## Log Levels
//!
//! - "off": Turn off all logging
//! - "error": Log only errors
//! - "warn": Log warnings and errors
//! - "info": Log info, warnings, and errors (default)
//! - "debug": Log debug messages and all above
//! - "trace": Log trace messages and all above

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

pub use log::{debug, error, info, trace, warn};

static LOGGER: ProbeLogger = ProbeLogger;
static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(LevelFilter::Info as u8);
static JSON_FORMAT: AtomicBool = AtomicBool::new(false);
static INIT: OnceCell<()> = OnceCell::new();

/// Custom logger for the probe
pub struct ProbeLogger;

impl log::Log for ProbeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= level_filter_from_u8(CURRENT_LEVEL.load(Ordering::Relaxed))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record, JSON_FORMAT.load(Ordering::Relaxed)));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record, json: bool) -> String {
    if json {
        serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "level": record.level().to_string().to_lowercase(),
            "target": record.target(),
            "message": format!("{}", record.args()),
            "module": record.module_path(),
            "file": record.file(),
            "line": record.line()
        })
        .to_string()
    } else {
        format!(
            "{} - {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    }
}

/// Initializes the logging system with the specified log level and text output.
///
/// # Arguments
/// * `level` - String representation of the log level ("debug", "info", "warn", "error")
///
/// # Error Cases
/// - Another logger was installed in this process before ours
pub fn init(level: &str) -> Result<(), SetLoggerError> {
    init_with_format(level, "text")
}

/// Initializes the logging system with the specified log level and format.
///
/// Safe to call more than once: later calls only change level and format.
///
/// # Arguments
/// * `level` - String representation of the log level ("debug", "info", "warn", "error")
/// * `format` - Log output format ("text" for human-readable, "json" for structured JSON)
pub fn init_with_format(level: &str, format: &str) -> Result<(), SetLoggerError> {
    let level_filter = str_to_level_filter(level);
    let use_json = format.eq_ignore_ascii_case("json");

    INIT.get_or_try_init(|| log::set_logger(&LOGGER))?;

    JSON_FORMAT.store(use_json, Ordering::Relaxed);
    CURRENT_LEVEL.store(level_filter as u8, Ordering::Relaxed);
    log::set_max_level(level_filter);
    Ok(())
}

fn str_to_level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn level_filter_from_u8(v: u8) -> LevelFilter {
    match v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        5 => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

pub mod prelude {
    pub use log::{debug, error, info, trace, warn};
}
