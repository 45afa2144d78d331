//! `log` backend writing to the browser console.
//!
//! # Invariants
//! - Initialization is idempotent for an identical level.
//! - Re-initialization with a different level is rejected.

use folio_core::LogLevel;
use log::{Level, Log, Metadata, Record};
use std::sync::OnceLock;
use wasm_bindgen::JsValue;

static LOGGER: ConsoleLogger = ConsoleLogger;
static ACTIVE_LEVEL: OnceLock<LogLevel> = OnceLock::new();

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Routes `log` records to `console.*` at `level`.
pub fn init_console_logging(level: &str) -> Result<(), String> {
    let level = LogLevel::parse(level)?;
    let active = *ACTIVE_LEVEL.get_or_init(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level.to_filter());
        }
        level
    });
    if active != level {
        return Err(format!(
            "console logging already initialized with level `{}`; refusing to switch to `{}`",
            active.as_str(),
            level.as_str()
        ));
    }
    Ok(())
}
