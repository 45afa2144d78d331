//! Logging bootstrap and log safety helpers.
//!
//! # Responsibility
//! - Parse log levels shared by every front end (CLI, browser adapter).
//! - Start rolling file logs once per process (`file-logging` feature).
//!
//! # Invariants
//! - Initialization is idempotent for identical settings.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.
//! - Messages use `event=<name> module=<module> status=<status> key=value`.

use std::path::{Path, PathBuf};

/// Log verbosity accepted by `init_logging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parses `trace|debug|info|warn|warning|error`, case-insensitive.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unsupported log level `{other}`; expected trace|debug|info|warn|error"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Default level for the current build mode: `debug` or `info`.
pub fn default_log_level() -> LogLevel {
    if cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

/// Replaces line breaks and caps length so untrusted text stays one line.
pub fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated: String = normalized.chars().take(max_chars).collect();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

/// Timer for `duration_ms` log fields.
///
/// Reads 0 on `wasm32` targets, which have no `Instant` clock.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    started_at: std::time::Instant,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            started_at: std::time::Instant::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn elapsed_ms(&self) -> u128 {
        0
    }
}

#[cfg_attr(not(feature = "file-logging"), allow(dead_code))]
fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

#[cfg(feature = "file-logging")]
pub use file::{init_logging, logging_status};

#[cfg(feature = "file-logging")]
mod file {
    use super::{normalize_log_dir, sanitize_message, LogLevel};
    use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
    use log::{error, info};
    use once_cell::sync::OnceCell;
    use std::path::{Path, PathBuf};

    const LOG_FILE_BASENAME: &str = "folio";
    const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
    const MAX_LOG_FILES: usize = 3;
    const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

    static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
    static PANIC_HOOK: OnceCell<()> = OnceCell::new();

    struct ActiveLogger {
        level: LogLevel,
        log_dir: PathBuf,
        _handle: LoggerHandle,
    }

    impl ActiveLogger {
        fn check_same(&self, level: LogLevel, log_dir: &Path) -> Result<(), String> {
            if self.log_dir.as_path() != log_dir {
                return Err(format!(
                    "logging already initialized at `{}`; refusing to switch to `{}`",
                    self.log_dir.display(),
                    log_dir.display()
                ));
            }
            if self.level != level {
                return Err(format!(
                    "logging already initialized with level `{}`; refusing to switch to `{}`",
                    self.level.as_str(),
                    level.as_str()
                ));
            }
            Ok(())
        }
    }

    /// Starts rolling file logs under `log_dir` (absolute path).
    ///
    /// # Errors
    /// - Unsupported `level`, empty or relative `log_dir`.
    /// - Directory creation or logger backend failure.
    /// - A previous call used a different level or directory.
    pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
        let level = LogLevel::parse(level)?;
        let log_dir = normalize_log_dir(log_dir)?;

        if let Some(active) = ACTIVE.get() {
            return active.check_same(level, &log_dir);
        }

        let active = ACTIVE.get_or_try_init(|| start_logger(level, log_dir.clone()))?;
        active.check_same(level, &log_dir)
    }

    /// `(level, log_dir)` of the active logger, if any.
    pub fn logging_status() -> Option<(LogLevel, PathBuf)> {
        ACTIVE
            .get()
            .map(|active| (active.level, active.log_dir.clone()))
    }

    fn start_logger(level: LogLevel, log_dir: PathBuf) -> Result<ActiveLogger, String> {
        std::fs::create_dir_all(&log_dir).map_err(|err| {
            format!(
                "failed to create log directory `{}`: {err}",
                log_dir.display()
            )
        })?;

        let handle = Logger::try_with_str(level.as_str())
            .map_err(|err| format!("invalid log level `{}`: {err}", level.as_str()))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        install_panic_hook_once();
        info!(
            "event=logging_init module=logging status=ok level={} log_dir={} version={}",
            level.as_str(),
            log_dir.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(ActiveLogger {
            level,
            log_dir,
            _handle: handle,
        })
    }

    fn install_panic_hook_once() {
        if PANIC_HOOK.set(()).is_err() {
            return;
        }
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|message| (*message).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            error!(
                "event=panic_captured module=logging status=error location={} payload={}",
                location,
                sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
            );
            previous_hook(panic_info);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_log_dir, sanitize_message, LogLevel};

    #[test]
    fn level_parse_accepts_aliases_and_case() {
        assert_eq!(LogLevel::parse(" WARNING ").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::parse("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::parse("verbose").is_err());
    }

    #[test]
    fn log_dir_must_be_absolute() {
        let error = normalize_log_dir("logs/dev").unwrap_err();
        assert!(error.contains("absolute"));
        assert!(normalize_log_dir("  ").is_err());
    }

    #[test]
    fn sanitize_flattens_and_truncates() {
        let sanitized = sanitize_message("a\nb\rc-long-tail", 5);
        assert_eq!(sanitized, "a b c...");
    }

    #[cfg(feature = "file-logging")]
    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        use super::{init_logging, logging_status};

        let dir = tempfile::tempdir().expect("temp dir");
        let other = tempfile::tempdir().expect("temp dir");
        let dir_str = dir.path().to_str().expect("utf-8 path").to_string();
        let other_str = other.path().to_str().expect("utf-8 path").to_string();

        init_logging("info", &dir_str).expect("first init");
        init_logging("INFO", &dir_str).expect("same settings are idempotent");

        let level_err = init_logging("debug", &dir_str).unwrap_err();
        assert!(level_err.contains("refusing to switch"));
        let dir_err = init_logging("info", &other_str).unwrap_err();
        assert!(dir_err.contains("refusing to switch"));

        let (level, active_dir) = logging_status().expect("active logger");
        assert_eq!(level, LogLevel::Info);
        assert_eq!(active_dir, dir.path());
    }
}
