//! Logging bootstrap and diagnostic policy.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Emit metadata-only event lines from core operations; item titles,
//!   urls and notes never reach the log.
//!
//! # Invariants
//! - Initialization is idempotent for the same level and directory.
//! - Re-initialization with a conflicting level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "tagurit";
const LOG_ROTATE_BYTES: u64 = 10 * 1024 * 1024;
const LOG_KEEP_FILES: usize = 5;
const PANIC_SUMMARY_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogging {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts rolling file logging at `level` under `log_dir`.
///
/// Repeated calls with the same configuration succeed without effect;
/// calls that would change the level or directory of an active logger
/// are rejected with a descriptive message.
///
/// # Errors
/// - Unsupported `level` value.
/// - Empty or non-absolute `log_dir`, or a directory that cannot be
///   created.
/// - Logger backend startup failure.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = canonical_level(level)?;
    let dir = canonical_dir(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_logger(level, dir.clone()))?;

    if active.dir != dir {
        return Err(format!(
            "logging already writes to `{}`; refusing to switch to `{}`",
            active.dir.display(),
            dir.display()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already runs at level `{}`; refusing to switch to `{}`",
            active.level, level
        ));
    }

    Ok(())
}

/// Returns `(level, directory)` of the active logger, or `None` before
/// initialization.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE.get().map(|active| (active.level, active.dir.clone()))
}

/// Default level per build mode: `debug` for debug builds, `info`
/// otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, dir: PathBuf) -> Result<ActiveLogging, String> {
    std::fs::create_dir_all(&dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(FileSpec::default().directory(&dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(LOG_ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_KEEP_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=core_init module=core status=ok level={} log_dir={} version={}",
        level,
        dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        level,
        dir,
        _handle: handle,
    })
}

fn canonical_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn canonical_dir(log_dir: &str) -> Result<PathBuf, String> {
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

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            summarize_panic(panic_info)
        );
        previous(panic_info);
    }));
}

// Panic payloads can carry user text; strip newlines and cap length
// before the line reaches the log.
fn summarize_panic(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    let flattened = payload.replace(['\n', '\r'], " ");
    let mut summary = flattened.chars().take(PANIC_SUMMARY_CHARS).collect::<String>();
    if flattened.chars().count() > PANIC_SUMMARY_CHARS {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::{canonical_dir, canonical_level, init_logging, logging_status};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "tagurit-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn canonical_level_accepts_known_aliases() {
        assert_eq!(canonical_level("INFO").unwrap(), "info");
        assert_eq!(canonical_level(" warning ").unwrap(), "warn");
        assert!(canonical_level("verbose").is_err());
    }

    #[test]
    fn canonical_dir_rejects_relative_paths() {
        let err = canonical_dir("logs/dev").unwrap_err();
        assert!(err.contains("absolute"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = unique_temp_dir("init");
        let dir_str = dir.to_str().expect("temp dir should be valid UTF-8");
        let other = unique_temp_dir("other");
        let other_str = other.to_str().expect("temp dir should be valid UTF-8");

        init_logging("info", dir_str).expect("first init should succeed");
        init_logging("info", dir_str).expect("same config should be idempotent");

        let level_err = init_logging("debug", dir_str).expect_err("level conflict");
        assert!(level_err.contains("refusing to switch"));

        let dir_err = init_logging("info", other_str).expect_err("directory conflict");
        assert!(dir_err.contains("refusing to switch"));

        let (level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(active_dir, dir);
    }
}
