//! Subscriber setup for the `finora` binary.
//!
//! A bare level such as `info` is scoped to the finora crates; everything
//! else (reqwest, hyper, mio) stays at `warn`. `RUST_LOG` replaces the
//! configured filter entirely.

use finora_core::api::{CliError, LoggingConfig};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const FINORA_TARGETS: &[&str] = &["finora", "finora_core", "finora_plugins", "finora_cli"];
const LOG_FILE_PREFIX: &str = "finora.log";

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

/// Expand a configured level into filter directives.
///
/// Anything that already looks like a directive list is passed through.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return filter_directives("info");
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let mut directives = vec!["warn".to_string()];
    directives.extend(FINORA_TARGETS.iter().map(|t| format!("{t}={level}")));
    directives.join(",")
}

/// Directory the rolling log file goes to; `None` when file output is off.
pub fn log_dir(logging: &LoggingConfig) -> Option<PathBuf> {
    if !logging.file {
        return None;
    }
    let dir = logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("finora"));
    Some(dir)
}

fn build_filter(logging: &LoggingConfig) -> Result<EnvFilter, CliError> {
    match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => Ok(EnvFilter::from_default_env()),
        _ => EnvFilter::try_new(filter_directives(&logging.level))
            .map_err(|e| CliError::Config(format!("invalid logging.level: {e}"))),
    }
}

fn file_writer(
    logging: &LoggingConfig,
) -> Result<Option<tracing_appender::non_blocking::NonBlocking>, CliError> {
    let Some(dir) = log_dir(logging) else {
        return Ok(None);
    };
    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Ok(Some(writer))
}

pub fn init(logging: &LoggingConfig) -> Result<(), CliError> {
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err(CliError::Config(
            "logging is enabled but both console and file output are off".to_string(),
        ));
    }

    let filter = build_filter(logging)?;
    let file_layer = file_writer(logging)?.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
            .with_target(true)
    });
    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .without_time()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_is_scoped_to_finora() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("finora_core=debug"));
        assert!(directives.contains("finora=debug"));
        assert!(!directives.contains("reqwest"));
    }

    #[test]
    fn test_directive_list_passes_through() {
        assert_eq!(filter_directives("finora=trace,hyper=info"), "finora=trace,hyper=info");
        assert_eq!(filter_directives("  "), filter_directives("info"));
    }

    #[test]
    fn test_log_dir_defaults_to_temp() {
        let logging = LoggingConfig {
            file: true,
            directory: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(log_dir(&logging), Some(std::env::temp_dir().join("finora")));
        let off = LoggingConfig {
            file: false,
            ..Default::default()
        };
        assert_eq!(log_dir(&off), None);
    }

    #[test]
    fn test_unusable_log_dir_is_io_error() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let logging = LoggingConfig {
            enabled: true,
            file: true,
            directory: Some(blocker.path().join("logs").display().to_string()),
            ..Default::default()
        };
        let err = init(&logging).unwrap_err();
        assert!(matches!(err, CliError::Io(_)), "got {err:?}");
    }

    #[test]
    fn test_no_output_is_config_error() {
        let logging = LoggingConfig {
            enabled: true,
            console: false,
            file: false,
            ..Default::default()
        };
        assert!(matches!(init(&logging), Err(CliError::Config(_))));
    }
}
