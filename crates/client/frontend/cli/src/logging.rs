//! File logging for the terminal client.
//!
//! The TUI owns the terminal, so logs go only to
//! `<cache dir>/crypto-devs-ico/logs/<session>/client.log`.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const APP_NAME: &str = "crypto-devs-ico";
pub const LOG_FILE_NAME: &str = "client.log";

/// Platform cache directory for logs.
///
/// - macOS: `~/Library/Caches/crypto-devs-ico/logs`
/// - Linux: `~/.cache/crypto-devs-ico/logs` (or `$XDG_CACHE_HOME/...`)
/// - Windows: `%LOCALAPPDATA%\crypto-devs-ico\cache\logs`
/// - Fallback: `/tmp/crypto-devs-ico/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp").join(APP_NAME))
        .join("logs")
}

/// `ICO_SESSION_ID` when set, otherwise `session_<unix seconds>`.
pub fn resolve_session_id(session_id: Option<String>) -> String {
    session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{}", timestamp)
        })
}

/// Create `<base>/<session_id>` and return it.
pub fn prepare_session_dir(base: &Path, session_id: &str) -> Result<PathBuf> {
    let dir = base.join(session_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    Ok(dir)
}

/// Install the global subscriber writing to the session log file.
///
/// `RUST_LOG` refines the filter; INFO is always enabled. Keep the returned
/// guard alive for the lifetime of the program or buffered lines are lost.
pub fn setup_logging(session_id: Option<String>) -> Result<WorkerGuard> {
    let session_id = resolve_session_id(session_id);
    let session_dir = prepare_session_dir(&log_dir(), &session_id)?;

    let file_appender = tracing_appender::rolling::never(&session_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}", session_dir.join(LOG_FILE_NAME).display());

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_session_id_wins() {
        assert_eq!(resolve_session_id(Some("demo".into())), "demo");
        assert!(resolve_session_id(Some("  ".into())).starts_with("session_"));
        assert!(resolve_session_id(None).starts_with("session_"));
    }

    #[test]
    fn creates_nested_session_directory() {
        let base = tempfile::tempdir().unwrap();
        let dir = prepare_session_dir(&base.path().join("logs"), "abc").unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("logs/abc"));
    }

    #[test]
    fn log_dir_ends_in_logs() {
        assert!(log_dir().ends_with("logs"));
    }
}
