//! File logging. The terminal belongs to the UI, so nothing goes to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "folio.log";

/// Default log location in the platform data directory.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
}

/// Install the global subscriber. Keep the guard alive until exit.
pub fn init(path: Option<&Path>) -> color_eyre::Result<WorkerGuard> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or_else(|| eyre!("no data directory for the log file"))?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .wrap_err("installing the log subscriber")?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_config::Config;

    #[test]
    fn test_config_load_is_logged() {
        let dir = std::env::temp_dir().join(format!("folio-logging-{}", std::process::id()));
        let log_path = dir.join("logs").join(LOG_FILE_NAME);
        let config_path = dir.join("config.toml");
        Config::default().save(&config_path).unwrap();

        let guard = init(Some(&log_path)).unwrap();
        Config::load(&config_path).unwrap();
        drop(guard);

        let log = fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("logging started"));
        assert!(log.contains("loaded config"));
        fs::remove_dir_all(&dir).ok();
    }
}
