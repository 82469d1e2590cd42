//! Log file setup.
//!
//! The terminal belongs to the UI, so logs go to a file and only when
//! `NIGHTSKY_LOG` is set, e.g. `NIGHTSKY_LOG=nightsky_background=debug`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use nightsky_config::Config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "NIGHTSKY_LOG";

/// Name of the log file inside the data directory.
const LOG_FILE: &str = "nightsky.log";

/// Install the file logger. Returns the log path when logging is enabled.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    if std::env::var_os(LOG_ENV).is_none() {
        return Ok(None);
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = match Config::project_dirs() {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => std::env::temp_dir(),
    };
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    Ok(Some(path))
}
