use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub(crate) const TARGET: &str = "cgesp_fetcher";
const LOG_FILENAME: &str = "weather_scraper.log";
#[cfg(unix)]
const LOG_FILE_PERMISSION: u32 = 0o744;

/// Logs everything to stderr (filtered by `RUST_LOG`) and INFO and above to
/// `weather_scraper.log` inside `out_dir`. Returns the log file path.
pub(crate) fn setup_logging(out_dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let log_path = out_dir.join(LOG_FILENAME);
    let file = File::options().create(true).append(true).open(&log_path)?;

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .from_env_lossy(), // Enable log level filtering via `RUST_LOG` env var
        );
    let file = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::INFO);
    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
    debug!(target: TARGET, event = "logging.configured", "Log subscriber set");

    set_permissions(&log_path)?;
    info!(
        target: TARGET,
        event = "logging.ready",
        path = %log_path.display(),
        "Log can be found at {}",
        log_path.display()
    );
    Ok(log_path)
}

#[cfg(unix)]
fn set_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    debug!(target: TARGET, event = "logging.permissions", "Updating log file permission");
    fs::set_permissions(path, fs::Permissions::from_mode(LOG_FILE_PERMISSION))
}

#[cfg(not(unix))]
fn set_permissions(_: &Path) -> std::io::Result<()> {
    Ok(())
}
