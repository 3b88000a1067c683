pub mod cleanup;
pub mod config;
pub mod paths;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use config::LogConfig;

/// Initialize logging: compact console output on stderr plus an optional
/// JSON application log rotated daily
///
/// The returned guard flushes the file writer when dropped, so keep it
/// alive for the lifetime of the program. When the log directory cannot be
/// used, console logging is still installed and `None` is returned.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    // Console output goes to stderr so stdout stays clean for results
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(EnvFilter::new(&config.console_log_level));

    if !config.file_enabled {
        tracing_subscriber::registry().with(console_layer).try_init()?;
        return Ok(None);
    }

    let log_dir = match paths::get_log_directory(config.custom_log_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            tracing_subscriber::registry().with(console_layer).try_init()?;
            tracing::warn!(error = %e, "Log directory unavailable, logging to console only");
            return Ok(None);
        }
    };

    let app_appender = tracing_appender::rolling::daily(&log_dir, cleanup::LOG_FILE_PREFIX);
    let (app_writer, guard) = tracing_appender::non_blocking(app_appender);

    let app_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(app_writer)
        .with_filter(EnvFilter::new(&config.file_log_level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(app_layer)
        .try_init()?;

    tracing::debug!(log_dir = ?log_dir, "Logging initialized");

    if config.enable_cleanup {
        if let Err(e) = cleanup::perform_cleanup(&log_dir, config) {
            tracing::warn!(error = %e, "Log cleanup failed");
        }
    }

    Ok(Some(guard))
}

/// Log platform information on startup
pub fn log_platform_info() {
    tracing::debug!(
        platform = std::env::consts::OS,
        architecture = std::env::consts::ARCH,
        family = std::env::consts::FAMILY,
        version = env!("CARGO_PKG_VERSION"),
        "Starting pdf_audio_reader"
    );
}
