use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::config::LogConfig;

/// Prefix of the daily application log files
pub const LOG_FILE_PREFIX: &str = "application.log";

const ONE_DAY: Duration = Duration::from_secs(86400);

/// Tidy the log directory once, at startup
///
/// - Compresses rotated logs older than a day
/// - Deletes logs older than the retention period
/// - Deletes the oldest logs while the total exceeds the size limit
pub fn perform_cleanup(log_dir: &Path, config: &LogConfig) -> io::Result<()> {
    tracing::debug!(log_dir = ?log_dir, "Starting log cleanup");

    if config.compression_enabled {
        compress_old_logs(log_dir)?;
    }

    delete_old_logs(log_dir, config.retention_days)?;
    enforce_disk_limit(log_dir, config.max_total_size_mb)?;

    tracing::debug!("Log cleanup completed");
    Ok(())
}

/// Rotated log files: `application.log.<date>` and their `.gz` archives
fn rotated_logs(log_dir: &Path) -> io::Result<Vec<(PathBuf, SystemTime, u64)>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_rotated = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(LOG_FILE_PREFIX) && n.len() > LOG_FILE_PREFIX.len())
            .unwrap_or(false);
        let metadata = entry.metadata()?;

        if is_rotated && metadata.is_file() {
            files.push((path, metadata.modified()?, metadata.len()));
        }
    }

    Ok(files)
}

fn is_compressed(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

fn compress_old_logs(log_dir: &Path) -> io::Result<()> {
    let cutoff = SystemTime::now() - ONE_DAY;

    for (path, modified, _) in rotated_logs(log_dir)? {
        if is_compressed(&path) || modified >= cutoff {
            continue;
        }

        match compress_file(&path) {
            Ok(compressed) => {
                tracing::debug!(original = ?path, compressed = ?compressed, "Log file compressed");
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!(path = ?path, error = %e, "Failed to delete original log after compression");
                }
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to compress log file");
            }
        }
    }

    Ok(())
}

/// Compress a single log file using gzip, keeping its modification time
fn compress_file(path: &Path) -> io::Result<PathBuf> {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    let compressed_path = PathBuf::from(name);

    let modified = fs::metadata(path)?.modified()?;
    let mut input = File::open(path)?;
    let output = File::create(&compressed_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    let output = encoder.finish()?;
    output.set_modified(modified)?;

    Ok(compressed_path)
}

fn delete_old_logs(log_dir: &Path, retention_days: u32) -> io::Result<()> {
    let cutoff = SystemTime::now() - ONE_DAY * retention_days;

    for (path, modified, size) in rotated_logs(log_dir)? {
        if modified >= cutoff {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(_) => {
                let modified: DateTime<Utc> = modified.into();
                tracing::info!(
                    path = ?path,
                    size_bytes = size,
                    modified = %modified.to_rfc3339(),
                    "Deleted old log file"
                );
            }
            Err(e) => tracing::warn!(path = ?path, error = %e, "Failed to delete old log file"),
        }
    }

    Ok(())
}

fn enforce_disk_limit(log_dir: &Path, max_size_mb: u64) -> io::Result<()> {
    let mut files = rotated_logs(log_dir)?;
    let mut total_size: u64 = files.iter().map(|(_, _, size)| size).sum();
    let max_size_bytes = max_size_mb * 1024 * 1024;

    if total_size <= max_size_bytes {
        return Ok(());
    }

    tracing::warn!(
        total_size_mb = total_size / (1024 * 1024),
        max_size_mb,
        "Log directory exceeds size limit, deleting oldest files"
    );

    files.sort_by_key(|(_, modified, _)| *modified);

    for (path, _, size) in files {
        if total_size <= max_size_bytes {
            break;
        }

        match fs::remove_file(&path) {
            Ok(_) => total_size -= size,
            Err(e) => tracing::warn!(path = ?path, error = %e, "Failed to delete log file"),
        }
    }

    Ok(())
}
