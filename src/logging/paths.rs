use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "pdf_audio_reader";

/// Get the log directory
///
/// Resolution order:
/// 1. Custom directory from parameter (if provided)
/// 2. PDF_AUDIO_LOG_DIR environment variable
/// 3. Platform data directory (e.g. ~/.local/share/pdf_audio_reader/logs)
/// 4. Temp directory as last resort
pub fn get_log_directory(custom_dir: Option<&str>) -> Result<PathBuf, std::io::Error> {
    if let Some(dir) = custom_dir {
        return ensure_directory_exists(PathBuf::from(dir));
    }

    if let Ok(dir) = env::var("PDF_AUDIO_LOG_DIR") {
        return ensure_directory_exists(PathBuf::from(dir));
    }

    let candidates = [
        dirs::data_local_dir().map(|d| d.join(APP_DIR_NAME).join("logs")),
        dirs::home_dir().map(|d| d.join(format!(".{}", APP_DIR_NAME)).join("logs")),
    ];

    for path in candidates.into_iter().flatten() {
        if can_create(&path) {
            return ensure_directory_exists(path);
        }
    }

    ensure_directory_exists(env::temp_dir().join(format!("{}_logs", APP_DIR_NAME)))
}

/// Check if a directory is writable
fn is_writable(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    let test_file = path.join(".write_test");
    fs::write(&test_file, "test").is_ok() && {
        let _ = fs::remove_file(&test_file);
        true
    }
}

/// Check if we can create the directory (or an ancestor already allows it)
fn can_create(path: &Path) -> bool {
    path.ancestors()
        .find(|p| p.exists())
        .map(is_writable)
        .unwrap_or(false)
}

fn ensure_directory_exists(path: PathBuf) -> Result<PathBuf, std::io::Error> {
    if !path.exists() {
        fs::create_dir_all(&path)?;
    }
    Ok(path)
}
