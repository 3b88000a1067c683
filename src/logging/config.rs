use std::env;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Custom log directory path (overrides auto-detection)
    pub custom_log_dir: Option<String>,

    /// Log filter for console output (default: "pdf_audio_reader=info")
    pub console_log_level: String,

    /// Log filter for file output (default: "debug")
    pub file_log_level: String,

    /// Write JSON application logs to disk (default: true)
    pub file_enabled: bool,

    /// Log retention in days (default: 30)
    pub retention_days: u32,

    /// Maximum total size of rotated logs in MB (default: 200)
    pub max_total_size_mb: u64,

    /// Compress rotated logs (default: true)
    pub compression_enabled: bool,

    /// Run log cleanup at startup (default: true)
    pub enable_cleanup: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            custom_log_dir: None,
            console_log_level: "pdf_audio_reader=info".to_string(),
            file_log_level: "debug".to_string(),
            file_enabled: true,
            retention_days: 30,
            max_total_size_mb: 200,
            compression_enabled: true,
            enable_cleanup: true,
        }
    }
}

impl LogConfig {
    /// Load logging configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("PDF_AUDIO_LOG_DIR") {
            config.custom_log_dir = Some(dir);
        }

        if let Ok(level) = env::var("RUST_LOG") {
            config.console_log_level = level;
        }

        if let Ok(level) = env::var("PDF_AUDIO_FILE_LOG_LEVEL") {
            config.file_log_level = level;
        }

        if let Ok(val) = env::var("LOG_FILE_ENABLED") {
            config.file_enabled = val.to_lowercase() == "true";
        }

        if let Some(days) = env::var("LOG_RETENTION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.retention_days = days;
        }

        if let Some(size) = env::var("LOG_MAX_TOTAL_SIZE_MB")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_total_size_mb = size;
        }

        if let Ok(val) = env::var("LOG_COMPRESSION") {
            config.compression_enabled = val.to_lowercase() == "true";
        }

        if let Ok(val) = env::var("LOG_ENABLE_CLEANUP") {
            config.enable_cleanup = val.to_lowercase() == "true";
        }

        config
    }

    /// Lower the console level to warnings only, keeping an explicit RUST_LOG
    pub fn quiet(mut self) -> Self {
        if env::var("RUST_LOG").is_err() {
            self.console_log_level = "pdf_audio_reader=warn".to_string();
        }
        self
    }
}
