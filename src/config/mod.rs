pub mod constants;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use constants::{
    API_KEY_ENV, DEFAULT_MAX_CHARS, ELEVENLABS_BASE_URL, INTER_CHUNK_DELAY_MS, MODEL_ID,
    RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS,
};

/// Runtime configuration for a conversion session
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// API key for the speech service (empty when not configured)
    pub api_key: String,

    /// Base URL of the speech service (default: https://api.elevenlabs.io)
    pub base_url: String,

    /// Synthesis model identifier
    pub model_id: String,

    /// Directory audio segments are written to (default: current directory)
    pub output_dir: PathBuf,

    /// Clean up extracted PDF text before chunking (default: true)
    pub normalize_text: bool,

    /// Maximum characters per chunk
    pub max_chars: usize,

    /// Admissions per rate-limit window
    pub rate_limit_max_requests: usize,

    /// Rate-limit window
    pub rate_limit_window: Duration,

    /// Pause between chunk submissions
    pub inter_chunk_delay: Duration,

    /// HTTP request timeout (default: 120 seconds)
    pub request_timeout: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: ELEVENLABS_BASE_URL.to_string(),
            model_id: MODEL_ID.to_string(),
            output_dir: PathBuf::from("."),
            normalize_text: true,
            max_chars: DEFAULT_MAX_CHARS,
            rate_limit_max_requests: RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            inter_chunk_delay: Duration::from_millis(INTER_CHUNK_DELAY_MS),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ReaderConfig {
    /// Load configuration from environment variables
    ///
    /// Chunk size, rate-limit policy, delay and model are fixed and not
    /// read from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = env::var(API_KEY_ENV) {
            config.api_key = key.trim().to_string();
        }

        if let Ok(url) = env::var("ELEVENLABS_BASE_URL") {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.base_url = url.to_string();
            }
        }

        if let Ok(dir) = env::var("PDF_AUDIO_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Ok(val) = env::var("PDF_AUDIO_NORMALIZE") {
            config.normalize_text = val.to_lowercase() != "false";
        }

        if let Some(secs) = env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs);
        }

        config
    }
}
