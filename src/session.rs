use std::collections::HashMap;
use uuid::Uuid;

use crate::audio::AudioSegment;
use crate::config::ReaderConfig;
use crate::rate_limit::{RateLimitConfig, RateLimiter};

/// Identifies a finished conversion: the PDF's content digest plus the voice
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessedKey {
    pub digest: String,
    pub voice_id: String,
}

impl ProcessedKey {
    pub fn new(pdf_bytes: &[u8], voice_id: &str) -> Self {
        Self {
            digest: format!("{:x}", md5::compute(pdf_bytes)),
            voice_id: voice_id.to_string(),
        }
    }
}

/// State owned by one user's interaction
///
/// Created when the session starts and dropped when it ends. Passed by
/// reference through a conversion; nothing in here is shared.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    api_key: String,
    rate_limiter: RateLimiter,
    processed_files: HashMap<ProcessedKey, Vec<AudioSegment>>,
}

impl Session {
    pub fn new(config: &ReaderConfig) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "Session created");

        Self {
            id,
            api_key: config.api_key.trim().to_string(),
            rate_limiter: RateLimiter::with_config(RateLimitConfig {
                max_requests: config.rate_limit_max_requests,
                time_window: config.rate_limit_window,
            }),
            processed_files: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Replace the session credential (the command-line override of the
    /// environment default)
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into().trim().to_string();
    }

    pub fn rate_limiter_mut(&mut self) -> &mut RateLimiter {
        &mut self.rate_limiter
    }

    pub fn processed(&self, key: &ProcessedKey) -> Option<&[AudioSegment]> {
        self.processed_files.get(key).map(Vec::as_slice)
    }

    pub fn remember(&mut self, key: ProcessedKey, segments: Vec<AudioSegment>) {
        self.processed_files.insert(key, segments);
    }

    pub fn processed_count(&self) -> usize {
        self.processed_files.len()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::debug!(
            session = %self.id,
            processed_files = self.processed_files.len(),
            "Session ended"
        );
    }
}
