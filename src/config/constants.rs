/// Maximum characters per synthesis request
///
/// Chunks are packed up to this size on sentence boundaries. A single
/// sentence longer than this is sent on its own.
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Admissions allowed per rate-limit window
pub const RATE_LIMIT_MAX_REQUESTS: usize = 10;

/// Length of the rate-limit window in seconds
pub const RATE_LIMIT_WINDOW_SECS: u64 = 3600;

/// Pause between successive chunk submissions, in milliseconds
pub const INTER_CHUNK_DELAY_MS: u64 = 500;

/// Synthesis model used for every request
pub const MODEL_ID: &str = "eleven_monolingual_v1";

/// Voice picked when none is requested and it is available
pub const DEFAULT_VOICE_NAME: &str = "Josh";

/// Base URL of the speech service
pub const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Environment variable holding the default API key
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Largest PDF accepted (200 MB)
pub const MAX_PDF_SIZE: usize = 200 * 1024 * 1024;

/// MIME type of synthesized segments
pub const AUDIO_MIME: &str = "audio/mp3";

/// Characters of extracted text shown by `--preview`
pub const PREVIEW_CHARS: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_policy() {
        assert_eq!(RATE_LIMIT_MAX_REQUESTS, 10);
        assert_eq!(RATE_LIMIT_WINDOW_SECS, 3600);
    }

    #[test]
    fn test_max_chars_reasonable() {
        assert!(DEFAULT_MAX_CHARS > 0);
        assert!(DEFAULT_MAX_CHARS <= 5000); // Sanity check against provider limits
    }

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        assert!(!ELEVENLABS_BASE_URL.ends_with('/'));
    }
}
