use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    // Input errors
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),
    #[error("PDF extraction error: {0}")]
    Extraction(String),
    #[error("No readable text found in {0}")]
    EmptyDocument(String),

    // Credential and voice errors
    #[error("No API key provided (set ELEVENLABS_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("Failed to fetch voices: {0}")]
    VoiceList(String),
    #[error("The speech service returned no voices")]
    NoVoices,

    // Synthesis errors
    #[error("Rate limit exceeded (retry after {}s)", retry_after.as_secs())]
    RateLimited { retry_after: Duration },
    #[error("Synthesis failed for chunk {chunk}: {source}")]
    Synthesis {
        chunk: usize,
        #[source]
        source: Box<ReaderError>,
    },
    #[error("Speech API error {status}: {body}")]
    Api { status: u16, body: String },

    // Transport and I/O errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<lopdf::Error> for ReaderError {
    fn from(err: lopdf::Error) -> Self {
        ReaderError::Extraction(err.to_string())
    }
}

impl ReaderError {
    /// Short message suitable for showing to the person running a conversion.
    /// Details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ReaderError::InvalidPdf(_) | ReaderError::Extraction(_) => {
                "Error reading PDF. Please ensure it's a valid PDF file.".to_string()
            }
            ReaderError::EmptyDocument(name) => {
                format!("No readable text was found in {}.", name)
            }
            ReaderError::MissingApiKey => {
                "Please provide your ElevenLabs API key to continue.".to_string()
            }
            ReaderError::VoiceList(_) | ReaderError::NoVoices => {
                "Error fetching voices. Please check your API key.".to_string()
            }
            ReaderError::RateLimited { retry_after } => format!(
                "Rate limit exceeded. Please try again in {} minute(s).",
                retry_after.as_secs().div_ceil(60).max(1)
            ),
            ReaderError::Synthesis { chunk, source } => {
                format!("Error generating audio for part {}: {}", chunk, source)
            }
            other => format!("Error: {}", other),
        }
    }

    /// Whether trying the same conversion again later can succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ReaderError::RateLimited { .. } | ReaderError::Http(_) => true,
            ReaderError::Api { status, .. } => *status == 429 || *status >= 500,
            ReaderError::Synthesis { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
