use async_trait::async_trait;
use bytes::Bytes;

use super::voice::Voice;
use crate::error::Result;

/// A remote text-to-speech service
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Voices available to the configured credential
    async fn list_voices(&self) -> Result<Vec<Voice>>;

    /// Synthesize one chunk of text, returning encoded audio
    async fn synthesize(&self, text: &str, voice_id: &str, model_id: &str) -> Result<Bytes>;
}
