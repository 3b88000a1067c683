use std::time::Duration;

use super::provider::SpeechProvider;
use crate::audio::AudioSegment;
use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};
use crate::rate_limit::RateLimiter;

/// When the rate limiter is consulted during a conversion
///
/// `PerConversion` checks once before the first chunk, so a long document
/// sends many requests for a single admission. `PerChunk` gates every
/// outbound request instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdmissionPolicy {
    #[default]
    PerConversion,
    PerChunk,
}

#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub voice_id: String,
    pub model_id: String,
    /// Pause between successive chunk submissions
    pub inter_chunk_delay: Duration,
    pub admission: AdmissionPolicy,
}

impl SynthesisOptions {
    pub fn new(voice_id: impl Into<String>, config: &ReaderConfig) -> Self {
        Self {
            voice_id: voice_id.into(),
            model_id: config.model_id.clone(),
            inter_chunk_delay: config.inter_chunk_delay,
            admission: AdmissionPolicy::default(),
        }
    }
}

/// Synthesizes chunks one at a time, in order
pub struct SpeechSynthesizer<'a> {
    provider: &'a dyn SpeechProvider,
    options: SynthesisOptions,
}

impl<'a> SpeechSynthesizer<'a> {
    pub fn new(provider: &'a dyn SpeechProvider, options: SynthesisOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Convert every chunk to audio
    ///
    /// `on_progress` receives `(current, total)` before each chunk is
    /// submitted. The first failing chunk aborts the rest.
    pub async fn text_to_speech<F>(
        &self,
        limiter: &mut RateLimiter,
        chunks: &[String],
        mut on_progress: F,
    ) -> Result<Vec<AudioSegment>>
    where
        F: FnMut(usize, usize),
    {
        if self.options.admission == AdmissionPolicy::PerConversion {
            admit(limiter)?;
        }

        let total = chunks.len();
        let mut segments = Vec::with_capacity(total);

        for (i, chunk) in chunks.iter().enumerate() {
            let part = i + 1;

            if i > 0 && !self.options.inter_chunk_delay.is_zero() {
                tokio::time::sleep(self.options.inter_chunk_delay).await;
            }

            if self.options.admission == AdmissionPolicy::PerChunk {
                admit(limiter)?;
            }

            on_progress(part, total);

            let audio = self
                .provider
                .synthesize(chunk, &self.options.voice_id, &self.options.model_id)
                .await
                .map_err(|e| {
                    tracing::error!(
                        chunk = part,
                        total,
                        error = %e,
                        "Audio generation error"
                    );
                    ReaderError::Synthesis {
                        chunk: part,
                        source: Box::new(e),
                    }
                })?;

            tracing::debug!(
                chunk = part,
                total,
                text_chars = chunk.chars().count(),
                audio_bytes = audio.len(),
                "Chunk synthesized"
            );

            segments.push(AudioSegment::new(part, chunk.chars().count(), audio));
        }

        Ok(segments)
    }
}

/// Take one admission from the limiter or fail with the wait time
fn admit(limiter: &mut RateLimiter) -> Result<()> {
    if limiter.is_allowed() {
        return Ok(());
    }

    let retry_after = limiter
        .retry_after()
        .unwrap_or(limiter.config().time_window);
    tracing::warn!(
        retry_after_secs = retry_after.as_secs(),
        "Rate limit exceeded"
    );
    Err(ReaderError::RateLimited { retry_after })
}
