use std::time::Instant;

use crate::audio::AudioSegment;
use crate::chunking::{chunk_text, ChunkingConfig};
use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};
use crate::pdf;
use crate::session::{ProcessedKey, Session};
use crate::text_processing::normalization::clean_extracted_text;
use crate::tts::{AdmissionPolicy, SpeechProvider, SpeechSynthesizer, SynthesisOptions, Voice};

/// Everything needed to convert one uploaded PDF
#[derive(Debug, Clone)]
pub struct ConversionRequest<'a> {
    /// Original file name, used to name the audio parts
    pub file_name: &'a str,
    pub pdf_bytes: &'a [u8],
    pub voice: &'a Voice,
    pub normalize_text: bool,
    pub chunking: ChunkingConfig,
    pub synthesis: SynthesisOptions,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(
        file_name: &'a str,
        pdf_bytes: &'a [u8],
        voice: &'a Voice,
        config: &ReaderConfig,
    ) -> Self {
        Self {
            file_name,
            pdf_bytes,
            voice,
            normalize_text: config.normalize_text,
            chunking: ChunkingConfig {
                max_chars: config.max_chars,
            },
            synthesis: SynthesisOptions::new(voice.voice_id.clone(), config),
        }
    }

    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.synthesis.admission = admission;
        self
    }
}

/// Observer for the stages of a conversion
///
/// All methods default to doing nothing.
pub trait ConversionProgress {
    /// A page was extracted: `(page, total_pages)`
    fn on_page(&mut self, _page: usize, _total_pages: usize) {}

    /// Extraction finished with this text
    fn on_text(&mut self, _text: &str) {}

    /// A chunk is about to be submitted: `(chunk, total_chunks)`
    fn on_chunk(&mut self, _chunk: usize, _total_chunks: usize) {}
}

/// Progress observer that ignores everything
pub struct NoProgress;

impl ConversionProgress for NoProgress {}

#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub file_name: String,
    pub voice: Voice,
    pub model_id: String,
    pub extracted_chars: usize,
    pub chunk_count: usize,
    pub segments: Vec<AudioSegment>,
    /// Segments came from this session's earlier conversion of the same file
    pub from_cache: bool,
}

/// Convert one PDF to audio segments
///
/// Validate, extract, clean, chunk, then synthesize. A file already
/// converted with the same voice in this session is served from the
/// session cache without taking a rate-limit admission.
pub async fn convert_pdf<P>(
    session: &mut Session,
    provider: &dyn SpeechProvider,
    request: ConversionRequest<'_>,
    progress: &mut P,
) -> Result<ConversionOutput>
where
    P: ConversionProgress + ?Sized,
{
    let start = Instant::now();
    let session_id = session.id();

    tracing::info!(
        session = %session_id,
        file = request.file_name,
        size_bytes = request.pdf_bytes.len(),
        voice = %request.voice.name,
        "Starting conversion"
    );

    pdf::validate_pdf(request.pdf_bytes).map_err(|e| {
        tracing::error!(file = request.file_name, error = %e, "Rejected PDF");
        e
    })?;

    let raw_text = pdf::extract_text(request.pdf_bytes, |page, total| {
        progress.on_page(page, total)
    })?;

    let text = if request.normalize_text {
        let (cleaned, info) = clean_extracted_text(&raw_text);
        tracing::debug!(
            original_length = info.original_length,
            cleaned_length = info.cleaned_length,
            hyphenations_joined = info.hyphenations_joined,
            "Extracted text cleaned"
        );
        cleaned
    } else {
        raw_text
    };
    progress.on_text(&text);

    let chunks = chunk_text(&text, &request.chunking);
    if chunks.is_empty() {
        tracing::warn!(file = request.file_name, "No text to synthesize");
        return Err(ReaderError::EmptyDocument(request.file_name.to_string()));
    }

    tracing::info!(
        chunks = chunks.len(),
        extracted_chars = text.chars().count(),
        "Text chunked"
    );

    let key = ProcessedKey::new(request.pdf_bytes, &request.voice.voice_id);
    if let Some(segments) = session.processed(&key) {
        tracing::info!(
            session = %session_id,
            file = request.file_name,
            parts = segments.len(),
            "Serving previously converted file from session cache"
        );
        return Ok(ConversionOutput {
            file_name: request.file_name.to_string(),
            voice: request.voice.clone(),
            model_id: request.synthesis.model_id.clone(),
            extracted_chars: text.chars().count(),
            chunk_count: chunks.len(),
            segments: segments.to_vec(),
            from_cache: true,
        });
    }

    let synthesizer = SpeechSynthesizer::new(provider, request.synthesis.clone());
    let segments = synthesizer
        .text_to_speech(session.rate_limiter_mut(), &chunks, |chunk, total| {
            progress.on_chunk(chunk, total)
        })
        .await?;

    session.remember(key, segments.clone());

    tracing::info!(
        session = %session_id,
        file = request.file_name,
        parts = segments.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Conversion completed"
    );

    Ok(ConversionOutput {
        file_name: request.file_name.to_string(),
        voice: request.voice.clone(),
        model_id: request.synthesis.model_id,
        extracted_chars: text.chars().count(),
        chunk_count: chunks.len(),
        segments,
        from_cache: false,
    })
}
