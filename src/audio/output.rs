use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::AudioSegment;
use crate::config::constants::AUDIO_MIME;
use crate::error::Result;

/// Description of a written conversion, saved next to the audio files
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub source_file: String,
    pub voice: String,
    pub model_id: String,
    pub created_at: DateTime<Utc>,
    pub mime_type: &'static str,
    pub parts: Vec<ManifestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestPart {
    pub part: usize,
    pub file_name: String,
    pub size_bytes: usize,
    pub text_chars: usize,
}

impl Manifest {
    pub fn new(source_file: &str, voice: &str, model_id: &str, segments: &[AudioSegment]) -> Self {
        Self {
            source_file: source_file.to_string(),
            voice: voice.to_string(),
            model_id: model_id.to_string(),
            created_at: Utc::now(),
            mime_type: AUDIO_MIME,
            parts: segments
                .iter()
                .map(|s| ManifestPart {
                    part: s.part,
                    file_name: s.file_name(source_file),
                    size_bytes: s.data.len(),
                    text_chars: s.text_chars,
                })
                .collect(),
        }
    }
}

/// Name of the manifest file for a converted source file
pub fn manifest_file_name(source_file: &str) -> String {
    format!("{}_manifest.json", source_file)
}

/// Write every segment and the manifest into `dir`
///
/// Returns the paths of the audio files in part order.
pub async fn write_segments(dir: &Path, manifest: &Manifest, segments: &[AudioSegment]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(segments.len());
    for segment in segments {
        let path = dir.join(segment.file_name(&manifest.source_file));
        fs::write(&path, &segment.data).await?;
        tracing::debug!(path = ?path, size_bytes = segment.data.len(), "Audio segment written");
        written.push(path);
    }

    let manifest_path = dir.join(manifest_file_name(&manifest.source_file));
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&manifest_path, json).await?;

    tracing::info!(
        dir = ?dir,
        parts = written.len(),
        "Audio segments saved"
    );

    Ok(written)
}
