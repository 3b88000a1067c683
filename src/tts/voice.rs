use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_VOICE_NAME;
use crate::error::{ReaderError, Result};

/// A voice offered by the speech service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Voice {
    pub fn new(voice_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            name: name.into(),
            category: None,
        }
    }
}

/// Pick the voice to synthesize with
///
/// A requested voice matches by name (case-insensitive) or by id. Without
/// a request, or when it matches nothing, "Josh" is preferred if present,
/// then the first voice in the list.
pub fn select_voice<'a>(voices: &'a [Voice], requested: Option<&str>) -> Result<&'a Voice> {
    if voices.is_empty() {
        return Err(ReaderError::NoVoices);
    }

    if let Some(requested) = requested.map(str::trim).filter(|r| !r.is_empty()) {
        let found = voices
            .iter()
            .find(|v| v.voice_id == requested || v.name.eq_ignore_ascii_case(requested));
        match found {
            Some(voice) => return Ok(voice),
            None => tracing::warn!(
                requested,
                "Requested voice not found, falling back to default"
            ),
        }
    }

    Ok(voices
        .iter()
        .find(|v| v.name == DEFAULT_VOICE_NAME)
        .unwrap_or(&voices[0]))
}
