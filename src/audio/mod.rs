pub mod output;

use bytes::Bytes;

use crate::config::constants::AUDIO_MIME;

/// Synthesized audio for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    /// 1-based position in the conversion
    pub part: usize,
    /// Characters of the chunk this audio was made from
    pub text_chars: usize,
    /// Encoded audio as returned by the speech service
    pub data: Bytes,
}

impl AudioSegment {
    pub fn new(part: usize, text_chars: usize, data: Bytes) -> Self {
        Self {
            part,
            text_chars,
            data,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        AUDIO_MIME
    }

    pub fn file_name(&self, original_file_name: &str) -> String {
        segment_file_name(original_file_name, self.part)
    }
}

/// Download name for part `n` of a converted file: `{original}_part_{n}.mp3`
pub fn segment_file_name(original_file_name: &str, part: usize) -> String {
    format!("{}_part_{}.mp3", original_file_name, part)
}
