//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::constants::API_KEY_ENV;
use crate::config::ReaderConfig;

#[derive(Parser, Debug)]
#[command(name = "pdf_audio_reader")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert PDF documents to spoken audio with ElevenLabs")]
pub struct Cli {
    /// PDF file to convert
    #[arg(value_name = "PDF", required_unless_present = "list_voices")]
    pub pdf: Option<PathBuf>,

    /// Voice name or id (default: Josh, or the first available voice)
    #[arg(long, value_name = "NAME")]
    pub voice: Option<String>,

    /// ElevenLabs API key (overrides the environment)
    #[arg(long, value_name = "KEY", env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory to write audio parts and the manifest to
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// List the available voices and exit
    #[arg(long)]
    pub list_voices: bool,

    /// Keep the extracted text exactly as the PDF library returns it.
    /// Cleanup is lossy: it joins words hyphenated across line breaks, so a
    /// real compound split at a line end ("well-\nknown") is read as one
    /// word ("wellknown")
    #[arg(long)]
    pub no_normalize: bool,

    /// Print the start of the extracted text before converting
    #[arg(long)]
    pub preview: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the environment configuration
    ///
    /// The API key is not applied here; it belongs to the session
    /// (see [`Cli::api_key_override`]).
    pub fn apply(&self, config: &mut ReaderConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }

        if self.no_normalize {
            config.normalize_text = false;
        }
    }

    /// API key given on the command line, if it is not blank
    pub fn api_key_override(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// The first `max_chars` characters of `text`, with an ellipsis when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
