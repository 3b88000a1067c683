//! Terminal progress bars for a conversion

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::cli::preview;
use crate::services::conversion::ConversionProgress;

const BAR_TEMPLATE: &str =
    "{spinner:.green} {prefix:>10} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}";

/// Shows one bar for page extraction and one for chunk synthesis
pub struct TerminalProgress {
    bars: MultiProgress,
    pages: Option<ProgressBar>,
    chunks: Option<ProgressBar>,
    /// Print this many characters of the extracted text
    preview_chars: Option<usize>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            bars: MultiProgress::with_draw_target(target),
            pages: None,
            chunks: None,
            preview_chars: None,
        }
    }

    pub fn with_preview(mut self, chars: usize) -> Self {
        self.preview_chars = Some(chars);
        self
    }

    fn bar(&self, prefix: &'static str, len: usize) -> ProgressBar {
        let bar = self.bars.add(ProgressBar::new(len as u64));
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(prefix);
        bar
    }

    /// Finish the synthesis bar after every chunk came back
    pub fn complete(&self) {
        if let Some(bar) = &self.chunks {
            if let Some(len) = bar.length() {
                bar.set_position(len);
            }
            bar.finish_with_message("audio generated");
        }
    }

    /// Stop any bar still running, leaving it on screen
    pub fn abandon(&self) {
        for bar in [&self.pages, &self.chunks].into_iter().flatten() {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionProgress for TerminalProgress {
    fn on_page(&mut self, page: usize, total_pages: usize) {
        if self.pages.is_none() {
            self.pages = Some(self.bar("Reading", total_pages));
        }
        if let Some(bar) = &self.pages {
            bar.set_position(page as u64);
            if page == total_pages {
                bar.finish_with_message("text extracted");
            }
        }
    }

    fn on_text(&mut self, text: &str) {
        if let Some(chars) = self.preview_chars {
            let _ = self
                .bars
                .println(format!("\n{}\n", preview(text, chars)));
        }
    }

    fn on_chunk(&mut self, chunk: usize, total_chunks: usize) {
        if self.chunks.is_none() {
            self.chunks = Some(self.bar("Speaking", total_chunks));
        }
        if let Some(bar) = &self.chunks {
            bar.set_position(chunk as u64 - 1);
            bar.set_message(format!("part {} of {}", chunk, total_chunks));
        }
    }
}
