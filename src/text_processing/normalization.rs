//! Clean-up of text extracted from PDFs before it is chunked
//!
//! PDF text layers are full of typesetting artifacts that read badly when
//! spoken: ligature code points, words hyphenated across line breaks, soft
//! hyphens and stray control characters. Line structure is preserved; the
//! chunker flattens newlines itself.
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// A word broken with a hyphen at the end of a line
    /// Matches: "exam-\nple" but not "well-\nKnown" (capitalized continuation)
    static ref HYPHENATED_BREAK_REGEX: Regex = Regex::new(r"(\p{L})-[ \t]*\n[ \t]*(\p{Ll})").unwrap();

    /// Runs of horizontal whitespace
    static ref SPACE_RUN_REGEX: Regex = Regex::new(r"[ \t]+").unwrap();

    /// Horizontal whitespace touching a newline
    static ref SPACE_AROUND_NEWLINE_REGEX: Regex = Regex::new(r"[ \t]*\n[ \t]*").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupInfo {
    /// Original length in characters
    pub original_length: usize,
    /// Cleaned length in characters
    pub cleaned_length: usize,
    /// Number of line-break hyphenations joined
    pub hyphenations_joined: usize,
}

/// Clean extracted PDF text for speech synthesis
///
/// This function handles:
/// - Unicode compatibility folding (NFKC), so "ﬁ" becomes "fi"
/// - Smart quotes → ASCII quotes
/// - En/em dashes → ASCII hyphen
/// - Soft hyphens and control characters → removed
/// - Words hyphenated across line breaks → joined
/// - Repeated spaces → single space
pub fn clean_extracted_text(text: &str) -> (String, CleanupInfo) {
    let original_length = text.chars().count();

    let mut folded = String::with_capacity(text.len());
    for ch in text.nfkc() {
        match ch {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => folded.push('"'),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => folded.push('\''),
            '\u{2013}' | '\u{2014}' => folded.push('-'),
            '\u{00AD}' => {}
            '\r' => folded.push('\n'),
            '\n' | '\t' => folded.push(ch),
            c if c.is_control() => {}
            c => folded.push(c),
        }
    }

    // "\r\n" was turned into two newlines above
    let folded = folded.replace("\n\n", "\n");

    let hyphenations_joined = HYPHENATED_BREAK_REGEX.find_iter(&folded).count();
    let joined = HYPHENATED_BREAK_REGEX.replace_all(&folded, "$1$2");
    let spaced = SPACE_RUN_REGEX.replace_all(&joined, " ");
    let cleaned = SPACE_AROUND_NEWLINE_REGEX
        .replace_all(&spaced, "\n")
        .trim()
        .to_string();

    let info = CleanupInfo {
        original_length,
        cleaned_length: cleaned.chars().count(),
        hyphenations_joined,
    };

    (cleaned, info)
}
