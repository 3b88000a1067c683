use crate::config::constants::DEFAULT_MAX_CHARS;

/// Delimiter used to approximate sentence boundaries
///
/// This is a heuristic: abbreviations such as "Dr. Smith" split too.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Configuration for text chunking
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Splits text into chunks at sentence boundaries while respecting size limits
///
/// Sentences are packed greedily in order. Lengths are counted in
/// characters, not bytes. A sentence that alone exceeds `max_chars` gets a
/// chunk of its own rather than being cut.
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let flattened = text.replace('\n', " ");

    let mut chunks = Vec::new();
    let mut current = ChunkBuilder::default();

    for sentence in flattened.split(SENTENCE_DELIMITER) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        if current.is_empty() || current.len_with(sentence) <= config.max_chars {
            current.push(sentence);
        } else {
            chunks.push(current.finish());
            current.push(sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(current.finish());
    }

    chunks
}

/// Accumulates sentences for one chunk and tracks its rendered length
#[derive(Debug, Default)]
struct ChunkBuilder {
    sentences: Vec<String>,
    /// Characters of the sentences joined with the delimiter, no trailing period
    joined_len: usize,
}

impl ChunkBuilder {
    fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Rendered length if `sentence` were appended
    fn len_with(&self, sentence: &str) -> usize {
        let sentence_len = sentence.chars().count();
        let joined = if self.is_empty() {
            sentence_len
        } else {
            self.joined_len + SENTENCE_DELIMITER.len() + sentence_len
        };
        joined + usize::from(!ends_sentence(sentence))
    }

    fn push(&mut self, sentence: &str) {
        if !self.is_empty() {
            self.joined_len += SENTENCE_DELIMITER.len();
        }
        self.joined_len += sentence.chars().count();
        self.sentences.push(sentence.to_string());
    }

    /// Render the chunk and reset the builder
    fn finish(&mut self) -> String {
        let mut chunk = self.sentences.join(SENTENCE_DELIMITER);
        if !ends_sentence(&chunk) {
            chunk.push('.');
        }
        self.sentences.clear();
        self.joined_len = 0;
        chunk
    }
}

/// Whether the text already ends in a period
fn ends_sentence(text: &str) -> bool {
    text.ends_with('.')
}
