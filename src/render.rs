//! Renders one sentence window into a cleaned chunk string plus its size
//! statistics.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::{token_estimate, word_count};
use crate::types::ChunkRecord;

// Repairs "word.Next" boundaries that lose their space during
// segmentation/joining. A targeted fix, not general punctuation
// normalization.
static MISSING_BOUNDARY_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.([A-Z])").expect("boundary-repair pattern is valid"));

/// A rendered chunk before it is stamped with its page index.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChunk {
    pub chunk_text: String,
    pub char_count: usize,
    pub word_count: usize,
    pub token_estimate: f64,
}

impl RenderedChunk {
    /// Attaches the owning page index, producing the final record.
    pub fn into_record(self, page_index: i64) -> ChunkRecord {
        ChunkRecord {
            page_index,
            chunk_text: self.chunk_text,
            char_count: self.char_count,
            word_count: self.word_count,
            token_estimate: self.token_estimate,
        }
    }
}

/// Joins a sentence window into one cleaned string and computes its
/// statistics.
///
/// Cleaning: join with single spaces, collapse double-space runs, trim, then
/// insert a space after any `.` immediately followed by an uppercase ASCII
/// letter. The function is pure, so the text and its statistics always
/// agree.
pub fn render_chunk(sentences: &[String]) -> RenderedChunk {
    let joined = sentences.join(" ").replace("  ", " ");
    let joined = joined.trim();
    let chunk_text = MISSING_BOUNDARY_SPACE.replace_all(joined, ". $1").into_owned();

    let char_count = chunk_text.chars().count();
    RenderedChunk {
        word_count: word_count(&chunk_text),
        token_estimate: token_estimate(char_count),
        char_count,
        chunk_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn joins_with_single_spaces_and_trims() {
        let rendered = render_chunk(&owned(&["Hello world.", "This is a test."]));
        assert_eq!(rendered.chunk_text, "Hello world. This is a test.");
        assert_eq!(rendered.char_count, 28);
        assert_eq!(rendered.word_count, 6);
        assert_eq!(rendered.token_estimate, 7.0);
    }

    #[test]
    fn collapses_double_spaces_from_boundary_padded_sentences() {
        // UAX #29 sentences keep their trailing space; joining adds another.
        let rendered = render_chunk(&owned(&["Hello world. ", "This is a test."]));
        assert_eq!(rendered.chunk_text, "Hello world. This is a test.");
    }

    #[test]
    fn repairs_missing_space_after_sentence_boundary() {
        let rendered = render_chunk(&owned(&["End of one.Start of two."]));
        assert_eq!(rendered.chunk_text, "End of one. Start of two.");
    }

    #[test]
    fn leaves_lowercase_after_dot_untouched() {
        let rendered = render_chunk(&owned(&["e.g. lowercase stays"]));
        assert_eq!(rendered.chunk_text, "e.g. lowercase stays");
    }

    #[test]
    fn char_count_counts_code_points_not_bytes() {
        let rendered = render_chunk(&owned(&["Héllo wörld."]));
        assert_eq!(rendered.chunk_text, "Héllo wörld.");
        // Two of the letters are multi-byte in UTF-8; the statistic follows
        // code points.
        assert_eq!(rendered.char_count, 12);
        assert_eq!(rendered.token_estimate, 3.0);
        assert_eq!(rendered.word_count, 2);
    }

    #[test]
    fn word_count_matches_single_space_split_of_rendered_text() {
        let rendered = render_chunk(&owned(&["One two", "three  four"]));
        assert_eq!(
            rendered.word_count,
            rendered.chunk_text.split(' ').count()
        );
    }

    #[test]
    fn empty_window_renders_empty_chunk() {
        let rendered = render_chunk(&[]);
        assert_eq!(rendered.chunk_text, "");
        assert_eq!(rendered.char_count, 0);
        assert_eq!(rendered.word_count, 1);
    }
}
