//! Sentence segmentation as an injected service.
//!
//! The pipeline never owns a tokenizer: it calls whatever
//! [`SentenceSegmenter`] it was constructed with and stores the returned
//! strings verbatim. No merging, no filtering — even empty or
//! whitespace-only "sentences" are retained so chunks can be mapped back to
//! the segmenter output 1:1.

use unicode_segmentation::UnicodeSegmentation;

/// A stateless, deterministic sentence splitter.
///
/// Implementations must return sentences in source order; the pipeline
/// relies on concatenation order matching the input. Implementors are
/// expected to be cheap to call repeatedly and free of side effects, which
/// keeps the pipeline testable with fixed fakes.
pub trait SentenceSegmenter: Send + Sync {
    /// Splits `text` into an ordered sequence of sentence strings.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Default segmenter: UAX #29 sentence boundaries.
///
/// Uses `split_sentence_bounds`, which partitions the input exactly —
/// concatenating the returned pieces reproduces the text byte for byte.
/// Trailing inter-sentence whitespace therefore stays attached to the
/// preceding sentence and is collapsed later by the chunk renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl UnicodeSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSegmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_sentence_bounds().map(str::to_string).collect()
    }
}

/// Segmenter backed by the segtok port, for corpora where UAX #29 splits too
/// eagerly on abbreviations.
#[cfg(feature = "segtok-segmenter")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SegtokSegmenter;

#[cfg(feature = "segtok-segmenter")]
impl SegtokSegmenter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "segtok-segmenter")]
impl SentenceSegmenter for SegtokSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        segtok::segmenter::split_single(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_segmenter_partitions_exactly() {
        let text = "Hello world. This is a test.";
        let sentences = UnicodeSegmenter::new().segment(text);
        assert_eq!(sentences.concat(), text);
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn unicode_segmenter_keeps_empty_input_empty() {
        assert!(UnicodeSegmenter::new().segment("").is_empty());
    }

    #[test]
    fn unicode_segmenter_is_deterministic() {
        let text = "One. Two! Three?";
        let segmenter = UnicodeSegmenter::new();
        assert_eq!(segmenter.segment(text), segmenter.segment(text));
    }
}
