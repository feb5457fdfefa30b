//! Property tests for the windowing and normalization contracts.

use proptest::prelude::{any, prop, Strategy};
use proptest::proptest;

use chunkmill::group::group_sentences;
use chunkmill::normalize::normalize;
use chunkmill::render::render_chunk;

/// Arbitrary sentence vectors, including empty strings and whitespace-only
/// entries — the pipeline retains those verbatim, so grouping must too.
fn sentences_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(any::<String>(), 0..40)
}

proptest! {
    #[test]
    fn prop_flattening_reconstructs_input(
        sentences in sentences_strategy(),
        chunk_size in 1i64..16,
    ) {
        let chunks = group_sentences(&sentences, chunk_size).unwrap();
        let flattened: Vec<String> = chunks.iter().flatten().cloned().collect();
        assert_eq!(flattened, sentences);

        let total: usize = chunks.iter().map(Vec::len).sum();
        assert_eq!(total, sentences.len());
    }

    #[test]
    fn prop_chunk_count_is_ceiling_of_len_over_size(
        sentences in sentences_strategy(),
        chunk_size in 1i64..16,
    ) {
        let chunks = group_sentences(&sentences, chunk_size).unwrap();
        let expected = sentences.len().div_ceil(chunk_size as usize);
        assert_eq!(chunks.len(), expected);
    }

    #[test]
    fn prop_no_window_exceeds_chunk_size(
        sentences in sentences_strategy(),
        chunk_size in 1i64..16,
    ) {
        let chunks = group_sentences(&sentences, chunk_size).unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(!chunk.is_empty());
            if i + 1 < chunks.len() {
                assert_eq!(chunk.len(), chunk_size as usize);
            } else {
                assert!(chunk.len() <= chunk_size as usize);
            }
        }
    }

    #[test]
    fn prop_non_positive_chunk_sizes_are_rejected(
        sentences in sentences_strategy(),
        chunk_size in -16i64..=0,
    ) {
        assert!(group_sentences(&sentences, chunk_size).is_err());
    }

    #[test]
    fn prop_normalize_is_idempotent(text in any::<String>()) {
        let once = normalize(&text);
        assert_eq!(normalize(&once), once);
        assert!(!once.contains('\n'));
    }

    #[test]
    fn prop_rendered_word_count_matches_space_split(
        sentences in prop::collection::vec("[a-zA-Zéöü .]{0,24}", 0..8),
    ) {
        let sentences: Vec<String> = sentences;
        let rendered = render_chunk(&sentences);
        assert_eq!(rendered.word_count, rendered.chunk_text.split(' ').count());
        assert_eq!(rendered.char_count, rendered.chunk_text.chars().count());
        assert_eq!(rendered.token_estimate, rendered.char_count as f64 / 4.0);
    }
}
