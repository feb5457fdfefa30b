//! Pure sentence windowing: partitions a page's sentences into consecutive
//! fixed-size groups.

use crate::types::{PipelineError, Result};

/// Partitions `sentences` into consecutive, non-overlapping windows of
/// `chunk_size`, in original order. The final window may be shorter; nothing
/// is padded or dropped, so flattening the result reproduces the input
/// exactly and the window count is `ceil(len / chunk_size)`.
///
/// `chunk_size` is taken as a signed integer so that zero and negative
/// values can be rejected explicitly with
/// [`PipelineError::InvalidArgument`] instead of defaulting silently.
///
/// An empty `sentences` slice yields zero windows, not an error.
pub fn group_sentences(sentences: &[String], chunk_size: i64) -> Result<Vec<Vec<String>>> {
    if chunk_size <= 0 {
        return Err(PipelineError::InvalidArgument(format!(
            "chunk_size must be a positive integer, got {chunk_size}"
        )));
    }
    let size = chunk_size as usize;
    Ok(sentences.chunks(size).map(<[String]>::to_vec).collect())
}
