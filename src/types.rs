//! Record types and the pipeline error type shared across all stages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors produced by the chunking pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A caller supplied an argument the pipeline cannot work with
    /// (e.g. a non-positive chunk size). Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A document could not be opened or parsed. The document is skipped;
    /// the rest of the batch continues.
    #[error("cannot read document {}: {message}", path.display())]
    IoFormat { path: PathBuf, message: String },

    /// A page reached a stage out of order (e.g. grouping before
    /// segmentation). Indicates a pipeline-ordering bug; fatal for the
    /// document being processed.
    #[error("schema violation on page {page_index}: {reason}")]
    SchemaViolation { page_index: i64, reason: String },

    /// Filesystem failure outside document opening (artifact writes,
    /// directory scans).
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

/// One page of a document, progressively enriched as it moves through the
/// pipeline.
///
/// Extraction creates the record with normalized text and size statistics;
/// segmentation fills [`sentences`](Self::sentences); grouping fills
/// [`sentence_chunks`](Self::sentence_chunks). The `Option` states make the
/// stage ordering structural: a `None` at grouping time is reported as
/// [`PipelineError::SchemaViolation`] rather than silently treated as an
/// empty page.
///
/// Invariant: once grouping has run, flattening `sentence_chunks` in order
/// reproduces `sentences` exactly — no sentence is dropped, duplicated, or
/// reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Document-relative page index, offset by the configured bias so it can
    /// line up with printed page numbers.
    pub page_index: i64,
    /// Normalized page text (newlines replaced, ends trimmed).
    pub text: String,
    /// Code-point length of the normalized text.
    pub char_count: usize,
    /// Single-space-delimited token count. Runs of spaces contribute empty
    /// tokens that are counted; this mirrors the numbers downstream
    /// consumers already see and is pinned by tests.
    pub word_count: usize,
    /// Count of '.'-delimited segments. A crude estimate kept only for
    /// comparison against the segmenter's true count.
    pub raw_sentence_count: usize,
    /// `char_count / 4` — a heuristic proxy, not a tokenizer count.
    pub token_estimate: f64,
    /// Sentences produced by the segmenter, in source order. `None` until
    /// segmentation runs.
    pub sentences: Option<Vec<String>>,
    /// Fixed-size sentence windows, in source order. `None` until grouping
    /// runs.
    pub sentence_chunks: Option<Vec<Vec<String>>>,
}

impl PageRecord {
    /// Number of sentences the segmenter produced, or zero before
    /// segmentation has run.
    pub fn sentence_count(&self) -> usize {
        self.sentences.as_ref().map_or(0, Vec::len)
    }

    /// Number of sentence windows, or zero before grouping has run.
    pub fn chunk_count(&self) -> usize {
        self.sentence_chunks.as_ref().map_or(0, Vec::len)
    }
}

/// A single retrieval-ready chunk: one sentence window rendered to cleaned
/// text plus its size statistics.
///
/// The serialized field names are the contract the downstream
/// embedding/indexing stage depends on — renaming them breaks that consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Page the chunk came from (bias-adjusted index).
    #[serde(rename = "page_number")]
    pub page_index: i64,
    /// Cleaned, joined chunk text.
    #[serde(rename = "sentence_chunk")]
    pub chunk_text: String,
    /// Code-point length of `chunk_text`.
    #[serde(rename = "chunk_char_count")]
    pub char_count: usize,
    /// Single-space-delimited token count of `chunk_text`.
    #[serde(rename = "chunk_word_count")]
    pub word_count: usize,
    /// `char_count / 4`.
    #[serde(rename = "chunk_token_count")]
    pub token_estimate: f64,
}

/// Summary statistics for one processed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineTelemetry {
    pub page_count: usize,
    pub sentence_count: usize,
    pub chunk_count: usize,
    pub duration_ms: u128,
}

/// Everything the pipeline produced for one document: the enriched page
/// records, the flattened ordered chunk records, and a run summary.
#[derive(Debug, Clone)]
pub struct DocumentChunks {
    /// Path the document was read from.
    pub source: PathBuf,
    /// Per-page records after all enrichment stages.
    pub pages: Vec<PageRecord>,
    /// Chunk records ordered by (page order, intra-page chunk order).
    pub chunks: Vec<ChunkRecord>,
    /// Run summary for logging and diagnostics.
    pub telemetry: PipelineTelemetry,
}

impl DocumentChunks {
    /// Number of chunk records produced.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Consumes the result and yields just the chunk records.
    pub fn into_chunks(self) -> Vec<ChunkRecord> {
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_record_serializes_with_contract_field_names() {
        let record = ChunkRecord {
            page_index: 3,
            chunk_text: "Some text.".to_string(),
            char_count: 10,
            word_count: 2,
            token_estimate: 2.5,
        };

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "chunk_char_count",
                "chunk_token_count",
                "chunk_word_count",
                "page_number",
                "sentence_chunk",
            ]
        );
        assert_eq!(object["page_number"], 3);
        assert_eq!(object["sentence_chunk"], "Some text.");
    }

    #[test]
    fn page_record_counts_default_to_zero_before_enrichment() {
        let page = PageRecord {
            page_index: 0,
            text: String::new(),
            char_count: 0,
            word_count: 1,
            raw_sentence_count: 1,
            token_estimate: 0.0,
            sentences: None,
            sentence_chunks: None,
        };
        assert_eq!(page.sentence_count(), 0);
        assert_eq!(page.chunk_count(), 0);
    }
}
