//! chunkmill — a sentence-window document chunking pipeline.
//!
//! Converts long-form documents into retrieval-ready chunks: fixed-size
//! groups of sentences rendered to cleaned text and annotated with
//! positional and statistical metadata, ready for downstream embedding and
//! indexing.
//!
//! ```text
//! Document files ──► reader::DocumentReader ──► raw page text
//!                                   │
//!                                   ▼
//!               normalize ──► PageRecord (text + page statistics)
//!                                   │
//!                                   ├─► segment::SentenceSegmenter
//!                                   ├─► group::group_sentences
//!                                   └─► render::render_chunk
//!                                   │
//!                                   ▼
//! pipeline::DocumentPipeline ──► DocumentChunks (ordered ChunkRecords)
//!                                   │
//! corpus::CorpusRunner ────────────┴─► artifact::write_chunks ──► <doc>.json
//!                                        └─► downstream embedding/indexing
//! ```
//!
//! The reader and segmenter are injected services, never ambient globals, so
//! the pipeline stays testable with fixed fakes. Per-document failures are
//! isolated at the corpus boundary: one corrupt file is logged and skipped
//! while the rest of the batch proceeds.

pub mod artifact;
pub mod corpus;
pub mod group;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod segment;
pub mod types;

pub use corpus::{CorpusReport, CorpusRunner, SkippedDocument};
pub use group::group_sentences;
pub use normalize::normalize;
pub use pipeline::{DocumentPipeline, DocumentPipelineBuilder, PipelineConfig};
pub use reader::{DocumentReader, PlainTextReader};
pub use render::render_chunk;
pub use segment::{SentenceSegmenter, UnicodeSegmenter};
#[cfg(feature = "segtok-segmenter")]
pub use segment::SegtokSegmenter;
pub use types::{ChunkRecord, DocumentChunks, PageRecord, PipelineError, PipelineTelemetry};
