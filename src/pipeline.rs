//! Per-document orchestration: extraction → segmentation → grouping →
//! rendering.
//!
//! [`DocumentPipeline`] owns no global state. Its collaborators — the
//! [`DocumentReader`] and [`SentenceSegmenter`] — are injected at
//! construction time, so tests can swap in fixed fakes and production code
//! can share one pipeline across documents and tasks.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::group::group_sentences;
use crate::normalize::{normalize, raw_sentence_count, token_estimate, word_count};
use crate::reader::{DocumentReader, PlainTextReader};
use crate::segment::{SentenceSegmenter, UnicodeSegmenter};
use crate::types::{
    ChunkRecord, DocumentChunks, PageRecord, PipelineError, PipelineTelemetry, Result,
};

/// Tunable pipeline parameters.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Number of sentences per chunk. Validated at grouping time; zero or
    /// negative values are rejected as `InvalidArgument`.
    pub chunk_size: i64,
    /// Offset subtracted from each raw page index so reported numbers line
    /// up with the document's printed pagination. Layout-dependent, so it is
    /// a parameter rather than a constant.
    pub page_bias: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            page_bias: 0,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sentences per chunk.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: i64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the printed-pagination offset.
    #[must_use]
    pub fn page_bias(mut self, page_bias: i64) -> Self {
        self.page_bias = page_bias;
        self
    }
}

/// The document chunking pipeline.
///
/// Stages are exposed individually for callers that want to inspect
/// intermediate page records; [`process`](Self::process) composes them in
/// order for the common case.
///
/// # Examples
///
/// ```rust,no_run
/// use chunkmill::pipeline::{DocumentPipeline, PipelineConfig};
///
/// # async fn example() -> Result<(), chunkmill::types::PipelineError> {
/// let pipeline = DocumentPipeline::builder()
///     .config(PipelineConfig::new().chunk_size(10).page_bias(6))
///     .build();
///
/// let result = pipeline.process("manual.txt".as_ref()).await?;
/// println!("{} chunks", result.chunk_count());
/// # Ok(())
/// # }
/// ```
pub struct DocumentPipeline {
    reader: Arc<dyn DocumentReader>,
    segmenter: Arc<dyn SentenceSegmenter>,
    config: PipelineConfig,
}

impl DocumentPipeline {
    /// Create a new builder for constructing a `DocumentPipeline`.
    pub fn builder() -> DocumentPipelineBuilder {
        DocumentPipelineBuilder::default()
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Opens the document and builds one [`PageRecord`] per page with
    /// normalized text and size statistics. Sentences and chunks are left
    /// unpopulated.
    pub async fn extract(&self, path: &Path) -> Result<Vec<PageRecord>> {
        let raw_pages = self.reader.open(path).await?;
        let pages: Vec<PageRecord> = raw_pages
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let text = normalize(&raw);
                let char_count = text.chars().count();
                PageRecord {
                    page_index: index as i64 - self.config.page_bias,
                    char_count,
                    word_count: word_count(&text),
                    raw_sentence_count: raw_sentence_count(&text),
                    token_estimate: token_estimate(char_count),
                    text,
                    sentences: None,
                    sentence_chunks: None,
                }
            })
            .collect();
        debug!(path = %path.display(), pages = pages.len(), "extracted pages");
        Ok(pages)
    }

    /// Runs the segmenter over every page, storing its output verbatim.
    pub fn segment_pages(&self, pages: &mut [PageRecord]) {
        for page in pages.iter_mut() {
            page.sentences = Some(self.segmenter.segment(&page.text));
        }
    }

    /// Partitions every page's sentences into fixed-size windows.
    ///
    /// A page without populated sentences means the stages ran out of order;
    /// that is a [`PipelineError::SchemaViolation`], fatal for this document.
    pub fn chunk_pages(&self, pages: &mut [PageRecord]) -> Result<()> {
        for page in pages.iter_mut() {
            let sentences = page.sentences.as_ref().ok_or_else(|| {
                PipelineError::SchemaViolation {
                    page_index: page.page_index,
                    reason: "sentences not populated before grouping".to_string(),
                }
            })?;
            page.sentence_chunks = Some(group_sentences(sentences, self.config.chunk_size)?);
        }
        Ok(())
    }

    /// Renders every page's sentence windows into flat, ordered
    /// [`ChunkRecord`]s.
    pub fn render_records(&self, pages: &[PageRecord]) -> Result<Vec<ChunkRecord>> {
        let mut records = Vec::new();
        for page in pages {
            let chunks = page.sentence_chunks.as_ref().ok_or_else(|| {
                PipelineError::SchemaViolation {
                    page_index: page.page_index,
                    reason: "sentence chunks not populated before rendering".to_string(),
                }
            })?;
            for window in chunks {
                records.push(crate::render::render_chunk(window).into_record(page.page_index));
            }
        }
        Ok(records)
    }

    /// Runs the full pipeline over one document.
    ///
    /// Chunk records come back ordered by (page order, intra-page chunk
    /// order). Any stage failure aborts this document only; isolation across
    /// documents is the corpus runner's job.
    pub async fn process(&self, path: &Path) -> Result<DocumentChunks> {
        let started = Instant::now();

        let mut pages = self.extract(path).await?;
        self.segment_pages(&mut pages);
        self.chunk_pages(&mut pages)?;
        let chunks = self.render_records(&pages)?;

        let telemetry = PipelineTelemetry {
            page_count: pages.len(),
            sentence_count: pages.iter().map(PageRecord::sentence_count).sum(),
            chunk_count: chunks.len(),
            duration_ms: started.elapsed().as_millis(),
        };
        info!(
            path = %path.display(),
            pages = telemetry.page_count,
            sentences = telemetry.sentence_count,
            chunks = telemetry.chunk_count,
            duration_ms = telemetry.duration_ms,
            "document chunked"
        );

        Ok(DocumentChunks {
            source: path.to_path_buf(),
            pages,
            chunks,
            telemetry,
        })
    }
}

/// Builder for [`DocumentPipeline`] instances.
#[derive(Default)]
pub struct DocumentPipelineBuilder {
    reader: Option<Arc<dyn DocumentReader>>,
    segmenter: Option<Arc<dyn SentenceSegmenter>>,
    config: Option<PipelineConfig>,
}

impl DocumentPipelineBuilder {
    /// Set the document reader.
    ///
    /// Defaults to [`PlainTextReader`].
    #[must_use]
    pub fn reader(mut self, reader: impl DocumentReader + 'static) -> Self {
        self.reader = Some(Arc::new(reader));
        self
    }

    /// Set the document reader from an existing `Arc`.
    ///
    /// Use this to share a reader across multiple pipelines.
    #[must_use]
    pub fn reader_arc(mut self, reader: Arc<dyn DocumentReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Set the sentence segmenter.
    ///
    /// Defaults to [`UnicodeSegmenter`].
    #[must_use]
    pub fn segmenter(mut self, segmenter: impl SentenceSegmenter + 'static) -> Self {
        self.segmenter = Some(Arc::new(segmenter));
        self
    }

    /// Set the sentence segmenter from an existing `Arc`.
    #[must_use]
    pub fn segmenter_arc(mut self, segmenter: Arc<dyn SentenceSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Set the pipeline configuration.
    ///
    /// Defaults to [`PipelineConfig::default`].
    #[must_use]
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the [`DocumentPipeline`], filling in defaults for anything not
    /// set.
    pub fn build(self) -> DocumentPipeline {
        DocumentPipeline {
            reader: self
                .reader
                .unwrap_or_else(|| Arc::new(PlainTextReader::new())),
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Arc::new(UnicodeSegmenter::new())),
            config: self.config.unwrap_or_default(),
        }
    }
}
