//! Corpus-level batch processing with per-document isolation.
//!
//! Documents share no mutable state, so the runner fans them out across a
//! bounded set of tokio tasks and fans results back in keyed by submission
//! index. A failing document is logged and recorded as a skip; it never
//! aborts the batch and never leaves a partial artifact behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::artifact;
use crate::pipeline::DocumentPipeline;
use crate::types::{DocumentChunks, PipelineError, Result};

/// A document the runner gave up on, with the error that caused the skip.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub error: PipelineError,
}

/// Outcome of one corpus run. Successful documents appear in submission
/// order regardless of task completion order; so do skips.
#[derive(Debug, Default)]
pub struct CorpusReport {
    pub documents: Vec<DocumentChunks>,
    pub skipped: Vec<SkippedDocument>,
}

impl CorpusReport {
    /// Total chunk records across all successful documents.
    pub fn chunk_count(&self) -> usize {
        self.documents.iter().map(DocumentChunks::chunk_count).sum()
    }
}

/// Runs the pipeline over many documents concurrently.
pub struct CorpusRunner {
    pipeline: Arc<DocumentPipeline>,
    out_dir: Option<PathBuf>,
    concurrency: usize,
}

impl CorpusRunner {
    /// Create a new builder for constructing a `CorpusRunner`.
    pub fn builder() -> CorpusRunnerBuilder {
        CorpusRunnerBuilder::default()
    }

    /// Processes every document in `paths`.
    ///
    /// Each document runs independently: per-document errors (unreadable
    /// file, schema violation, artifact write failure) are caught at the
    /// document boundary, logged with the offending path, and recorded in
    /// [`CorpusReport::skipped`]. Nothing is retried — these failures are
    /// deterministic for a given input.
    pub async fn run(&self, paths: Vec<PathBuf>) -> CorpusReport {
        let mut slots: Vec<Option<std::result::Result<DocumentChunks, PipelineError>>> =
            (0..paths.len()).map(|_| None).collect();
        let mut tasks: JoinSet<(usize, std::result::Result<DocumentChunks, PipelineError>)> =
            JoinSet::new();

        for (index, path) in paths.iter().cloned().enumerate() {
            while tasks.len() >= self.concurrency {
                Self::collect_next(&mut tasks, &mut slots).await;
            }
            let pipeline = Arc::clone(&self.pipeline);
            let out_dir = self.out_dir.clone();
            tasks.spawn(async move {
                (index, Self::process_one(&pipeline, out_dir.as_deref(), &path).await)
            });
        }
        while !tasks.is_empty() {
            Self::collect_next(&mut tasks, &mut slots).await;
        }

        let mut report = CorpusReport::default();
        for (index, slot) in slots.into_iter().enumerate() {
            let outcome = slot.unwrap_or_else(|| {
                Err(PipelineError::Io("document task vanished".to_string()))
            });
            match outcome {
                Ok(document) => report.documents.push(document),
                Err(error) => {
                    warn!(path = %paths[index].display(), error = %error, "skipping document");
                    report.skipped.push(SkippedDocument {
                        path: paths[index].clone(),
                        error,
                    });
                }
            }
        }
        info!(
            processed = report.documents.len(),
            skipped = report.skipped.len(),
            chunks = report.chunk_count(),
            "corpus run complete"
        );
        report
    }

    async fn process_one(
        pipeline: &DocumentPipeline,
        out_dir: Option<&Path>,
        path: &Path,
    ) -> std::result::Result<DocumentChunks, PipelineError> {
        let document = pipeline.process(path).await?;
        if let Some(out_dir) = out_dir {
            artifact::write_chunks(out_dir, path, &document.chunks).await?;
        }
        Ok(document)
    }

    async fn collect_next(
        tasks: &mut JoinSet<(usize, std::result::Result<DocumentChunks, PipelineError>)>,
        slots: &mut [Option<std::result::Result<DocumentChunks, PipelineError>>],
    ) {
        if let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(err) => warn!(error = %err, "document task failed to join"),
            }
        }
    }
}

/// Builder for [`CorpusRunner`] instances.
pub struct CorpusRunnerBuilder {
    pipeline: Option<Arc<DocumentPipeline>>,
    out_dir: Option<PathBuf>,
    concurrency: usize,
}

impl Default for CorpusRunnerBuilder {
    fn default() -> Self {
        Self {
            pipeline: None,
            out_dir: None,
            concurrency: 4,
        }
    }
}

impl CorpusRunnerBuilder {
    /// Set the pipeline to run documents through.
    ///
    /// This is required before calling [`build()`](Self::build).
    #[must_use]
    pub fn pipeline(mut self, pipeline: DocumentPipeline) -> Self {
        self.pipeline = Some(Arc::new(pipeline));
        self
    }

    /// Set the pipeline from an existing `Arc`.
    #[must_use]
    pub fn pipeline_arc(mut self, pipeline: Arc<DocumentPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Directory to write per-document JSON artifacts into. When unset, no
    /// artifacts are written and results are only returned in memory.
    #[must_use]
    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    /// Maximum number of documents processed concurrently.
    ///
    /// Defaults to 4. Values below 1 are clamped to 1.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Build the [`CorpusRunner`].
    ///
    /// # Panics
    ///
    /// Panics if [`pipeline()`](Self::pipeline) was not called.
    pub fn build(self) -> CorpusRunner {
        CorpusRunner {
            pipeline: self
                .pipeline
                .expect("CorpusRunnerBuilder requires a pipeline"),
            out_dir: self.out_dir,
            concurrency: self.concurrency,
        }
    }

    /// Build the [`CorpusRunner`], returning `None` if no pipeline is set.
    pub fn try_build(self) -> Option<CorpusRunner> {
        Some(CorpusRunner {
            pipeline: self.pipeline?,
            out_dir: self.out_dir,
            concurrency: self.concurrency,
        })
    }
}

/// Lists the files under `dir` with the given extension, sorted by path.
///
/// A convenience for batch runs; directory walking beyond one level and
/// format conversion are out of scope.
pub async fn discover_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_file = entry.file_type().await?.is_file();
        if is_file && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
