//! Document readers: the narrow interface through which page text enters the
//! pipeline.
//!
//! Real extraction backends (PDF renderers, OCR, format converters) live
//! outside this crate; anything that can produce per-page text plugs in by
//! implementing [`DocumentReader`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::types::{PipelineError, Result};

/// Opens a document and yields its raw per-page text in order.
///
/// Reader failures are surfaced as [`PipelineError::IoFormat`] carrying the
/// offending path, which the corpus runner uses to skip the document without
/// aborting the batch.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Reads the document at `path` and returns one raw text string per page.
    async fn open(&self, path: &Path) -> Result<Vec<String>>;
}

/// Built-in reader for pre-extracted UTF-8 text files.
///
/// Pages are delimited by form feed (`U+000C`), the separator most
/// extraction tools emit between pages of plain-text output. A file without
/// any form feed is a single-page document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl PlainTextReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentReader for PlainTextReader {
    async fn open(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|err| PipelineError::IoFormat {
                path: PathBuf::from(path),
                message: err.to_string(),
            })?;
        Ok(content.split('\u{000C}').map(str::to_string).collect())
    }
}
