//! Per-document artifact persistence.
//!
//! Each successfully processed document becomes one JSON file — an array of
//! chunk records named after the source document — which is the hand-off
//! point to the embedding/indexing subsystem.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::types::{ChunkRecord, PipelineError, Result};

/// Computes the artifact path for a source document: the source's base name
/// with a `.json` extension, inside `out_dir`.
pub fn artifact_path(out_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    out_dir.join(format!("{stem}.json"))
}

/// Serializes `chunks` as a JSON array and writes it to the artifact path
/// for `source`, creating `out_dir` if needed.
///
/// The records are serialized fully in memory before anything touches disk,
/// and a failed write removes whatever partial file was left behind, so a
/// failed document never leaves a half-written artifact.
pub async fn write_chunks(
    out_dir: &Path,
    source: &Path,
    chunks: &[ChunkRecord],
) -> Result<PathBuf> {
    let path = artifact_path(out_dir, source);
    let serialized =
        serde_json::to_vec(chunks).map_err(|err| PipelineError::Io(err.to_string()))?;

    fs::create_dir_all(out_dir).await?;
    if let Err(err) = fs::write(&path, &serialized).await {
        let _ = fs::remove_file(&path).await;
        return Err(err.into());
    }

    debug!(path = %path.display(), chunks = chunks.len(), "artifact written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_chunk(page_index: i64, text: &str) -> ChunkRecord {
        ChunkRecord {
            page_index,
            chunk_text: text.to_string(),
            char_count: text.chars().count(),
            word_count: text.split(' ').count(),
            token_estimate: text.chars().count() as f64 / 4.0,
        }
    }

    #[test]
    fn artifact_path_uses_source_base_name() {
        let path = artifact_path(Path::new("out"), Path::new("corpus/manual v2.txt"));
        assert_eq!(path, Path::new("out").join("manual v2.json"));
    }

    #[tokio::test]
    async fn written_artifact_round_trips_with_contract_fields() {
        let dir = tempdir().unwrap();
        let chunks = vec![sample_chunk(0, "First chunk."), sample_chunk(1, "Second.")];

        let path = write_chunks(dir.path(), Path::new("doc.txt"), &chunks)
            .await
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "doc.json");

        let data = fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["page_number"], 0);
        assert_eq!(array[0]["sentence_chunk"], "First chunk.");
        assert_eq!(array[1]["chunk_word_count"], 1);
    }

    #[tokio::test]
    async fn creates_output_directory_on_demand() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = write_chunks(&nested, Path::new("doc.txt"), &[]).await.unwrap();
        assert!(path.exists());
    }
}
