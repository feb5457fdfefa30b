//! Processes a directory of pre-extracted text documents into per-document
//! chunk artifacts.
//!
//! ```bash
//! CORPUS_DIR=./corpus CORPUS_OUT=./chunks cargo run --example corpus_pipeline
//! ```

use std::env;
use std::path::PathBuf;

use tracing_subscriber::FmtSubscriber;

use chunkmill::corpus::{discover_documents, CorpusRunner};
use chunkmill::pipeline::{DocumentPipeline, PipelineConfig};
use chunkmill::types::PipelineError;

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    init_tracing();

    let corpus_dir = env::var("CORPUS_DIR").unwrap_or_else(|_| "./corpus".to_string());
    let corpus_dir = PathBuf::from(corpus_dir);
    let out_dir = env::var("CORPUS_OUT").unwrap_or_else(|_| "./chunks".to_string());

    let chunk_size = env::var("CHUNK_SIZE")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(10);
    let page_bias = env::var("PAGE_BIAS")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(0);

    let paths = discover_documents(&corpus_dir, "txt").await?;
    if paths.is_empty() {
        println!("no .txt documents under {}", corpus_dir.display());
        return Ok(());
    }
    println!("processing {} documents from {}", paths.len(), corpus_dir.display());

    let pipeline = DocumentPipeline::builder()
        .config(PipelineConfig::new().chunk_size(chunk_size).page_bias(page_bias))
        .build();
    let runner = CorpusRunner::builder()
        .pipeline(pipeline)
        .out_dir(&out_dir)
        .concurrency(4)
        .build();

    let report = runner.run(paths).await;

    for document in &report.documents {
        println!(
            "{}: {} pages, {} chunks ({} ms)",
            document.source.display(),
            document.telemetry.page_count,
            document.telemetry.chunk_count,
            document.telemetry.duration_ms,
        );
    }
    for skipped in &report.skipped {
        println!("skipped {}: {}", skipped.path.display(), skipped.error);
    }
    println!(
        "done: {} documents, {} chunks, {} skipped — artifacts in {}",
        report.documents.len(),
        report.chunk_count(),
        report.skipped.len(),
        out_dir,
    );

    Ok(())
}

fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
