//! Converter batch entry point: every `.pptx` in a directory becomes one
//! PNG per slide.
//!
//! The batch is strictly sequential and failure-tolerant: a document whose
//! conversion fails is recorded in the output and skipped, never aborting
//! the run. Nothing is retried.

use crate::config::ConvertConfig;
use crate::error::DeckscanError;
use crate::output::{ConvertOutput, ConvertStats, DocumentResult};
use crate::pipeline::{discover, render};
use std::time::Instant;
use tracing::{info, warn};

/// Convert every presentation in `config.input_dir` to per-slide PNGs in
/// `config.output_dir`.
///
/// # Returns
/// `Ok(ConvertOutput)` even if some documents failed (check
/// `output.stats.failed_documents`). An empty — or missing — input
/// directory yields an empty output with an informational log message.
///
/// # Errors
/// Returns `Err(DeckscanError)` only for fatal conditions: an output
/// directory that cannot be created.
pub async fn convert_documents(config: &ConvertConfig) -> Result<ConvertOutput, DeckscanError> {
    let batch_start = Instant::now();

    let documents = discover::presentation_files(&config.input_dir)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| DeckscanError::CreateDirFailed {
        path: config.output_dir.clone(),
        source: e,
    })?;

    if documents.is_empty() {
        info!("No .pptx files found in '{}'", config.input_dir.display());
        return Ok(ConvertOutput {
            documents: Vec::new(),
            stats: ConvertStats::default(),
        });
    }

    info!(
        "Converting {} presentation(s) from '{}'",
        documents.len(),
        config.input_dir.display()
    );

    let mut results = Vec::with_capacity(documents.len());
    for document in &documents {
        let doc_start = Instant::now();
        let doc_name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| document.display().to_string());

        let result = match render::render_document(document, config).await {
            Ok(slides) => {
                info!("'{}' → {} slide image(s)", doc_name, slides.len());
                DocumentResult {
                    document: doc_name,
                    slides,
                    duration_ms: doc_start.elapsed().as_millis() as u64,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Skipping '{}': {}", doc_name, e);
                DocumentResult {
                    document: doc_name,
                    slides: Vec::new(),
                    duration_ms: doc_start.elapsed().as_millis() as u64,
                    error: Some(e),
                }
            }
        };
        results.push(result);
    }

    let converted = results.iter().filter(|r| r.error.is_none()).count();
    let stats = ConvertStats {
        total_documents: results.len(),
        converted_documents: converted,
        failed_documents: results.len() - converted,
        total_slides: results.iter().map(|r| r.slides.len()).sum(),
        total_duration_ms: batch_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} document(s), {} slide image(s)",
        stats.converted_documents, stats.total_documents, stats.total_slides
    );

    Ok(ConvertOutput {
        documents: results,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn empty_input_dir_yields_empty_output() {
        let input = TempDir::new().expect("tempdir");
        let output = TempDir::new().expect("tempdir");
        let config = ConvertConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path().join("slides"))
            .build()
            .expect("config");

        let out = convert_documents(&config).await.expect("convert");
        assert!(out.documents.is_empty());
        assert_eq!(out.stats.total_documents, 0);
        assert_eq!(out.stats.total_slides, 0);
        // Output directory is still created.
        assert!(output.path().join("slides").is_dir());
    }

    #[tokio::test]
    async fn missing_input_dir_behaves_like_empty() {
        let output = TempDir::new().expect("tempdir");
        let config = ConvertConfig::builder()
            .input_dir("/definitely/not/here")
            .output_dir(output.path().join("slides"))
            .build()
            .expect("config");

        let out = convert_documents(&config).await.expect("convert");
        assert!(out.documents.is_empty());
        assert_eq!(out.stats.total_documents, 0);
    }

    #[tokio::test]
    async fn tool_failure_skips_document_and_continues() {
        let input = TempDir::new().expect("tempdir");
        let output = TempDir::new().expect("tempdir");
        std::fs::write(input.path().join("a.pptx"), b"not a real deck").expect("write");
        std::fs::write(input.path().join("b.pptx"), b"not a real deck").expect("write");

        let config = ConvertConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path())
            .soffice_bin("deckscan-test-no-such-binary")
            .build()
            .expect("config");

        let out = convert_documents(&config).await.expect("batch still ok");
        assert_eq!(out.stats.total_documents, 2);
        assert_eq!(out.stats.failed_documents, 2);
        assert_eq!(out.stats.converted_documents, 0);
        assert!(out.documents.iter().all(|d| d.error.is_some()));

        // No scratch directories left behind.
        let leftovers: Vec<_> = std::fs::read_dir(output.path())
            .expect("read_dir")
            .filter_map(|e| e.ok())
            .collect();
        assert!(leftovers.is_empty(), "scratch dirs leaked: {leftovers:?}");
    }
}
