//! Detector batch entry point: one vision call per slide image, one log
//! line per successful reply.
//!
//! The log file is truncated once at the start of the run and appended to
//! strictly in filename-sorted order — re-running never duplicates lines
//! from a previous run. Processing is sequential; a failed image is logged
//! via tracing, recorded in the output, and skipped.

use crate::config::DetectConfig;
use crate::error::DeckscanError;
use crate::output::{DetectOutput, DetectStats, SlideResult};
use crate::pipeline::{discover, encode, vision::VisionClient};
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Run logo detection over every `.png` in `config.slides_dir`.
///
/// # Returns
/// `Ok(DetectOutput)` even if some images failed (check
/// `output.stats.failed_slides`). The detection log at `config.log_path`
/// holds one `{filename}: {reply}` line per successful image.
///
/// # Errors
/// Returns `Err(DeckscanError)` only for fatal conditions: missing slides
/// directory or an unwritable log file.
pub async fn detect_logos(config: &DetectConfig) -> Result<DetectOutput, DeckscanError> {
    let batch_start = Instant::now();

    let images = discover::slide_images(&config.slides_dir)?;

    // Truncate the log up front so a re-run never carries stale lines.
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DeckscanError::CreateDirFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
    }
    let mut log = tokio::fs::File::create(&config.log_path)
        .await
        .map_err(|e| DeckscanError::LogWriteFailed {
            path: config.log_path.clone(),
            source: e,
        })?;

    if images.is_empty() {
        info!("No .png files found in '{}'", config.slides_dir.display());
        return Ok(DetectOutput {
            slides: Vec::new(),
            log_path: config.log_path.clone(),
            stats: DetectStats::default(),
        });
    }

    let client = VisionClient::new(config)?;
    info!(
        "Detecting logos in {} slide image(s) from '{}'",
        images.len(),
        config.slides_dir.display()
    );

    let mut results = Vec::with_capacity(images.len());
    for image_path in &images {
        let slide_start = Instant::now();

        let result = match encode_and_detect(&client, image_path).await {
            Ok((filename, reply)) => {
                let line = format!("{filename}: {reply}\n");
                log.write_all(line.as_bytes()).await.map_err(|e| {
                    DeckscanError::LogWriteFailed {
                        path: config.log_path.clone(),
                        source: e,
                    }
                })?;
                SlideResult {
                    filename,
                    reply: Some(reply),
                    duration_ms: slide_start.elapsed().as_millis() as u64,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Skipping slide: {}", e);
                SlideResult {
                    filename: image_path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| image_path.display().to_string()),
                    reply: None,
                    duration_ms: slide_start.elapsed().as_millis() as u64,
                    error: Some(e),
                }
            }
        };
        results.push(result);
    }

    log.flush()
        .await
        .map_err(|e| DeckscanError::LogWriteFailed {
            path: config.log_path.clone(),
            source: e,
        })?;

    let processed = results.iter().filter(|r| r.error.is_none()).count();
    let stats = DetectStats {
        total_slides: results.len(),
        processed_slides: processed,
        failed_slides: results.len() - processed,
        total_duration_ms: batch_start.elapsed().as_millis() as u64,
    };

    info!(
        "Detection complete: {}/{} slide(s) → '{}'",
        stats.processed_slides,
        stats.total_slides,
        config.log_path.display()
    );

    Ok(DetectOutput {
        slides: results,
        log_path: config.log_path.clone(),
        stats,
    })
}

/// Encode one image and run the vision call, yielding `(filename, reply)`.
async fn encode_and_detect(
    client: &VisionClient,
    image_path: &std::path::Path,
) -> Result<(String, String), crate::error::SlideError> {
    let attachment = encode::encode_image(image_path).await?;
    let reply = client.detect(&attachment).await?;
    Ok((attachment.filename, reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlideError;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve canned HTTP responses in order, repeating the last one.
    ///
    /// Each connection gets one full request read (headers plus
    /// Content-Length body) and one response, so the sequential detector
    /// sees exactly one canned entry per slide image.
    async fn spawn_canned_server(responses: Vec<(u16, &'static str)>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            let mut served = 0usize;
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let (status, body) = responses[served.min(responses.len() - 1)];
                served += 1;

                let mut data = Vec::new();
                let mut buf = [0u8; 16 * 1024];
                loop {
                    let Ok(n) = stream.read(&mut buf).await else {
                        break;
                    };
                    if n == 0 {
                        break;
                    }
                    data.extend_from_slice(&buf[..n]);
                    if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                        let headers = String::from_utf8_lossy(&data[..pos]);
                        let content_length = headers
                            .lines()
                            .find_map(|l| {
                                let l = l.to_ascii_lowercase();
                                l.strip_prefix("content-length:")
                                    .and_then(|v| v.trim().parse::<usize>().ok())
                            })
                            .unwrap_or(0);
                        if data.len() >= pos + 4 + content_length {
                            break;
                        }
                    }
                }

                let response = format!(
                    "HTTP/1.1 {} canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{addr}")
    }

    fn config_for(slides: &std::path::Path, log: std::path::PathBuf, endpoint: &str) -> DetectConfig {
        DetectConfig::builder()
            .slides_dir(slides)
            .log_path(log)
            .endpoint(endpoint)
            .api_key("test-key")
            .deployment_id("gpt-4o")
            .timeout_secs(5)
            .build()
            .expect("config")
    }

    // Discard port: connections are refused immediately, so tests using
    // this endpoint run offline and never reach a real service.
    const REFUSED_ENDPOINT: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn missing_slides_dir_is_fatal() {
        let tmp = TempDir::new().expect("tempdir");
        let config = config_for(
            std::path::Path::new("/definitely/not/here"),
            tmp.path().join("logos.txt"),
            REFUSED_ENDPOINT,
        );
        let err = detect_logos(&config).await.expect_err("should fail");
        assert!(matches!(err, DeckscanError::SlidesDirNotFound { .. }));
    }

    #[tokio::test]
    async fn log_is_truncated_on_each_run() {
        let slides = TempDir::new().expect("tempdir");
        let out = TempDir::new().expect("tempdir");
        let log_path = out.path().join("nested").join("logos.txt");

        // Simulate a previous run's content.
        std::fs::create_dir_all(log_path.parent().unwrap()).expect("mkdir");
        std::fs::write(&log_path, "old_slide.png: [Contoso]\n").expect("write");

        let config = config_for(slides.path(), log_path.clone(), REFUSED_ENDPOINT);
        let output = detect_logos(&config).await.expect("detect");

        assert!(output.slides.is_empty());
        let log = std::fs::read_to_string(&log_path).expect("read log");
        assert!(log.is_empty(), "stale lines survived: {log:?}");
    }

    #[tokio::test]
    async fn failed_request_skips_image_and_continues() {
        let slides = TempDir::new().expect("tempdir");
        let out = TempDir::new().expect("tempdir");
        std::fs::write(slides.path().join("a_slide1.png"), b"png").expect("write");
        std::fs::write(slides.path().join("b_slide1.png"), b"png").expect("write");

        let config = config_for(slides.path(), out.path().join("logos.txt"), REFUSED_ENDPOINT);
        let output = detect_logos(&config).await.expect("batch still ok");

        // Both images attempted, both failed, none aborted the batch.
        assert_eq!(output.stats.total_slides, 2);
        assert_eq!(output.stats.failed_slides, 2);
        assert_eq!(output.stats.processed_slides, 0);
        assert_eq!(output.slides[0].filename, "a_slide1.png");
        assert_eq!(output.slides[1].filename, "b_slide1.png");

        let log = std::fs::read_to_string(out.path().join("logos.txt")).expect("read log");
        assert!(log.is_empty(), "failed slides must not be logged: {log:?}");
    }

    #[tokio::test]
    async fn non_success_status_skips_image_but_later_images_proceed() {
        let slides = TempDir::new().expect("tempdir");
        let out = TempDir::new().expect("tempdir");
        std::fs::write(slides.path().join("a_slide1.png"), b"png").expect("write");
        std::fs::write(slides.path().join("b_slide1.png"), b"png").expect("write");

        // First image hits a 500, the second gets a well-formed reply.
        let endpoint = spawn_canned_server(vec![
            (500, r#"{"error":{"message":"boom"}}"#),
            (
                200,
                r#"{"choices":[{"message":{"role":"assistant","content":"[Contoso]"}}]}"#,
            ),
        ])
        .await;

        let config = config_for(slides.path(), out.path().join("logos.txt"), &endpoint);
        let output = detect_logos(&config).await.expect("batch still ok");

        assert_eq!(output.stats.total_slides, 2);
        assert_eq!(output.stats.failed_slides, 1);
        assert_eq!(output.stats.processed_slides, 1);

        assert!(
            matches!(
                output.slides[0].error,
                Some(SlideError::ApiStatus { status: 500, .. })
            ),
            "got: {:?}",
            output.slides[0].error
        );
        assert_eq!(output.slides[1].reply.as_deref(), Some("[Contoso]"));

        // Only the successful image is logged.
        let log = std::fs::read_to_string(out.path().join("logos.txt")).expect("read log");
        assert_eq!(log, "b_slide1.png: [Contoso]\n");
    }
}
