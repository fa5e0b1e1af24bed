//! Image encoding: slide PNG file → base64 data-URL attachment.
//!
//! Chat-completions APIs accept images as base64 data-URIs embedded in the
//! JSON request body. The bytes are sent exactly as they sit on disk — no
//! recompression — so the vision model sees the same pixels pdftoppm wrote.

use crate::error::SlideError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// A slide image ready to be embedded in an API request.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// File name of the source image, used for log lines and error context.
    pub filename: String,
    /// `data:image/png;base64,...` URL carrying the full image.
    pub data_url: String,
}

/// Read a slide image from disk and wrap it as a base64 data-URL.
pub async fn encode_image(path: &Path) -> Result<ImageAttachment, SlideError> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| SlideError::ReadFailed {
            filename: filename.clone(),
            detail: e.to_string(),
        })?;

    let b64 = STANDARD.encode(&bytes);
    debug!("Encoded '{}' → {} bytes base64", filename, b64.len());

    Ok(ImageAttachment {
        filename,
        data_url: format!("data:image/png;base64,{b64}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn encodes_file_as_data_url() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("deck_slide1.png");
        std::fs::write(&path, b"fake png bytes").expect("write");

        let attachment = encode_image(&path).await.expect("encode");
        assert_eq!(attachment.filename, "deck_slide1.png");
        assert!(attachment.data_url.starts_with("data:image/png;base64,"));

        let b64 = attachment
            .data_url
            .strip_prefix("data:image/png;base64,")
            .expect("prefix");
        assert_eq!(STANDARD.decode(b64).expect("valid base64"), b"fake png bytes");
    }

    #[tokio::test]
    async fn missing_file_is_a_slide_error() {
        let err = encode_image(Path::new("/nope/deck_slide1.png"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, SlideError::ReadFailed { .. }));
    }
}
