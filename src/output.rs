//! Result and statistics types produced by the two stages.
//!
//! Both stages return a full batch report even when individual items fail:
//! per-item results carry the non-fatal error (if any) so callers can decide
//! their own tolerance — abort on the first failure, log and continue, or
//! collect everything for a post-run report. The `--json` CLI flag prints
//! these types verbatim, which is why everything here is `Serialize`.

use crate::error::{DocumentError, SlideError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Converter output ─────────────────────────────────────────────────────

/// Outcome of converting one presentation document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Source file name, e.g. `quarterly_review.pptx`.
    pub document: String,

    /// Slide images written to the output directory, in slide order.
    pub slides: Vec<PathBuf>,

    /// Wall-clock time spent on this document (both tool invocations).
    pub duration_ms: u64,

    /// `Some` when the document was skipped; `slides` is empty in that case.
    pub error: Option<DocumentError>,
}

/// Full report of one converter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    /// One entry per discovered `.pptx`, in discovery (sorted) order.
    pub documents: Vec<DocumentResult>,
    pub stats: ConvertStats,
}

/// Aggregate counters for a converter run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertStats {
    /// Documents found in the input directory.
    pub total_documents: usize,
    /// Documents fully converted.
    pub converted_documents: usize,
    /// Documents skipped because of a per-document error.
    pub failed_documents: usize,
    /// Slide images written across all documents.
    pub total_slides: usize,
    pub total_duration_ms: u64,
}

// ── Detector output ──────────────────────────────────────────────────────

/// Outcome of running detection on one slide image.
///
/// A successful result corresponds to exactly one `{filename}: {reply}`
/// line in the detection log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideResult {
    /// Image file name, e.g. `quarterly_review_slide3.png`.
    pub filename: String,

    /// Raw model reply, expected to resemble a bracketed list such as
    /// `[Microsoft,NVIDIA,IBM]`. Never parsed or validated.
    pub reply: Option<String>,

    pub duration_ms: u64,

    /// `Some` when the image was skipped; no log line was written.
    pub error: Option<SlideError>,
}

impl SlideResult {
    /// Render the detection-log line for this result.
    ///
    /// Returns `None` for failed slides — the log only records successes.
    pub fn log_line(&self) -> Option<String> {
        self.reply
            .as_ref()
            .map(|reply| format!("{}: {}", self.filename, reply))
    }
}

/// Full report of one detector run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectOutput {
    /// One entry per `.png` in the slides directory, in filename order.
    pub slides: Vec<SlideResult>,
    /// Path of the log file that was written.
    pub log_path: PathBuf,
    pub stats: DetectStats,
}

/// Aggregate counters for a detector run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectStats {
    /// PNG images found in the slides directory.
    pub total_slides: usize,
    /// Images that produced a log line.
    pub processed_slides: usize,
    /// Images skipped because of a per-slide error.
    pub failed_slides: usize,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_format() {
        let r = SlideResult {
            filename: "deck_slide1.png".into(),
            reply: Some("[Microsoft,NVIDIA]".into()),
            duration_ms: 1200,
            error: None,
        };
        assert_eq!(
            r.log_line().as_deref(),
            Some("deck_slide1.png: [Microsoft,NVIDIA]")
        );
    }

    #[test]
    fn failed_slide_has_no_log_line() {
        let r = SlideResult {
            filename: "deck_slide2.png".into(),
            reply: None,
            duration_ms: 80,
            error: Some(SlideError::ApiStatus {
                filename: "deck_slide2.png".into(),
                status: 500,
                body: "oops".into(),
            }),
        };
        assert!(r.log_line().is_none());
    }

    #[test]
    fn convert_output_serialises() {
        let out = ConvertOutput {
            documents: vec![DocumentResult {
                document: "deck.pptx".into(),
                slides: vec![PathBuf::from("slides/deck_slide1.png")],
                duration_ms: 900,
                error: None,
            }],
            stats: ConvertStats {
                total_documents: 1,
                converted_documents: 1,
                failed_documents: 0,
                total_slides: 1,
                total_duration_ms: 900,
            },
        };
        let json = serde_json::to_string(&out).expect("serialises");
        assert!(json.contains("deck_slide1.png"));
    }
}
