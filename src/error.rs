//! Error types for the deckscan library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`DeckscanError`] — **Fatal**: the stage cannot run at all (missing
//!   slides directory, invalid configuration, unwritable log file). Returned
//!   as `Err(DeckscanError)` from the top-level entry points.
//!
//! * [`DocumentError`] / [`SlideError`] — **Non-fatal**: a single document
//!   or slide image failed (conversion tool exited non-zero, API returned a
//!   non-success status) but the rest of the batch is fine. Stored inside
//!   [`crate::output::DocumentResult`] and [`crate::output::SlideResult`] so
//!   callers can inspect partial success rather than losing the whole batch
//!   to one bad input.
//!
//! Nothing is retried; every per-item failure is recorded and the batch
//! moves on to the next item.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the deckscan library.
///
/// Per-document and per-slide failures use [`DocumentError`] and
/// [`SlideError`] and are stored in the batch output rather than
/// propagated here.
#[derive(Debug, Error)]
pub enum DeckscanError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The detector slides directory does not exist.
    ///
    /// Only the detector treats a missing input directory as fatal: the
    /// converter lists a missing directory as empty, exactly like a
    /// directory with no presentations in it.
    #[error("Slides directory '{path}' does not exist.\nRun `deckscan convert` first, or point --slides at a directory of PNG files.")]
    SlidesDirNotFound { path: PathBuf },

    /// A directory listing failed mid-scan.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the detection log file.
    #[error("Failed to write log file '{path}': {source}")]
    LogWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── API client errors ─────────────────────────────────────────────────
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClientBuild(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single presentation document.
///
/// Stored in [`crate::output::DocumentResult`] when conversion of one
/// document fails. The batch continues with the next document.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// The per-document scratch directory could not be created.
    #[error("Failed to create scratch directory for '{document}': {detail}")]
    Scratch { document: String, detail: String },

    /// An external conversion tool exited with a non-zero status.
    #[error("'{tool}' failed for '{document}' (exit {status}): {stderr}")]
    ToolFailed {
        tool: String,
        document: String,
        status: i32,
        stderr: String,
    },

    /// An external conversion tool could not be spawned at all.
    #[error("Could not run '{tool}': {detail}\nEnsure it is installed and on PATH.")]
    ToolNotFound { tool: String, detail: String },

    /// The tool reported success but the intermediate PDF never appeared.
    #[error("No intermediate PDF was produced for '{document}'")]
    MissingPdf { document: String },

    /// Rasterisation succeeded but produced no page images.
    #[error("No page images were generated for '{document}'")]
    NoPagesRendered { document: String },

    /// Moving a rendered image into the output directory failed.
    #[error("Failed to place slide image '{target}': {detail}")]
    MoveFailed { target: String, detail: String },
}

/// A non-fatal error for a single slide image during detection.
///
/// Stored in [`crate::output::SlideResult`]. The batch continues with the
/// next image.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum SlideError {
    /// The image file could not be read from disk.
    #[error("'{filename}': failed to read image: {detail}")]
    ReadFailed { filename: String, detail: String },

    /// The API returned a non-success HTTP status.
    #[error("'{filename}': API returned HTTP {status}: {body}")]
    ApiStatus {
        filename: String,
        status: u16,
        body: String,
    },

    /// The request never completed (connection error, timeout).
    #[error("'{filename}': request failed: {detail}")]
    RequestFailed { filename: String, detail: String },

    /// The response body was not the expected chat-completions shape.
    #[error("'{filename}': unexpected response body: {detail}")]
    BadResponse { filename: String, detail: String },
}
