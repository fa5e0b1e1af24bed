//! # deckscan
//!
//! Detect company logos in slide decks using Vision Language Models (VLMs).
//!
//! ## Why this crate?
//!
//! Logo marks are graphics, not text — OCR and pptx text extraction never
//! see them. Instead deckscan rasterises each slide into a PNG and lets a
//! vision model look at it as a human would, returning the brand names it
//! recognises.
//!
//! ## Pipeline Overview
//!
//! Two independent, sequentially-run stages with no shared state:
//!
//! ```text
//! convert   *.pptx ─▶ soffice ─▶ pdf ─▶ pdftoppm ─▶ {base}_slideN.png
//! detect    *.png  ─▶ base64  ─▶ Azure OpenAI ─▶ "{filename}: [Brand,…]"
//! ```
//!
//! The converter shells out to LibreOffice and poppler per document inside
//! a scratch directory that is removed on every exit path. The detector
//! issues one chat-completions call per image, in filename order, and
//! appends one line per reply to a plain-text log. Per-item failures are
//! recorded and skipped; neither stage ever aborts its batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deckscan::{convert_documents, detect_logos, ConvertConfig, DetectConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converted = convert_documents(&ConvertConfig::default()).await?;
//!     eprintln!("{} slide image(s)", converted.stats.total_slides);
//!
//!     let config = DetectConfig::builder()
//!         .endpoint(std::env::var("AZURE_OPENAI_ENDPOINT")?)
//!         .api_key(std::env::var("AZURE_OPENAI_API_KEY")?)
//!         .deployment_id(std::env::var("AZURE_OPENAI_DEPLOYMENT_ID")?)
//!         .build()?;
//!     let detected = detect_logos(&config).await?;
//!     eprintln!("log written to {}", detected.log_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `deckscan` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! deckscan = { version = "0.2", default-features = false }
//! ```
//!
//! ## External tools
//!
//! The converter requires `soffice` (LibreOffice) and `pdftoppm` (poppler)
//! on PATH; both binary names are configurable through
//! [`ConvertConfig`]. The detector requires Azure OpenAI credentials with
//! a vision-capable deployment.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod detect;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConvertConfig, ConvertConfigBuilder, DetectConfig, DetectConfigBuilder};
pub use convert::convert_documents;
pub use detect::detect_logos;
pub use error::{DeckscanError, DocumentError, SlideError};
pub use output::{
    ConvertOutput, ConvertStats, DetectOutput, DetectStats, DocumentResult, SlideResult,
};
