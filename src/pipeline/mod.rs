//! Pipeline stages shared by the two batch entry points.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different rasteriser binary) without touching
//! the others.
//!
//! ## Data Flow
//!
//! ```text
//! convert:  discover ──▶ render
//!           (*.pptx)     (soffice + pdftoppm, rename to {base}_slideN.png)
//!
//! detect:   discover ──▶ encode ──▶ vision
//!           (*.png)      (base64)   (Azure chat-completions)
//! ```
//!
//! 1. [`discover`] — enumerate input files, sorted by filename
//! 2. [`render`]   — per-document subprocess orchestration in a scoped temp dir
//! 3. [`encode`]   — read an image file and wrap it as a base64 data-URL
//! 4. [`vision`]   — drive the chat-completions call; the only stage with
//!    network I/O

pub mod discover;
pub mod encode;
pub mod render;
pub mod vision;
