//! Slide rasterisation: drive LibreOffice and pdftoppm for one document.
//!
//! ## Why external tools?
//!
//! Faithful rendering of a `.pptx` (fonts, SmartArt, embedded media) is a
//! job for a full office suite; LibreOffice headless does it well and is
//! already installed on most build hosts. The intermediate PDF is then
//! rasterised by poppler's `pdftoppm`, which produces one numbered PNG per
//! page. Both invocations capture exit status and stderr so a tool failure
//! becomes a structured [`DocumentError`], never a panic.
//!
//! ## Why a scratch directory inside the output directory?
//!
//! `tempfile::TempDir::new_in(output_dir)` keeps the scratch files on the
//! same filesystem as their final destination, so the renumbering step is a
//! cheap `rename`. The drop guard removes the directory on every exit path,
//! including early returns on tool failure.

use crate::config::ConvertConfig;
use crate::error::DocumentError;
use crate::pipeline::discover;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Render one presentation into `{base}_slideN.png` images in the output
/// directory.
///
/// Returns the paths of the written slide images in slide order. Any
/// failure is returned as a [`DocumentError`]; the caller records it and
/// continues with the next document. The scratch directory is removed
/// unconditionally when this function returns.
pub async fn render_document(
    document: &Path,
    config: &ConvertConfig,
) -> Result<Vec<PathBuf>, DocumentError> {
    let doc_name = document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| document.display().to_string());
    let base = discover::base_name(document);

    // Drop guard: deleted on every exit path, success or failure.
    let scratch = TempDir::new_in(&config.output_dir).map_err(|e| DocumentError::Scratch {
        document: doc_name.clone(),
        detail: e.to_string(),
    })?;

    // Step 1: pptx → pdf
    info!("Converting '{}' to PDF", doc_name);
    run_tool(
        &config.soffice_bin,
        &[
            "--headless".as_ref(),
            "--convert-to".as_ref(),
            "pdf".as_ref(),
            "--outdir".as_ref(),
            scratch.path().as_os_str(),
            document.as_os_str(),
        ],
        &doc_name,
    )
    .await?;

    let pdf_path = scratch.path().join(format!("{base}.pdf"));
    if !pdf_path.is_file() {
        // soffice exits 0 on some conversion failures; the missing
        // artifact is the only reliable signal.
        return Err(DocumentError::MissingPdf { document: doc_name });
    }

    // Step 2: pdf → numbered pngs
    info!("Rasterising '{}' at {} DPI", doc_name, config.dpi);
    let page_prefix = scratch.path().join(&base);
    run_tool(
        &config.pdftoppm_bin,
        &[
            "-png".as_ref(),
            "-r".as_ref(),
            config.dpi.to_string().as_ref(),
            pdf_path.as_os_str(),
            page_prefix.as_os_str(),
        ],
        &doc_name,
    )
    .await?;

    // Step 3: collect, renumber, move
    let pages = collect_page_images(scratch.path(), &base).map_err(|e| DocumentError::Scratch {
        document: doc_name.clone(),
        detail: e.to_string(),
    })?;
    if pages.is_empty() {
        return Err(DocumentError::NoPagesRendered { document: doc_name });
    }

    renumber_into(&pages, &base, &config.output_dir).await
}

/// Run one external tool, capturing exit status and stderr.
async fn run_tool(
    bin: &str,
    args: &[&std::ffi::OsStr],
    document: &str,
) -> Result<(), DocumentError> {
    debug!("Running {} {:?}", bin, args);
    let output = Command::new(bin)
        .args(args)
        .output()
        .await
        .map_err(|e| DocumentError::ToolNotFound {
            tool: bin.to_string(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!("'{}' failed for '{}': {}", bin, document, stderr);
        return Err(DocumentError::ToolFailed {
            tool: bin.to_string(),
            document: document.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(())
}

/// Collect `{base}-*.png` files produced by pdftoppm, sorted
/// lexicographically by file name.
///
/// pdftoppm zero-pads page numbers to a fixed width per document, so
/// lexicographic order equals page order.
fn collect_page_images(dir: &Path, base: &str) -> std::io::Result<Vec<PathBuf>> {
    let prefix = format!("{base}-");
    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
            name.starts_with(&prefix) && name.ends_with(".png")
        })
        .collect();

    pages.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(pages)
}

/// Move sorted page images into the output directory as
/// `{base}_slide{N}.png`, N starting at 1.
///
/// `rename` overwrites an existing target, so re-running the converter
/// replaces images from a previous run by filename collision.
async fn renumber_into(
    pages: &[PathBuf],
    base: &str,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, DocumentError> {
    let mut written = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        let target = output_dir.join(format!("{base}_slide{}.png", index + 1));
        tokio::fs::rename(page, &target)
            .await
            .map_err(|e| DocumentError::MoveFailed {
                target: target.display().to_string(),
                detail: e.to_string(),
            })?;
        debug!("Created '{}'", target.display());
        written.push(target);
    }

    Ok(written)
}
