//! Input discovery: enumerate the files a stage will process.
//!
//! Both stages promise deterministic processing order, so every listing
//! here is sorted by file name before it is returned. Extension matching
//! is case-insensitive (`deck.PPTX` and `slide.PNG` count), mirroring how
//! the files typically arrive from other tools.

use crate::error::DeckscanError;
use std::path::{Path, PathBuf};

/// List `.pptx` files in `dir`, sorted by file name.
///
/// Non-recursive: only direct children are considered. Subdirectories and
/// files with other extensions are ignored. A missing directory lists as
/// empty — the converter treats it exactly like a directory with no
/// presentations in it.
pub fn presentation_files(dir: &Path) -> Result<Vec<PathBuf>, DeckscanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    files_with_extension(dir, "pptx")
}

/// List `.png` files in `dir`, sorted by file name.
pub fn slide_images(dir: &Path) -> Result<Vec<PathBuf>, DeckscanError> {
    if !dir.is_dir() {
        return Err(DeckscanError::SlidesDirNotFound {
            path: dir.to_path_buf(),
        });
    }
    files_with_extension(dir, "png")
}

fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, DeckscanError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DeckscanError::ReadDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DeckscanError::ReadDirFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, ext) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Case-insensitive extension check.
fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// The file name without its extension, e.g. `data/deck.pptx` → `deck`.
///
/// Slide images are named after this base, so a document with no stem at
/// all falls back to the full file name.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").expect("write test file");
    }

    #[test]
    fn presentations_sorted_and_filtered() {
        let tmp = TempDir::new().expect("tempdir");
        touch(tmp.path(), "zeta.pptx");
        touch(tmp.path(), "alpha.pptx");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "MIXED.PpTx");
        std::fs::create_dir(tmp.path().join("nested.pptx")).expect("mkdir");

        let files = presentation_files(tmp.path()).expect("list");
        let names: Vec<String> = files.iter().map(|p| base_name(p)).collect();
        assert_eq!(names, vec!["MIXED", "alpha", "zeta"]);
    }

    #[test]
    fn slide_images_sorted() {
        let tmp = TempDir::new().expect("tempdir");
        touch(tmp.path(), "deck_slide2.png");
        touch(tmp.path(), "deck_slide1.png");
        touch(tmp.path(), "deck_slide1.png.bak");

        let files = slide_images(tmp.path()).expect("list");
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["deck_slide1.png", "deck_slide2.png"]);
    }

    #[test]
    fn missing_input_dir_lists_empty() {
        let files = presentation_files(Path::new("/definitely/not/here")).expect("list");
        assert!(files.is_empty());
    }

    #[test]
    fn missing_slides_dir_is_fatal() {
        let err = slide_images(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, DeckscanError::SlidesDirNotFound { .. }));
    }

    #[test]
    fn base_name_strips_extension() {
        assert_eq!(base_name(Path::new("data/q3 review.pptx")), "q3 review");
        assert_eq!(base_name(Path::new("plain")), "plain");
    }
}
