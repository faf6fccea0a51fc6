//! Mapping a font family (as carried on the wire) to a font file

use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use crate::font::FontLoadError;

/// Resolve `family` to a font file.
///
/// In order:
/// 1. `family` itself names an existing file.
/// 2. `root` is a file: every family resolves to it.
/// 3. `root` is a directory: the first font file (by name) in it whose stem
///    matches the family, or the stem of the family path, ignoring case.
pub fn resolve_font_path(family: &str, root: Option<&Path>) -> Result<PathBuf, FontLoadError> {
    let direct = Path::new(family);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    if let Some(root) = root {
        if root.is_file() {
            return Ok(root.to_path_buf());
        }

        if root.is_dir() {
            if let Some(found) = scan_font_dir(root, &family_stem(family)) {
                return Ok(found);
            }
        } else {
            warn!("Font root {} does not exist", root.display());
        }
    }

    Err(FontLoadError::NotFound {
        family: family.to_string(),
    })
}

/// Check if a file is a font file fontdue can parse
pub fn is_font_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf"),
        None => false,
    }
}

fn family_stem(family: &str) -> String {
    let path = Path::new(family);
    // "Inter 2.0" is a family name, not a file with a ".0" extension
    let name = if is_font_file(path) {
        path.file_stem()
    } else {
        path.file_name()
    };
    name.map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| family.to_string())
        .to_lowercase()
}

fn scan_font_dir(dir: &Path, wanted: &str) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot scan font directory {}: {}", dir.display(), e);
            return None;
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_font_file(path))
        .filter(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().to_lowercase() == wanted)
                .unwrap_or(false)
        })
        .collect();

    matches.sort();
    trace!("Font candidates for {:?} in {}: {:?}", wanted, dir.display(), matches);
    matches.into_iter().next()
}
