use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{BadgeloopError, BadgeloopResult};

/// File extensions treated as images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["bmp", "gif", "jpeg", "jpg", "png", "webp"];

/// Directory names whose contents are logos rather than badges.
pub const LOGO_FOLDER_NAMES: &[&str] = &["logo", "logos"];

/// Image files found under an input folder, in sorted path order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscoveredImages {
    /// Grouped into multi-item frames.
    pub badges: Vec<PathBuf>,
    /// Each shown on its own frame after the badges.
    pub logos: Vec<PathBuf>,
}

impl DiscoveredImages {
    /// Total number of discovered files.
    pub fn len(&self) -> usize {
        self.badges.len() + self.logos.len()
    }

    /// Return `true` when nothing was found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Recursively collect images under `folder`.
///
/// A file is a logo when any directory between `folder` and the file is named `logo` or
/// `logos`.
pub fn discover_images(folder: &Path) -> BadgeloopResult<DiscoveredImages> {
    if !folder.is_dir() {
        return Err(BadgeloopError::validation(format!(
            "input folder not found: {}",
            folder.display()
        )));
    }

    let mut files = Vec::new();
    collect_files(folder, &mut files)?;
    files.sort();

    let mut out = DiscoveredImages::default();
    for path in files {
        if !has_image_extension(&path) {
            continue;
        }
        if is_under_logo_folder(folder, &path) {
            out.logos.push(path);
        } else {
            out.badges.push(path);
        }
    }

    if out.is_empty() {
        return Err(BadgeloopError::validation(format!(
            "no supported image files found in {}, supported extensions: {}",
            folder.display(),
            IMAGE_EXTENSIONS.join(", ")
        )));
    }
    tracing::debug!(
        badges = out.badges.len(),
        logos = out.logos.len(),
        "discovered images"
    );
    Ok(out)
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> BadgeloopResult<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        })
}

fn is_under_logo_folder(root: &Path, path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    let Some(parent) = rel.parent() else {
        return false;
    };
    parent.components().any(|c| {
        c.as_os_str().to_str().is_some_and(|name| {
            LOGO_FOLDER_NAMES
                .iter()
                .any(|logo| logo.eq_ignore_ascii_case(name))
        })
    })
}

/// Return `path` if it is free, otherwise the first free `stem-N.ext` (N from 1).
pub fn resolve_unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u64..)
        .map(|i| path.with_file_name(format!("{stem}-{i}{suffix}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/discover.rs"]
mod tests;
