//! Template tree enumeration and file classification.
//!
//! Walks a template root, applies [`ExclusionRules`] and tags every
//! included file as text or binary. The walk returns its result as a value;
//! nothing is accumulated across calls.

use crate::constants::{TEMPLATE_SUFFIX, TEXT_EXTENSIONS, TEXT_FILENAMES, TEXT_PROBE_LEN};
use crate::error::{Error, Result};
use crate::ignore::ExclusionRules;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Content classification of a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Rendered through placeholder substitution
    Text,
    /// Copied byte-for-byte
    Binary,
}

/// One file discovered under a template root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Path relative to the template root
    pub relative_path: PathBuf,
    /// Absolute (or root-joined) source path
    pub source_path: PathBuf,
    pub classification: Classification,
    /// True when the file name carries the template-only suffix
    pub template_marker: bool,
}

impl TemplateEntry {
    /// Output path relative to the output root.
    pub fn output_relative_path(&self) -> PathBuf {
        if self.template_marker {
            self.relative_path.with_extension("")
        } else {
            self.relative_path.clone()
        }
    }
}

/// Result of walking a template root.
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    /// Entries to render, in enumeration order
    pub entries: Vec<TemplateEntry>,
    /// Source paths dropped by the exclusion rules
    pub excluded: Vec<PathBuf>,
}

fn has_template_marker(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(TEMPLATE_SUFFIX)
}

/// Decides whether `path` holds text or binary content.
///
/// Known extensions and extensionless known names are text without touching
/// the file; anything else is text only if its first bytes are valid UTF-8.
pub fn classify<P: AsRef<Path>>(path: P) -> Classification {
    let path = path.as_ref();

    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        if TEXT_EXTENSIONS.contains(&ext) {
            return Classification::Text;
        }
    } else if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
        if TEXT_FILENAMES.contains(&name) {
            return Classification::Text;
        }
    }

    match probe_is_utf8(path) {
        Ok(true) => Classification::Text,
        Ok(false) => Classification::Binary,
        Err(e) => {
            debug!("Could not probe {}: {e}", path.display());
            Classification::Binary
        }
    }
}

fn probe_is_utf8(path: &Path) -> std::io::Result<bool> {
    let mut buffer = Vec::with_capacity(TEXT_PROBE_LEN);
    File::open(path)?
        .take(TEXT_PROBE_LEN as u64)
        .read_to_end(&mut buffer)?;

    Ok(match std::str::from_utf8(&buffer) {
        Ok(_) => true,
        // A multi-byte character cut off by the probe window is still text.
        Err(e) => e.error_len().is_none(),
    })
}

/// Enumerates every file under `template_root`.
///
/// Directories, including symlinks to directories, are never entries.
/// Files are visited in a stable, name-sorted order so repeated runs report
/// identically.
///
/// # Errors
/// * `Error::TemplateNotFound` if the root is missing
/// * `Error::WalkError` if a directory cannot be read
pub fn walk_template<P: AsRef<Path>>(template_root: P, rules: &ExclusionRules) -> Result<TemplateTree> {
    let template_root = template_root.as_ref();
    if !template_root.is_dir() {
        return Err(Error::TemplateNotFound {
            path: template_root.to_path_buf(),
            available: Vec::new(),
        });
    }

    let mut tree = TemplateTree::default();

    for dir_entry in WalkDir::new(template_root).sort_by_file_name() {
        let dir_entry = dir_entry?;
        if dir_entry.file_type().is_dir() {
            continue;
        }
        // links are not followed; a link to a directory has nothing to copy
        if dir_entry.path_is_symlink() && dir_entry.path().is_dir() {
            debug!("Skipping symlinked directory: {}", dir_entry.path().display());
            continue;
        }

        let source_path = dir_entry.path().to_path_buf();
        let relative_path = source_path
            .strip_prefix(template_root)
            .map_err(|e| Error::ProcessError {
                source_path: source_path.clone(),
                message: e.to_string(),
            })?
            .to_path_buf();

        if rules.is_excluded(&relative_path) {
            tree.excluded.push(source_path);
            continue;
        }

        let classification = classify(&source_path);
        debug!("Found {:?} file: {}", classification, relative_path.display());

        tree.entries.push(TemplateEntry {
            template_marker: has_template_marker(&relative_path),
            relative_path,
            source_path,
            classification,
        });
    }

    Ok(tree)
}
