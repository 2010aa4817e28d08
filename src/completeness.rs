//! Post-render scan for placeholders that were never resolved.

use crate::renderer::find_placeholders;
use crate::walker::{classify, Classification};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Output file → placeholder names still present in it.
pub type UnresolvedReport = BTreeMap<PathBuf, BTreeSet<String>>;

/// Re-reads every written text file and collects leftover placeholders.
///
/// Missing files, non-files, binary files and unreadable files are skipped
/// silently; the report is advisory.
pub fn find_unresolved<P: AsRef<Path>>(written: &[P]) -> UnresolvedReport {
    let mut report = UnresolvedReport::new();

    for path in written {
        let path = path.as_ref();
        if !path.is_file() || classify(path) != Classification::Text {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Skipping completeness check for {}: {e}", path.display());
                continue;
            }
        };

        let names = find_placeholders(&content);
        if !names.is_empty() {
            report.insert(path.to_path_buf(), names);
        }
    }

    report
}
