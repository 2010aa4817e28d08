//! Materialises template entries into an output tree.
//! Text entries go through the renderer, binary entries are copied as-is.
//! A failing entry is recorded as a diagnostic and never aborts the run.

use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    renderer::TemplateRenderer,
    walker::{Classification, TemplateEntry, TemplateTree},
};

/// Non-fatal problem encountered while rendering one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDiagnostic {
    pub source: PathBuf,
    pub message: String,
}

impl std::fmt::Display for RenderDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source.display(), self.message)
    }
}

/// How an entry ended up in the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Rendered,
    Copied,
    /// Text rendering failed and the file was copied unmodified
    CopiedAfterFailure,
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileAction::Rendered => write!(f, "Rendered"),
            FileAction::Copied => write!(f, "Copied"),
            FileAction::CopiedAfterFailure => write!(f, "Copied (fallback)"),
        }
    }
}

/// Record of one rendering run.
#[derive(Debug, Clone, Default)]
pub struct RenderOutcome {
    /// Output paths successfully written
    pub processed: Vec<PathBuf>,
    /// Source paths excluded by policy
    pub skipped: Vec<PathBuf>,
    pub diagnostics: Vec<RenderDiagnostic>,
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(Error::IoError)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

/// Copies `source` to `dest`; the permission bits travel with the content.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        create_dir_all(parent)?;
    }
    fs::copy(source, dest).map(|_| ()).map_err(Error::IoError)
}

/// A file written to the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub target: PathBuf,
    pub action: FileAction,
    /// Why the text path was abandoned, for [`FileAction::CopiedAfterFailure`]
    pub fallback_reason: Option<String>,
}

/// Writes template entries below an output root.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    output_root: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, output_root: &'a Path) -> Self {
        Self {
            renderer,
            output_root,
        }
    }

    /// Processes a single entry.
    ///
    /// A text entry that cannot be decoded or written is copied as binary
    /// instead, which still counts as success.
    ///
    /// # Errors
    /// * `Error::ProcessError` if the output file could not be produced at all
    pub fn process(&self, entry: &TemplateEntry) -> Result<ProcessedFile> {
        let target = self.output_root.join(entry.output_relative_path());

        let (action, fallback_reason) = match entry.classification {
            Classification::Binary => {
                debug!("Copying file: {}", target.display());
                self.copy(entry, &target)?;
                (FileAction::Copied, None)
            }
            Classification::Text => match self.render_text(&entry.source_path, &target) {
                Ok(()) => {
                    debug!("Writing file: {}", target.display());
                    (FileAction::Rendered, None)
                }
                Err(e) => {
                    warn!("Failed to process {}: {e}", entry.source_path.display());
                    self.copy(entry, &target)?;
                    (FileAction::CopiedAfterFailure, Some(e.to_string()))
                }
            },
        };

        Ok(ProcessedFile {
            target,
            action,
            fallback_reason,
        })
    }

    fn render_text(&self, source: &Path, target: &Path) -> Result<()> {
        let content = fs::read_to_string(source)?;
        let rendered = self.renderer.render(&content);
        write_file(target, &rendered)
    }

    fn copy(&self, entry: &TemplateEntry, target: &Path) -> Result<()> {
        copy_file(&entry.source_path, target).map_err(|e| Error::ProcessError {
            source_path: entry.source_path.clone(),
            message: e.to_string(),
        })
    }

    /// Renders every entry of `tree`.
    ///
    /// The output root is created if needed. Entries are processed in tree
    /// order; per-entry failures are collected, not propagated.
    pub fn process_tree(&self, tree: &TemplateTree) -> Result<RenderOutcome> {
        create_dir_all(self.output_root)?;

        let mut outcome = RenderOutcome {
            skipped: tree.excluded.clone(),
            ..RenderOutcome::default()
        };

        for entry in &tree.entries {
            match self.process(entry) {
                Ok(file) => {
                    info!("{}: '{}'", file.action, file.target.display());
                    if let Some(reason) = file.fallback_reason {
                        outcome.diagnostics.push(RenderDiagnostic {
                            source: entry.source_path.clone(),
                            message: format!("{reason} (copied without substitution)"),
                        });
                    }
                    outcome.processed.push(file.target);
                }
                Err(e) => {
                    warn!("{e}");
                    outcome.diagnostics.push(RenderDiagnostic {
                        source: entry.source_path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }
}
