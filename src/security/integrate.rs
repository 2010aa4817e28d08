use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::SECURITY_CONFIG_FILE;
use crate::error::{Error, Result};
use crate::pipeline::RenderedProject;
use crate::processor::copy_file;

const SECURITY_DOCS: &str = "\
# Security

This project ships with automated security checks.

## Local checks

```bash
./scripts/security/run-security-check.sh
```

## CI

- `.github/workflows/security-check.yml` runs the checks on every pull request
- Critical findings fail the build

## Configuration

- `.bandit`: Bandit settings (Python)
- `scripts/security/semgrep-rules/`: custom Semgrep rules
";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SecurityConfig {
    security: SecuritySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SecuritySection {
    bandit: BanditSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BanditSettings {
    enabled: bool,
    exclude_dirs: Vec<String>,
}

/// What the integration step did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecuritySummary {
    /// Files copied into the output tree, relative to it
    pub files_copied: Vec<PathBuf>,
    /// Whether a per-template security config was found and applied
    pub config_applied: bool,
}

/// Final state of the security step. Never affects render success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityStatus {
    Integrated(SecuritySummary),
    Skipped { reason: String },
    Failed { message: String },
}

impl std::fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityStatus::Integrated(summary) => {
                write!(f, "copied {} security files", summary.files_copied.len())
            }
            SecurityStatus::Skipped { reason } => write!(f, "skipped ({reason})"),
            SecurityStatus::Failed { message } => write!(f, "failed ({message})"),
        }
    }
}

/// Copies the shared security template into a rendered project.
#[derive(Debug, Clone)]
pub struct SecurityIntegrator {
    security_template_dir: PathBuf,
}

impl SecurityIntegrator {
    pub fn new<P: Into<PathBuf>>(security_template_dir: P) -> Self {
        Self {
            security_template_dir: security_template_dir.into(),
        }
    }

    /// Integrates security files. Only a successfully rendered project can
    /// be passed in, so this step cannot run ahead of rendering.
    pub fn integrate(&self, project: &RenderedProject) -> SecurityStatus {
        if !self.security_template_dir.is_dir() {
            warn!(
                "Security template not found: {}. Skipping security integration",
                self.security_template_dir.display()
            );
            return SecurityStatus::Skipped {
                reason: format!("{} not found", self.security_template_dir.display()),
            };
        }

        match self.copy_security_files(project.output_root()) {
            Ok(files_copied) => {
                let config_path = project.template_root().join(SECURITY_CONFIG_FILE);
                let config_applied = if config_path.is_file() {
                    match apply_security_config(&config_path, project.output_root()) {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("Failed to apply security config: {e}");
                            false
                        }
                    }
                } else {
                    info!("No {SECURITY_CONFIG_FILE} found, using default security configuration");
                    false
                };
                SecurityStatus::Integrated(SecuritySummary {
                    files_copied,
                    config_applied,
                })
            }
            Err(e) => SecurityStatus::Failed {
                message: e.to_string(),
            },
        }
    }

    fn copy_security_files(&self, output_root: &Path) -> Result<Vec<PathBuf>> {
        let src = &self.security_template_dir;
        let mut copied = Vec::new();

        let mut copy = |relative: &Path| -> Result<()> {
            copy_file(&src.join(relative), &output_root.join(relative))?;
            debug!("Copied security file {}", relative.display());
            copied.push(relative.to_path_buf());
            Ok(())
        };

        if src.join(".bandit").is_file() {
            copy(Path::new(".bandit"))?;
        }

        let workflows = src.join(".github").join("workflows");
        if workflows.is_dir() {
            let mut names: Vec<PathBuf> = fs::read_dir(&workflows)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "yml"))
                .collect();
            names.sort();
            for path in names {
                let relative = path.strip_prefix(src).map_err(|e| Error::SecurityError(e.to_string()))?;
                copy(relative)?;
            }
        }

        let scripts = src.join("scripts").join("security");
        if scripts.is_dir() {
            for entry in WalkDir::new(&scripts).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(src)
                    .map_err(|e| Error::SecurityError(e.to_string()))?;
                copy(relative)?;
            }
        }

        info!("Copied {} security files", copied.len());
        Ok(copied)
    }
}

fn apply_security_config(config_path: &Path, output_root: &Path) -> Result<()> {
    let content = fs::read_to_string(config_path)?;
    let config: SecurityConfig = if content.trim().is_empty() {
        SecurityConfig::default()
    } else {
        serde_yaml::from_str(&content)?
    };
    debug!("Loaded security config from {}", config_path.display());

    let bandit = &config.security.bandit;
    if bandit.enabled && output_root.join(".bandit").is_file() && !bandit.exclude_dirs.is_empty() {
        info!("Security config lists {} Bandit exclude_dirs", bandit.exclude_dirs.len());
    }

    let docs_dir = output_root.join("docs").join("security");
    fs::create_dir_all(&docs_dir)?;
    fs::write(docs_dir.join("README.md"), SECURITY_DOCS)?;
    info!("Created docs/security/README.md");
    Ok(())
}
