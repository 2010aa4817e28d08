//! Generation pipeline.
//!
//! Each stage consumes the previous stage's result type:
//! [`ValidatedConfig`] → [`RenderedProject`] → [`GenerationReport`].
//! Security integration takes a `&RenderedProject`, so it can only run
//! after a successful render.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::completeness::{find_unresolved, UnresolvedReport};
use crate::config::Variables;
use crate::constants::DEFAULT_EXCLUDE_PATTERNS;
use crate::error::{Error, Result};
use crate::ignore::ExclusionRules;
use crate::processor::{Processor, RenderOutcome};
use crate::renderer::PlaceholderRenderer;
use crate::security::{SecurityIntegrator, SecurityStatus};
use crate::validation::{validate, ValidationResult};
use crate::walker::walk_template;

/// Names of the template directories available under `templates_dir`.
pub fn available_templates<P: AsRef<Path>>(templates_dir: P) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(templates_dir.as_ref())
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_dir())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Fails with the list of alternatives when `template_root` is missing.
pub fn ensure_template_root<P: AsRef<Path>>(template_root: P) -> Result<PathBuf> {
    let template_root = template_root.as_ref();
    if template_root.is_dir() {
        return Ok(template_root.to_path_buf());
    }
    let available = template_root.parent().map(available_templates).unwrap_or_default();
    Err(Error::TemplateNotFound {
        path: template_root.to_path_buf(),
        available,
    })
}

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// A variable mapping that passed (or deliberately skipped) validation.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    variables: Variables,
    validation: ValidationResult,
}

impl ValidatedConfig {
    /// Validates `variables`.
    ///
    /// # Errors
    /// * `Error::InvalidConfiguration` if validation reports any error
    pub fn new(variables: Variables) -> Result<Self> {
        let validation = validate(&variables);
        for warning in &validation.warnings {
            debug!("Validation warning: {warning}");
        }
        if !validation.is_valid() {
            return Err(Error::InvalidConfiguration(validation));
        }
        Ok(Self {
            variables,
            validation,
        })
    }

    /// Accepts `variables` without running the validator.
    pub fn unchecked(variables: Variables) -> Self {
        Self {
            variables,
            validation: ValidationResult::default(),
        }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Walks `template_root` and renders it into `output_root`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the template root is missing
    /// * `Error::WalkError` / `Error::IoError` if the tree cannot be enumerated
    ///   or the output root cannot be created
    pub fn render(
        self,
        template_root: &Path,
        output_root: &Path,
        rules: &ExclusionRules,
    ) -> Result<RenderedProject> {
        let template_root = ensure_template_root(template_root)?;
        let tree = walk_template(&template_root, rules)?;
        debug!(
            "Template tree: {} entries, {} excluded",
            tree.entries.len(),
            tree.excluded.len()
        );

        let renderer = PlaceholderRenderer::new(&self.variables)?;
        let outcome = Processor::new(&renderer, output_root).process_tree(&tree)?;
        info!(
            "Processed {} files, skipped {}",
            outcome.processed.len(),
            outcome.skipped.len()
        );

        Ok(RenderedProject {
            template_root,
            output_root: output_root.to_path_buf(),
            validation: self.validation,
            outcome,
        })
    }
}

/// A template that has been rendered to disk.
///
/// Only [`ValidatedConfig::render`] constructs this type.
#[derive(Debug, Clone)]
pub struct RenderedProject {
    template_root: PathBuf,
    output_root: PathBuf,
    validation: ValidationResult,
    outcome: RenderOutcome,
}

impl RenderedProject {
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn outcome(&self) -> &RenderOutcome {
        &self.outcome
    }

    /// Scans the written files for unresolved placeholders.
    pub fn check_completeness(&self) -> UnresolvedReport {
        find_unresolved(self.outcome.processed.as_slice())
    }

    /// Runs the completeness check and the optional security step.
    pub fn finish(self, integrator: Option<&SecurityIntegrator>) -> GenerationReport {
        let unresolved = self.check_completeness();
        let security = integrator.map(|integrator| integrator.integrate(&self));
        GenerationReport {
            output_root: self.output_root,
            validation: self.validation,
            outcome: self.outcome,
            unresolved,
            security,
        }
    }
}

/// Everything a successful run has to report.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_root: PathBuf,
    pub validation: ValidationResult,
    pub outcome: RenderOutcome,
    pub unresolved: UnresolvedReport,
    pub security: Option<SecurityStatus>,
}

/// Options controlling one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub template_root: PathBuf,
    pub output_root: PathBuf,
    pub exclude_patterns: Vec<String>,
    pub keep_hidden: Vec<String>,
    pub validate: bool,
    pub force: bool,
    pub security_template: Option<PathBuf>,
}

impl GenerateOptions {
    pub fn new<T: Into<PathBuf>, O: Into<PathBuf>>(template_root: T, output_root: O) -> Self {
        Self {
            template_root: template_root.into(),
            output_root: output_root.into(),
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            keep_hidden: Vec::new(),
            validate: true,
            force: false,
            security_template: None,
        }
    }
}

/// Runs the whole pipeline.
///
/// Setup checks (template root, output directory, exclusion patterns) and
/// validation all happen before any file is written.
pub fn generate(variables: Variables, options: &GenerateOptions) -> Result<GenerationReport> {
    let template_root = ensure_template_root(&options.template_root)?;
    let output_root = ensure_output_dir(&options.output_root, options.force)?;
    let rules = ExclusionRules::new(options.exclude_patterns.as_slice())?
        .preserve_hidden(options.keep_hidden.iter().cloned());

    let config = if options.validate {
        ValidatedConfig::new(variables)?
    } else {
        ValidatedConfig::unchecked(variables)
    };

    let rendered = config.render(&template_root, &output_root, &rules)?;
    let integrator = options.security_template.as_ref().map(SecurityIntegrator::new);
    Ok(rendered.finish(integrator.as_ref()))
}
