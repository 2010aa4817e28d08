//! Error handling for the scaffolding pipeline.
//! Defines the error type and result alias used throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationResult;

/// Errors that can abort a scaffolding run.
///
/// Per-file render problems are not represented here as fatal conditions:
/// they are collected as diagnostics on the render outcome instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors that occur while loading the configuration document
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The configuration document is not valid YAML
    #[error("Failed to parse YAML configuration: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Security scan results or other JSON inputs are malformed
    #[error("Failed to parse JSON: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// The template root does not exist
    #[error("{}", format_template_not_found(.path, .available))]
    TemplateNotFound { path: PathBuf, available: Vec<String> },

    /// The output directory exists and overwriting was not requested
    #[error("Output directory: '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    /// Validation of the variable mapping produced blocking errors
    #[error("{}", format_invalid_configuration(.0))]
    InvalidConfiguration(ValidationResult),

    /// An exclusion pattern could not be compiled
    #[error("Exclusion pattern error: {0}.")]
    IgnoreError(String),

    /// The template tree could not be enumerated
    #[error("Failed to walk template directory: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// A single template entry could not be rendered
    #[error("Failed to process '{}': {message}.", .source_path.display())]
    ProcessError { source_path: PathBuf, message: String },

    /// Security tooling could not be integrated into the output
    #[error("Security integration error: {0}.")]
    SecurityError(String),
}

fn format_template_not_found(path: &std::path::Path, available: &[String]) -> String {
    let mut message = format!("Template not found: '{}'.", path.display());
    if available.is_empty() {
        message.push_str(" No templates are available.");
    } else {
        message.push_str("\nAvailable templates:");
        for name in available {
            message.push_str(&format!("\n  - {name}"));
        }
    }
    message
}

fn format_invalid_configuration(result: &ValidationResult) -> String {
    let mut message = String::from("Validation errors:");
    for error in &result.errors {
        message.push_str(&format!("\n  - {error}"));
    }
    message.push_str("\nFix these errors and try again, or use --no-validate to skip validation");
    message
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
