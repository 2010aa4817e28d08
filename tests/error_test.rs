use std::io;
use std::path::PathBuf;

use sdd_scaffold::error::Error;
use sdd_scaffold::validation::ValidationResult;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::OutputDirectoryExistsError {
        output_dir: "out".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Output directory: 'out' already exists. Use --force to overwrite it."
    );
}

#[test]
fn test_template_not_found_lists_alternatives() {
    let err = Error::TemplateNotFound {
        path: PathBuf::from("templates/missing"),
        available: vec!["flutter-fastapi".to_string(), "nextjs-fastapi".to_string()],
    };
    let message = err.to_string();
    assert!(message.starts_with("Template not found: 'templates/missing'."));
    assert!(message.contains("\n  - flutter-fastapi"));
    assert!(message.contains("\n  - nextjs-fastapi"));
}

#[test]
fn test_invalid_configuration_lists_errors() {
    let err = Error::InvalidConfiguration(ValidationResult {
        errors: vec!["first".to_string(), "second".to_string()],
        warnings: vec!["ignored".to_string()],
    });
    let message = err.to_string();
    assert!(message.contains("  - first"));
    assert!(message.contains("  - second"));
    assert!(!message.contains("ignored"));
}
