//! sdd-scaffold generates projects from placeholder templates.
//! It validates a project configuration, renders a template tree with
//! `{{NAME}}` substitution, reports placeholders left unresolved and bundles
//! the shared security tooling into the result.

/// Command-line interface module
pub mod cli;

/// Post-render scan for unresolved placeholders
pub mod completeness;

/// Configuration document loading and the variable mapping
/// Supports YAML and JSON (template-config.yaml)
pub mod config;

/// Common constants: default exclusions, known text types, file names
pub mod constants;

/// Error types and handling
pub mod error;

/// Exclusion rules for template trees
pub mod ignore;

/// Logger initialisation for the binary
pub mod logger;

/// Generation pipeline orchestration
/// Combines all components to generate the final output
pub mod pipeline;

/// Writing rendered and copied entries to the output tree
pub mod processor;

/// Placeholder substitution
pub mod renderer;

/// Security template integration and scan result counting
pub mod security;

/// Configuration validation
pub mod validation;

/// Template tree enumeration and classification
pub mod walker;
