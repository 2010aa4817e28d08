//! Common constants used throughout the scaffolding pipeline.

/// Default configuration file name
pub const CONFIG_FILE: &str = "template-config.yaml";

/// Default template name under the templates directory
pub const DEFAULT_TEMPLATE: &str = "nextjs-fastapi";

/// Default directory holding the available templates
pub const TEMPLATES_DIR: &str = "templates";

/// Default directory holding the shared security tooling
pub const SECURITY_TEMPLATE_DIR: &str = ".security-template";

/// Per-template security customisation file
pub const SECURITY_CONFIG_FILE: &str = ".security-config.yaml";

/// Suffix marking a file whose output name must drop it
pub const TEMPLATE_SUFFIX: &str = "template";

/// Exclusion patterns applied when the caller supplies none
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 11] = [
    "*.pyc",
    "__pycache__",
    ".DS_Store",
    "*.egg-info",
    ".git",
    "node_modules",
    "venv",
    ".venv",
    "dist",
    "build",
    SECURITY_CONFIG_FILE,
];

/// Hidden directories that survive the hidden-path exclusion
pub const PRESERVED_HIDDEN_DIRS: [&str; 3] = [".github", ".vscode", ".cursor"];

/// Extensions that are always treated as text
pub const TEXT_EXTENSIONS: [&str; 23] = [
    "md", "txt", "json", "yaml", "yml", "toml", "py", "js", "ts", "jsx", "tsx", "css", "scss",
    "html", "xml", "svg", "sh", "bash", "gitignore", "env", "example", "template", "mdc",
];

/// Extensionless file names that are always treated as text
pub const TEXT_FILENAMES: [&str; 5] = [".gitignore", "Dockerfile", "LICENSE", "README", "Makefile"];

/// Number of bytes probed when guessing whether a file is text
pub const TEXT_PROBE_LEN: usize = 1024;
