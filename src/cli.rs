//! Command-line interface implementation.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{DEFAULT_TEMPLATE, SECURITY_TEMPLATE_DIR, TEMPLATES_DIR};

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about = "sdd-scaffold: generate projects from placeholder templates", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new project from a template
    Generate(GenerateArgs),

    /// Validate a configuration file without generating anything
    Validate {
        /// Path to template-config.yaml
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Count critical findings in security scan results
    SecurityCheck {
        /// Directory holding the scanner result folders
        #[arg(long, value_name = "DIR")]
        results_dir: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path to template-config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Directory where the generated project will be created
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Template name to use
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Directory containing the available templates
    #[arg(long, value_name = "DIR", default_value = TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    /// Directory containing the shared security template
    #[arg(long, value_name = "DIR", default_value = SECURITY_TEMPLATE_DIR)]
    pub security_template: PathBuf,

    /// Glob pattern to exclude; replaces the default set when given
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Hidden directory to keep in addition to .github, .vscode and .cursor
    #[arg(long = "keep-hidden", value_name = "NAME")]
    pub keep_hidden: Vec<String>,

    /// Skip configuration validation (not recommended)
    #[arg(long)]
    pub no_validate: bool,

    /// Force overwrite of existing output directory
    #[arg(short, long)]
    pub force: bool,
}

impl GenerateArgs {
    pub fn template_root(&self) -> PathBuf {
        self.templates_dir.join(&self.template)
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
