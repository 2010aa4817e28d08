//! Entry point: argument parsing, logger setup and report printing around
//! the library's generation pipeline.

use std::path::Path;

use sdd_scaffold::{
    cli::{get_args, Args, Command, GenerateArgs},
    config::{load_variables, Variables},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    pipeline::{generate, GenerateOptions, GenerationReport},
    security::{ScanResults, SecurityStatus},
    validation::{validate, ValidationResult},
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => default_error_handler(err),
    }
}

/// Dispatches the subcommand and returns the process exit status.
fn run(args: Args) -> Result<i32> {
    match args.command {
        Command::Generate(generate_args) => run_generate(generate_args),
        Command::Validate { config } => run_validate(&config),
        Command::SecurityCheck { results_dir } => Ok(run_security_check(&results_dir)),
    }
}

fn print_validation(result: &ValidationResult) {
    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {warning}");
        }
    }
    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in &result.errors {
            println!("  - {error}");
        }
    }
}

fn print_summary(variables: &Variables) {
    let value = |key: &str| variables.get(key).unwrap_or("N/A").to_string();
    println!("\n{}", "=".repeat(60));
    println!("Project Configuration Summary");
    println!("{}", "=".repeat(60));
    println!("Project Name:     {}", value("PROJECT_NAME"));
    println!("Description:      {}", value("PROJECT_DESCRIPTION"));
    println!(
        "Database:         {} {}",
        value("DATABASE_TYPE"),
        variables.get_or_empty("DATABASE_VERSION")
    );
    println!("Infrastructure:   {}", value("INFRASTRUCTURE_PLATFORM"));
    println!("Organization:     {}", value("ORGANIZATION_NAME"));
    println!("Tech Lead:        {}", value("TECH_LEAD_NAME"));
    println!("PM:               {}", value("PM_NAME"));
    println!("Coverage Target:  {}%", value("TEST_COVERAGE_TARGET"));
    println!("{}", "=".repeat(60));
}

fn print_report(report: &GenerationReport) {
    print_validation(&report.validation);

    println!("\nProcessed {} files", report.outcome.processed.len());
    if !report.outcome.skipped.is_empty() {
        println!("Skipped {} files", report.outcome.skipped.len());
    }
    for diagnostic in &report.outcome.diagnostics {
        println!("  ! {diagnostic}");
    }

    if report.unresolved.is_empty() {
        println!("All variables replaced successfully");
    } else {
        println!("\nFound unreplaced variables:");
        for (path, names) in &report.unresolved {
            let shown = path.strip_prefix(&report.output_root).unwrap_or(path);
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            println!("  {}: {}", shown.display(), names.join(", "));
        }
        println!("These variables may need manual replacement");
    }

    match &report.security {
        Some(SecurityStatus::Integrated(summary)) => {
            println!("\nCopied {} security files", summary.files_copied.len());
        }
        Some(status) => println!("\nSecurity integration {status}"),
        None => {}
    }
}

fn run_generate(args: GenerateArgs) -> Result<i32> {
    println!("Loading configuration from: {}", args.config.display());
    let variables = load_variables(&args.config)?;
    println!("Loaded {} variables", variables.len());
    print_summary(&variables);

    let mut options = GenerateOptions::new(args.template_root(), &args.output);
    if !args.exclude.is_empty() {
        options.exclude_patterns = args.exclude.clone();
    }
    options.keep_hidden = args.keep_hidden.clone();
    options.validate = !args.no_validate;
    options.force = args.force;
    options.security_template = Some(args.security_template.clone());

    println!("\nProcessing template: {}", args.template);
    let report = match generate(variables, &options) {
        Ok(report) => report,
        Err(Error::InvalidConfiguration(result)) => {
            print_validation(&ValidationResult {
                errors: Vec::new(),
                warnings: result.warnings.clone(),
            });
            return Err(Error::InvalidConfiguration(result));
        }
        Err(e) => return Err(e),
    };

    print_report(&report);
    println!(
        "\nProject generated successfully in {}.",
        report.output_root.display()
    );
    Ok(0)
}

fn run_validate(config: &Path) -> Result<i32> {
    let variables = load_variables(config)?;
    let result = validate(&variables);

    println!("Valid: {}", result.is_valid());
    print_validation(&result);
    if result.errors.is_empty() && result.warnings.is_empty() {
        println!("All validations passed");
    }

    Ok(if result.is_valid() { 0 } else { 1 })
}

fn run_security_check(results_dir: &Path) -> i32 {
    let results = ScanResults::load(results_dir);
    for finding in results.findings().filter(|finding| finding.is_critical()) {
        log::debug!(
            "{} {} {}:{}",
            finding.severity,
            finding.rule,
            finding.file,
            finding.line.map(|l| l.to_string()).unwrap_or_else(|| "?".to_string())
        );
    }

    let critical = results.critical_count();
    println!("{critical}");
    if critical > 0 {
        1
    } else {
        0
    }
}
