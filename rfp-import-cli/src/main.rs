mod cli;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use serde_json::Value;
use std::path::Path;
use std::process::ExitCode;

use rfp_import_core::{
    get_config_path, load_document, validate, validate_prd, validate_with_categories,
    DocumentType, Error, ErrorKind, Issue, RequirementSummary, ValidationOptions,
    ValidationReport, ValidatorConfig,
};

use crate::cli::{Cli, Command};

/// Outcome of a run that got far enough to judge the input
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Valid,
    Invalid,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Valid => ExitCode::SUCCESS,
            Outcome::Invalid => ExitCode::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return parse_error_outcome(&e).into();
        }
    };

    match run(&cli) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Help and version requests succeed; every other parse error is a usage failure
fn parse_error_outcome(e: &clap::Error) -> Outcome {
    if e.use_stderr() {
        Outcome::Invalid
    } else {
        Outcome::Valid
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    let config = ValidatorConfig::load_or_default(&config_path)?;
    log::debug!("using config {:?}: {:?}", config_path, config);

    match &cli.command {
        Command::Validate {
            file,
            r#type,
            categories,
            allow_unknown_fields,
            no_summary,
        } => {
            let document_type = match r#type.parse::<DocumentType>() {
                Ok(document_type) => document_type,
                Err(e) => {
                    eprintln!("{} {}", "Error:".red().bold(), error_line(&e));
                    if e.kind() == ErrorKind::Usage {
                        eprintln!();
                        Cli::command().print_help()?;
                    }
                    return Ok(Outcome::Invalid);
                }
            };

            let mut options = config.validation_options();
            options.allow_unknown_fields |= *allow_unknown_fields;
            let show_summary = config.show_summary && !*no_summary;

            validate_file(
                file,
                document_type,
                categories.as_deref(),
                &options,
                show_summary,
            )
        }
        Command::Prd { file } => validate_prd_file(file),
    }
}

fn validate_file(
    file: &Path,
    document_type: DocumentType,
    categories_file: Option<&Path>,
    options: &ValidationOptions,
    show_summary: bool,
) -> Result<Outcome> {
    println!(
        "Validating {} JSON: {}",
        document_type.to_string().cyan(),
        file.display()
    );
    if let Some(categories_file) = categories_file {
        println!("   Against categories: {}", categories_file.display());
    }
    println!();

    let document = match load_document(file) {
        Ok(document) => document,
        Err(e) => return Ok(report_failure(&[error_line(&e)])),
    };

    let report = match validate(&document, document_type, options) {
        Ok(report) => report,
        Err(e) => return Ok(report_failure(&[error_line(&e)])),
    };

    print_warnings(&issue_lines(report.warnings()));
    if !report.is_valid() {
        return Ok(report_failure(&issue_lines(report.errors())));
    }

    // `validate` only succeeds on arrays
    let records = document.as_array().map(Vec::as_slice).unwrap_or_default();

    if document_type == DocumentType::Requirements {
        if let Some(categories_file) = categories_file {
            println!(
                "{}",
                "Basic structure valid. Checking category references...".green()
            );
            println!();

            let check = check_category_references(records, categories_file, options);
            print_warnings(&check.warnings);
            if !check.errors.is_empty() {
                return Ok(report_failure(&check.errors));
            }
        }
    }

    println!("{}", "Validation successful! JSON is valid.".green().bold());

    if document_type == DocumentType::Requirements && show_summary {
        print_summary(&RequirementSummary::from_records(records));
    }

    Ok(Outcome::Valid)
}

/// Printable lines from checking requirements against a categories file
#[derive(Debug, Default)]
struct ReferenceLines {
    warnings: Vec<String>,
    errors: Vec<String>,
}

/// Loads the categories file and resolves every requirement's `category_name`
/// against it. Findings about the categories file itself carry its path.
fn check_category_references(
    requirements: &[Value],
    categories_file: &Path,
    options: &ValidationOptions,
) -> ReferenceLines {
    let check = load_document(categories_file)
        .and_then(|document| validate_with_categories(requirements, &document, options));
    let check = match check {
        Ok(check) => check,
        Err(e) => {
            return ReferenceLines {
                warnings: Vec::new(),
                errors: vec![format!("{}: {}", categories_file.display(), error_line(&e))],
            }
        }
    };

    let in_file = |issues: &ValidationReport, warnings: bool| -> Vec<String> {
        let selected: Vec<&Issue> = if warnings {
            issues.warnings().collect()
        } else {
            issues.errors().collect()
        };
        selected
            .into_iter()
            .map(|issue| format!("{}: {}", categories_file.display(), issue_line(issue)))
            .collect()
    };

    let mut errors = in_file(&check.categories, false);
    errors.extend(issue_lines(check.references.errors()));
    ReferenceLines {
        warnings: in_file(&check.categories, true),
        errors,
    }
}

fn validate_prd_file(file: &Path) -> Result<Outcome> {
    println!("Validating PRD JSON: {}", file.display());
    println!();

    let document = match load_document(file) {
        Ok(document) => document,
        Err(e) => return Ok(report_failure(&[error_line(&e)])),
    };

    let report = validate_prd(&document);
    print_warnings(&issue_lines(report.warnings()));
    if !report.is_valid() {
        return Ok(report_failure(&issue_lines(report.errors())));
    }

    println!("{}", "PRD.json structure is valid!".green().bold());
    Ok(Outcome::Valid)
}

fn issue_line(issue: &Issue) -> String {
    format!("[{}] {}", issue.kind, issue.message)
}

fn issue_lines<'a>(issues: impl Iterator<Item = &'a Issue>) -> Vec<String> {
    issues.map(issue_line).collect()
}

fn error_line(e: &Error) -> String {
    format!("[{}] {}", e.kind(), e)
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}

fn report_failure(errors: &[String]) -> Outcome {
    println!(
        "{}",
        "Validation failed with the following errors:".red().bold()
    );
    println!();
    for error in errors {
        println!("  • {}", error);
    }
    println!();
    Outcome::Invalid
}

fn print_summary(summary: &RequirementSummary) {
    if summary.is_empty() {
        return;
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("   Total requirements: {}", summary.total);

    if summary.by_category.is_empty() {
        return;
    }

    let rule = "-".repeat(50);
    println!();
    println!("   Requirements by category:");
    println!("   {}", rule);
    println!("   {:<35} | {:>10}", "Category", "Count");
    println!("   {}", rule);
    for (category, count) in &summary.by_category {
        println!("   {:<35} | {:>10}", category, count);
    }
    println!("   {}", rule);
}
