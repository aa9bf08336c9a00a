//! # Validate Subcommand
//!
//! Validates a form document file. By default every structural violation
//! is listed; `--strict` runs the full validation used before saving a
//! form, including element reference checks, and stops at the first
//! problem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Value};

use forms_schema::{load_document, StructuralValidator};
use forms_validation::FormValidator;

use crate::config::{CliConfig, OutputFormat};
use crate::print_json;

/// Arguments for the `forms validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Form document to validate (JSON, or YAML by extension).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Also check element references, stopping at the first problem.
    #[arg(long)]
    pub strict: bool,

    /// Remove fields no schema declares from the normalized output.
    #[arg(long)]
    pub strip_unknown: bool,

    /// Output format; overrides the config file.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 when invalid.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let document = load_document(&args.path)
        .with_context(|| format!("failed to load form document {}", args.path.display()))?;
    let format = args.format.unwrap_or(config.output);
    let mut options = config.validation;
    options.strip_unknown |= args.strip_unknown;

    if args.strict {
        let validator = FormValidator::new().with_strip_unknown(options.strip_unknown);
        return match validator.validate_and_throw(&document) {
            Ok(normalized) => report_valid(&args.path, &normalized, format),
            Err(e) => {
                match format {
                    OutputFormat::Text => println!("FAIL: {}: {e}", args.path.display()),
                    OutputFormat::Json => print_json(&json!({ "error": e.to_string() }))?,
                }
                Ok(1)
            }
        };
    }

    match StructuralValidator::new().validate(&document, &options) {
        Ok(normalized) => report_valid(&args.path, &normalized, format),
        Err(violations) => {
            match format {
                OutputFormat::Text => {
                    println!(
                        "FAIL: {}: {} violation(s)",
                        args.path.display(),
                        violations.len()
                    );
                    for v in violations.violations() {
                        println!("  {}", v.message);
                    }
                }
                OutputFormat::Json => print_json(&json!({ "violations": violations }))?,
            }
            Ok(1)
        }
    }
}

fn report_valid(path: &Path, normalized: &Value, format: OutputFormat) -> Result<u8> {
    match format {
        OutputFormat::Text => println!("OK: {}", path.display()),
        OutputFormat::Json => print_json(normalized)?,
    }
    Ok(0)
}
