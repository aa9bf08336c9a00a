//! # Endpoint Subcommand
//!
//! Validates a standalone `CALLBACK` or `POWER_AUTOMATE_FLOW` endpoint
//! configuration, outside of any form.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use forms_schema::load_document;
use forms_validation::FormValidator;

use crate::config::{CliConfig, OutputFormat};
use crate::print_json;

/// Arguments for the `forms endpoint` subcommand.
#[derive(Args, Debug)]
pub struct EndpointArgs {
    /// Endpoint configuration (JSON or YAML).
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Remove fields no schema declares from the normalized output.
    #[arg(long)]
    pub strip_unknown: bool,

    /// Output format; overrides the config file.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the endpoint subcommand.
///
/// Returns exit code: 0 when valid, 1 when invalid.
pub fn run_endpoint(args: &EndpointArgs, config: &CliConfig) -> Result<u8> {
    let endpoint = load_document(&args.path)
        .with_context(|| format!("failed to load endpoint {}", args.path.display()))?;

    let format = args.format.unwrap_or(config.output);
    let validator = FormValidator::new()
        .with_strip_unknown(config.validation.strip_unknown || args.strip_unknown);

    match validator.validate_endpoint_configuration(&endpoint) {
        Ok(normalized) => {
            match format {
                OutputFormat::Text => println!("OK: {}", args.path.display()),
                OutputFormat::Json => print_json(&normalized)?,
            }
            Ok(0)
        }
        Err(e) => {
            match format {
                OutputFormat::Text => println!("FAIL: {}: {e}", args.path.display()),
                OutputFormat::Json => print_json(&json!({ "error": e.to_string() }))?,
            }
            Ok(1)
        }
    }
}
