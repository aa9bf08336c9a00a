//! # Event Subcommand
//!
//! Validates one submission event against the elements of the form it
//! belongs to. The elements file may hold either a bare element array or a
//! whole form document.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{json, Value};

use forms_schema::load_document;
use forms_validation::FormValidator;

use crate::config::{CliConfig, OutputFormat};
use crate::print_json;

/// Arguments for the `forms event` subcommand.
#[derive(Args, Debug)]
pub struct EventArgs {
    /// Element array, or a form document whose `elements` are used.
    #[arg(value_name = "ELEMENTS")]
    pub elements: PathBuf,

    /// Submission event to validate.
    #[arg(value_name = "EVENT")]
    pub event: PathBuf,

    /// Remove fields no schema declares from the normalized output.
    #[arg(long)]
    pub strip_unknown: bool,

    /// Output format; overrides the config file.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the event subcommand.
///
/// Returns exit code: 0 when valid, 1 when invalid.
pub fn run_event(args: &EventArgs, config: &CliConfig) -> Result<u8> {
    let source = load_document(&args.elements)
        .with_context(|| format!("failed to load elements {}", args.elements.display()))?;
    let elements = element_array(source)
        .with_context(|| format!("no elements found in {}", args.elements.display()))?;
    let event = load_document(&args.event)
        .with_context(|| format!("failed to load event {}", args.event.display()))?;

    let format = args.format.unwrap_or(config.output);
    let validator = FormValidator::new()
        .with_strip_unknown(config.validation.strip_unknown || args.strip_unknown);

    match validator.validate_form_event(&elements, &event) {
        Ok(normalized) => {
            match format {
                OutputFormat::Text => println!("OK: {}", args.event.display()),
                OutputFormat::Json => print_json(&normalized)?,
            }
            Ok(0)
        }
        Err(e) => {
            match format {
                OutputFormat::Text => println!("FAIL: {}: {e}", args.event.display()),
                OutputFormat::Json => print_json(&json!({ "error": e.to_string() }))?,
            }
            Ok(1)
        }
    }
}

/// The element array itself, or the `elements` of a form document.
fn element_array(source: Value) -> Result<Value> {
    match source {
        Value::Array(_) => Ok(source),
        Value::Object(mut form) => match form.remove("elements") {
            Some(elements @ Value::Array(_)) => Ok(elements),
            Some(_) => bail!("\"elements\" is not an array"),
            None => bail!("document has no \"elements\""),
        },
        _ => bail!("expected an element array or a form document"),
    }
}
