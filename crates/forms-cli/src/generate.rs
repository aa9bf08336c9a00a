//! # Generate Subcommand
//!
//! Prints a new, validated element or page as JSON, starting from defaults
//! and overlaid with `--data`.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use forms_validation::FormValidator;

use crate::print_json;

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateTarget {
    /// A form element; `text` unless `--data` sets `type`.
    Element,
    /// A page of a multi-page form; `--data` must supply `elements`.
    Page,
}

/// Arguments for the `forms generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(value_enum)]
    pub target: GenerateTarget,

    /// JSON object overriding the generated defaults.
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,
}

/// Execute the generate subcommand.
///
/// Returns exit code: 0 when generated, 1 when the data is invalid.
pub fn run_generate(args: &GenerateArgs) -> Result<u8> {
    let data: Option<Value> = args
        .data
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("--data is not valid JSON")?;
    if data.as_ref().is_some_and(|d| !d.is_object()) {
        tracing::warn!("--data is not a JSON object, using defaults only");
    }

    let validator = FormValidator::new();
    let generated = match args.target {
        GenerateTarget::Element => validator.generate_form_element(data.as_ref()),
        GenerateTarget::Page => validator.generate_page_element(data.as_ref()),
    };

    match generated {
        Ok(element) => {
            print_json(&element)?;
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}
