//! # forms-cli — Form Definition Command-Line Interface
//!
//! Thin clap front end over `forms-validation`.
//!
//! ## Subcommands
//!
//! - `validate`: structural validation of a form document, or full
//!   validation with `--strict`
//! - `event`: validate one submission event against an element tree
//! - `generate`: generate a new element or page
//! - `endpoint`: validate a standalone callback or flow endpoint
//!
//! ## Exit Codes
//!
//! `0` success, `1` the input is invalid, `2` the command could not run
//! (unreadable file, malformed JSON or YAML).
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to the library crates and only format results.

pub mod config;
pub mod endpoint;
pub mod event;
pub mod generate;
pub mod validate;

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
