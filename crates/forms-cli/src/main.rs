//! # forms CLI entry point
//!
//! Parses command-line arguments, loads the optional config file and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use forms_cli::config::CliConfig;
use forms_cli::endpoint::{run_endpoint, EndpointArgs};
use forms_cli::event::{run_event, EventArgs};
use forms_cli::generate::{run_generate, GenerateArgs};
use forms_cli::validate::{run_validate, ValidateArgs};

/// Form definition toolchain.
///
/// Validates form documents, submission events and endpoint
/// configurations, and generates new elements for form builders.
#[derive(Parser, Debug)]
#[command(name = "forms", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a form document.
    Validate(ValidateArgs),

    /// Validate a submission event against a form's elements.
    Event(EventArgs),

    /// Generate a new element or page.
    Generate(GenerateArgs),

    /// Validate a standalone callback or flow endpoint configuration.
    Endpoint(EndpointArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Event(args) => run_event(args, &config),
        Commands::Generate(args) => run_generate(args),
        Commands::Endpoint(args) => run_endpoint(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
