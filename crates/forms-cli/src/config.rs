//! # CLI Configuration
//!
//! Optional settings file passed with `--config`, in YAML or JSON.
//! Command-line flags override whatever the file sets.
//!
//! ```yaml
//! validation:
//!   abortEarly: false
//!   stripUnknown: true
//! output: json
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

use forms_schema::{load_document, ValidationOptions};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `OK:`/`FAIL:` lines for people.
    #[default]
    Text,
    /// Pretty-printed JSON for tooling.
    Json,
}

/// Settings read from a `--config` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    /// Keys left out keep the accumulating defaults.
    #[serde(
        default = "ValidationOptions::accumulate",
        deserialize_with = "accumulating_options"
    )]
    pub validation: ValidationOptions,
    pub output: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            validation: ValidationOptions::accumulate(),
            output: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Read a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = load_document(path)?;
        let config = serde_json::from_value(raw)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

fn accumulating_options<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<ValidationOptions, D::Error> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    struct Overrides {
        abort_early: Option<bool>,
        strip_unknown: Option<bool>,
    }

    let overrides = Overrides::deserialize(deserializer)?;
    let base = ValidationOptions::accumulate();
    Ok(ValidationOptions {
        abort_early: overrides.abort_early.unwrap_or(base.abort_early),
        strip_unknown: overrides.strip_unknown.unwrap_or(base.strip_unknown),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_accumulate() {
        let config = CliConfig::load(None).unwrap();
        assert!(!config.validation.abort_early);
        assert!(!config.validation.strip_unknown);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.yaml");
        std::fs::write(&path, "validation:\n  stripUnknown: true\noutput: json\n").unwrap();
        let config = CliConfig::load(Some(&path)).unwrap();
        assert!(config.validation.strip_unknown);
        assert!(!config.validation.abort_early);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_partial_validation_block_keeps_accumulating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.json");

        std::fs::write(&path, r#"{ "validation": { "stripUnknown": true } }"#).unwrap();
        let partial = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(partial.validation, ValidationOptions::accumulate().with_strip_unknown(true));

        std::fs::write(&path, r#"{ "validation": { "abortEarly": true } }"#).unwrap();
        let early = CliConfig::load(Some(&path)).unwrap();
        assert!(early.validation.abort_early);
        assert!(!early.validation.strip_unknown);

        std::fs::write(&path, r#"{ "output": "json" }"#).unwrap();
        let absent = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(absent.validation, ValidationOptions::accumulate());
    }

    #[test]
    fn test_unknown_output_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.json");
        std::fs::write(&path, r#"{ "output": "xml" }"#).unwrap();
        let err = CliConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid configuration"));
    }
}
