//! # Document Loading
//!
//! Reads form documents, elements and events from disk. Files ending in
//! `.yaml` or `.yml` are parsed as YAML, everything else as JSON. Both
//! produce the same `serde_json::Value` tree, so validation never sees the
//! source format.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// A document file could not be read or parsed.
#[derive(Error, Debug)]
pub enum DocumentLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON or YAML.
    #[error("cannot parse '{path}': {reason}")]
    Parse { path: String, reason: String },
}

/// Load a JSON or YAML document from `path`.
pub fn load_document(path: &Path) -> Result<Value, DocumentLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    parse_document(&content, is_yaml).map_err(|reason| DocumentLoadError::Parse {
        path: path.display().to_string(),
        reason,
    })
}

/// Parse document text as YAML or JSON.
pub fn parse_document(content: &str, is_yaml: bool) -> Result<Value, String> {
    if is_yaml {
        serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))
    } else {
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_yaml_and_json_agree() {
        let yaml = "name: Form\nelements: []\nformsAppIds: [1, 2]\n";
        let json_text = r#"{"name":"Form","elements":[],"formsAppIds":[1,2]}"#;
        assert_eq!(
            parse_document(yaml, true).unwrap(),
            parse_document(json_text, false).unwrap()
        );
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "name: Inspection\nisMultiPage: false").unwrap();
        let doc = load_document(&path).unwrap();
        assert_eq!(doc, json!({ "name": "Inspection", "isMultiPage": false }));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, DocumentLoadError::Parse { .. }));
        assert!(err.to_string().contains("form.json"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_document(Path::new("/nonexistent/form.json")).unwrap_err();
        assert!(matches!(err, DocumentLoadError::Io { .. }));
    }
}
