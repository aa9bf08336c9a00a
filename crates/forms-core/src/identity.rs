//! # Element Identity
//!
//! Elements are addressed by a GUID string. The newtype keeps element ids
//! from being confused with option ids, form ids, or names, while keeping
//! the exact author-supplied spelling (references are compared as written).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a form element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Generate a new random element identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_guids() {
        let id = ElementId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, ElementId::generate());
    }

    #[test]
    fn test_serde_transparent() {
        let id: ElementId = serde_json::from_str("\"ff9b04c3-f2ad-4994-a525-e7189eb67a79\"").unwrap();
        assert_eq!(id.to_string(), "ff9b04c3-f2ad-4994-a525-e7189eb67a79");
    }
}
