//! # Structural Violations
//!
//! The accumulated failure channel of structural validation. A
//! [`Violation`] pairs a [`FieldPath`] with a message that already quotes
//! the path (`"elements[0].maxLength" must be greater than or equal to 4`),
//! so violations can be shown to form authors without further formatting.

use std::fmt;

use serde::Serialize;

use crate::path::FieldPath;

/// A single structural violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Location of the offending value.
    pub path: FieldPath,
    /// Human-readable description, prefixed with the quoted path.
    pub message: String,
}

impl Violation {
    /// Build a violation for `path` from the rule detail, e.g.
    /// `is required` or `must be a string`.
    pub fn new(path: FieldPath, detail: impl fmt::Display) -> Self {
        let message = if path.is_root() {
            format!("\"value\" {detail}")
        } else {
            format!("\"{path}\" {detail}")
        };
        Self { path, message }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Non-empty, ordered collection of structural violations.
///
/// Order is document order: element position first, then field order
/// within the element's schema, then nested predicate position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The violation reported first.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(". ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationViolations {}
