//! # Error Types — Structured Error Hierarchy
//!
//! Two failure channels exist and stay distinct in the signatures:
//!
//! - Structural problems accumulate into
//!   [`ValidationViolations`](crate::ValidationViolations).
//! - Cross-reference problems stop at the first offender and surface as a
//!   single [`ReferenceError`].
//!
//! [`FormsError`] unifies both for the validate-and-throw entry points.

use thiserror::Error;

use crate::element::{ElementType, TypeSet};
use crate::path::FieldPath;
use crate::violation::Violation;

/// Top-level error type for the form definition engine.
#[derive(Error, Debug)]
pub enum FormsError {
    /// The document failed structural validation; carries the first
    /// violation found.
    #[error("{0}")]
    Structural(Violation),

    /// A cross-reference between elements could not be satisfied.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// A type tag does not name a registered element variant.
    #[error("unknown element type \"{0}\"")]
    UnknownElementType(String),

    /// The normalized document could not be read into the typed model.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A reference from a predicate or submission event to a form element
/// that is missing or of the wrong type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// No element with this id exists in the applicable index.
    #[error("Referenced elementId not found: \"{path}\" references \"{element_id}\"")]
    NotFound {
        /// Location of the reference.
        path: FieldPath,
        /// The id that could not be resolved.
        element_id: String,
    },

    /// The referenced element exists but its type is not acceptable here.
    #[error("Referenced {found} type not {allowed}: \"{path}\" references \"{element_id}\"")]
    IncompatibleType {
        /// Location of the reference.
        path: FieldPath,
        /// The id that was resolved.
        element_id: String,
        /// Declared type of the referenced element.
        found: ElementType,
        /// Types acceptable at this location.
        allowed: TypeSet,
    },

    /// A `NUMERIC` predicate compares against another element whose type
    /// does not hold a number.
    #[error("Referenced compareWith element {found} type not {allowed}: \"{path}\" references \"{element_id}\"")]
    IncompatibleCompareWith {
        /// Location of the comparison operand.
        path: FieldPath,
        /// The operand's element id.
        element_id: String,
        /// Declared type of the operand element.
        found: ElementType,
        /// Types acceptable as a comparison operand.
        allowed: TypeSet,
    },

    /// A multi-select element was listed for encryption.
    #[error("Referenced select element allows multiple selections and cannot be encrypted: \"{path}\" references \"{element_id}\"")]
    MultiSelectNotAllowed {
        /// Location of the reference.
        path: FieldPath,
        /// The select element's id.
        element_id: String,
    },
}

impl ReferenceError {
    /// Location of the offending reference.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::NotFound { path, .. }
            | Self::IncompatibleType { path, .. }
            | Self::IncompatibleCompareWith { path, .. }
            | Self::MultiSelectNotAllowed { path, .. } => path,
        }
    }
}
