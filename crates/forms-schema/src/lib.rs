//! # forms-schema — Structural Validation of Form Definitions
//!
//! Declarative per-node schemas for form documents and the two-phase
//! validator that interprets them.
//!
//! ## Schema Registry (`registry`, `predicates`, `events`)
//!
//! One [`ObjectSchema`] per element type, predicate tag and submission
//! event kind, built once and shared read-only. Fields restricted to a few
//! element types are stripped from every other type. `CALLBACK` and
//! `POWER_AUTOMATE_FLOW` configurations also validate standalone as
//! endpoint configurations.
//!
//! ## Composition (`compose`)
//!
//! [`SchemaComposer`] picks a node's schema from its own `type` tag at the
//! position it occupies: `page` only at a multi-page root, containers need
//! at least one child, and a predicate nested in a `REPEATABLESET`
//! predicate may not itself be a `REPEATABLESET`.
//!
//! ## Validation (`validate`)
//!
//! [`StructuralValidator`] normalizes (defaults, stripping) and then checks,
//! returning either the normalized document or every
//! [`ValidationViolations`] entry in document order.
//!
//! ## Crate Policy
//!
//! - Depends only on `forms-core` internally.
//! - Context-free: nothing here resolves an `elementId` against the tree.
//!   Cross-reference checks live in `forms-validation`.
//! - Violation messages are part of the public contract; form builders
//!   show them verbatim.

pub mod compose;
mod document;
pub mod events;
pub mod load;
mod normalize;
pub mod predicates;
pub mod registry;
pub mod schema;
pub mod validate;

pub use compose::{allowed_element_types, ComposeError, ComposedElement, SchemaComposer};
pub use events::ENDPOINT_KINDS;
pub use forms_core::{ValidationViolations, Violation};
pub use load::{load_document, parse_document, DocumentLoadError};
pub use registry::ElementSchemaRegistry;
pub use schema::{ElementScope, FieldKind, FieldSpec, ObjectSchema};
pub use validate::{SchemaValidationError, StructuralValidator, ValidationOptions};
