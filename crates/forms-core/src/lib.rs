//! # forms-core — Foundational Types for the Form Definition Engine
//!
//! Shared vocabulary for every other crate in the workspace: the closed
//! sets of element, predicate and submission event tags, the typed form
//! model read during whole-tree checks, field paths, violations, and the
//! error hierarchy.
//!
//! ## Key Design Principles
//!
//! 1. **One enum per tag axis.** `ElementType` (41 variants),
//!    `PredicateKind` and `EventKind`. Every dispatch on a tag is an
//!    exhaustive `match`, so adding a variant is a compile error until every
//!    table handles it.
//!
//! 2. **Two failure channels.** Structural problems accumulate into
//!    `ValidationViolations`; cross-reference problems stop at the first
//!    `ReferenceError`. `FormsError` joins them only at the outermost entry
//!    points.
//!
//! 3. **Paths are values.** `FieldPath` is immutable and rendered the same
//!    way everywhere (`elements[1].conditionallyShowPredicates[0].max`).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `forms-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod element;
pub mod error;
pub mod event;
pub mod identity;
pub mod model;
pub mod path;
pub mod predicate;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use element::{ElementType, TypeSet, ELEMENT_TYPE_COUNT};
pub use error::{FormsError, ReferenceError};
pub use event::{EventAction, EventKind, SubmissionEvent};
pub use identity::ElementId;
pub use model::{FormDocument, FormElement};
pub use path::{FieldPath, PathSegment};
pub use predicate::{Predicate, PredicateKind, PredicateScope};
pub use violation::{ValidationViolations, Violation};
