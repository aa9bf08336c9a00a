//! # forms-validation — Whole-Tree Validation of Form Definitions
//!
//! Cross-reference checks that need the whole element tree, and the
//! [`FormValidator`] entry points that run them after structural
//! validation.
//!
//! ## Passes
//!
//! 1. **Structural** (`forms-schema`): shape, defaults, identity uniqueness.
//! 2. **Index** ([`ElementIndex`]): id lookup over every element.
//! 3. **Predicates** ([`predicates`]): each reference resolves to an
//!    element whose type the predicate can test.
//! 4. **Submission events** ([`events`]): configuration references resolve
//!    to elements of the kind each event needs.
//!
//! Passes 3 and 4 stop at the first [`ReferenceError`](forms_core::ReferenceError).
//!
//! ## Crate Policy
//!
//! - Depends on `forms-core` and `forms-schema` internally.
//! - Operates only on documents that passed the structural pass; the typed
//!   model is read from the normalized output, never from raw input.
//! - No I/O.

pub mod events;
mod generate;
pub mod index;
pub mod predicates;
pub mod validator;

pub use events::{validate_event, validate_event_configuration, validate_events};
pub use index::{ElementIndex, IndexedElement};
pub use predicates::{
    compatible_types, validate_document_predicates, validate_element_predicates,
    validate_predicate, validate_predicates,
};
pub use validator::FormValidator;
