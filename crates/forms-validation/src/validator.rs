//! # Form Validator
//!
//! Entry points combining the structural pass with the cross-reference
//! checks.
//!
//! ## Modes
//!
//! - [`FormValidator::validate`] accumulates every structural violation and
//!   performs no cross-reference checks. Form builders use it to show all
//!   problems at once.
//! - [`FormValidator::validate_and_throw`] stops at the first structural
//!   violation, then reads the normalized document into the typed model,
//!   indexes it and runs predicate then submission event checks. Use it
//!   before saving a form.
//! - [`FormValidator::validate_form_event`] validates one submission event
//!   against a given element tree. The elements are validated and
//!   normalized first, like the elements of a whole form.
//! - [`FormValidator::validate_endpoint_configuration`] validates a
//!   standalone `CALLBACK` or `POWER_AUTOMATE_FLOW` configuration.

use serde_json::Value;

use forms_core::{
    FieldPath, FormDocument, FormElement, FormsError, SubmissionEvent, ValidationViolations,
    Violation,
};
use forms_schema::{StructuralValidator, ValidationOptions};

use crate::events::{validate_event, validate_events};
use crate::index::ElementIndex;
use crate::predicates::validate_document_predicates;

/// Validates whole form definitions and standalone submission events.
///
/// ## Thread Safety
///
/// `FormValidator` is `Send + Sync`; share one instance across threads.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    structural: StructuralValidator,
    strip_unknown: bool,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove undeclared fields from normalized output.
    pub fn with_strip_unknown(mut self, strip_unknown: bool) -> Self {
        self.strip_unknown = strip_unknown;
        self
    }

    pub fn structural(&self) -> &StructuralValidator {
        &self.structural
    }

    pub(crate) fn options(&self) -> ValidationOptions {
        ValidationOptions::default().with_strip_unknown(self.strip_unknown)
    }

    /// Structural validation only, collecting every violation.
    pub fn validate(&self, document: &Value) -> Result<Value, ValidationViolations> {
        let options = ValidationOptions::accumulate().with_strip_unknown(self.strip_unknown);
        self.structural.validate(document, &options)
    }

    /// Full validation, failing on the first problem of either kind.
    pub fn validate_and_throw(&self, document: &Value) -> Result<Value, FormsError> {
        let normalized = self
            .structural
            .validate(document, &self.options())
            .map_err(first_violation)?;

        let form: FormDocument = serde_json::from_value(normalized.clone())?;
        let index = ElementIndex::build(&form.elements);
        validate_document_predicates(&form, &index)?;
        validate_events(&form, &index)?;

        tracing::debug!(
            form = %form.name,
            elements = index.len(),
            events = form.submission_events.len(),
            "form definition valid"
        );
        Ok(normalized)
    }

    /// Validate one submission event against the element tree it will run
    /// on. Paths in errors are relative to the event, or to the element
    /// array for problems in the elements themselves.
    pub fn validate_form_event(&self, elements: &Value, event: &Value) -> Result<Value, FormsError> {
        let normalized = self
            .structural
            .validate_event(event, &self.options())
            .map_err(first_violation)?;
        let elements = self
            .structural
            .validate_elements(elements, &self.options())
            .map_err(first_violation)?;

        let elements: Vec<FormElement> = serde_json::from_value(elements)?;
        let typed: SubmissionEvent = serde_json::from_value(normalized.clone())?;
        let index = ElementIndex::build(&elements);
        validate_event(&typed, &index, &FieldPath::root())?;
        Ok(normalized)
    }

    /// Validate a standalone endpoint configuration, failing on the first
    /// violation.
    pub fn validate_endpoint_configuration(&self, endpoint: &Value) -> Result<Value, FormsError> {
        self.structural
            .validate_endpoint_configuration(endpoint, &self.options())
            .map_err(first_violation)
    }
}

/// The first structural violation as a thrown error.
pub(crate) fn first_violation(violations: ValidationViolations) -> FormsError {
    let first = violations.into_inner().into_iter().next();
    FormsError::Structural(
        first.unwrap_or_else(|| Violation::new(FieldPath::root(), "is invalid")),
    )
}
