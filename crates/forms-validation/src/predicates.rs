//! # Predicate Validation
//!
//! Checks that every predicate references an element that exists in the
//! applicable index and whose type can be tested by the predicate's tag.
//! Stops at the first failure.
//!
//! ## Scope
//!
//! Predicates are resolved against the whole form, except the predicate
//! nested in a `REPEATABLESET` predicate, which is evaluated per entry of
//! the referenced set and therefore resolved against that set's own
//! children. The index to use is always passed in explicitly.
//!
//! A `FORM` predicate's nested predicate refers to elements of another
//! form. That tree is not available here, so only the nested predicate's
//! shape (checked structurally) applies to it.

use forms_core::element::{
    ADDRESS_TYPES, ANY_TYPES, FORM_TYPES, NUMERIC_TYPES, OPTION_TYPES, REPEATABLE_SET_TYPES,
};
use forms_core::predicate::{CompareWith, NumericOperand};
use forms_core::{
    FieldPath, FormDocument, FormElement, Predicate, PredicateKind, ReferenceError, TypeSet,
};

use crate::index::ElementIndex;

/// Element types a predicate of `kind` may reference.
pub fn compatible_types(kind: PredicateKind) -> TypeSet {
    match kind {
        PredicateKind::Value => ANY_TYPES,
        PredicateKind::Numeric | PredicateKind::Between => NUMERIC_TYPES,
        PredicateKind::Options => OPTION_TYPES,
        PredicateKind::AddressProperty => ADDRESS_TYPES,
        PredicateKind::RepeatableSet => REPEATABLE_SET_TYPES,
        PredicateKind::Form => FORM_TYPES,
    }
}

/// Validate one predicate located at `path`.
pub fn validate_predicate(
    predicate: &Predicate,
    index: &ElementIndex<'_>,
    path: &FieldPath,
) -> Result<(), ReferenceError> {
    let entry = index.resolve_typed(
        predicate.element_id(),
        compatible_types(predicate.kind()),
        &path.key("elementId"),
    )?;

    match predicate {
        Predicate::Numeric(numeric) => {
            if let (Some(CompareWith::Element), NumericOperand::Element(operand)) =
                (numeric.compare_with, &numeric.value)
            {
                let value_path = path.key("value");
                let other = index.resolve(operand, &value_path)?;
                if !NUMERIC_TYPES.contains(other.element.element_type) {
                    return Err(ReferenceError::IncompatibleCompareWith {
                        path: value_path,
                        element_id: operand.to_string(),
                        found: other.element.element_type,
                        allowed: NUMERIC_TYPES,
                    });
                }
            }
            Ok(())
        }
        Predicate::RepeatableSet(set) => validate_predicate(
            &set.repeatable_set_predicate,
            &index.scoped_to(entry),
            &path.key("repeatableSetPredicate"),
        ),
        Predicate::Options(_)
        | Predicate::Value(_)
        | Predicate::Between(_)
        | Predicate::Form(_)
        | Predicate::AddressProperty(_) => Ok(()),
    }
}

/// Validate a predicate sequence located at `path`, in order.
pub fn validate_predicates(
    predicates: &[Predicate],
    index: &ElementIndex<'_>,
    path: &FieldPath,
) -> Result<(), ReferenceError> {
    for (i, predicate) in predicates.iter().enumerate() {
        validate_predicate(predicate, index, &path.index(i))?;
    }
    Ok(())
}

/// Validate an element's show predicates, if it is conditionally shown.
pub fn validate_element_predicates(
    element: &FormElement,
    index: &ElementIndex<'_>,
    path: &FieldPath,
) -> Result<(), ReferenceError> {
    if !element.conditionally_show {
        return Ok(());
    }
    validate_predicates(
        &element.conditionally_show_predicates,
        index,
        &path.key("conditionallyShowPredicates"),
    )
}

/// Validate every predicate in a document: element show predicates in
/// document order (descending into containers), then the execute
/// predicates of each submission event.
pub fn validate_document_predicates(
    document: &FormDocument,
    index: &ElementIndex<'_>,
) -> Result<(), ReferenceError> {
    validate_tree(&document.elements, index, &FieldPath::root().key("elements"))?;

    let events = FieldPath::root().key("submissionEvents");
    for (i, event) in document.submission_events.iter().enumerate() {
        if event.conditionally_execute {
            validate_predicates(
                &event.conditionally_execute_predicates,
                index,
                &events.index(i).key("conditionallyExecutePredicates"),
            )?;
        }
    }
    tracing::debug!(elements = index.len(), "predicate references valid");
    Ok(())
}

fn validate_tree(
    elements: &[FormElement],
    index: &ElementIndex<'_>,
    path: &FieldPath,
) -> Result<(), ReferenceError> {
    for (i, element) in elements.iter().enumerate() {
        let element_path = path.index(i);
        validate_element_predicates(element, index, &element_path)?;
        validate_tree(element.children(), index, &element_path.key("elements"))?;
    }
    Ok(())
}
