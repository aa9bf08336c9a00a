//! Integration tests: full form definitions through `FormValidator`.
//!
//! Each test authors a complete document, runs it through the public entry
//! points and checks the normalized output or the single thrown error.

use forms_core::{
    ElementType, FieldPath, FormElement, FormsError, Predicate, PredicateKind, ReferenceError,
};
use forms_validation::{compatible_types, validate_predicate, ElementIndex, FormValidator};
use proptest::prelude::*;
use serde_json::{json, Value};

const NUMBER_ID: &str = "e7a1c3b5-9d2f-4a6e-8b0c-1d3f5a7c9e01";
const TEXT_ID: &str = "e7a1c3b5-9d2f-4a6e-8b0c-1d3f5a7c9e02";
const SET_ID: &str = "e7a1c3b5-9d2f-4a6e-8b0c-1d3f5a7c9e03";
const CHILD_ID: &str = "e7a1c3b5-9d2f-4a6e-8b0c-1d3f5a7c9e04";
const MISSING_ID: &str = "e7a1c3b5-9d2f-4a6e-8b0c-1d3f5a7c9eff";

fn form(elements: Value, events: Value) -> Value {
    json!({
        "name": "Site Inspection",
        "description": "Weekly site inspection",
        "organisationId": "ORGANISATION_00000000001",
        "formsAppEnvironmentId": 1,
        "formsAppIds": [1],
        "isMultiPage": false,
        "isAuthenticated": true,
        "postSubmissionAction": "FORMS_LIBRARY",
        "elements": elements,
        "submissionEvents": events
    })
}

fn number_element() -> Value {
    json!({
        "id": NUMBER_ID,
        "name": "count",
        "label": "Count",
        "type": "number",
        "minNumber": 1,
        "maxNumber": 6,
        "defaultValue": 3
    })
}

fn text_shown_when(predicate: Value) -> Value {
    json!({
        "id": TEXT_ID,
        "name": "notes",
        "label": "Notes",
        "type": "text",
        "conditionallyShow": true,
        "requiresAllConditionallyShowPredicates": false,
        "conditionallyShowPredicates": [predicate]
    })
}

#[test]
fn test_pdf_execute_predicate_with_missing_reference() {
    let doc = form(
        json!([number_element()]),
        json!([{
            "type": "PDF",
            "configuration": { "email": "developers@example.com" },
            "conditionallyExecute": true,
            "requiresAllConditionallyExecutePredicates": false,
            "conditionallyExecutePredicates": [{
                "elementId": MISSING_ID,
                "type": "NUMERIC",
                "operator": ">",
                "value": 2
            }]
        }]),
    );
    let err = FormValidator::new().validate_and_throw(&doc).unwrap_err();
    match &err {
        FormsError::Reference(ReferenceError::NotFound { path, element_id }) => {
            assert_eq!(
                path.to_string(),
                "submissionEvents[0].conditionallyExecutePredicates[0].elementId"
            );
            assert_eq!(element_id, MISSING_ID);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().starts_with("Referenced elementId not found"));
}

#[test]
fn test_between_predicate_on_bounded_number() {
    let doc = form(
        json!([
            number_element(),
            text_shown_when(json!({
                "elementId": NUMBER_ID,
                "type": "BETWEEN",
                "min": 2,
                "max": 5
            }))
        ]),
        json!([]),
    );
    let validator = FormValidator::new();
    assert!(validator.validate(&doc).is_ok());
    let normalized = validator.validate_and_throw(&doc).unwrap();
    assert_eq!(normalized["elements"][0]["defaultValue"], json!(3));
}

#[test]
fn test_incorrect_predicate_target_type() {
    let doc = form(
        json!([
            number_element(),
            text_shown_when(json!({
                "elementId": TEXT_ID,
                "type": "NUMERIC",
                "operator": ">",
                "value": 2
            }))
        ]),
        json!([]),
    );
    let err = FormValidator::new().validate_and_throw(&doc).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Referenced text type not one of number,calculation"));
}

fn repeatable_set_form(nested: Value) -> Value {
    form(
        json!([
            {
                "id": SET_ID,
                "name": "rows",
                "label": "Rows",
                "type": "repeatableSet",
                "elements": [{
                    "id": CHILD_ID,
                    "name": "amount",
                    "label": "Amount",
                    "type": "number"
                }]
            },
            text_shown_when(json!({
                "elementId": SET_ID,
                "type": "REPEATABLESET",
                "repeatableSetPredicate": nested
            }))
        ]),
        json!([]),
    )
}

#[test]
fn test_repeatable_set_predicate_against_child() {
    let doc = repeatable_set_form(json!({
        "elementId": CHILD_ID,
        "type": "BETWEEN",
        "min": 1,
        "max": 10
    }));
    assert!(FormValidator::new().validate_and_throw(&doc).is_ok());
}

#[test]
fn test_recursive_repeatable_set_predicate_is_structural() {
    let doc = repeatable_set_form(json!({
        "elementId": CHILD_ID,
        "type": "REPEATABLESET",
        "repeatableSetPredicate": {
            "elementId": CHILD_ID,
            "type": "VALUE",
            "hasValue": true
        }
    }));
    let validator = FormValidator::new();
    let violations = validator.validate(&doc).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations.to_string(),
        "\"elements[1].conditionallyShowPredicates[0].repeatableSetPredicate.type\" must be one of [OPTIONS, NUMERIC, VALUE, BETWEEN, FORM, ADDRESS_PROPERTY]"
    );
    assert!(matches!(
        validator.validate_and_throw(&doc).unwrap_err(),
        FormsError::Structural(_)
    ));
}

#[test]
fn test_repeatable_set_child_shares_tree_names() {
    let mut doc = repeatable_set_form(json!({
        "elementId": CHILD_ID,
        "type": "VALUE",
        "hasValue": true
    }));
    doc["elements"][0]["elements"][0]["name"] = json!("notes");
    let err = FormValidator::new().validate_and_throw(&doc).unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"elements[1].name\" contains a duplicate value"
    );
}

#[test]
fn test_stray_model_fields_do_not_break_throw_mode() {
    let mut doc = form(
        json!([
            number_element(),
            {
                "id": TEXT_ID,
                "name": "remarks",
                "label": "Remarks",
                "type": "text",
                "multi": "yes"
            }
        ]),
        json!([]),
    );
    doc["id"] = json!(3.0);

    let normalized = FormValidator::new().validate_and_throw(&doc).unwrap();
    assert_eq!(normalized["id"], json!(3.0));
    assert!(normalized["elements"][1].get("multi").is_none());
}

#[test]
fn test_payment_event_against_number() {
    let doc = form(
        json!([number_element()]),
        json!([{
            "type": "CP_PAY",
            "configuration": { "elementId": NUMBER_ID, "gatewayId": SET_ID }
        }]),
    );
    assert!(FormValidator::new().validate_and_throw(&doc).is_ok());
}

// ---------------------------------------------------------------------------
// Type compatibility table
// ---------------------------------------------------------------------------

fn predicate_for(kind: PredicateKind) -> Value {
    let nested = json!({ "elementId": CHILD_ID, "type": "VALUE", "hasValue": true });
    match kind {
        PredicateKind::RepeatableSet => json!({
            "type": "REPEATABLESET",
            "elementId": NUMBER_ID,
            "repeatableSetPredicate": nested
        }),
        PredicateKind::Options => {
            json!({ "type": "OPTIONS", "elementId": NUMBER_ID, "optionIds": ["a"] })
        }
        PredicateKind::Numeric => {
            json!({ "type": "NUMERIC", "elementId": NUMBER_ID, "operator": "<", "value": 1 })
        }
        PredicateKind::Value => json!({ "type": "VALUE", "elementId": NUMBER_ID, "hasValue": true }),
        PredicateKind::Between => {
            json!({ "type": "BETWEEN", "elementId": NUMBER_ID, "min": 1, "max": 2 })
        }
        PredicateKind::Form => json!({ "type": "FORM", "elementId": NUMBER_ID, "predicate": nested }),
        PredicateKind::AddressProperty => json!({
            "type": "ADDRESS_PROPERTY",
            "elementId": NUMBER_ID,
            "definition": { "property": "STATE_EQUALITY", "value": "NSW" }
        }),
    }
}

proptest! {
    /// A predicate resolves exactly when its target's type is in the
    /// compatible set for its tag, and failures name both.
    #[test]
    fn type_compatibility_table(
        element_type in prop::sample::select(ElementType::ALL),
        kind in prop::sample::select(PredicateKind::ALL),
    ) {
        let elements: Vec<FormElement> = serde_json::from_value(json!([{
            "id": NUMBER_ID,
            "type": element_type.as_str(),
            "elements": [{ "id": CHILD_ID, "type": "number" }]
        }])).unwrap();
        let predicate: Predicate = serde_json::from_value(predicate_for(kind)).unwrap();
        let index = ElementIndex::build(&elements);
        let result = validate_predicate(&predicate, &index, &FieldPath::root());

        let allowed = compatible_types(kind);
        if allowed.contains(element_type) {
            prop_assert!(result.is_ok(), "{:?}", result);
        } else {
            let err = result.unwrap_err();
            let expected = format!("Referenced {} type not {}", element_type, allowed);
            prop_assert!(err.to_string().starts_with(&expected), "{}", err);
        }
    }
}
