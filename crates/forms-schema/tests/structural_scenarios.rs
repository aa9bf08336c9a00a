//! Integration tests: structural validation of whole form documents.
//!
//! Exercises the public `StructuralValidator` surface the way a form
//! builder does: author a document, validate it, read back either the
//! normalized document or the violation messages.

use forms_schema::{StructuralValidator, ValidationOptions};
use proptest::prelude::*;
use serde_json::{json, Value};

const SET_ID: &str = "a9e4a1c2-5d3b-4f7e-8a61-2f0b9c7d1e01";
const NUMBER_ID: &str = "a9e4a1c2-5d3b-4f7e-8a61-2f0b9c7d1e02";
const TEXT_ID: &str = "a9e4a1c2-5d3b-4f7e-8a61-2f0b9c7d1e03";

fn form(elements: Value) -> Value {
    json!({
        "name": "Site Inspection",
        "formsAppEnvironmentId": 1,
        "organisationId": "ORGANISATION_00000000001",
        "isMultiPage": false,
        "elements": elements
    })
}

fn text_with_lengths(min: i64, max: i64) -> Value {
    json!({
        "id": TEXT_ID,
        "name": "notes",
        "label": "Notes",
        "type": "text",
        "minLength": min,
        "maxLength": max
    })
}

fn messages(document: &Value) -> Vec<String> {
    StructuralValidator::new()
        .validate(document, &ValidationOptions::accumulate())
        .err()
        .map(|violations| {
            violations
                .into_inner()
                .into_iter()
                .map(|v| v.message)
                .collect()
        })
        .unwrap_or_default()
}

fn repeatable_set(predicate: Value) -> Value {
    form(json!([{
        "id": SET_ID,
        "name": "rows",
        "label": "Rows",
        "type": "repeatableSet",
        "elements": [{
            "id": NUMBER_ID,
            "name": "count",
            "label": "Count",
            "type": "number"
        }]
    }, {
        "id": TEXT_ID,
        "name": "notes",
        "label": "Notes",
        "type": "text",
        "conditionallyShow": true,
        "conditionallyShowPredicates": [{
            "elementId": SET_ID,
            "type": "REPEATABLESET",
            "repeatableSetPredicate": predicate
        }]
    }]))
}

#[test]
fn test_inverted_lengths_report_against_min() {
    assert_eq!(
        messages(&form(json!([text_with_lengths(4, 3)]))),
        vec!["\"elements[0].maxLength\" must be greater than or equal to 4"]
    );
}

#[test]
fn test_watermark_survives_only_on_camera() {
    let validator = StructuralValidator::new();
    let options = ValidationOptions::accumulate();
    let document = form(json!([
        {
            "id": NUMBER_ID,
            "name": "photo",
            "label": "Photo",
            "type": "camera",
            "includeTimestampWatermark": true
        },
        {
            "id": TEXT_ID,
            "name": "notes",
            "label": "Notes",
            "type": "text",
            "includeTimestampWatermark": true
        }
    ]));
    let normalized = validator.validate(&document, &options).unwrap();
    assert_eq!(
        normalized["elements"][0]["includeTimestampWatermark"],
        json!(true)
    );
    assert!(normalized["elements"][1]
        .get("includeTimestampWatermark")
        .is_none());
}

#[test]
fn test_repeatable_set_predicate_nesting() {
    let nested_between = repeatable_set(json!({
        "elementId": NUMBER_ID,
        "type": "BETWEEN",
        "min": 1,
        "max": 5
    }));
    assert!(messages(&nested_between).is_empty());

    let nested_set = repeatable_set(json!({
        "elementId": NUMBER_ID,
        "type": "REPEATABLESET",
        "repeatableSetPredicate": {
            "elementId": NUMBER_ID,
            "type": "VALUE",
            "hasValue": true
        }
    }));
    assert_eq!(
        messages(&nested_set),
        vec!["\"elements[1].conditionallyShowPredicates[0].repeatableSetPredicate.type\" must be one of [OPTIONS, NUMERIC, VALUE, BETWEEN, FORM, ADDRESS_PROPERTY]"]
    );
}

#[test]
fn test_unknown_element_type_lists_allowed_types() {
    let msgs = messages(&form(json!([{
        "id": TEXT_ID,
        "name": "notes",
        "label": "Notes",
        "type": "signature"
    }])));
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].starts_with("\"elements[0].type\" must be one of [text, textarea, number"));
    assert!(!msgs[0].contains("page,"));
}

#[test]
fn test_yaml_file_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.yaml");
    std::fs::write(
        &path,
        format!(
            "name: Site Inspection\nelements:\n  - id: {TEXT_ID}\n    name: notes\n    label: Notes\n    type: text\n"
        ),
    )
    .unwrap();
    let normalized = StructuralValidator::new()
        .validate_file(&path, &ValidationOptions::default())
        .unwrap();
    assert_eq!(normalized["elements"][0]["required"], json!(false));
    assert_eq!(normalized["submissionEvents"], json!([]));
}

proptest! {
    /// A text element's lengths are accepted exactly when they are ordered.
    #[test]
    fn length_bounds_must_be_ordered(min in 0i64..50, max in 0i64..50) {
        let msgs = messages(&form(json!([text_with_lengths(min, max)])));
        if max >= min {
            prop_assert!(msgs.is_empty(), "{:?}", msgs);
        } else {
            prop_assert_eq!(
                msgs,
                vec![format!("\"elements[0].maxLength\" must be greater than or equal to {min}")]
            );
        }
    }

    /// Validating an already normalized document changes nothing.
    #[test]
    fn normalization_is_idempotent(min in 0i64..20, extra in 0i64..20, strip in any::<bool>()) {
        let validator = StructuralValidator::new();
        let options = ValidationOptions::accumulate().with_strip_unknown(strip);
        let mut element = text_with_lengths(min, min + extra);
        element["somethingElse"] = json!("kept unless stripping");
        let once = validator.validate(&form(json!([element])), &options).unwrap();
        let twice = validator.validate(&once, &options).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Arbitrary element arrays never panic the validator.
    #[test]
    fn arbitrary_elements_never_panic(tags in prop::collection::vec("[a-zA-Z]{0,12}", 0..6)) {
        let elements: Vec<Value> = tags
            .iter()
            .map(|tag| json!({ "id": tag, "type": tag, "elements": [{ "type": tag }] }))
            .collect();
        let _ = StructuralValidator::new()
            .validate(&form(Value::Array(elements)), &ValidationOptions::accumulate());
    }
}
