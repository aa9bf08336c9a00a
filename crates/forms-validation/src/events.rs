//! # Submission Event Validation
//!
//! Cross-reference checks for submission events: execute predicates, and
//! the element ids named inside each kind's configuration. Stops at the
//! first failure.

use forms_core::element::{EMAIL_TYPES, ENCRYPTABLE_TYPES, NUMERIC_TYPES, TEXT_TYPES};
use forms_core::event::{EmailTemplate, TemplateMapping};
use forms_core::{
    ElementType, EventAction, FieldPath, FormDocument, ReferenceError, SubmissionEvent,
};

use crate::index::ElementIndex;
use crate::predicates::validate_predicates;

/// Validate the configuration references of every event in a document.
/// Execute predicates are covered by
/// [`validate_document_predicates`](crate::predicates::validate_document_predicates).
pub fn validate_events(
    document: &FormDocument,
    index: &ElementIndex<'_>,
) -> Result<(), ReferenceError> {
    let events = FieldPath::root().key("submissionEvents");
    for (i, event) in document.submission_events.iter().enumerate() {
        validate_event_configuration(&event.action, index, &events.index(i))?;
    }
    tracing::debug!(
        events = document.submission_events.len(),
        "submission event references valid"
    );
    Ok(())
}

/// Validate one event located at `path`: its execute predicates, then its
/// configuration.
pub fn validate_event(
    event: &SubmissionEvent,
    index: &ElementIndex<'_>,
    path: &FieldPath,
) -> Result<(), ReferenceError> {
    if event.conditionally_execute {
        validate_predicates(
            &event.conditionally_execute_predicates,
            index,
            &path.key("conditionallyExecutePredicates"),
        )?;
    }
    validate_event_configuration(&event.action, index, path)
}

/// Validate the element ids referenced by an event's configuration.
pub fn validate_event_configuration(
    action: &EventAction,
    index: &ElementIndex<'_>,
    path: &FieldPath,
) -> Result<(), ReferenceError> {
    let configuration = path.key("configuration");
    match action {
        EventAction::CpPay { configuration: c }
        | EventAction::WestpacQuickWeb { configuration: c }
        | EventAction::Bpoint { configuration: c } => {
            index.resolve_typed(&c.element_id, NUMERIC_TYPES, &configuration.key("elementId"))?;
        }
        EventAction::Scheduling { configuration: c } => {
            if let Some(id) = &c.name_element_id {
                index.resolve_typed(id, TEXT_TYPES, &configuration.key("nameElementId"))?;
            }
            if let Some(id) = &c.email_element_id {
                index.resolve_typed(id, EMAIL_TYPES, &configuration.key("emailElementId"))?;
            }
        }
        EventAction::CivicaCrm { configuration: c } => {
            let mapping = configuration.key("mapping");
            for (i, entry) in c.mapping.iter().enumerate() {
                index.resolve(&entry.form_element_id, &mapping.index(i).key("formElementId"))?;
            }
        }
        EventAction::CpHcms { configuration: c } => {
            let ids = configuration.key("encryptedElementIds");
            for (i, id) in c.encrypted_element_ids.iter().enumerate() {
                let id_path = ids.index(i);
                let entry = index.resolve_typed(id, ENCRYPTABLE_TYPES, &id_path)?;
                if entry.element.element_type == ElementType::Select && entry.element.multi {
                    return Err(ReferenceError::MultiSelectNotAllowed {
                        path: id_path,
                        element_id: id.to_string(),
                    });
                }
            }
        }
        EventAction::Pdf { configuration: c } => {
            validate_email_template(c.email_template.as_ref(), index, &configuration)?;
            let excluded = configuration.key("excludedElementIds");
            for (i, id) in c.excluded_element_ids.iter().enumerate() {
                index.resolve(id, &excluded.index(i))?;
            }
        }
        EventAction::Email { configuration: c } => {
            validate_email_template(c.email_template.as_ref(), index, &configuration)?;
        }
        EventAction::FreshdeskCreateTicket { configuration: c } => {
            validate_mapping(&c.mapping, index, &configuration.key("mapping"))?;
        }
        EventAction::Callback
        | EventAction::PowerAutomateFlow
        | EventAction::Trim
        | EventAction::Other => {}
    }
    Ok(())
}

fn validate_email_template(
    template: Option<&EmailTemplate>,
    index: &ElementIndex<'_>,
    configuration: &FieldPath,
) -> Result<(), ReferenceError> {
    match template {
        Some(template) => validate_mapping(
            &template.mapping,
            index,
            &configuration.key("emailTemplate").key("mapping"),
        ),
        None => Ok(()),
    }
}

fn validate_mapping(
    mapping: &[TemplateMapping],
    index: &ElementIndex<'_>,
    path: &FieldPath,
) -> Result<(), ReferenceError> {
    for (i, entry) in mapping.iter().enumerate() {
        if let TemplateMapping::FormElement(m) = entry {
            index.resolve(&m.form_element_id, &path.index(i).key("formElementId"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const NUMBER: &str = "5d0f8a3c-2b1e-4f6a-9c7d-8e1a2b3c4d01";
    const TEXT: &str = "5d0f8a3c-2b1e-4f6a-9c7d-8e1a2b3c4d02";
    const EMAIL: &str = "5d0f8a3c-2b1e-4f6a-9c7d-8e1a2b3c4d03";
    const MULTI_SELECT: &str = "5d0f8a3c-2b1e-4f6a-9c7d-8e1a2b3c4d04";
    const MISSING: &str = "5d0f8a3c-2b1e-4f6a-9c7d-8e1a2b3c4dff";

    fn document(events: Value) -> FormDocument {
        serde_json::from_value(json!({
            "name": "Payments",
            "elements": [
                { "id": NUMBER, "type": "number", "name": "amount", "label": "Amount" },
                { "id": TEXT, "type": "text", "name": "name", "label": "Name" },
                { "id": EMAIL, "type": "email", "name": "email", "label": "Email" },
                {
                    "id": MULTI_SELECT,
                    "type": "select",
                    "name": "colours",
                    "label": "Colours",
                    "multi": true
                }
            ],
            "submissionEvents": events
        }))
        .unwrap()
    }

    fn check(events: Value) -> Result<(), ReferenceError> {
        let doc = document(events);
        let index = ElementIndex::build(&doc.elements);
        validate_events(&doc, &index)
    }

    #[test]
    fn test_payment_amount_must_be_numeric() {
        assert!(check(json!([
            { "type": "CP_PAY", "configuration": { "elementId": NUMBER, "gatewayId": NUMBER } }
        ]))
        .is_ok());

        let err = check(json!([
            { "type": "BPOINT", "configuration": { "elementId": TEXT, "environmentId": NUMBER } }
        ]))
        .unwrap_err();
        assert_eq!(
            err.path().to_string(),
            "submissionEvents[0].configuration.elementId"
        );
        assert!(err
            .to_string()
            .starts_with("Referenced text type not one of number,calculation"));
    }

    #[test]
    fn test_scheduling_fields() {
        assert!(check(json!([{
            "type": "SCHEDULING",
            "configuration": {
                "nylasAccountId": "a",
                "nylasSchedulingPageId": 1,
                "nameElementId": TEXT,
                "emailElementId": EMAIL
            }
        }]))
        .is_ok());

        let err = check(json!([{
            "type": "SCHEDULING",
            "configuration": { "nameElementId": EMAIL }
        }]))
        .unwrap_err();
        assert!(err.to_string().starts_with("Referenced email type not a text"));
    }

    #[test]
    fn test_hcms_rejects_multi_select() {
        let err = check(json!([{
            "type": "CP_HCMS",
            "configuration": {
                "contentTypeName": "forms",
                "encryptedElementIds": [TEXT, MULTI_SELECT]
            }
        }]))
        .unwrap_err();
        assert_eq!(
            err,
            ReferenceError::MultiSelectNotAllowed {
                path: FieldPath::root()
                    .key("submissionEvents")
                    .index(0)
                    .key("configuration")
                    .key("encryptedElementIds")
                    .index(1),
                element_id: MULTI_SELECT.to_string(),
            }
        );

        let err = check(json!([{
            "type": "CP_HCMS",
            "configuration": { "contentTypeName": "forms", "encryptedElementIds": [NUMBER] }
        }]))
        .unwrap_err();
        assert!(matches!(err, ReferenceError::IncompatibleType { .. }));
    }

    #[test]
    fn test_pdf_template_and_exclusions() {
        let err = check(json!([{
            "type": "PDF",
            "configuration": {
                "emailTemplate": {
                    "id": 1,
                    "mapping": [
                        { "type": "TEXT", "mustacheTag": "a", "text": "b" },
                        { "type": "FORM_ELEMENT", "mustacheTag": "c", "formElementId": MISSING }
                    ]
                }
            }
        }]))
        .unwrap_err();
        assert_eq!(
            err.path().to_string(),
            "submissionEvents[0].configuration.emailTemplate.mapping[1].formElementId"
        );

        let err = check(json!([{
            "type": "PDF",
            "configuration": { "excludedElementIds": [NUMBER, MISSING] }
        }]))
        .unwrap_err();
        assert_eq!(
            err.path().to_string(),
            "submissionEvents[0].configuration.excludedElementIds[1]"
        );
    }

    #[test]
    fn test_civica_and_freshdesk_mappings() {
        let err = check(json!([{
            "type": "CIVICA_CRM",
            "configuration": {
                "environmentId": NUMBER,
                "mapping": [{ "civicaCategoryItemNumber": 1, "formElementId": MISSING }]
            }
        }]))
        .unwrap_err();
        assert!(matches!(err, ReferenceError::NotFound { .. }));

        assert!(check(json!([{
            "type": "FRESHDESK_CREATE_TICKET",
            "configuration": {
                "mapping": [
                    { "type": "VALUE", "freshdeskFieldName": "status", "value": 2 },
                    { "type": "FORM_ELEMENT", "freshdeskFieldName": "name", "formElementId": TEXT }
                ]
            }
        }]))
        .is_ok());
    }

    #[test]
    fn test_kinds_without_references() {
        assert!(check(json!([
            { "type": "CALLBACK", "configuration": { "url": "https://example.com", "secret": "s" } },
            { "type": "TRIM", "configuration": { "environmentId": MISSING } },
            { "type": "SOMETHING_NEW", "configuration": { "elementId": MISSING } }
        ]))
        .is_ok());
    }

    #[test]
    fn test_execute_predicates_checked_first() {
        let doc = document(json!([{
            "type": "CP_PAY",
            "configuration": { "elementId": TEXT, "gatewayId": NUMBER },
            "conditionallyExecute": true,
            "conditionallyExecutePredicates": [
                { "elementId": MISSING, "type": "VALUE", "hasValue": true }
            ]
        }]));
        let index = ElementIndex::build(&doc.elements);
        let err = validate_event(
            &doc.submission_events[0],
            &index,
            &FieldPath::root().key("submissionEvents").index(0),
        )
        .unwrap_err();
        assert_eq!(
            err.path().to_string(),
            "submissionEvents[0].conditionallyExecutePredicates[0].elementId"
        );
    }
}
