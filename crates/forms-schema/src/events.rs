//! # Submission Event Schemas
//!
//! One shape per [`EventKind`]. Every event shares `type`, `configuration`
//! and the conditional execute specification; only the configuration
//! differs. Events of unknown kind keep a permissive configuration.
//!
//! Endpoint configurations reuse the configuration shapes of the
//! [`ENDPOINT_KINDS`] without the conditional execute fields.

use std::collections::HashMap;

use serde_json::json;

use forms_core::EventKind;

use crate::registry::common::{conditionally_execute, guid, guid_items};
use crate::schema::{Field, FieldSpec, ObjectSchema, StringFormat};

const EMAIL_MAPPING_TYPES: &[&str] = &[
    "FORM_ELEMENT",
    "TEXT",
    "SUBMISSION_ID",
    "EXTERNAL_ID",
    "FORM_NAME",
    "DATE",
];
const FRESHDESK_MAPPING_TYPES: &[&str] = &["FORM_ELEMENT", "VALUE", "DEPENDENT_FIELD_VALUE"];

/// Kinds a standalone endpoint configuration may name.
pub const ENDPOINT_KINDS: &[EventKind] = &[EventKind::Callback, EventKind::PowerAutomateFlow];

/// Per-kind submission event schemas.
#[derive(Debug, Clone)]
pub struct EventSchemas {
    schemas: HashMap<EventKind, ObjectSchema>,
    unknown: ObjectSchema,
    endpoints: HashMap<EventKind, ObjectSchema>,
}

impl EventSchemas {
    pub fn new() -> Self {
        let schemas = EventKind::ALL
            .iter()
            .map(|k| (*k, event(FieldSpec::object(configuration(*k)).required())))
            .collect();
        let endpoints = ENDPOINT_KINDS
            .iter()
            .map(|k| (*k, endpoint(*k)))
            .collect();
        Self {
            schemas,
            unknown: event(FieldSpec::any()),
            endpoints,
        }
    }

    /// Schema for an event tag; unknown tags get the permissive schema.
    pub fn schema_for_tag(&self, tag: &str) -> &ObjectSchema {
        EventKind::from_tag(tag)
            .and_then(|kind| self.schemas.get(&kind))
            .unwrap_or(&self.unknown)
    }

    /// Schema for an endpoint configuration of `kind`, if it is one of the
    /// [`ENDPOINT_KINDS`].
    pub fn endpoint_for(&self, kind: EventKind) -> Option<&ObjectSchema> {
        self.endpoints.get(&kind)
    }
}

impl Default for EventSchemas {
    fn default() -> Self {
        Self::new()
    }
}

fn event(configuration: FieldSpec) -> ObjectSchema {
    let mut fields = vec![
        Field::new("type", FieldSpec::string().required()),
        Field::new("configuration", configuration),
    ];
    fields.extend(conditionally_execute());
    ObjectSchema::new(fields)
}

fn endpoint(kind: EventKind) -> ObjectSchema {
    ObjectSchema::new(vec![
        Field::new("type", FieldSpec::string().required()),
        Field::new(
            "configuration",
            FieldSpec::object(configuration(kind)).required(),
        ),
    ])
}

fn email_template() -> ObjectSchema {
    let mapping = ObjectSchema::new(vec![
        Field::new("mustacheTag", FieldSpec::string().required()),
        Field::new(
            "type",
            FieldSpec::string().one_of(EMAIL_MAPPING_TYPES).required(),
        ),
        Field::when(
            "formElementId",
            "type",
            json!("FORM_ELEMENT"),
            guid().required(),
            FieldSpec::strip(),
        ),
        Field::when(
            "text",
            "type",
            json!("TEXT"),
            FieldSpec::string().required(),
            FieldSpec::strip(),
        ),
    ]);
    ObjectSchema::new(vec![
        Field::new("id", FieldSpec::integer().required()),
        Field::new(
            "mapping",
            FieldSpec::array(FieldSpec::object(mapping).into_kind()),
        ),
    ])
}

fn id_list() -> FieldSpec {
    FieldSpec::array(guid_items()).default_value(json!([]))
}

fn payment(extra: Vec<Field>) -> ObjectSchema {
    let mut fields = vec![Field::new("elementId", guid().required())];
    fields.extend(extra);
    ObjectSchema::new(fields)
}

fn configuration(kind: EventKind) -> ObjectSchema {
    match kind {
        EventKind::Pdf => ObjectSchema::new(vec![
            Field::new("email", FieldSpec::string().format(StringFormat::Email)),
            Field::new("emailTemplate", FieldSpec::object(email_template())),
            Field::new("pdfFileName", FieldSpec::string()),
            Field::new("includeSubmissionIdInPdf", FieldSpec::boolean()),
            Field::new("includePaymentInPdf", FieldSpec::boolean()),
            Field::new("usePagesAsBreaks", FieldSpec::boolean()),
            Field::new("excludedElementIds", id_list()),
            Field::new("excludedAttachmentElementIds", id_list()),
            Field::new(
                "excludedCSSClasses",
                FieldSpec::array(FieldSpec::string().into_kind()).default_value(json!([])),
            ),
        ]),
        EventKind::Email => ObjectSchema::new(vec![
            Field::new(
                "email",
                FieldSpec::string().format(StringFormat::Email).required(),
            ),
            Field::new("emailTemplate", FieldSpec::object(email_template())),
        ]),
        EventKind::CivicaCrm => {
            let mapping = ObjectSchema::new(vec![
                Field::new("civicaCategoryItemNumber", FieldSpec::integer().required()),
                Field::new("formElementId", guid().required()),
            ]);
            ObjectSchema::new(vec![
                Field::new("environmentId", guid().required()),
                Field::new(
                    "mapping",
                    FieldSpec::array(FieldSpec::object(mapping).into_kind()).required(),
                ),
            ])
        }
        EventKind::CpPay => payment(vec![Field::new("gatewayId", guid().required())]),
        EventKind::WestpacQuickWeb => payment(vec![
            Field::new("environmentId", guid().required()),
            Field::new("customerReferenceNumber", FieldSpec::string()),
        ]),
        EventKind::Bpoint => payment(vec![Field::new("environmentId", guid().required())]),
        EventKind::Scheduling => ObjectSchema::new(vec![
            Field::new("nylasAccountId", FieldSpec::string().required()),
            Field::new("nylasSchedulingPageId", FieldSpec::integer().required()),
            Field::new("nameElementId", guid()),
            Field::new("emailElementId", guid()),
            Field::new("emailDescription", FieldSpec::string()),
        ]),
        EventKind::CpHcms => ObjectSchema::new(vec![
            Field::new("contentTypeName", FieldSpec::string().required()),
            Field::new("encryptedElementIds", FieldSpec::array(guid_items())),
            Field::new("encryptPdf", FieldSpec::boolean().default_value(json!(false))),
        ]),
        EventKind::FreshdeskCreateTicket => {
            let mapping = ObjectSchema::new(vec![
                Field::new("freshdeskFieldName", FieldSpec::string().required()),
                Field::new(
                    "type",
                    FieldSpec::string()
                        .one_of(FRESHDESK_MAPPING_TYPES)
                        .required(),
                ),
                Field::when(
                    "formElementId",
                    "type",
                    json!("FORM_ELEMENT"),
                    guid().required(),
                    FieldSpec::strip(),
                ),
                Field::new("value", FieldSpec::any()),
            ]);
            ObjectSchema::new(vec![Field::new(
                "mapping",
                FieldSpec::array(FieldSpec::object(mapping).into_kind()).required(),
            )])
        }
        EventKind::Callback => ObjectSchema::new(vec![
            Field::new("url", FieldSpec::string().format(StringFormat::Uri).required()),
            Field::new("secret", FieldSpec::string().required()),
        ]),
        EventKind::PowerAutomateFlow => ObjectSchema::new(vec![Field::new(
            "url",
            FieldSpec::string().format(StringFormat::Uri).required(),
        )]),
        EventKind::Trim => ObjectSchema::new(vec![Field::new(
            "environmentId",
            guid().required(),
        )]),
    }
}
