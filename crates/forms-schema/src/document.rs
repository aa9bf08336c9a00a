//! Root form document schema.

use serde_json::json;

use crate::schema::{ElementScope, Field, FieldSpec, ObjectSchema, StringFormat};

const POST_SUBMISSION_ACTIONS: &[&str] = &["BACK", "CLOSE", "FORMS_LIBRARY", "URL"];

pub(crate) fn form_schema() -> ObjectSchema {
    ObjectSchema::new(vec![
        Field::new("id", FieldSpec::integer()),
        Field::new("name", FieldSpec::string().required()),
        Field::new("description", FieldSpec::string().allow_empty()),
        Field::new("organisationId", FieldSpec::string()),
        Field::new("formsAppEnvironmentId", FieldSpec::integer()),
        Field::new(
            "formsAppIds",
            FieldSpec::array(FieldSpec::integer().into_kind()).default_value(json!([])),
        ),
        Field::new(
            "isAuthenticated",
            FieldSpec::boolean().default_value(json!(false)),
        ),
        Field::new(
            "isMultiPage",
            FieldSpec::boolean().default_value(json!(false)),
        ),
        Field::new(
            "postSubmissionAction",
            FieldSpec::string().one_of(POST_SUBMISSION_ACTIONS),
        ),
        Field::when(
            "redirectUrl",
            "postSubmissionAction",
            json!("URL"),
            FieldSpec::string().format(StringFormat::Uri).required(),
            FieldSpec::strip(),
        ),
        Field::new(
            "tags",
            FieldSpec::array(FieldSpec::string().into_kind()).default_value(json!([])),
        ),
        Field::new(
            "publishStartDate",
            FieldSpec::string().format(StringFormat::DateTime),
        ),
        Field::new(
            "publishEndDate",
            FieldSpec::string()
                .format(StringFormat::DateTime)
                .not_before("publishStartDate"),
        ),
        Field::when(
            "elements",
            "isMultiPage",
            json!(true),
            FieldSpec::elements(ElementScope::MultiPageForm).default_value(json!([])),
            FieldSpec::elements(ElementScope::Form).default_value(json!([])),
        ),
        Field::new("submissionEvents", FieldSpec::events().default_value(json!([]))),
    ])
}
