//! Property groups shared by many element variants.

use serde_json::json;

use forms_core::PredicateScope;

use crate::schema::{Bound, Field, FieldKind, FieldSpec, ObjectSchema, StringFormat};

pub(crate) const HINT_POSITIONS: &[&str] = &["TOOLTIP", "BELOW_LABEL"];
pub(crate) const OPTIONS_TYPES: &[&str] = &["CUSTOM", "DYNAMIC", "SEARCH"];
pub(crate) const STORAGE_TYPES: &[&str] = &["legacy", "public", "private"];
pub(crate) const AUSTRALIAN_STATES: &[&str] =
    &["ACT", "NSW", "NT", "OTHER", "QLD", "SA", "TAS", "VIC", "WA"];

pub(crate) fn guid() -> FieldSpec {
    FieldSpec::string().format(StringFormat::Guid)
}

pub(crate) fn flag() -> FieldSpec {
    FieldSpec::boolean().default_value(json!(false))
}

/// `id` and `type`, first in every element schema. The composer has
/// already matched the type tag against the registry.
pub(crate) fn base() -> Vec<Field> {
    vec![
        Field::new("id", guid().required()),
        Field::new("type", FieldSpec::string().required()),
    ]
}

pub(crate) fn name() -> Field {
    Field::new("name", FieldSpec::string().required())
}

pub(crate) fn label() -> Field {
    Field::new("label", FieldSpec::string().required())
}

pub(crate) fn hint() -> Vec<Field> {
    vec![
        Field::new("hint", FieldSpec::string().allow_empty()),
        Field::new("hintPosition", FieldSpec::string().one_of(HINT_POSITIONS)),
    ]
}

pub(crate) fn required() -> Vec<Field> {
    vec![
        Field::new("required", flag()),
        Field::new("requiredMessage", FieldSpec::string()),
    ]
}

pub(crate) fn read_only() -> Field {
    Field::new("readOnly", flag())
}

/// The conditional show specification.
pub(crate) fn conditionally_show() -> Vec<Field> {
    vec![
        Field::new("conditionallyShow", flag()),
        Field::new("requiresAllConditionallyShowPredicates", flag()),
        Field::when(
            "conditionallyShowPredicates",
            "conditionallyShow",
            json!(true),
            FieldSpec::predicates(PredicateScope::Any).required(),
            FieldSpec::strip(),
        ),
    ]
}

/// The conditional execute specification of a submission event.
pub(crate) fn conditionally_execute() -> Vec<Field> {
    vec![
        Field::new("conditionallyExecute", flag()),
        Field::new("requiresAllConditionallyExecutePredicates", flag()),
        Field::when(
            "conditionallyExecutePredicates",
            "conditionallyExecute",
            json!(true),
            FieldSpec::predicates(PredicateScope::Any).required(),
            FieldSpec::strip(),
        ),
    ]
}

pub(crate) fn lookups() -> Vec<Field> {
    vec![
        Field::new("isDataLookup", flag()),
        Field::new("dataLookupId", FieldSpec::integer()),
        Field::new("isElementLookup", flag()),
        Field::new("elementLookupId", FieldSpec::integer()),
    ]
}

pub(crate) fn placeholder() -> Field {
    Field::new("placeholderValue", FieldSpec::string().allow_empty())
}

pub(crate) fn regex() -> Vec<Field> {
    vec![
        Field::new("regexPattern", FieldSpec::string().format(StringFormat::Regex)),
        Field::new("regexFlags", FieldSpec::string().allow_empty()),
        Field::new("regexMessage", FieldSpec::string()),
    ]
}

pub(crate) fn custom_css_classes() -> Field {
    Field::new(
        "customCssClasses",
        FieldSpec::array(FieldSpec::string().into_kind()),
    )
}

pub(crate) fn autocomplete_attributes() -> Field {
    Field::new(
        "autocompleteAttributes",
        FieldSpec::array(FieldSpec::string().into_kind()),
    )
}

pub(crate) fn storage_type() -> Field {
    Field::new("storageType", FieldSpec::string().one_of(STORAGE_TYPES))
}

/// Length limits on text-like values, with the default value held between
/// them.
pub(crate) fn lengths() -> Vec<Field> {
    vec![
        Field::new("minLength", FieldSpec::integer().lower(Bound::Value(0.0))),
        Field::new(
            "maxLength",
            FieldSpec::integer()
                .lower(Bound::Value(0.0))
                .lower(Bound::Sibling("minLength")),
        ),
    ]
}

pub(crate) fn text_default() -> Field {
    Field::new(
        "defaultValue",
        FieldSpec::string()
            .allow_empty()
            .min_length(Bound::Sibling("minLength"))
            .max_length(Bound::Sibling("maxLength")),
    )
}

fn option() -> ObjectSchema {
    ObjectSchema::new(vec![
        Field::new("id", FieldSpec::string().required()),
        Field::new("value", FieldSpec::string().required()),
        Field::new("label", FieldSpec::string().required()),
        Field::new("colour", FieldSpec::string()),
        Field::new(
            "attributes",
            FieldSpec::array(
                FieldSpec::object(ObjectSchema::new(vec![
                    Field::new("elementId", guid().required()),
                    Field::new(
                        "optionIds",
                        FieldSpec::array(FieldSpec::string().into_kind()).required(),
                    ),
                ]))
                .into_kind(),
            ),
        ),
    ])
}

/// Option list for choice elements. Custom options are declared inline;
/// dynamic and search options come from elsewhere.
pub(crate) fn options() -> Vec<Field> {
    vec![
        Field::new(
            "optionsType",
            FieldSpec::string()
                .one_of(OPTIONS_TYPES)
                .default_value(json!("CUSTOM")),
        ),
        Field::when(
            "options",
            "optionsType",
            json!("CUSTOM"),
            FieldSpec::array(FieldSpec::object(option()).into_kind())
                .min_items(1)
                .required(),
            FieldSpec::array(FieldSpec::object(option()).into_kind()),
        ),
        Field::when(
            "dynamicOptionSetId",
            "optionsType",
            json!("DYNAMIC"),
            FieldSpec::integer().required(),
            FieldSpec::strip(),
        ),
    ]
}

/// Fields every element with a submitted value carries: name, label,
/// hint, required, read only and conditional show.
pub(crate) fn input() -> Vec<Field> {
    let mut fields = base();
    fields.push(name());
    fields.push(label());
    fields.extend(hint());
    fields.extend(required());
    fields.push(read_only());
    fields.extend(conditionally_show());
    fields
}

/// Fields of display-only elements, which have a name but no value.
pub(crate) fn display() -> Vec<Field> {
    let mut fields = base();
    fields.push(name());
    fields.push(Field::new("label", FieldSpec::string()));
    fields.extend(conditionally_show());
    fields
}

/// Finish a field list into a schema, appending the styling fields every
/// element accepts.
pub(crate) fn finish(mut fields: Vec<Field>) -> ObjectSchema {
    fields.push(custom_css_classes());
    ObjectSchema::new(fields)
}

/// An item kind for an array of GUID strings.
pub(crate) fn guid_items() -> FieldKind {
    guid().into_kind()
}
