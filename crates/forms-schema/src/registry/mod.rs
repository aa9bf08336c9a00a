//! # Element Schema Registry
//!
//! One [`ObjectSchema`] per [`ElementType`], built once at construction and
//! immutable afterwards. The variant-to-schema table is an exhaustive
//! `match`, so a new element type cannot be added without a schema.
//!
//! ## Type-restricted fields
//!
//! Some fields belong to a fixed set of variants (`includeTimestampWatermark`
//! to cameras, `elements` to containers). Every other variant declares them
//! as stripped, so an element whose type was changed by its author loses
//! the fields its new type cannot use.
//!
//! Fields read by the typed form model are stripped from every variant
//! whose schema does not declare them, so an author's stray `multi` on a
//! `text` element or `name` on a `section` never reaches whole-tree checks.

mod address;
mod choices;
pub(crate) mod common;
mod inputs;
mod layout;
mod media;

use std::collections::HashMap;

use forms_core::{ElementType, FormsError};

use crate::schema::{Field, FieldSpec, ObjectSchema};

/// Fields owned by a fixed set of variants and stripped from all others.
const RESTRICTED_FIELDS: &[(&str, &[ElementType])] = &[
    ("includeTimestampWatermark", &[ElementType::Camera]),
    (
        "storageType",
        &[
            ElementType::Camera,
            ElementType::Draw,
            ElementType::File,
            ElementType::Files,
            ElementType::Compliance,
        ],
    ),
    (
        "elements",
        &[
            ElementType::Section,
            ElementType::Page,
            ElementType::RepeatableSet,
        ],
    ),
];

/// Element fields read by the typed form model.
const MODEL_FIELDS: &[&str] = &[
    "name",
    "label",
    "multi",
    "conditionallyShow",
    "requiresAllConditionallyShowPredicates",
    "conditionallyShowPredicates",
    "elements",
];

/// Per-variant element schemas.
#[derive(Debug, Clone)]
pub struct ElementSchemaRegistry {
    schemas: HashMap<ElementType, ObjectSchema>,
}

impl ElementSchemaRegistry {
    /// Build the schema of every registered element type.
    pub fn new() -> Self {
        let schemas: HashMap<_, _> = ElementType::ALL
            .iter()
            .map(|t| (*t, build_schema(*t)))
            .collect();
        tracing::debug!(count = schemas.len(), "built element schema registry");
        Self { schemas }
    }

    /// Schema for an element type.
    pub fn schema_for(&self, element_type: ElementType) -> Result<&ObjectSchema, FormsError> {
        self.schemas
            .get(&element_type)
            .ok_or_else(|| FormsError::UnknownElementType(element_type.as_str().to_string()))
    }

    /// Schema for a wire tag. Fails with `UnknownElementType` for tags
    /// that name no registered variant.
    pub fn schema_for_tag(&self, tag: &str) -> Result<&ObjectSchema, FormsError> {
        self.schema_for(tag.parse()?)
    }

    /// Number of registered element types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for ElementSchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_schema(element_type: ElementType) -> ObjectSchema {
    let mut schema = match element_type {
        ElementType::Text | ElementType::Textarea => inputs::text(),
        ElementType::Number => inputs::number(),
        ElementType::Email => inputs::email(),
        ElementType::Telephone => inputs::telephone(),
        ElementType::Date => inputs::date(),
        ElementType::Datetime => inputs::datetime(),
        ElementType::Time => inputs::time(),
        ElementType::Select => choices::select(),
        ElementType::Autocomplete => choices::autocomplete(),
        ElementType::Radio => choices::radio(),
        ElementType::Checkboxes => choices::checkboxes(),
        ElementType::Boolean => inputs::boolean(),
        ElementType::Camera => media::camera(),
        ElementType::Draw => media::draw(),
        ElementType::File => media::file(),
        ElementType::Files => media::files(),
        ElementType::Html => media::html(),
        ElementType::Heading => media::heading(),
        ElementType::Image => media::image(),
        ElementType::BarcodeScanner => inputs::barcode_scanner(),
        ElementType::Calculation => inputs::calculation(),
        ElementType::Captcha => media::captcha(),
        ElementType::Location => inputs::location(),
        ElementType::PointAddress | ElementType::GeoscapeAddress => {
            address::australian_address()
        }
        ElementType::GoogleAddress | ElementType::CivicaStreetName => address::address(),
        ElementType::CivicaNameRecord => address::civica_name_record(),
        ElementType::Abn | ElementType::Bsb => inputs::identifier(),
        ElementType::Compliance => choices::compliance(),
        ElementType::Summary => media::summary(),
        ElementType::InfoPage | ElementType::Form => layout::form_reference(),
        ElementType::RepeatableSet => layout::repeatable_set(),
        ElementType::Section => layout::section(),
        ElementType::Page => layout::page(),
        ElementType::FreshdeskDependentField => address::freshdesk_dependent_field(),
        ElementType::ArcGisWebMap => media::arc_gis_web_map(),
        ElementType::LookupButton => address::lookup_button(),
    };
    for &(field, owners) in RESTRICTED_FIELDS {
        if !owners.contains(&element_type) {
            schema.push(Field::new(field, FieldSpec::strip()));
        }
    }
    for &field in MODEL_FIELDS {
        schema.push(Field::new(field, FieldSpec::strip()));
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldRule, Presence};
    use forms_core::ELEMENT_TYPE_COUNT;

    fn presence(schema: &ObjectSchema, name: &str) -> Option<Presence> {
        match &schema.get(name)?.rule {
            FieldRule::Always(spec) => Some(spec.presence),
            FieldRule::When { .. } => None,
        }
    }

    #[test]
    fn test_every_type_registered() {
        let registry = ElementSchemaRegistry::new();
        assert_eq!(registry.len(), ELEMENT_TYPE_COUNT);
        for t in ElementType::ALL {
            assert!(registry.schema_for(*t).is_ok(), "missing schema for {t}");
        }
    }

    #[test]
    fn test_unknown_tag() {
        let registry = ElementSchemaRegistry::new();
        let err = registry.schema_for_tag("signature").unwrap_err();
        assert!(matches!(err, FormsError::UnknownElementType(tag) if tag == "signature"));
    }

    #[test]
    fn test_every_schema_starts_with_id_and_type() {
        let registry = ElementSchemaRegistry::new();
        for t in ElementType::ALL {
            let schema = registry.schema_for(*t).unwrap();
            let names: Vec<_> = schema.fields().iter().take(2).map(|f| f.name).collect();
            assert_eq!(names, vec!["id", "type"], "{t}");
            assert_eq!(presence(schema, "id"), Some(Presence::Required));
        }
    }

    #[test]
    fn test_only_containers_keep_elements() {
        let registry = ElementSchemaRegistry::new();
        for t in ElementType::ALL {
            let schema = registry.schema_for(*t).unwrap();
            let field = schema.get("elements").unwrap();
            match &field.rule {
                FieldRule::Always(spec) if t.is_container() => {
                    assert!(matches!(spec.kind, FieldKind::Elements(_)), "{t}");
                    assert_eq!(spec.presence, Presence::Required);
                }
                FieldRule::Always(spec) => assert_eq!(spec.presence, Presence::Strip, "{t}"),
                FieldRule::When { .. } => panic!("conditional elements field on {t}"),
            }
        }
    }

    #[test]
    fn test_timestamp_watermark_only_on_camera() {
        let registry = ElementSchemaRegistry::new();
        let camera = registry.schema_for(ElementType::Camera).unwrap();
        assert_eq!(
            presence(camera, "includeTimestampWatermark"),
            Some(Presence::Optional)
        );
        let text = registry.schema_for(ElementType::Text).unwrap();
        assert_eq!(
            presence(text, "includeTimestampWatermark"),
            Some(Presence::Strip)
        );
    }

    #[test]
    fn test_named_inputs_require_name() {
        let registry = ElementSchemaRegistry::new();
        for t in [ElementType::Text, ElementType::Number, ElementType::RepeatableSet] {
            let schema = registry.schema_for(t).unwrap();
            assert_eq!(presence(schema, "name"), Some(Presence::Required), "{t}");
        }
        let section = registry.schema_for(ElementType::Section).unwrap();
        assert_eq!(presence(section, "name"), Some(Presence::Strip));
    }

    #[test]
    fn test_model_fields_declared_or_stripped() {
        let registry = ElementSchemaRegistry::new();
        for t in ElementType::ALL {
            let schema = registry.schema_for(*t).unwrap();
            for field in MODEL_FIELDS {
                assert!(schema.declares(field), "{t} leaves {field} undeclared");
            }
        }
        let select = registry.schema_for(ElementType::Select).unwrap();
        assert_eq!(presence(select, "multi"), Some(Presence::Optional));
        let text = registry.schema_for(ElementType::Text).unwrap();
        assert_eq!(presence(text, "multi"), Some(Presence::Strip));
        assert_eq!(presence(text, "elements"), Some(Presence::Strip));
        let section = registry.schema_for(ElementType::Section).unwrap();
        assert_ne!(presence(section, "elements"), Some(Presence::Strip));
    }
}
