//! # Predicate Schemas
//!
//! One shape per predicate tag. `REPEATABLESET` and `FORM` predicates nest
//! another predicate; the nested one is composed again from its own tag,
//! restricted by [`PredicateScope`].

use std::collections::HashMap;

use serde_json::json;

use forms_core::predicate::NumericOperator;
use forms_core::{PredicateKind, PredicateScope};

use crate::registry::common::guid;
use crate::schema::{Bound, Field, FieldSpec, ObjectSchema};

const COMPARE_WITH: &[&str] = &["VALUE", "ELEMENT"];
const ADDRESS_PROPERTIES: &[&str] = &["IS_PO_BOX_ADDRESS", "STATE_EQUALITY"];

/// Per-tag predicate schemas.
#[derive(Debug, Clone)]
pub struct PredicateSchemas {
    base: ObjectSchema,
    schemas: HashMap<PredicateKind, ObjectSchema>,
}

impl PredicateSchemas {
    pub fn new() -> Self {
        let schemas = PredicateKind::ALL
            .iter()
            .map(|k| (*k, build_schema(*k)))
            .collect();
        Self {
            base: ObjectSchema::new(base()),
            schemas,
        }
    }

    pub fn schema_for(&self, kind: PredicateKind) -> Option<&ObjectSchema> {
        self.schemas.get(&kind)
    }

    /// Fields shared by every tag, checked on predicates whose tag could
    /// not be resolved.
    pub fn base(&self) -> &ObjectSchema {
        &self.base
    }
}

impl Default for PredicateSchemas {
    fn default() -> Self {
        Self::new()
    }
}

fn base() -> Vec<Field> {
    vec![Field::new("elementId", guid().required())]
}

fn with_base(fields: Vec<Field>) -> ObjectSchema {
    let mut all = base();
    all.push(Field::new("type", FieldSpec::string().required()));
    all.extend(fields);
    ObjectSchema::new(all)
}

fn build_schema(kind: PredicateKind) -> ObjectSchema {
    match kind {
        PredicateKind::Options => with_base(vec![Field::new(
            "optionIds",
            FieldSpec::array(FieldSpec::string().into_kind())
                .min_items(1)
                .required(),
        )]),
        PredicateKind::Numeric => with_base(vec![
            Field::new(
                "operator",
                FieldSpec::string()
                    .one_of(NumericOperator::ALL_TAGS)
                    .required(),
            ),
            Field::new("compareWith", FieldSpec::string().one_of(COMPARE_WITH)),
            Field::when(
                "value",
                "compareWith",
                json!("ELEMENT"),
                guid().required(),
                FieldSpec::number().required(),
            ),
        ]),
        PredicateKind::Value => with_base(vec![Field::new(
            "hasValue",
            FieldSpec::boolean().required(),
        )]),
        PredicateKind::Between => with_base(vec![
            Field::new("min", FieldSpec::number().required()),
            Field::new(
                "max",
                FieldSpec::number().lower(Bound::Sibling("min")).required(),
            ),
        ]),
        PredicateKind::RepeatableSet => with_base(vec![Field::new(
            "repeatableSetPredicate",
            FieldSpec::predicate(PredicateScope::WithinRepeatableSet).required(),
        )]),
        PredicateKind::Form => with_base(vec![Field::new(
            "predicate",
            FieldSpec::predicate(PredicateScope::Any).required(),
        )]),
        PredicateKind::AddressProperty => with_base(vec![Field::new(
            "definition",
            FieldSpec::object(ObjectSchema::new(vec![
                Field::new(
                    "property",
                    FieldSpec::string().one_of(ADDRESS_PROPERTIES).required(),
                ),
                Field::when(
                    "value",
                    "property",
                    json!("IS_PO_BOX_ADDRESS"),
                    FieldSpec::boolean().required(),
                    FieldSpec::string().required(),
                ),
            ]))
            .required(),
        )]),
    }
}
