//! # Predicates
//!
//! Conditions attached to elements (conditional show) and submission events
//! (conditional execute). Every predicate references one form element by id
//! and is tagged by its `type`.
//!
//! Two views exist. [`PredicateKind`] is the bare tag, used by schema
//! composition to pick a shape and list the legal tags in messages.
//! [`Predicate`] is the typed model read from an already normalized
//! document for reference checking.

use serde::{Deserialize, Serialize};

use crate::identity::ElementId;

/// Predicate type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredicateKind {
    #[serde(rename = "REPEATABLESET")]
    RepeatableSet,
    Options,
    Numeric,
    Value,
    Between,
    Form,
    AddressProperty,
}

impl PredicateKind {
    /// Every tag, in the order messages list them.
    pub const ALL: &'static [PredicateKind] = &[
        Self::RepeatableSet,
        Self::Options,
        Self::Numeric,
        Self::Value,
        Self::Between,
        Self::Form,
        Self::AddressProperty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RepeatableSet => "REPEATABLESET",
            Self::Options => "OPTIONS",
            Self::Numeric => "NUMERIC",
            Self::Value => "VALUE",
            Self::Between => "BETWEEN",
            Self::Form => "FORM",
            Self::AddressProperty => "ADDRESS_PROPERTY",
        }
    }

    /// Parse a wire tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().find(|k| k.as_str() == tag).copied()
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a predicate appears, which decides the tags it may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateScope {
    /// Directly under an element or event, or nested in a `FORM` predicate.
    Any,
    /// Nested in a `REPEATABLESET` predicate. Repeatable set predicates do
    /// not recurse.
    WithinRepeatableSet,
}

impl PredicateScope {
    /// Tags legal in this scope, in message order.
    pub fn allowed(&self) -> &'static [PredicateKind] {
        match self {
            Self::Any => PredicateKind::ALL,
            Self::WithinRepeatableSet => &PredicateKind::ALL[1..],
        }
    }

    pub fn allows(&self, kind: PredicateKind) -> bool {
        self.allowed().contains(&kind)
    }
}

// ---------------------------------------------------------------------------
// Typed Model
// ---------------------------------------------------------------------------

/// A predicate read from a normalized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Predicate {
    #[serde(rename = "REPEATABLESET")]
    RepeatableSet(RepeatableSetPredicate),
    #[serde(rename = "OPTIONS")]
    Options(OptionsPredicate),
    #[serde(rename = "NUMERIC")]
    Numeric(NumericPredicate),
    #[serde(rename = "VALUE")]
    Value(ValuePredicate),
    #[serde(rename = "BETWEEN")]
    Between(BetweenPredicate),
    #[serde(rename = "FORM")]
    Form(FormPredicate),
    #[serde(rename = "ADDRESS_PROPERTY")]
    AddressProperty(AddressPropertyPredicate),
}

impl Predicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            Self::RepeatableSet(_) => PredicateKind::RepeatableSet,
            Self::Options(_) => PredicateKind::Options,
            Self::Numeric(_) => PredicateKind::Numeric,
            Self::Value(_) => PredicateKind::Value,
            Self::Between(_) => PredicateKind::Between,
            Self::Form(_) => PredicateKind::Form,
            Self::AddressProperty(_) => PredicateKind::AddressProperty,
        }
    }

    /// The element this predicate is evaluated against.
    pub fn element_id(&self) -> &ElementId {
        match self {
            Self::RepeatableSet(p) => &p.element_id,
            Self::Options(p) => &p.element_id,
            Self::Numeric(p) => &p.element_id,
            Self::Value(p) => &p.element_id,
            Self::Between(p) => &p.element_id,
            Self::Form(p) => &p.element_id,
            Self::AddressProperty(p) => &p.element_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPredicate {
    pub element_id: ElementId,
    pub option_ids: Vec<String>,
}

/// Comparison operators of a `NUMERIC` predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericOperator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "===")]
    Equal,
    #[serde(rename = "!==")]
    NotEqual,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "<")]
    LessThan,
}

impl NumericOperator {
    pub const ALL_TAGS: &'static [&'static str] = &[">", ">=", "===", "!==", "<=", "<"];
}

/// What the right-hand side of a `NUMERIC` predicate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompareWith {
    Value,
    Element,
}

/// Right-hand side of a `NUMERIC` predicate: a literal, or the id of another
/// numeric element when comparing with an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericOperand {
    Number(f64),
    Element(ElementId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericPredicate {
    pub element_id: ElementId,
    pub operator: NumericOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_with: Option<CompareWith>,
    pub value: NumericOperand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePredicate {
    pub element_id: ElementId,
    pub has_value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetweenPredicate {
    pub element_id: ElementId,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatableSetPredicate {
    pub element_id: ElementId,
    /// Evaluated against each entry of the referenced set.
    pub repeatable_set_predicate: Box<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPredicate {
    pub element_id: ElementId,
    /// Evaluated against the referenced sub-form's submission.
    pub predicate: Box<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPropertyPredicate {
    pub element_id: ElementId,
    pub definition: AddressProperty,
}

/// The address property tested and the value it is compared with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressProperty {
    IsPoBoxAddress { value: bool },
    StateEquality { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_round_trip() {
        for kind in PredicateKind::ALL {
            assert_eq!(PredicateKind::from_tag(kind.as_str()), Some(*kind));
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, json!(kind.as_str()));
        }
        assert_eq!(PredicateKind::from_tag("SOMETHING"), None);
    }

    #[test]
    fn test_repeatable_set_scope_excludes_recursion() {
        let tags: Vec<&str> = PredicateScope::WithinRepeatableSet
            .allowed()
            .iter()
            .map(PredicateKind::as_str)
            .collect();
        assert_eq!(
            tags,
            vec!["OPTIONS", "NUMERIC", "VALUE", "BETWEEN", "FORM", "ADDRESS_PROPERTY"]
        );
        assert!(PredicateScope::Any.allows(PredicateKind::RepeatableSet));
        assert!(!PredicateScope::WithinRepeatableSet.allows(PredicateKind::RepeatableSet));
    }

    #[test]
    fn test_deserialize_nested_repeatable_set() {
        let predicate: Predicate = serde_json::from_value(json!({
            "elementId": "set",
            "type": "REPEATABLESET",
            "repeatableSetPredicate": {
                "elementId": "child",
                "type": "BETWEEN",
                "min": 2,
                "max": 5
            }
        }))
        .unwrap();
        assert_eq!(predicate.kind(), PredicateKind::RepeatableSet);
        assert_eq!(predicate.element_id().as_str(), "set");
        match predicate {
            Predicate::RepeatableSet(p) => {
                assert_eq!(p.repeatable_set_predicate.kind(), PredicateKind::Between)
            }
            other => panic!("unexpected predicate {other:?}"),
        }
    }

    #[test]
    fn test_numeric_operand_variants() {
        let literal: NumericPredicate = serde_json::from_value(json!({
            "elementId": "a",
            "operator": ">=",
            "value": 4
        }))
        .unwrap();
        assert_eq!(literal.value, NumericOperand::Number(4.0));
        assert_eq!(literal.compare_with, None);

        let element: NumericPredicate = serde_json::from_value(json!({
            "elementId": "a",
            "operator": "===",
            "compareWith": "ELEMENT",
            "value": "b"
        }))
        .unwrap();
        assert_eq!(element.value, NumericOperand::Element(ElementId::from("b")));
        assert_eq!(element.compare_with, Some(CompareWith::Element));
    }

    #[test]
    fn test_address_property_definition() {
        let p: AddressPropertyPredicate = serde_json::from_value(json!({
            "elementId": "addr",
            "definition": { "property": "STATE_EQUALITY", "value": "NSW" }
        }))
        .unwrap();
        assert_eq!(
            p.definition,
            AddressProperty::StateEquality {
                value: "NSW".into()
            }
        );
    }
}
