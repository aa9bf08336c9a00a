//! # Normalization
//!
//! The total first phase of structural validation. Walks a document along
//! its composed schema and returns a new document with declared defaults
//! injected, stripped fields removed and, when requested, undeclared fields
//! removed. Never fails: values of the wrong shape are copied unchanged for
//! the check phase to report.
//!
//! Key order is the author's, with injected defaults appended in schema
//! order.

use serde_json::{Map, Value};

use forms_core::PredicateScope;

use crate::compose::SchemaComposer;
use crate::schema::{ElementScope, FieldKind, ObjectSchema, Presence};

pub(crate) struct Normalizer<'c> {
    composer: &'c SchemaComposer,
    strip_unknown: bool,
}

impl<'c> Normalizer<'c> {
    pub(crate) fn new(composer: &'c SchemaComposer, strip_unknown: bool) -> Self {
        Self {
            composer,
            strip_unknown,
        }
    }

    pub(crate) fn document(&self, document: &Value) -> Value {
        self.with_schema(document, self.composer.form_schema())
    }

    pub(crate) fn event(&self, event: &Value) -> Value {
        match event {
            Value::Object(members) => match self.composer.compose_event(members) {
                Ok(schema) => Value::Object(self.object(members, schema)),
                Err(_) => event.clone(),
            },
            other => other.clone(),
        }
    }

    pub(crate) fn endpoint(&self, endpoint: &Value) -> Value {
        match endpoint {
            Value::Object(members) => match self.composer.compose_endpoint(members) {
                Ok(schema) => Value::Object(self.object(members, schema)),
                Err(_) => endpoint.clone(),
            },
            other => other.clone(),
        }
    }

    fn with_schema(&self, value: &Value, schema: &ObjectSchema) -> Value {
        match value {
            Value::Object(members) => Value::Object(self.object(members, schema)),
            other => other.clone(),
        }
    }

    fn object(&self, members: &Map<String, Value>, schema: &ObjectSchema) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in members {
            match schema.get(key) {
                Some(field) => {
                    let spec = schema.resolve(field, members);
                    if spec.presence != Presence::Strip {
                        out.insert(key.clone(), self.value(value, &spec.kind));
                    }
                }
                None if self.strip_unknown => {}
                None => {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        for field in schema.fields() {
            if members.contains_key(field.name) {
                continue;
            }
            let spec = schema.resolve(field, members);
            if spec.presence == Presence::Strip {
                continue;
            }
            if let Some(default) = &spec.default {
                out.insert(field.name.to_string(), default.clone());
            }
        }
        out
    }

    fn value(&self, value: &Value, kind: &FieldKind) -> Value {
        match (kind, value) {
            (FieldKind::Object(schema), Value::Object(members)) => {
                Value::Object(self.object(members, schema))
            }
            (FieldKind::Array(rules), Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| self.value(item, &rules.items))
                    .collect(),
            ),
            (FieldKind::Elements(scope), Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| self.element(item, *scope))
                    .collect(),
            ),
            (FieldKind::Predicates(scope), Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| self.predicate(item, *scope))
                    .collect(),
            ),
            (FieldKind::Predicate(scope), _) => self.predicate(value, *scope),
            (FieldKind::Events, Value::Array(items)) => {
                Value::Array(items.iter().map(|item| self.event(item)).collect())
            }
            _ => value.clone(),
        }
    }

    /// Normalize an element composed as if placed in `scope`.
    pub(crate) fn element(&self, element: &Value, scope: ElementScope) -> Value {
        match element {
            Value::Object(members) => match self.composer.compose_element(members, scope) {
                Ok(composed) => Value::Object(self.object(members, composed.schema)),
                Err(_) => element.clone(),
            },
            other => other.clone(),
        }
    }

    fn predicate(&self, predicate: &Value, scope: PredicateScope) -> Value {
        match predicate {
            Value::Object(members) => match self.composer.compose_predicate(members, scope) {
                Ok((_, schema)) => Value::Object(self.object(members, schema)),
                Err(_) => predicate.clone(),
            },
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "ff9b04c3-f2ad-4994-a525-e7189eb67a79";

    #[test]
    fn test_injects_defaults_after_author_keys() {
        let composer = SchemaComposer::new();
        let normalized = Normalizer::new(&composer, false).document(&json!({
            "name": "Form",
            "elements": []
        }));
        let keys: Vec<_> = normalized.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "elements",
                "formsAppIds",
                "isAuthenticated",
                "isMultiPage",
                "tags",
                "submissionEvents"
            ]
        );
    }

    #[test]
    fn test_strips_inapplicable_conditional_fields() {
        let composer = SchemaComposer::new();
        let element = json!({
            "id": ID,
            "type": "text",
            "name": "a",
            "label": "A",
            "conditionallyShow": false,
            "conditionallyShowPredicates": [
                { "elementId": ID, "type": "VALUE", "hasValue": true }
            ]
        });
        let normalized = Normalizer::new(&composer, false).element(&element, ElementScope::Form);
        assert!(normalized.get("conditionallyShowPredicates").is_none());
        assert_eq!(normalized["requiresAllConditionallyShowPredicates"], json!(false));
    }

    #[test]
    fn test_unknown_fields_kept_unless_stripping() {
        let composer = SchemaComposer::new();
        let element = json!({
            "id": ID,
            "type": "text",
            "name": "a",
            "label": "A",
            "somethingElse": 1
        });
        let kept = Normalizer::new(&composer, false).element(&element, ElementScope::Form);
        assert_eq!(kept["somethingElse"], json!(1));
        let stripped = Normalizer::new(&composer, true).element(&element, ElementScope::Form);
        assert!(stripped.get("somethingElse").is_none());
    }

    #[test]
    fn test_malformed_values_copied() {
        let composer = SchemaComposer::new();
        let normalized = Normalizer::new(&composer, false).document(&json!({
            "name": "Form",
            "elements": "not an array"
        }));
        assert_eq!(normalized["elements"], json!("not an array"));
    }
}
