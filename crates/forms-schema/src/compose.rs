//! # Schema Composer
//!
//! Picks the schema for one node of a form document from the node's own
//! type tag. Composition is lazy and per node: the structural walk asks for
//! a container's schema, and when it reaches the container's `elements` it
//! composes each child in turn. A sub-form reference never pulls in the
//! referenced form's tree.
//!
//! The composer owns every schema table (elements, predicates, submission
//! events and the root document) so a validator needs only one value.

use serde_json::{Map, Value};
use thiserror::Error;

use forms_core::{ElementType, EventKind, PredicateKind, PredicateScope};

use crate::document::form_schema;
use crate::events::{EventSchemas, ENDPOINT_KINDS};
use crate::predicates::PredicateSchemas;
use crate::registry::ElementSchemaRegistry;
use crate::schema::{ElementScope, ObjectSchema};

/// Why a node's type tag could not be composed into a schema. `Display` is
/// the violation detail reported at the node's `type` path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("is required")]
    MissingTag,

    #[error("must be a string")]
    TagNotString,

    #[error("must be one of [{}]", .allowed.join(", "))]
    TagNotAllowed {
        /// The tag found on the node.
        found: String,
        /// Tags legal at this position, in message order.
        allowed: Vec<&'static str>,
    },
}

/// An element's resolved type and schema.
#[derive(Debug, Clone, Copy)]
pub struct ComposedElement<'c> {
    pub element_type: ElementType,
    pub schema: &'c ObjectSchema,
}

/// Resolves schemas for element, predicate and event nodes.
#[derive(Debug, Clone)]
pub struct SchemaComposer {
    elements: ElementSchemaRegistry,
    predicates: PredicateSchemas,
    events: EventSchemas,
    form: ObjectSchema,
}

impl SchemaComposer {
    pub fn new() -> Self {
        Self {
            elements: ElementSchemaRegistry::new(),
            predicates: PredicateSchemas::new(),
            events: EventSchemas::new(),
            form: form_schema(),
        }
    }

    /// Schema of the root form document.
    pub fn form_schema(&self) -> &ObjectSchema {
        &self.form
    }

    pub fn registry(&self) -> &ElementSchemaRegistry {
        &self.elements
    }

    /// Compose the schema of an element placed in `scope`.
    pub fn compose_element(
        &self,
        node: &Map<String, Value>,
        scope: ElementScope,
    ) -> Result<ComposedElement<'_>, ComposeError> {
        let tag = type_tag(node)?;
        let allowed = allowed_element_types(scope);
        let not_allowed = || ComposeError::TagNotAllowed {
            found: tag.to_string(),
            allowed: allowed.iter().map(ElementType::as_str).collect(),
        };
        let element_type = allowed
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(not_allowed)?;
        let schema = self
            .elements
            .schema_for(element_type)
            .map_err(|_| not_allowed())?;
        Ok(ComposedElement {
            element_type,
            schema,
        })
    }

    /// Compose the schema of a predicate placed in `scope`.
    pub fn compose_predicate(
        &self,
        node: &Map<String, Value>,
        scope: PredicateScope,
    ) -> Result<(PredicateKind, &ObjectSchema), ComposeError> {
        let tag = type_tag(node)?;
        let not_allowed = || ComposeError::TagNotAllowed {
            found: tag.to_string(),
            allowed: scope.allowed().iter().map(PredicateKind::as_str).collect(),
        };
        let kind = PredicateKind::from_tag(tag)
            .filter(|k| scope.allows(*k))
            .ok_or_else(not_allowed)?;
        let schema = self.predicates.schema_for(kind).ok_or_else(not_allowed)?;
        Ok((kind, schema))
    }

    /// Fields shared by every predicate.
    pub fn predicate_base(&self) -> &ObjectSchema {
        self.predicates.base()
    }

    /// Compose the schema of a submission event. Unknown kinds compose to a
    /// permissive schema.
    pub fn compose_event(&self, node: &Map<String, Value>) -> Result<&ObjectSchema, ComposeError> {
        let tag = type_tag(node)?;
        Ok(self.events.schema_for_tag(tag))
    }

    /// Compose the schema of a standalone endpoint configuration. Only the
    /// [`ENDPOINT_KINDS`] are accepted.
    pub fn compose_endpoint(&self, node: &Map<String, Value>) -> Result<&ObjectSchema, ComposeError> {
        let tag = type_tag(node)?;
        EventKind::from_tag(tag)
            .and_then(|kind| self.events.endpoint_for(kind))
            .ok_or_else(|| ComposeError::TagNotAllowed {
                found: tag.to_string(),
                allowed: ENDPOINT_KINDS.iter().map(EventKind::as_str).collect(),
            })
    }
}

impl Default for SchemaComposer {
    fn default() -> Self {
        Self::new()
    }
}

fn type_tag(node: &Map<String, Value>) -> Result<&str, ComposeError> {
    match node.get("type") {
        None => Err(ComposeError::MissingTag),
        Some(Value::String(tag)) => Ok(tag),
        Some(_) => Err(ComposeError::TagNotString),
    }
}

/// Element types legal in a scope, in registry order.
pub fn allowed_element_types(scope: ElementScope) -> Vec<ElementType> {
    match scope {
        ElementScope::MultiPageForm => vec![ElementType::Page],
        ElementScope::Form | ElementScope::Container => ElementType::ALL
            .iter()
            .copied()
            .filter(|t| *t != ElementType::Page)
            .collect(),
    }
}
