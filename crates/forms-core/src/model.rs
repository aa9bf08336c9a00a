//! # Typed Form Model
//!
//! The part of a form document that whole-tree checks read: element
//! identity, type, name, conditional show predicates, container children,
//! and submission events. It is read from a document that has already
//! passed structural validation, so every field here is known to be
//! present and well-typed. Fields not listed are ignored. Every element
//! field read here is either declared by the element's schema or stripped
//! from it, so an undeclared value never reaches this model.

use serde::{Deserialize, Serialize};

use crate::element::ElementType;
use crate::event::SubmissionEvent;
use crate::identity::ElementId;
use crate::predicate::Predicate;

/// Root form document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub name: String,
    #[serde(default)]
    pub is_multi_page: bool,
    #[serde(default)]
    pub elements: Vec<FormElement>,
    #[serde(default)]
    pub submission_events: Vec<SubmissionEvent>,
}

/// One node of the element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub conditionally_show: bool,
    #[serde(default)]
    pub requires_all_conditionally_show_predicates: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditionally_show_predicates: Vec<Predicate>,
    /// Set on `select` elements that accept several options.
    #[serde(default)]
    pub multi: bool,
    /// Children of a container element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<FormElement>,
}

impl FormElement {
    /// Children of this element; empty for non-container variants.
    pub fn children(&self) -> &[FormElement] {
        if self.element_type.is_container() {
            &self.elements
        } else {
            &[]
        }
    }
}
