//! # Flattened Element Index
//!
//! Maps element ids to the element and the path it was found at. Built once
//! per validation from a structurally valid tree, so ids are already known
//! to be unique; a later duplicate would simply replace the earlier entry.
//!
//! Every element is indexed, including those nested inside sections, pages
//! and repeatable sets. [`ElementIndex::scoped_to`] narrows the index to one
//! container's descendants, which is what a `REPEATABLESET` predicate
//! evaluates its nested predicate against.

use std::collections::HashMap;

use forms_core::{ElementId, FieldPath, FormElement, ReferenceError, TypeSet};

/// An indexed element and where it sits in the document.
#[derive(Debug, Clone)]
pub struct IndexedElement<'a> {
    pub element: &'a FormElement,
    pub path: FieldPath,
}

/// Id lookup over an element tree.
#[derive(Debug, Clone, Default)]
pub struct ElementIndex<'a> {
    entries: HashMap<&'a str, IndexedElement<'a>>,
    /// Ids in document order.
    order: Vec<&'a str>,
}

impl<'a> ElementIndex<'a> {
    /// Index a form's root element sequence.
    pub fn build(elements: &'a [FormElement]) -> Self {
        Self::build_at(elements, FieldPath::root().key("elements"))
    }

    fn build_at(elements: &'a [FormElement], path: FieldPath) -> Self {
        let mut index = Self::default();
        index.visit(elements, &path);
        tracing::trace!(elements = index.len(), "built element index");
        index
    }

    fn visit(&mut self, elements: &'a [FormElement], path: &FieldPath) {
        for (i, element) in elements.iter().enumerate() {
            let element_path = path.index(i);
            let id = element.id.as_str();
            if self
                .entries
                .insert(
                    id,
                    IndexedElement {
                        element,
                        path: element_path.clone(),
                    },
                )
                .is_none()
            {
                self.order.push(id);
            }
            self.visit(element.children(), &element_path.key("elements"));
        }
    }

    /// The index of one container's descendants.
    pub fn scoped_to(&self, entry: &IndexedElement<'a>) -> ElementIndex<'a> {
        Self::build_at(entry.element.children(), entry.path.key("elements"))
    }

    pub fn get(&self, id: &str) -> Option<&IndexedElement<'a>> {
        self.entries.get(id)
    }

    /// Look up a referenced element, failing with `NotFound` at `path`.
    pub fn resolve(
        &self,
        id: &ElementId,
        path: &FieldPath,
    ) -> Result<&IndexedElement<'a>, ReferenceError> {
        self.get(id.as_str())
            .ok_or_else(|| ReferenceError::NotFound {
                path: path.clone(),
                element_id: id.to_string(),
            })
    }

    /// Look up a referenced element and require its type to be in `allowed`.
    pub fn resolve_typed(
        &self,
        id: &ElementId,
        allowed: TypeSet,
        path: &FieldPath,
    ) -> Result<&IndexedElement<'a>, ReferenceError> {
        let entry = self.resolve(id, path)?;
        if allowed.contains(entry.element.element_type) {
            Ok(entry)
        } else {
            Err(ReferenceError::IncompatibleType {
                path: path.clone(),
                element_id: id.to_string(),
                found: entry.element.element_type,
                allowed,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedElement<'a>> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms_core::element::{NUMERIC_TYPES, REPEATABLE_SET_TYPES};
    use forms_core::ElementType;
    use serde_json::json;

    fn elements() -> Vec<FormElement> {
        serde_json::from_value(json!([
            { "id": "qty", "type": "number", "name": "qty", "label": "Qty" },
            {
                "id": "section",
                "type": "section",
                "label": "Section",
                "elements": [
                    {
                        "id": "set",
                        "type": "repeatableSet",
                        "name": "rows",
                        "label": "Rows",
                        "elements": [
                            { "id": "amount", "type": "number", "name": "amount", "label": "Amount" }
                        ]
                    }
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_indexes_nested_elements_with_paths() {
        let elements = elements();
        let index = ElementIndex::build(&elements);
        assert_eq!(index.len(), 4);
        assert_eq!(
            index.get("amount").unwrap().path.to_string(),
            "elements[1].elements[0].elements[0]"
        );
        let ids: Vec<_> = index.iter().map(|e| e.element.id.as_str()).collect();
        assert_eq!(ids, vec!["qty", "section", "set", "amount"]);
    }

    #[test]
    fn test_scoped_to_container() {
        let elements = elements();
        let index = ElementIndex::build(&elements);
        let set = index.get("set").unwrap();
        let scoped = index.scoped_to(set);
        assert_eq!(scoped.len(), 1);
        assert!(scoped.get("qty").is_none());
        assert_eq!(
            scoped.get("amount").unwrap().path.to_string(),
            "elements[1].elements[0].elements[0]"
        );
    }

    #[test]
    fn test_resolve_typed() {
        let elements = elements();
        let index = ElementIndex::build(&elements);
        let path = FieldPath::root().key("elementId");

        assert!(index
            .resolve_typed(&ElementId::from("qty"), NUMERIC_TYPES, &path)
            .is_ok());

        let err = index
            .resolve_typed(&ElementId::from("qty"), REPEATABLE_SET_TYPES, &path)
            .unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::IncompatibleType { found: ElementType::Number, .. }
        ));

        let err = index
            .resolve(&ElementId::from("missing"), &path)
            .unwrap_err();
        assert!(err.to_string().starts_with("Referenced elementId not found"));
    }

    #[test]
    fn test_empty_tree() {
        let index = ElementIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
