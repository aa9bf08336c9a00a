//! # Field Paths
//!
//! Location of a value inside a form document, rendered the way violations
//! quote it: object keys joined with `.`, array positions in brackets
//! (`elements[1].conditionallyShowPredicates[0].max`).
//!
//! Paths are immutable; `key` and `index` return a child path so recursive
//! walkers can pass `&FieldPath` down without shared mutable state.

use serde::{Serialize, Serializer};

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Array position.
    Index(usize),
}

/// Location of a value inside a document. The empty path is the document
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Child path for an object member.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Child path for an array position.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_mixed_segments() {
        let path = FieldPath::root()
            .key("elements")
            .index(1)
            .key("conditionallyShowPredicates")
            .index(0)
            .key("max");
        assert_eq!(
            path.to_string(),
            "elements[1].conditionallyShowPredicates[0].max"
        );
    }

    #[test]
    fn test_root_is_empty() {
        let root = FieldPath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert_eq!(root.index(2).to_string(), "[2]");
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = FieldPath::root().key("elements");
        let child = parent.index(0);
        assert_eq!(parent.segments().len(), 1);
        assert_eq!(child.segments().len(), 2);
    }

    #[test]
    fn test_serializes_as_string() {
        let path = FieldPath::root().key("submissionEvents").index(3).key("type");
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!("submissionEvents[3].type"));
    }

    proptest! {
        /// Rendering never loses a segment: the text grows by exactly the
        /// appended key plus its separator.
        #[test]
        fn key_appends_to_rendering(
            keys in prop::collection::vec("[a-zA-Z]{1,12}", 1..6),
            extra in "[a-zA-Z]{1,12}",
        ) {
            let path = keys.iter().fold(FieldPath::root(), |p, k| p.key(k.as_str()));
            let before = path.to_string();
            let after = path.key(extra.as_str()).to_string();
            prop_assert_eq!(after, format!("{before}.{extra}"));
        }
    }
}
