//! # Structural Validation
//!
//! Context-free, per-node validation of form documents, elements and
//! submission events against the composed schemas.
//!
//! ## Phases
//!
//! 1. **Normalize** ([`crate::normalize`]): inject defaults, drop stripped
//!    and (optionally) unknown fields. Total.
//! 2. **Check**: walk the normalized value and collect violations in
//!    document order. With `abort_early` the walk stops at the first one.
//!
//! Constraints that reference siblings (`maxLength` against `minLength`)
//! are evaluated against the normalized object, so injected defaults take
//! part.
//!
//! ## Identity
//!
//! The check phase also enforces the two tree-wide identity rules: element
//! ids and element names are each unique across the whole flattened tree,
//! nested container contents included. Elements without a name are ignored
//! by the name rule. A duplicate is reported when its `id` or `name` field
//! is visited, so it takes that field's place in document order, and only
//! once the value itself is well formed.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use forms_core::{ElementType, FieldPath, PredicateScope, ValidationViolations, Violation};

use crate::compose::SchemaComposer;
use crate::load::{load_document, DocumentLoadError};
use crate::normalize::Normalizer;
use crate::schema::{
    ArrayRules, ElementScope, FieldKind, IntegerRule, NumberRules, ObjectSchema, Presence,
    StringFormat, StringRules,
};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Options for one structural validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Stop at the first violation.
    pub abort_early: bool,
    /// Remove fields no schema declares instead of keeping them.
    pub strip_unknown: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            abort_early: true,
            strip_unknown: false,
        }
    }
}

impl ValidationOptions {
    /// Collect every violation.
    pub fn accumulate() -> Self {
        Self {
            abort_early: false,
            ..Self::default()
        }
    }

    pub fn with_strip_unknown(mut self, strip_unknown: bool) -> Self {
        self.strip_unknown = strip_unknown;
        self
    }
}

/// Error validating a document file.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the form schema.
    #[error("validation failed: {0}")]
    Invalid(ValidationViolations),

    /// The document file could not be loaded.
    #[error(transparent)]
    Load(#[from] DocumentLoadError),
}

/// Validates form documents, standalone elements and standalone submission
/// events.
///
/// ## Thread Safety
///
/// `StructuralValidator` is `Send + Sync`. Schema tables are built once at
/// construction and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct StructuralValidator {
    composer: SchemaComposer,
}

impl StructuralValidator {
    pub fn new() -> Self {
        Self {
            composer: SchemaComposer::new(),
        }
    }

    pub fn composer(&self) -> &SchemaComposer {
        &self.composer
    }

    /// Validate a whole form document, returning it normalized.
    pub fn validate(
        &self,
        document: &Value,
        options: &ValidationOptions,
    ) -> Result<Value, ValidationViolations> {
        let normalized = Normalizer::new(&self.composer, options.strip_unknown).document(document);
        let mut checker = Checker::new(&self.composer, options.abort_early);
        match normalized.as_object() {
            Some(members) => checker.object(members, self.composer.form_schema(), &FieldPath::root()),
            None => checker.report(&FieldPath::root(), "must be of type object"),
        }
        checker.finish(normalized)
    }

    /// Validate one element as if placed at the root of a single-page form.
    /// Paths in violations are relative to the element.
    pub fn validate_element(
        &self,
        element: &Value,
        options: &ValidationOptions,
    ) -> Result<Value, ValidationViolations> {
        self.validate_element_in(element, ElementScope::Form, options)
    }

    /// Validate one element as if placed in `scope`; a page is only legal
    /// in [`ElementScope::MultiPageForm`].
    pub fn validate_element_in(
        &self,
        element: &Value,
        scope: ElementScope,
        options: &ValidationOptions,
    ) -> Result<Value, ValidationViolations> {
        let normalized =
            Normalizer::new(&self.composer, options.strip_unknown).element(element, scope);
        let mut checker = Checker::new(&self.composer, options.abort_early);
        checker.element(&normalized, scope, &FieldPath::root());
        checker.finish(normalized)
    }

    /// Validate an element array as the top level of a form, multi-page
    /// when its first element is a page. Paths start at the array
    /// (`[0].label`).
    pub fn validate_elements(
        &self,
        elements: &Value,
        options: &ValidationOptions,
    ) -> Result<Value, ValidationViolations> {
        let first_tag = elements
            .get(0)
            .and_then(|element| element.get("type"))
            .and_then(Value::as_str);
        let scope = if first_tag == Some(ElementType::Page.as_str()) {
            ElementScope::MultiPageForm
        } else {
            ElementScope::Form
        };
        let normalizer = Normalizer::new(&self.composer, options.strip_unknown);
        let normalized = match elements {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| normalizer.element(item, scope))
                    .collect(),
            ),
            other => other.clone(),
        };
        let mut checker = Checker::new(&self.composer, options.abort_early);
        checker.elements(&normalized, scope, &FieldPath::root());
        checker.finish(normalized)
    }

    /// Validate one submission event. Paths in violations are relative to
    /// the event.
    pub fn validate_event(
        &self,
        event: &Value,
        options: &ValidationOptions,
    ) -> Result<Value, ValidationViolations> {
        let normalized = Normalizer::new(&self.composer, options.strip_unknown).event(event);
        let mut checker = Checker::new(&self.composer, options.abort_early);
        checker.event(&normalized, &FieldPath::root());
        checker.finish(normalized)
    }

    /// Validate a standalone endpoint configuration (`CALLBACK` or
    /// `POWER_AUTOMATE_FLOW`). Paths in violations are relative to it.
    pub fn validate_endpoint_configuration(
        &self,
        endpoint: &Value,
        options: &ValidationOptions,
    ) -> Result<Value, ValidationViolations> {
        let normalized = Normalizer::new(&self.composer, options.strip_unknown).endpoint(endpoint);
        let mut checker = Checker::new(&self.composer, options.abort_early);
        checker.endpoint(&normalized, &FieldPath::root());
        checker.finish(normalized)
    }

    /// Load a JSON or YAML document from disk and validate it.
    pub fn validate_file(
        &self,
        path: &Path,
        options: &ValidationOptions,
    ) -> Result<Value, SchemaValidationError> {
        let document = load_document(path)?;
        self.validate(&document, options)
            .map_err(SchemaValidationError::Invalid)
    }
}

// ---------------------------------------------------------------------------
// Check Phase
// ---------------------------------------------------------------------------

struct Checker<'c> {
    composer: &'c SchemaComposer,
    abort_early: bool,
    violations: Vec<Violation>,
    /// Element ids seen so far.
    ids: HashSet<String>,
    /// Element names seen so far.
    names: HashSet<String>,
}

impl<'c> Checker<'c> {
    fn new(composer: &'c SchemaComposer, abort_early: bool) -> Self {
        Self {
            composer,
            abort_early,
            violations: Vec::new(),
            ids: HashSet::new(),
            names: HashSet::new(),
        }
    }

    fn finish(self, normalized: Value) -> Result<Value, ValidationViolations> {
        if self.violations.is_empty() {
            Ok(normalized)
        } else {
            tracing::debug!(violations = self.violations.len(), "structural validation failed");
            Err(ValidationViolations::new(self.violations))
        }
    }

    fn halted(&self) -> bool {
        self.abort_early && !self.violations.is_empty()
    }

    fn report(&mut self, path: &FieldPath, detail: impl fmt::Display) {
        self.violations.push(Violation::new(path.clone(), detail));
    }

    fn object(&mut self, members: &Map<String, Value>, schema: &ObjectSchema, path: &FieldPath) {
        self.fields(members, schema, path, false);
    }

    /// Check every field of `schema`. With `identity`, a well-formed `id`
    /// or `name` is also checked against the ones seen so far.
    fn fields(
        &mut self,
        members: &Map<String, Value>,
        schema: &ObjectSchema,
        path: &FieldPath,
        identity: bool,
    ) {
        for field in schema.fields() {
            if self.halted() {
                return;
            }
            let spec = schema.resolve(field, members);
            let field_path = path.key(field.name);
            match (members.get(field.name), spec.presence) {
                (_, Presence::Strip) => {}
                (None, Presence::Required) => self.report(&field_path, "is required"),
                (None, _) => {}
                (Some(value), _) => {
                    let before = self.violations.len();
                    self.value(value, &spec.kind, members, &field_path);
                    if identity && self.violations.len() == before {
                        self.track_identity(field.name, value, &field_path);
                    }
                }
            }
        }
    }

    fn value(
        &mut self,
        value: &Value,
        kind: &FieldKind,
        siblings: &Map<String, Value>,
        path: &FieldPath,
    ) {
        match kind {
            FieldKind::Any => {}
            FieldKind::String(rules) => self.string(value, rules, siblings, path),
            FieldKind::Number(rules) => self.number(value, rules, siblings, path),
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    self.report(path, "must be a boolean");
                }
            }
            FieldKind::Array(rules) => self.array(value, rules, siblings, path),
            FieldKind::Object(schema) => match value.as_object() {
                Some(members) => self.object(members, schema, path),
                None => self.report(path, "must be of type object"),
            },
            FieldKind::Elements(scope) => self.elements(value, *scope, path),
            FieldKind::Predicate(scope) => self.predicate(value, *scope, path),
            FieldKind::Predicates(scope) => self.predicates(value, *scope, path),
            FieldKind::Events => self.events(value, path),
        }
    }

    fn string(
        &mut self,
        value: &Value,
        rules: &StringRules,
        siblings: &Map<String, Value>,
        path: &FieldPath,
    ) {
        let Some(s) = value.as_str() else {
            self.report(path, "must be a string");
            return;
        };
        if s.is_empty() {
            if !rules.allow_empty {
                self.report(path, "is not allowed to be empty");
            }
            return;
        }
        if let Some(allowed) = rules.one_of {
            if !allowed.contains(&s) {
                self.report(path, format!("must be one of [{}]", allowed.join(", ")));
                return;
            }
        }
        if let Some(format) = rules.format {
            if let Err(detail) = check_format(format, s) {
                self.report(path, detail);
                return;
            }
        }
        let length = s.chars().count() as f64;
        if let Some(min) = rules.min_length.and_then(|b| b.resolve(siblings)) {
            if length < min {
                self.report(
                    path,
                    format!("length must be at least {} characters long", format_number(min)),
                );
                return;
            }
        }
        if let Some(max) = rules.max_length.and_then(|b| b.resolve(siblings)) {
            if length > max {
                self.report(
                    path,
                    format!(
                        "length must be less than or equal to {} characters long",
                        format_number(max)
                    ),
                );
                return;
            }
        }
        if let (Some(sibling), Some(format)) = (rules.not_before, rules.format) {
            if let Some(earliest) = siblings.get(sibling).and_then(Value::as_str) {
                if is_before(format, s, earliest) {
                    self.report(
                        path,
                        format!("must be greater than or equal to \"{earliest}\""),
                    );
                }
            }
        }
    }

    fn number(
        &mut self,
        value: &Value,
        rules: &NumberRules,
        siblings: &Map<String, Value>,
        path: &FieldPath,
    ) {
        let Some(n) = value.as_f64() else {
            self.report(path, "must be a number");
            return;
        };
        let integer = match rules.integer {
            IntegerRule::Never => false,
            IntegerRule::Always => true,
            IntegerRule::WhenTrue(flag) => siblings.get(flag) == Some(&Value::Bool(true)),
        };
        if integer && n.fract() != 0.0 {
            self.report(path, "must be an integer");
            return;
        }
        for bound in &rules.lower {
            if let Some(limit) = bound.resolve(siblings) {
                if n < limit {
                    self.report(
                        path,
                        format!("must be greater than or equal to {}", format_number(limit)),
                    );
                    return;
                }
            }
        }
        for bound in &rules.upper {
            if let Some(limit) = bound.resolve(siblings) {
                if n > limit {
                    self.report(
                        path,
                        format!("must be less than or equal to {}", format_number(limit)),
                    );
                    return;
                }
            }
        }
    }

    fn array(
        &mut self,
        value: &Value,
        rules: &ArrayRules,
        siblings: &Map<String, Value>,
        path: &FieldPath,
    ) {
        let Some(items) = value.as_array() else {
            self.report(path, "must be an array");
            return;
        };
        if let Some(min) = rules.min_items {
            if items.len() < min {
                self.report(path, format!("must contain at least {min} items"));
            }
        }
        for (i, item) in items.iter().enumerate() {
            if self.halted() {
                return;
            }
            self.value(item, &rules.items, siblings, &path.index(i));
        }
        if rules.unique {
            for (i, item) in items.iter().enumerate() {
                if items[..i].contains(item) {
                    self.report(&path.index(i), "contains a duplicate value");
                }
            }
        }
    }

    fn elements(&mut self, value: &Value, scope: ElementScope, path: &FieldPath) {
        let Some(items) = value.as_array() else {
            self.report(path, "must be an array");
            return;
        };
        if let Some(min) = scope.min_items() {
            if items.len() < min {
                self.report(path, format!("must contain at least {min} items"));
            }
        }
        for (i, item) in items.iter().enumerate() {
            if self.halted() {
                return;
            }
            self.element(item, scope, &path.index(i));
        }
    }

    fn element(&mut self, item: &Value, scope: ElementScope, path: &FieldPath) {
        let Some(members) = item.as_object() else {
            self.report(path, "must be of type object");
            return;
        };
        let composed = match self.composer.compose_element(members, scope) {
            Ok(composed) => composed,
            Err(e) => {
                self.report(&path.key("type"), e);
                return;
            }
        };
        self.fields(members, composed.schema, path, true);
    }

    /// Record an element's id or name, reporting one already seen.
    fn track_identity(&mut self, field: &str, value: &Value, path: &FieldPath) {
        let Some(key) = value.as_str() else {
            return;
        };
        let seen = match field {
            "id" => &mut self.ids,
            "name" => &mut self.names,
            _ => return,
        };
        if !seen.insert(key.to_string()) {
            self.report(path, "contains a duplicate value");
        }
    }

    fn predicates(&mut self, value: &Value, scope: PredicateScope, path: &FieldPath) {
        let Some(items) = value.as_array() else {
            self.report(path, "must be an array");
            return;
        };
        if items.is_empty() {
            self.report(path, "must contain at least 1 items");
        }
        for (i, item) in items.iter().enumerate() {
            if self.halted() {
                return;
            }
            self.predicate(item, scope, &path.index(i));
        }
    }

    fn predicate(&mut self, value: &Value, scope: PredicateScope, path: &FieldPath) {
        let Some(members) = value.as_object() else {
            self.report(path, "must be of type object");
            return;
        };
        match self.composer.compose_predicate(members, scope) {
            Ok((_, schema)) => self.object(members, schema, path),
            Err(e) => {
                self.object(members, self.composer.predicate_base(), path);
                if !self.halted() {
                    self.report(&path.key("type"), e);
                }
            }
        }
    }

    fn events(&mut self, value: &Value, path: &FieldPath) {
        let Some(items) = value.as_array() else {
            self.report(path, "must be an array");
            return;
        };
        for (i, item) in items.iter().enumerate() {
            if self.halted() {
                return;
            }
            self.event(item, &path.index(i));
        }
    }

    fn endpoint(&mut self, value: &Value, path: &FieldPath) {
        let Some(members) = value.as_object() else {
            self.report(path, "must be of type object");
            return;
        };
        match self.composer.compose_endpoint(members) {
            Ok(schema) => self.object(members, schema, path),
            Err(e) => self.report(&path.key("type"), e),
        }
    }

    fn event(&mut self, value: &Value, path: &FieldPath) {
        let Some(members) = value.as_object() else {
            self.report(path, "must be of type object");
            return;
        };
        match self.composer.compose_event(members) {
            Ok(schema) => self.object(members, schema, path),
            Err(e) => self.report(&path.key("type"), e),
        }
    }
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

fn check_format(format: StringFormat, s: &str) -> Result<(), &'static str> {
    let valid = match format {
        StringFormat::Guid => Uuid::parse_str(s).is_ok(),
        StringFormat::Uri => Url::parse(s).is_ok(),
        StringFormat::Email => email_pattern().map_or(false, |re| re.is_match(s)),
        StringFormat::Date => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
        StringFormat::DateTime => DateTime::parse_from_rfc3339(s).is_ok(),
        StringFormat::Time => NaiveTime::parse_from_str(s, "%H:%M").is_ok(),
        StringFormat::Regex => Regex::new(s).is_ok(),
    };
    if valid {
        return Ok(());
    }
    Err(match format {
        StringFormat::Guid => "must be a valid GUID",
        StringFormat::Uri => "must be a valid uri",
        StringFormat::Email => "must be a valid email",
        StringFormat::Date => "must be a valid date",
        StringFormat::DateTime => "must be in ISO 8601 date format",
        StringFormat::Time => "must be a valid time",
        StringFormat::Regex => "must be a valid regular expression",
    })
}

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Whether `value` is strictly earlier than `earliest`. Values that do not
/// parse are never earlier; their format is reported separately.
fn is_before(format: StringFormat, value: &str, earliest: &str) -> bool {
    match format {
        StringFormat::Date => match (
            NaiveDate::parse_from_str(value, "%Y-%m-%d"),
            NaiveDate::parse_from_str(earliest, "%Y-%m-%d"),
        ) {
            (Ok(a), Ok(b)) => a < b,
            _ => false,
        },
        StringFormat::DateTime => match (
            DateTime::parse_from_rfc3339(value),
            DateTime::parse_from_rfc3339(earliest),
        ) {
            (Ok(a), Ok(b)) => a < b,
            _ => false,
        },
        StringFormat::Time => match (
            NaiveTime::parse_from_str(value, "%H:%M"),
            NaiveTime::parse_from_str(earliest, "%H:%M"),
        ) {
            (Ok(a), Ok(b)) => a < b,
            _ => false,
        },
        StringFormat::Guid | StringFormat::Uri | StringFormat::Email | StringFormat::Regex => false,
    }
}

/// Render a limit the way form authors wrote it: `4`, not `4.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
