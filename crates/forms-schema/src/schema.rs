//! # Schema Model
//!
//! A small declarative description of object shapes, expressive enough for
//! every form element, predicate and submission event: field kinds,
//! presence (optional, required, stripped), defaults, literal or
//! sibling-relative bounds, string formats, and conditional fields.
//!
//! Schemas are plain data built once at registry construction. They are
//! interpreted twice, first by the normalizer (defaults and stripping) and
//! then by the checker (constraints), and never mutated afterwards.

use serde_json::{Map, Value};

use forms_core::PredicateScope;

/// A numeric limit: a literal, or the value of a sibling field.
///
/// A sibling bound that is absent or not a number imposes no limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Value(f64),
    Sibling(&'static str),
}

impl Bound {
    /// Resolve the limit against the object holding the constrained field.
    pub fn resolve(&self, siblings: &Map<String, Value>) -> Option<f64> {
        match self {
            Self::Value(n) => Some(*n),
            Self::Sibling(name) => siblings.get(*name).and_then(Value::as_f64),
        }
    }
}

/// When a number must be an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerRule {
    #[default]
    Never,
    Always,
    /// Only when the named sibling flag is `true`.
    WhenTrue(&'static str),
}

/// Named string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Guid,
    Uri,
    Email,
    /// `YYYY-MM-DD`
    Date,
    /// ISO 8601 / RFC 3339 date-time.
    DateTime,
    /// `HH:mm`
    Time,
    /// A compilable regular expression.
    Regex,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringRules {
    pub allow_empty: bool,
    pub one_of: Option<&'static [&'static str]>,
    pub format: Option<StringFormat>,
    pub min_length: Option<Bound>,
    pub max_length: Option<Bound>,
    /// For date formats: must not be earlier than the named sibling.
    pub not_before: Option<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberRules {
    pub integer: IntegerRule,
    pub lower: Vec<Bound>,
    pub upper: Vec<Bound>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayRules {
    pub items: Box<FieldKind>,
    pub min_items: Option<usize>,
    pub unique: bool,
}

/// Where an element sequence sits, which decides the legal element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementScope {
    /// Root of a single-page form: any type except `page`.
    Form,
    /// Root of a multi-page form: `page` only.
    MultiPageForm,
    /// Inside a container: any type except `page`, at least one entry.
    Container,
}

impl ElementScope {
    pub fn min_items(&self) -> Option<usize> {
        match self {
            Self::Form | Self::MultiPageForm => None,
            Self::Container => Some(1),
        }
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Anything; no checks beyond presence.
    Any,
    String(StringRules),
    Number(NumberRules),
    Boolean,
    Array(ArrayRules),
    Object(ObjectSchema),
    /// A nested element sequence, composed per element from its type tag.
    Elements(ElementScope),
    /// A single predicate, composed from its type tag.
    Predicate(PredicateScope),
    /// A non-empty predicate sequence.
    Predicates(PredicateScope),
    /// The submission event sequence, composed per event from its kind.
    Events,
}

/// Presence of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Optional,
    Required,
    /// Removed during normalization whatever its value.
    Strip,
}

/// Everything known about one field once its conditions are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub presence: Presence,
    pub default: Option<Value>,
}

impl FieldSpec {
    fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
            default: None,
        }
    }

    pub fn any() -> Self {
        Self::of(FieldKind::Any)
    }

    pub fn string() -> Self {
        Self::of(FieldKind::String(StringRules::default()))
    }

    pub fn number() -> Self {
        Self::of(FieldKind::Number(NumberRules::default()))
    }

    pub fn integer() -> Self {
        Self::of(FieldKind::Number(NumberRules {
            integer: IntegerRule::Always,
            ..NumberRules::default()
        }))
    }

    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    pub fn array(items: FieldKind) -> Self {
        Self::of(FieldKind::Array(ArrayRules {
            items: Box::new(items),
            min_items: None,
            unique: false,
        }))
    }

    pub fn object(schema: ObjectSchema) -> Self {
        Self::of(FieldKind::Object(schema))
    }

    pub fn elements(scope: ElementScope) -> Self {
        Self::of(FieldKind::Elements(scope))
    }

    pub fn predicate(scope: PredicateScope) -> Self {
        Self::of(FieldKind::Predicate(scope))
    }

    pub fn predicates(scope: PredicateScope) -> Self {
        Self::of(FieldKind::Predicates(scope))
    }

    pub fn events() -> Self {
        Self::of(FieldKind::Events)
    }

    /// A field that is always removed.
    pub fn strip() -> Self {
        Self {
            presence: Presence::Strip,
            ..Self::any()
        }
    }

    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn allow_empty(mut self) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.allow_empty = true;
        }
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.one_of = Some(values);
        }
        self
    }

    pub fn format(mut self, format: StringFormat) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.format = Some(format);
        }
        self
    }

    pub fn min_length(mut self, bound: Bound) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.min_length = Some(bound);
        }
        self
    }

    pub fn max_length(mut self, bound: Bound) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.max_length = Some(bound);
        }
        self
    }

    pub fn not_before(mut self, sibling: &'static str) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.not_before = Some(sibling);
        }
        self
    }

    pub fn integer_when(mut self, flag: &'static str) -> Self {
        if let FieldKind::Number(rules) = &mut self.kind {
            rules.integer = IntegerRule::WhenTrue(flag);
        }
        self
    }

    pub fn lower(mut self, bound: Bound) -> Self {
        if let FieldKind::Number(rules) = &mut self.kind {
            rules.lower.push(bound);
        }
        self
    }

    pub fn upper(mut self, bound: Bound) -> Self {
        if let FieldKind::Number(rules) = &mut self.kind {
            rules.upper.push(bound);
        }
        self
    }

    pub fn min_items(mut self, min: usize) -> Self {
        if let FieldKind::Array(rules) = &mut self.kind {
            rules.min_items = Some(min);
        }
        self
    }

    pub fn unique(mut self) -> Self {
        if let FieldKind::Array(rules) = &mut self.kind {
            rules.unique = true;
        }
        self
    }

    /// Unwrap into the bare kind, for array items.
    pub fn into_kind(self) -> FieldKind {
        self.kind
    }
}

/// How a field's spec is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    Always(FieldSpec),
    /// `then` when the sibling equals `equals`, `otherwise` if not.
    When {
        sibling: &'static str,
        equals: Value,
        then: Box<FieldRule>,
        otherwise: Box<FieldRule>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub rule: FieldRule,
}

impl Field {
    pub fn new(name: &'static str, spec: FieldSpec) -> Self {
        Self {
            name,
            rule: FieldRule::Always(spec),
        }
    }

    /// A conditional field.
    pub fn when(
        name: &'static str,
        sibling: &'static str,
        equals: Value,
        then: FieldSpec,
        otherwise: FieldSpec,
    ) -> Self {
        Self {
            name,
            rule: FieldRule::When {
                sibling,
                equals,
                then: Box::new(FieldRule::Always(then)),
                otherwise: Box::new(FieldRule::Always(otherwise)),
            },
        }
    }
}

/// Ordered set of fields describing one object shape.
///
/// Field order is the order violations are reported in and the order
/// injected defaults are appended in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<Field>,
}

impl ObjectSchema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a field unless one with the same name is already declared.
    pub fn push(&mut self, field: Field) {
        if !self.declares(field.name) {
            self.fields.push(field);
        }
    }

    /// Pick the spec that applies to `field` given the object's current
    /// members. A sibling that is absent falls back to its declared default.
    pub fn resolve<'s>(&'s self, field: &'s Field, members: &Map<String, Value>) -> &'s FieldSpec {
        let mut rule = &field.rule;
        loop {
            match rule {
                FieldRule::Always(spec) => return spec,
                FieldRule::When {
                    sibling,
                    equals,
                    then,
                    otherwise,
                } => {
                    let matches = match members.get(*sibling) {
                        Some(value) => value == equals,
                        None => self.default_of(sibling) == Some(equals),
                    };
                    rule = if matches { then } else { otherwise };
                }
            }
        }
    }

    fn default_of(&self, name: &str) -> Option<&Value> {
        match &self.get(name)?.rule {
            FieldRule::Always(spec) => spec.default.as_ref(),
            // Conditional fields never act as conditions.
            FieldRule::When { .. } => None,
        }
    }
}
