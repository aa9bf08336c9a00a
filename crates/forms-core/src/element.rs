//! # Element Types — Single Source of Truth
//!
//! Defines the `ElementType` enum with all 41 form element variants. Every
//! dispatch on an element's type tag (schema lookup, reference type
//! compatibility, container traversal) is an exhaustive `match` over this
//! enum, so adding a variant forces every consumer to handle it at compile
//! time.
//!
//! The wire tag of each variant is its camelCase name (`barcodeScanner`,
//! `repeatableSet`, `arcGISWebMap`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FormsError;

/// Number of element variants known to the engine.
pub const ELEMENT_TYPE_COUNT: usize = 41;

/// Every form element variant.
///
/// | Group | Variants |
/// |-------|----------|
/// | Text inputs | text, textarea, email, telephone, barcodeScanner, abn, bsb |
/// | Numeric | number, calculation |
/// | Temporal | date, datetime, time |
/// | Choice | select, autocomplete, radio, checkboxes, boolean, compliance |
/// | Media | camera, draw, file, files, image |
/// | Display | html, heading, captcha, summary, arcGISWebMap |
/// | Address | location, pointAddress, geoscapeAddress, googleAddress, civicaStreetName, civicaNameRecord |
/// | Integration | freshdeskDependentField, lookupButton |
/// | References | form, infoPage |
/// | Containers | repeatableSet, section, page |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Text,
    Textarea,
    Number,
    Email,
    Telephone,
    Date,
    Datetime,
    Time,
    Select,
    Autocomplete,
    Radio,
    Checkboxes,
    Boolean,
    Camera,
    Draw,
    File,
    Files,
    Html,
    Heading,
    Image,
    BarcodeScanner,
    Calculation,
    Captcha,
    Location,
    PointAddress,
    GeoscapeAddress,
    GoogleAddress,
    CivicaStreetName,
    CivicaNameRecord,
    Abn,
    Bsb,
    Compliance,
    Summary,
    InfoPage,
    Form,
    RepeatableSet,
    Section,
    Page,
    FreshdeskDependentField,
    #[serde(rename = "arcGISWebMap")]
    ArcGisWebMap,
    LookupButton,
}

impl ElementType {
    /// Every variant, in registry order.
    pub const ALL: &'static [ElementType] = &[
        Self::Text,
        Self::Textarea,
        Self::Number,
        Self::Email,
        Self::Telephone,
        Self::Date,
        Self::Datetime,
        Self::Time,
        Self::Select,
        Self::Autocomplete,
        Self::Radio,
        Self::Checkboxes,
        Self::Boolean,
        Self::Camera,
        Self::Draw,
        Self::File,
        Self::Files,
        Self::Html,
        Self::Heading,
        Self::Image,
        Self::BarcodeScanner,
        Self::Calculation,
        Self::Captcha,
        Self::Location,
        Self::PointAddress,
        Self::GeoscapeAddress,
        Self::GoogleAddress,
        Self::CivicaStreetName,
        Self::CivicaNameRecord,
        Self::Abn,
        Self::Bsb,
        Self::Compliance,
        Self::Summary,
        Self::InfoPage,
        Self::Form,
        Self::RepeatableSet,
        Self::Section,
        Self::Page,
        Self::FreshdeskDependentField,
        Self::ArcGisWebMap,
        Self::LookupButton,
    ];

    /// Returns the wire tag used in form documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Email => "email",
            Self::Telephone => "telephone",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Time => "time",
            Self::Select => "select",
            Self::Autocomplete => "autocomplete",
            Self::Radio => "radio",
            Self::Checkboxes => "checkboxes",
            Self::Boolean => "boolean",
            Self::Camera => "camera",
            Self::Draw => "draw",
            Self::File => "file",
            Self::Files => "files",
            Self::Html => "html",
            Self::Heading => "heading",
            Self::Image => "image",
            Self::BarcodeScanner => "barcodeScanner",
            Self::Calculation => "calculation",
            Self::Captcha => "captcha",
            Self::Location => "location",
            Self::PointAddress => "pointAddress",
            Self::GeoscapeAddress => "geoscapeAddress",
            Self::GoogleAddress => "googleAddress",
            Self::CivicaStreetName => "civicaStreetName",
            Self::CivicaNameRecord => "civicaNameRecord",
            Self::Abn => "abn",
            Self::Bsb => "bsb",
            Self::Compliance => "compliance",
            Self::Summary => "summary",
            Self::InfoPage => "infoPage",
            Self::Form => "form",
            Self::RepeatableSet => "repeatableSet",
            Self::Section => "section",
            Self::Page => "page",
            Self::FreshdeskDependentField => "freshdeskDependentField",
            Self::ArcGisWebMap => "arcGISWebMap",
            Self::LookupButton => "lookupButton",
        }
    }

    /// Whether this variant owns a nested `elements` sequence.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Section | Self::Page | Self::RepeatableSet)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = FormsError;

    /// Parse an element type from its wire tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| FormsError::UnknownElementType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Type Sets
// ---------------------------------------------------------------------------

/// A fixed set of element types a reference is allowed to point at.
///
/// `Display` renders the set the way reference errors quote it: a single
/// member as `a repeatableSet`, several as `one of number,calculation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSet(&'static [ElementType]);

impl TypeSet {
    /// Build a set from a static slice of types.
    pub const fn new(types: &'static [ElementType]) -> Self {
        Self(types)
    }

    /// Whether `element_type` is a member of the set.
    pub fn contains(&self, element_type: ElementType) -> bool {
        self.0.contains(&element_type)
    }

    /// Members in declaration order.
    pub fn types(&self) -> &'static [ElementType] {
        self.0
    }
}

impl std::fmt::Display for TypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            [single] => write!(f, "a {single}"),
            types => {
                let joined: Vec<&str> = types.iter().map(ElementType::as_str).collect();
                write!(f, "one of {}", joined.join(","))
            }
        }
    }
}

/// Any element type at all.
pub const ANY_TYPES: TypeSet = TypeSet::new(ElementType::ALL);

/// Elements holding a numeric value.
pub const NUMERIC_TYPES: TypeSet = TypeSet::new(&[ElementType::Number, ElementType::Calculation]);

/// Elements whose value is chosen from a list of options.
pub const OPTION_TYPES: TypeSet = TypeSet::new(&[
    ElementType::Select,
    ElementType::Autocomplete,
    ElementType::Radio,
    ElementType::Checkboxes,
    ElementType::Compliance,
]);

/// Elements holding a structured Australian address.
pub const ADDRESS_TYPES: TypeSet =
    TypeSet::new(&[ElementType::PointAddress, ElementType::GeoscapeAddress]);

pub const REPEATABLE_SET_TYPES: TypeSet = TypeSet::new(&[ElementType::RepeatableSet]);

pub const FORM_TYPES: TypeSet = TypeSet::new(&[ElementType::Form]);

pub const TEXT_TYPES: TypeSet = TypeSet::new(&[ElementType::Text]);

pub const EMAIL_TYPES: TypeSet = TypeSet::new(&[ElementType::Email]);

/// Elements whose submission value a content management integration may
/// encrypt.
pub const ENCRYPTABLE_TYPES: TypeSet = TypeSet::new(&[
    ElementType::Text,
    ElementType::Email,
    ElementType::Telephone,
    ElementType::BarcodeScanner,
    ElementType::Radio,
    ElementType::Autocomplete,
    ElementType::Camera,
    ElementType::Draw,
    ElementType::Files,
    ElementType::File,
    ElementType::Select,
]);
