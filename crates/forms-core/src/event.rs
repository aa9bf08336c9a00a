//! # Submission Events
//!
//! Post-submission actions configured on a form. Each event is tagged by
//! `type` and carries a kind-specific `configuration`, plus an optional
//! conditional execute specification of the same shape as an element's
//! conditional show specification.
//!
//! Unknown event kinds are tolerated: they pass through validation with no
//! configuration checks and read into [`EventAction::Other`].

use serde::{Deserialize, Serialize};

use crate::identity::ElementId;
use crate::predicate::Predicate;

/// Known submission event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Pdf,
    Email,
    CivicaCrm,
    CpPay,
    WestpacQuickWeb,
    Bpoint,
    Scheduling,
    CpHcms,
    FreshdeskCreateTicket,
    Callback,
    PowerAutomateFlow,
    Trim,
}

impl EventKind {
    pub const ALL: &'static [EventKind] = &[
        Self::Pdf,
        Self::Email,
        Self::CivicaCrm,
        Self::CpPay,
        Self::WestpacQuickWeb,
        Self::Bpoint,
        Self::Scheduling,
        Self::CpHcms,
        Self::FreshdeskCreateTicket,
        Self::Callback,
        Self::PowerAutomateFlow,
        Self::Trim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Email => "EMAIL",
            Self::CivicaCrm => "CIVICA_CRM",
            Self::CpPay => "CP_PAY",
            Self::WestpacQuickWeb => "WESTPAC_QUICK_WEB",
            Self::Bpoint => "BPOINT",
            Self::Scheduling => "SCHEDULING",
            Self::CpHcms => "CP_HCMS",
            Self::FreshdeskCreateTicket => "FRESHDESK_CREATE_TICKET",
            Self::Callback => "CALLBACK",
            Self::PowerAutomateFlow => "POWER_AUTOMATE_FLOW",
            Self::Trim => "TRIM",
        }
    }

    /// Parse a wire tag. Unknown kinds yield `None` and are passed through.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().find(|k| k.as_str() == tag).copied()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Typed Model
// ---------------------------------------------------------------------------

/// A submission event read from a normalized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEvent {
    #[serde(flatten)]
    pub action: EventAction,
    #[serde(default)]
    pub conditionally_execute: bool,
    #[serde(default)]
    pub requires_all_conditionally_execute_predicates: bool,
    #[serde(default)]
    pub conditionally_execute_predicates: Vec<Predicate>,
}

/// The kind-specific part of a submission event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventAction {
    #[serde(rename = "PDF")]
    Pdf { configuration: PdfConfiguration },
    #[serde(rename = "EMAIL")]
    Email { configuration: EmailConfiguration },
    #[serde(rename = "CIVICA_CRM")]
    CivicaCrm { configuration: CivicaCrmConfiguration },
    #[serde(rename = "CP_PAY")]
    CpPay { configuration: PaymentConfiguration },
    #[serde(rename = "WESTPAC_QUICK_WEB")]
    WestpacQuickWeb { configuration: PaymentConfiguration },
    #[serde(rename = "BPOINT")]
    Bpoint { configuration: PaymentConfiguration },
    #[serde(rename = "SCHEDULING")]
    Scheduling { configuration: SchedulingConfiguration },
    #[serde(rename = "CP_HCMS")]
    CpHcms { configuration: CpHcmsConfiguration },
    #[serde(rename = "FRESHDESK_CREATE_TICKET")]
    FreshdeskCreateTicket { configuration: FreshdeskConfiguration },
    #[serde(rename = "CALLBACK")]
    Callback,
    #[serde(rename = "POWER_AUTOMATE_FLOW")]
    PowerAutomateFlow,
    #[serde(rename = "TRIM")]
    Trim,
    /// An event kind this engine does not know.
    #[serde(other)]
    Other,
}

impl EventAction {
    /// The known kind, or `None` for [`EventAction::Other`].
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Pdf { .. } => Some(EventKind::Pdf),
            Self::Email { .. } => Some(EventKind::Email),
            Self::CivicaCrm { .. } => Some(EventKind::CivicaCrm),
            Self::CpPay { .. } => Some(EventKind::CpPay),
            Self::WestpacQuickWeb { .. } => Some(EventKind::WestpacQuickWeb),
            Self::Bpoint { .. } => Some(EventKind::Bpoint),
            Self::Scheduling { .. } => Some(EventKind::Scheduling),
            Self::CpHcms { .. } => Some(EventKind::CpHcms),
            Self::FreshdeskCreateTicket { .. } => Some(EventKind::FreshdeskCreateTicket),
            Self::Callback => Some(EventKind::Callback),
            Self::PowerAutomateFlow => Some(EventKind::PowerAutomateFlow),
            Self::Trim => Some(EventKind::Trim),
            Self::Other => None,
        }
    }
}

/// Configuration shared by the payment gateways; `elementId` names the
/// element holding the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfiguration {
    pub element_id: ElementId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingConfiguration {
    #[serde(default)]
    pub name_element_id: Option<ElementId>,
    #[serde(default)]
    pub email_element_id: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivicaCrmConfiguration {
    pub mapping: Vec<CivicaCrmMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivicaCrmMapping {
    pub form_element_id: ElementId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpHcmsConfiguration {
    #[serde(default)]
    pub encrypted_element_ids: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfConfiguration {
    #[serde(default)]
    pub email_template: Option<EmailTemplate>,
    #[serde(default)]
    pub excluded_element_ids: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfiguration {
    #[serde(default)]
    pub email_template: Option<EmailTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    #[serde(default)]
    pub mapping: Vec<TemplateMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshdeskConfiguration {
    pub mapping: Vec<TemplateMapping>,
}

/// One entry of an email template or ticket field mapping. Only entries
/// sourced from a form element reference other elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TemplateMapping {
    #[serde(rename = "FORM_ELEMENT")]
    FormElement(FormElementMapping),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElementMapping {
    pub form_element_id: ElementId,
}
