//! Transfer objects: typed views of the hypermedia payloads the server sends.
//!
//! Every parsed response becomes exactly one [`TransferObject`] variant.
//! Downstream code (aggregators, metamodel, diagram builder) matches on the
//! variant; it never inspects JSON structure to guess what it received.
//!
//! # Adding a payload kind
//!
//! 1. Add the payload struct in a submodule here
//! 2. Add the [`PayloadKind`] and [`TransferObject`] variants
//! 3. Add a handler in `application::handlers` and register it
//! 4. Done; aggregators ignore kinds they do not consume

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod domain_type;
pub mod layout;
pub mod link;
pub mod menu;
pub mod result;
pub mod system;

pub use domain_type::{DomainType, DomainTypes, Member, MemberDescription, MemberKind};
pub use layout::{Col, FieldSet, Layout, LayoutMember, Row, Tab, TabGroup};
pub use link::Link;
pub use menu::{Menu, MenuEntry, Section, ServiceAction};
pub use result::{DomainObject, ObjectMember, ResultObject, ResultType, ResultValue, ScalarValue};
pub use system::{User, Version};

use crate::domain::error::DomainError;

// ── PayloadKind ──────────────────────────────────────────────────────────────

/// The representation kinds a handler exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    Menu,
    MenuEntry,
    Layout,
    DomainType,
    DomainTypes,
    MemberDescription,
    ResultObject,
    ResultValue,
    DomainObject,
    User,
    Version,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 11] = [
        Self::Menu,
        Self::MenuEntry,
        Self::Layout,
        Self::DomainType,
        Self::DomainTypes,
        Self::MemberDescription,
        Self::ResultObject,
        Self::ResultValue,
        Self::DomainObject,
        Self::User,
        Self::Version,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::MenuEntry => "menu-entry",
            Self::Layout => "layout",
            Self::DomainType => "domain-type",
            Self::DomainTypes => "domain-types",
            Self::MemberDescription => "member-description",
            Self::ResultObject => "result-object",
            Self::ResultValue => "result-value",
            Self::DomainObject => "domain-object",
            Self::User => "user",
            Self::Version => "version",
        }
    }

    /// Map a Restful Objects `repr-types/<profile>` name to a payload kind.
    ///
    /// `action-result` is deliberately unmapped: object and scalar results
    /// share the profile and are told apart by their `resulttype` tag.
    pub fn from_profile(profile: &str) -> Option<Self> {
        match profile {
            "object" => Some(Self::DomainObject),
            "domain-type" => Some(Self::DomainType),
            "type-list" => Some(Self::DomainTypes),
            "property-description" | "collection-description" | "action-description" => {
                Some(Self::MemberDescription)
            }
            "user" => Some(Self::User),
            "version" => Some(Self::Version),
            "layout-bs3" | "object-layout-bs3" | "object-layout" => Some(Self::Layout),
            "layout-menubars" | "menubars" => Some(Self::MenuEntry),
            "menu" => Some(Self::Menu),
            _ => None,
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .or_else(|| match normalized.as_str() {
                "menubars" => Some(Self::MenuEntry),
                "type" => Some(Self::DomainType),
                "object" => Some(Self::DomainObject),
                _ => None,
            })
            .ok_or(DomainError::UnrecognizedPayload)
    }
}

// ── TransferObject ───────────────────────────────────────────────────────────

/// A parsed hypermedia payload; one variant per resource kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TransferObject {
    Menu(Menu),
    MenuEntry(MenuEntry),
    Layout(Layout),
    DomainType(DomainType),
    DomainTypes(DomainTypes),
    MemberDescription(MemberDescription),
    ResultObject(ResultObject),
    ResultValue(ResultValue),
    DomainObject(DomainObject),
    User(User),
    Version(Version),
}

impl TransferObject {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Menu(_) => PayloadKind::Menu,
            Self::MenuEntry(_) => PayloadKind::MenuEntry,
            Self::Layout(_) => PayloadKind::Layout,
            Self::DomainType(_) => PayloadKind::DomainType,
            Self::DomainTypes(_) => PayloadKind::DomainTypes,
            Self::MemberDescription(_) => PayloadKind::MemberDescription,
            Self::ResultObject(_) => PayloadKind::ResultObject,
            Self::ResultValue(_) => PayloadKind::ResultValue,
            Self::DomainObject(_) => PayloadKind::DomainObject,
            Self::User(_) => PayloadKind::User,
            Self::Version(_) => PayloadKind::Version,
        }
    }

    /// Top-level links of the payload, if the representation carries any.
    pub fn links(&self) -> &[Link] {
        match self {
            Self::DomainType(t) => &t.links,
            Self::DomainTypes(t) => &t.links,
            Self::MemberDescription(d) => &d.links,
            Self::ResultObject(r) => &r.links,
            Self::ResultValue(r) => &r.links,
            Self::DomainObject(o) => &o.links,
            Self::User(u) => &u.links,
            Self::Version(v) => &v.links,
            Self::Menu(_) | Self::MenuEntry(_) | Self::Layout(_) => &[],
        }
    }
}
