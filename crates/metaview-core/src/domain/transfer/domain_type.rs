use serde::{Deserialize, Serialize};
use std::fmt;

use super::Link;
use crate::domain::error::DomainError;

/// Capability classification of a domain-type member.
///
/// Closed on purpose: a member is a property or an action, nothing else.
/// Collections are multi-valued properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Property,
    Action,
}

impl MemberKind {
    /// Classify a member by its link relation or `memberType` tag.
    ///
    /// Accepts either a full relation URN (`urn:org.restfulobjects:rels/property`)
    /// or the bare name.
    pub fn classify(relation: &str) -> Option<Self> {
        let name = relation
            .split(';')
            .next()
            .unwrap_or_default()
            .rsplit('/')
            .next()
            .unwrap_or_default();
        match name {
            "property" | "property-description" | "collection" | "collection-description" => {
                Some(Self::Property)
            }
            "action" | "action-description" => Some(Self::Action),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of a [`DomainType`], classified at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// Canonical name of the member's return type, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Member {
    pub fn property(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Property)
    }

    pub fn action(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Action)
    }

    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            return_type: None,
            href: None,
        }
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Build a member from a domain-type `members` link.
    ///
    /// # Errors
    ///
    /// [`DomainError::TertiumNonDatur`] when the relation is neither a
    /// property nor an action relation.
    pub fn from_link(link: &Link) -> Result<Self, DomainError> {
        let name = link.last_segment().to_string();
        let kind = MemberKind::classify(&link.rel).ok_or_else(|| DomainError::TertiumNonDatur {
            member: name.clone(),
            rel: link.rel.clone(),
        })?;
        Ok(Self {
            name,
            kind,
            return_type: None,
            href: Some(link.href.clone()),
        })
    }

    pub fn is_property(&self) -> bool {
        self.kind == MemberKind::Property
    }

    pub fn is_action(&self) -> bool {
        self.kind == MemberKind::Action
    }
}

/// Domain-type metadata: the canonical class name and its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainType {
    pub canonical_name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl DomainType {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            members: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Last dotted segment of the canonical name.
    pub fn simple_name(&self) -> &str {
        self.canonical_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.canonical_name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_property())
    }

    pub fn actions(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_action())
    }

    pub fn member_mut(&mut self, name: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.name == name)
    }
}

/// The list of domain types the server knows about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainTypes {
    pub values: Vec<Link>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl DomainTypes {
    /// Canonical names, taken from the last href segment of each value link.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(Link::last_segment)
    }
}

/// A property, collection or action description resolved from a member link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDescription {
    pub id: String,
    pub kind: MemberKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_accepts_urns_and_bare_names() {
        assert_eq!(
            MemberKind::classify("urn:org.restfulobjects:rels/property"),
            Some(MemberKind::Property)
        );
        assert_eq!(MemberKind::classify("collection"), Some(MemberKind::Property));
        assert_eq!(
            MemberKind::classify("urn:org.restfulobjects:rels/action-description"),
            Some(MemberKind::Action)
        );
        assert_eq!(MemberKind::classify("urn:org.restfulobjects:rels/describedby"), None);
    }

    #[test]
    fn member_from_link_takes_name_from_href() {
        let link = Link::new(
            "urn:org.restfulobjects:rels/action",
            "http://localhost/restful/domain-types/simple.SimpleObject/actions/delete",
        );
        let member = Member::from_link(&link).unwrap();
        assert_eq!(member.name, "delete");
        assert!(member.is_action());
    }

    #[test]
    fn unclassifiable_member_is_rejected() {
        let link = Link::new("urn:org.restfulobjects:rels/up", "http://x/domain-types/a.B/up");
        let err = Member::from_link(&link).unwrap_err();
        assert!(matches!(err, DomainError::TertiumNonDatur { .. }));
        assert!(err.to_string().contains("tertium non datur"));
    }

    #[test]
    fn simple_name_is_last_segment() {
        assert_eq!(DomainType::new("a.b.C").simple_name(), "C");
        assert_eq!(DomainType::new("Plain").simple_name(), "Plain");
    }
}
