use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Link, MemberKind};

/// The `resulttype` tag of an action-result representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    DomainObject,
    List,
    ScalarValue,
    Void,
}

impl ResultType {
    /// Wire tag, as sent by the server.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::DomainObject => "domainobject",
            Self::List => "list",
            Self::ScalarValue => "scalarvalue",
            Self::Void => "void",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "domainobject" => Some(Self::DomainObject),
            "list" => Some(Self::List),
            "scalarvalue" => Some(Self::ScalarValue),
            "void" => Some(Self::Void),
            _ => None,
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag().to_ascii_uppercase())
    }
}

/// An action result whose payload is a domain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultObject {
    #[serde(rename = "resulttype")]
    pub result_type: ResultType,
    #[serde(default)]
    pub links: Vec<Link>,
    pub result: DomainObject,
}

/// An action result whose payload is a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultValue {
    #[serde(rename = "resulttype")]
    pub result_type: ResultType,
    #[serde(default)]
    pub links: Vec<Link>,
    pub result: ScalarValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarValue {
    #[serde(default)]
    pub links: Vec<Link>,
    pub value: serde_json::Value,
}

impl ScalarValue {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Representation of a single domain object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainObject {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub members: BTreeMap<String, ObjectMember>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl DomainObject {
    pub fn self_link(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.is_self())
    }

    /// Link to the object's layout, if the server advertises one.
    pub fn layout_link(&self) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.relation() == "object-layout" || l.relation() == "layout")
    }

    /// Link to the object's domain-type description.
    pub fn described_by(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.relation() == "describedby")
    }

    pub fn property_value(&self, id: &str) -> Option<&serde_json::Value> {
        self.members
            .get(id)
            .filter(|m| m.kind() == Some(MemberKind::Property))
            .and_then(|m| m.value.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMember {
    pub id: String,
    pub member_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl ObjectMember {
    pub fn kind(&self) -> Option<MemberKind> {
        MemberKind::classify(&self.member_type)
    }
}
