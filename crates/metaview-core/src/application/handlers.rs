//! Payload handlers: raw JSON in, typed [`TransferObject`] out.
//!
//! Every handler is pure. The registry picks a handler by [`PayloadKind`],
//! and falls back to trying each handler in turn when the kind is unknown.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::domain::{
    DomainError, DomainObject, DomainType, DomainTypes, Layout, Link, Member, MemberDescription,
    MemberKind, Menu, MenuEntry, PayloadKind, ResultObject, ResultType, ResultValue, TransferObject,
    User, Version,
};

/// Parses one payload kind.
pub trait Handler: Send + Sync {
    fn kind(&self) -> PayloadKind;

    /// # Errors
    ///
    /// [`DomainError::Parse`] for malformed JSON or a missing required field,
    /// plus kind-specific failures.
    fn parse(&self, raw: &str) -> Result<TransferObject, DomainError>;
}

fn from_json<T: DeserializeOwned>(kind: PayloadKind, raw: &str) -> Result<T, DomainError> {
    serde_json::from_str(raw).map_err(|e| DomainError::parse(kind, e))
}

macro_rules! plain_handler {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Handler for $name {
            fn kind(&self) -> PayloadKind {
                PayloadKind::$variant
            }

            fn parse(&self, raw: &str) -> Result<TransferObject, DomainError> {
                from_json::<$ty>(PayloadKind::$variant, raw).map(TransferObject::$variant)
            }
        }
    };
}

plain_handler!(
    /// A single menu with its sections.
    MenuHandler, Menu, Menu
);
plain_handler!(
    /// The menu bar list.
    MenuEntryHandler, MenuEntry, MenuEntry
);
plain_handler!(
    /// Bootstrap-grid object layout.
    LayoutHandler, Layout, Layout
);
plain_handler!(DomainTypesHandler, DomainTypes, DomainTypes);
plain_handler!(DomainObjectHandler, DomainObject, DomainObject);
plain_handler!(UserHandler, User, User);
plain_handler!(VersionHandler, Version, Version);

// ── Domain type ──────────────────────────────────────────────────────────────

/// Members arrive either as a list of links or as a map keyed by member id.
#[derive(Deserialize)]
#[serde(untagged)]
enum MembersWire {
    List(Vec<Link>),
    Map(BTreeMap<String, Link>),
}

impl Default for MembersWire {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainTypeWire {
    canonical_name: String,
    #[serde(default)]
    members: MembersWire,
    #[serde(default)]
    links: Vec<Link>,
}

/// Domain-type metadata. Each member link is classified here, so an
/// unclassifiable member fails the whole payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainTypeHandler;

impl Handler for DomainTypeHandler {
    fn kind(&self) -> PayloadKind {
        PayloadKind::DomainType
    }

    fn parse(&self, raw: &str) -> Result<TransferObject, DomainError> {
        let wire: DomainTypeWire = from_json(PayloadKind::DomainType, raw)?;
        if wire.canonical_name.trim().is_empty() {
            return Err(DomainError::InvalidCanonicalName {
                name: wire.canonical_name,
            });
        }

        let links = match wire.members {
            MembersWire::List(links) => links,
            MembersWire::Map(map) => map.into_values().collect(),
        };
        let members = links
            .iter()
            .map(Member::from_link)
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            canonical_name = %wire.canonical_name,
            members = members.len(),
            "Parsed domain type"
        );
        Ok(TransferObject::DomainType(DomainType {
            canonical_name: wire.canonical_name,
            members,
            links: wire.links,
        }))
    }
}

// ── Member description ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberDescriptionWire {
    id: String,
    member_type: String,
    #[serde(default)]
    friendly_name: Option<String>,
    #[serde(default)]
    links: Vec<Link>,
}

/// Property, collection and action descriptions.
///
/// The return type is the last href segment of the `return-type` link, or of
/// the `element-type` link for collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberDescriptionHandler;

impl Handler for MemberDescriptionHandler {
    fn kind(&self) -> PayloadKind {
        PayloadKind::MemberDescription
    }

    fn parse(&self, raw: &str) -> Result<TransferObject, DomainError> {
        let wire: MemberDescriptionWire = from_json(PayloadKind::MemberDescription, raw)?;
        let kind = MemberKind::classify(&wire.member_type).ok_or_else(|| {
            DomainError::TertiumNonDatur {
                member: wire.id.clone(),
                rel: wire.member_type.clone(),
            }
        })?;

        let return_type = ["return-type", "element-type"].iter().find_map(|rel| {
            wire.links
                .iter()
                .find(|l| l.relation() == *rel)
                .map(|l| l.last_segment().to_string())
        });

        Ok(TransferObject::MemberDescription(MemberDescription {
            id: wire.id,
            kind,
            return_type,
            friendly_name: wire.friendly_name,
            links: wire.links,
        }))
    }
}

// ── Action results ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ResultTypeProbe {
    resulttype: Option<String>,
}

fn expect_result_type(kind: PayloadKind, raw: &str, expected: ResultType) -> Result<(), DomainError> {
    let probe: ResultTypeProbe = from_json(kind, raw)?;
    let found = probe.resulttype.ok_or(DomainError::MissingRequiredField {
        field: "resulttype",
    })?;
    if ResultType::from_tag(&found) == Some(expected) {
        Ok(())
    } else {
        Err(DomainError::UnexpectedResultType {
            expected: expected.tag(),
            found,
        })
    }
}

/// Action result carrying a domain object (`resulttype: domainobject`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultObjectHandler;

impl Handler for ResultObjectHandler {
    fn kind(&self) -> PayloadKind {
        PayloadKind::ResultObject
    }

    fn parse(&self, raw: &str) -> Result<TransferObject, DomainError> {
        expect_result_type(self.kind(), raw, ResultType::DomainObject)?;
        from_json::<ResultObject>(self.kind(), raw).map(TransferObject::ResultObject)
    }
}

/// Action result carrying a scalar (`resulttype: scalarvalue`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultValueHandler;

impl Handler for ResultValueHandler {
    fn kind(&self) -> PayloadKind {
        PayloadKind::ResultValue
    }

    fn parse(&self, raw: &str) -> Result<TransferObject, DomainError> {
        expect_result_type(self.kind(), raw, ResultType::ScalarValue)?;
        from_json::<ResultValue>(self.kind(), raw).map(TransferObject::ResultValue)
    }
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// One handler per payload kind.
///
/// Registration order is also the order [`HandlerRegistry::parse_any`] tries
/// handlers in: the most selective shapes come first.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn Handler>>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: vec![
                Box::new(ResultObjectHandler),
                Box::new(ResultValueHandler),
                Box::new(DomainTypeHandler),
                Box::new(MemberDescriptionHandler),
                Box::new(DomainObjectHandler),
                Box::new(DomainTypesHandler),
                Box::new(MenuEntryHandler),
                Box::new(MenuHandler),
                Box::new(UserHandler),
                Box::new(VersionHandler),
                Box::new(LayoutHandler),
            ],
        }
    }

    pub fn handler(&self, kind: PayloadKind) -> Option<&dyn Handler> {
        self.handlers
            .iter()
            .find(|h| h.kind() == kind)
            .map(|h| h.as_ref())
    }

    pub fn kinds(&self) -> impl Iterator<Item = PayloadKind> + '_ {
        self.handlers.iter().map(|h| h.kind())
    }

    /// Parse with the handler registered for `kind`.
    pub fn parse(&self, kind: PayloadKind, raw: &str) -> Result<TransferObject, DomainError> {
        let handler = self
            .handler(kind)
            .ok_or(DomainError::UnrecognizedPayload)?;
        handler.parse(raw)
    }

    /// Try every handler in registration order; first success wins.
    pub fn parse_any(&self, raw: &str) -> Result<TransferObject, DomainError> {
        for handler in &self.handlers {
            match handler.parse(raw) {
                Ok(obj) => {
                    debug!(kind = %obj.kind(), "Payload recognized");
                    return Ok(obj);
                }
                Err(e) => trace!(kind = %handler.kind(), error = %e, "Handler declined"),
            }
        }
        Err(DomainError::UnrecognizedPayload)
    }

    /// Parse a response to `link`: explicit kind first, then the link
    /// profile, then [`HandlerRegistry::parse_any`].
    pub fn parse_for_link(
        &self,
        link: &Link,
        kind: Option<PayloadKind>,
        raw: &str,
    ) -> Result<TransferObject, DomainError> {
        match kind.or_else(|| link.payload_kind()) {
            Some(kind) => self.parse(kind, raw),
            None => self.parse_any(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN_TYPE: &str = r#"{
        "canonicalName": "domainapp.modules.simple.dom.impl.SimpleObject",
        "members": [
            {"rel": "urn:org.restfulobjects:rels/property", "href": "http://localhost:8080/restful/domain-types/simple.SimpleObject/properties/name"},
            {"rel": "urn:org.restfulobjects:rels/collection", "href": "http://localhost:8080/restful/domain-types/simple.SimpleObject/collections/notes"},
            {"rel": "urn:org.restfulobjects:rels/action", "href": "http://localhost:8080/restful/domain-types/simple.SimpleObject/actions/delete"}
        ],
        "links": []
    }"#;

    #[test]
    fn every_kind_has_one_handler() {
        let registry = HandlerRegistry::new();
        for kind in PayloadKind::ALL {
            assert_eq!(registry.kinds().filter(|k| *k == kind).count(), 1, "{kind}");
        }
    }

    #[test]
    fn domain_type_members_are_classified() {
        let obj = DomainTypeHandler.parse(DOMAIN_TYPE).unwrap();
        let TransferObject::DomainType(t) = obj else {
            panic!("expected domain type");
        };
        assert_eq!(t.properties().count(), 2);
        assert_eq!(t.actions().map(|m| m.name.as_str()).collect::<Vec<_>>(), vec!["delete"]);
    }

    #[test]
    fn members_may_be_keyed_by_id() {
        let raw = r#"{"canonicalName": "a.B", "members": {
            "name": {"rel": "urn:org.restfulobjects:rels/property", "href": "http://x/properties/name"}
        }}"#;
        let TransferObject::DomainType(t) = DomainTypeHandler.parse(raw).unwrap() else {
            panic!("expected domain type");
        };
        assert_eq!(t.members[0].name, "name");
    }

    #[test]
    fn unclassifiable_member_fails_the_payload() {
        let raw = r#"{"canonicalName": "a.B", "members": [
            {"rel": "urn:org.restfulobjects:rels/details", "href": "http://x/details/foo"}
        ]}"#;
        let err = DomainTypeHandler.parse(raw).unwrap_err();
        assert!(matches!(err, DomainError::TertiumNonDatur { ref member, .. } if member == "foo"));
    }

    #[test]
    fn blank_canonical_name_is_rejected() {
        let err = DomainTypeHandler.parse(r#"{"canonicalName": " "}"#).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCanonicalName { .. }));
    }

    #[test]
    fn member_description_reads_return_type_link() {
        let raw = r#"{
            "id": "name",
            "memberType": "property",
            "friendlyName": "Name",
            "links": [
                {"rel": "urn:org.restfulobjects:rels/return-type", "href": "http://x/domain-types/java.lang.String"}
            ]
        }"#;
        let TransferObject::MemberDescription(d) = MemberDescriptionHandler.parse(raw).unwrap() else {
            panic!("expected member description");
        };
        assert_eq!(d.kind, MemberKind::Property);
        assert_eq!(d.return_type.as_deref(), Some("java.lang.String"));
    }

    #[test]
    fn result_object_rejects_other_result_types() {
        let raw = r#"{"resulttype": "scalarvalue", "result": {"value": 1}, "links": []}"#;
        let err = ResultObjectHandler.parse(raw).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnexpectedResultType {
                expected: "domainobject",
                found: "scalarvalue".into()
            }
        );
    }

    #[test]
    fn missing_result_type_is_reported() {
        let err = ResultValueHandler.parse(r#"{"result": {"value": 1}}"#).unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "resulttype" });
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = HandlerRegistry::new().parse(PayloadKind::User, "{").unwrap_err();
        assert!(matches!(err, DomainError::Parse { kind: PayloadKind::User, .. }));
    }

    #[test]
    fn parse_any_recognizes_shapes() {
        let registry = HandlerRegistry::new();
        let user = registry.parse_any(r#"{"userName": "sven", "roles": []}"#).unwrap();
        assert_eq!(user.kind(), PayloadKind::User);

        let version = registry
            .parse_any(r#"{"specVersion": "1.0.0", "implVersion": "2.0.0"}"#)
            .unwrap();
        assert_eq!(version.kind(), PayloadKind::Version);

        assert_eq!(registry.parse_any(DOMAIN_TYPE).unwrap().kind(), PayloadKind::DomainType);
        assert_eq!(
            registry.parse_any(r#"{"unrelated": true}"#).unwrap_err(),
            DomainError::UnrecognizedPayload
        );
    }

    #[test]
    fn link_profile_selects_handler() {
        let registry = HandlerRegistry::new();
        let link = Link::new("urn:org.restfulobjects:rels/user", "http://x/restful/user")
            .with_profile("user");
        let obj = registry
            .parse_for_link(&link, None, r#"{"userName": "sven"}"#)
            .unwrap();
        assert_eq!(obj.kind(), PayloadKind::User);
    }
}
