//! Display models: in-progress, then render-ready, views of a domain concept.
//!
//! A display model receives [`TransferObject`]s in any order through
//! [`DisplayModel::add_data`]. Each slot follows last-write-wins; variants a
//! model does not consume are ignored. Once rendered, a model never becomes
//! displayable again.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::domain::meta::MetaClass;
use crate::domain::transfer::{
    DomainObject, DomainType, DomainTypes, Layout, Link, MemberDescription, TransferObject, User,
    Version,
};

/// Something the UI can show once enough data has arrived.
pub trait DisplayModel: Send {
    fn title(&self) -> &str;

    fn layout(&self) -> Option<&Layout>;

    /// Merge one arrival into the model.
    fn add_data(&mut self, obj: TransferObject);

    /// Record that a resource this model was waiting for could not be resolved.
    fn add_failure(&mut self, _href: &str, _reason: &str) {}

    /// Whether every required slot is filled, regardless of render state.
    fn is_complete(&self) -> bool;

    fn is_rendered(&self) -> bool;

    fn set_rendered(&mut self);

    fn can_be_displayed(&self) -> bool {
        self.is_complete() && !self.is_rendered()
    }
}

fn ignore(model: &str, obj: &TransferObject) {
    trace!(model, kind = %obj.kind(), "Ignoring unconsumed payload");
}

// ── SystemDm ─────────────────────────────────────────────────────────────────

/// System overview: user, server version and known domain types.
#[derive(Debug, Clone, Default)]
pub struct SystemDm {
    pub user: Option<User>,
    pub version: Option<Version>,
    pub domain_types: Option<DomainTypes>,
    layout: Option<Layout>,
    rendered: bool,
}

impl SystemDm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain_type_links(&self) -> &[Link] {
        self.domain_types
            .as_ref()
            .map(|t| t.values.as_slice())
            .unwrap_or_default()
    }
}

impl DisplayModel for SystemDm {
    fn title(&self) -> &str {
        "System"
    }

    fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    fn add_data(&mut self, obj: TransferObject) {
        match obj {
            TransferObject::User(user) => self.user = Some(user),
            TransferObject::Version(version) => self.version = Some(version),
            TransferObject::DomainTypes(types) => self.domain_types = Some(types),
            TransferObject::Layout(layout) => self.layout = Some(layout),
            other => ignore("system", &other),
        }
    }

    fn is_complete(&self) -> bool {
        self.layout.is_some()
    }

    fn is_rendered(&self) -> bool {
        self.rendered
    }

    fn set_rendered(&mut self) {
        self.rendered = true;
    }
}

// ── ObjectDm ─────────────────────────────────────────────────────────────────

/// A single domain object together with its layout.
#[derive(Debug, Clone, Default)]
pub struct ObjectDm {
    object: Option<DomainObject>,
    layout: Option<Layout>,
    rendered: bool,
}

impl ObjectDm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self) -> Option<&DomainObject> {
        self.object.as_ref()
    }
}

impl DisplayModel for ObjectDm {
    fn title(&self) -> &str {
        self.object.as_ref().map_or("Object", |o| o.title.as_str())
    }

    fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    fn add_data(&mut self, obj: TransferObject) {
        match obj {
            TransferObject::DomainObject(object) => self.object = Some(object),
            TransferObject::ResultObject(result) => self.object = Some(result.result),
            TransferObject::Layout(layout) => self.layout = Some(layout),
            other => ignore("object", &other),
        }
    }

    fn is_complete(&self) -> bool {
        self.object.is_some() && self.layout.is_some()
    }

    fn is_rendered(&self) -> bool {
        self.rendered
    }

    fn set_rendered(&mut self) {
        self.rendered = true;
    }
}

// ── DiagramDm ────────────────────────────────────────────────────────────────

/// A domain type on its way to becoming a class diagram.
///
/// Member descriptions fill in property return types. With
/// `await_member_types` set (the default) the model is complete only once
/// every property has a type, a description without one, or a failed lookup.
#[derive(Debug, Clone)]
pub struct DiagramDm {
    domain_type: Option<DomainType>,
    layout: Option<Layout>,
    descriptions: BTreeMap<String, MemberDescription>,
    resolved: BTreeSet<String>,
    await_member_types: bool,
    rendered: bool,
}

impl Default for DiagramDm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramDm {
    pub fn new() -> Self {
        Self {
            domain_type: None,
            layout: None,
            descriptions: BTreeMap::new(),
            resolved: BTreeSet::new(),
            await_member_types: true,
            rendered: false,
        }
    }

    /// Complete as soon as the domain type arrives.
    pub fn without_member_types() -> Self {
        Self {
            await_member_types: false,
            ..Self::new()
        }
    }

    pub fn domain_type(&self) -> Option<&DomainType> {
        self.domain_type.as_ref()
    }

    pub fn meta_class(&self) -> Option<MetaClass> {
        self.domain_type.as_ref().map(MetaClass::new)
    }

    /// Property members still waiting for a description.
    pub fn pending_members(&self) -> Vec<&str> {
        self.domain_type
            .iter()
            .flat_map(|t| t.properties())
            .filter(|m| m.return_type.is_none() && !self.resolved.contains(&m.name))
            .map(|m| m.name.as_str())
            .collect()
    }

    fn apply_descriptions(&mut self) {
        let Some(domain_type) = self.domain_type.as_mut() else {
            return;
        };
        for (id, description) in &self.descriptions {
            if let Some(member) = domain_type.member_mut(id) {
                if let Some(return_type) = &description.return_type {
                    member.return_type = Some(return_type.clone());
                }
            }
        }
    }
}

impl DisplayModel for DiagramDm {
    fn title(&self) -> &str {
        self.domain_type
            .as_ref()
            .map_or("Diagram", |t| t.canonical_name.as_str())
    }

    fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    fn add_data(&mut self, obj: TransferObject) {
        match obj {
            TransferObject::DomainType(domain_type) => {
                self.domain_type = Some(domain_type);
                self.apply_descriptions();
            }
            TransferObject::MemberDescription(description) => {
                self.resolved.insert(description.id.clone());
                self.descriptions.insert(description.id.clone(), description);
                self.apply_descriptions();
            }
            TransferObject::Layout(layout) => self.layout = Some(layout),
            other => ignore("diagram", &other),
        }
    }

    fn add_failure(&mut self, href: &str, reason: &str) {
        let member = Link::new("", href).last_segment().to_string();
        trace!(%member, reason, "Member description unavailable");
        self.resolved.insert(member);
    }

    fn is_complete(&self) -> bool {
        self.domain_type.is_some() && (!self.await_member_types || self.pending_members().is_empty())
    }

    fn is_rendered(&self) -> bool {
        self.rendered
    }

    fn set_rendered(&mut self) {
        self.rendered = true;
    }
}
