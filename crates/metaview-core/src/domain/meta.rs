//! Derived metamodel: package, class, property and action views of a
//! [`DomainType`], used to build diagrams.
//!
//! A [`MetaClass`] is built once from a fully parsed domain type and never
//! changes afterwards. Members are already classified (see
//! [`MemberKind`](crate::domain::MemberKind)), so construction only
//! partitions them and cannot fail.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::transfer::{DomainType, Member, MemberKind};

/// Package of a class: the canonical name minus its trailing `.<SimpleName>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaPackage {
    pub name: String,
    pub classes: BTreeSet<String>,
}

impl MetaPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: BTreeSet::new(),
        }
    }

    /// `a.b.C` → `a.b`; an undotted name lives in the default (empty) package.
    pub fn from_canonical_name(canonical_name: &str) -> Self {
        let name = canonical_name
            .rsplit_once('.')
            .map(|(pkg, _)| pkg)
            .unwrap_or_default();
        Self::new(name)
    }

    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    pub fn add_class(&mut self, class_name: impl Into<String>) {
        self.classes.insert(class_name.into());
    }
}

impl fmt::Display for MetaPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A property of a [`MetaClass`]. Equality and order are by name only.
#[derive(Debug, Clone, Serialize)]
pub struct MetaProperty {
    pub name: String,
    /// Simple name of the property type, when known.
    pub type_name: Option<String>,
}

impl MetaProperty {
    pub fn new(name: impl Into<String>, type_name: Option<&str>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.map(simple_type_name),
        }
    }
}

impl From<&Member> for MetaProperty {
    fn from(member: &Member) -> Self {
        Self::new(&member.name, member.return_type.as_deref())
    }
}

/// An action of a [`MetaClass`]. Equality and order are by name only.
#[derive(Debug, Clone, Serialize)]
pub struct MetaAction {
    pub name: String,
}

impl MetaAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&Member> for MetaAction {
    fn from(member: &Member) -> Self {
        Self::new(&member.name)
    }
}

macro_rules! order_by_name {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.name.cmp(&other.name)
            }
        }
    };
}

order_by_name!(MetaProperty);
order_by_name!(MetaAction);

/// Class view of a domain type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaClass {
    pub name: String,
    pub pkg: MetaPackage,
    pub properties: BTreeSet<MetaProperty>,
    pub actions: BTreeSet<MetaAction>,
}

impl MetaClass {
    /// Partition the members of `domain_type` into properties and actions.
    ///
    /// Members sharing a name collapse into one entry; the first occurrence wins.
    pub fn new(domain_type: &DomainType) -> Self {
        let name = domain_type.simple_name().to_string();
        let mut pkg = MetaPackage::from_canonical_name(&domain_type.canonical_name);
        pkg.add_class(name.clone());

        let mut properties = BTreeSet::new();
        let mut actions = BTreeSet::new();
        for member in &domain_type.members {
            match member.kind {
                MemberKind::Property => {
                    properties.insert(MetaProperty::from(member));
                }
                MemberKind::Action => {
                    actions.insert(MetaAction::from(member));
                }
            }
        }

        tracing::trace!(
            class = %name,
            package = %pkg,
            properties = properties.len(),
            actions = actions.len(),
            "MetaClass built"
        );

        Self {
            name,
            pkg,
            properties,
            actions,
        }
    }

    pub fn qualified_name(&self) -> String {
        if self.pkg.is_default() {
            self.name.clone()
        } else {
            format!("{}.{}", self.pkg.name, self.name)
        }
    }

    pub fn property(&self, name: &str) -> Option<&MetaProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn member_count(&self) -> usize {
        self.properties.len() + self.actions.len()
    }
}

impl From<&DomainType> for MetaClass {
    fn from(domain_type: &DomainType) -> Self {
        Self::new(domain_type)
    }
}

/// `java.lang.String` → `String`; generic arguments are kept as given.
fn simple_type_name(canonical: &str) -> String {
    let base = canonical.split('<').next().unwrap_or(canonical);
    let simple = base.rsplit('.').next().unwrap_or(base);
    format!("{simple}{}", &canonical[base.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_object() -> DomainType {
        DomainType::new("domainapp.modules.simple.dom.impl.SimpleObject")
            .with_member(Member::property("name").with_return_type("java.lang.String"))
            .with_member(Member::property("notes"))
            .with_member(Member::action("updateName"))
            .with_member(Member::action("delete"))
    }

    #[test]
    fn package_and_class_name_from_canonical_name() {
        let class = MetaClass::new(&DomainType::new("a.b.C"));
        assert_eq!(class.name, "C");
        assert_eq!(class.pkg.name, "a.b");
        assert!(class.pkg.classes.contains("C"));
        assert_eq!(class.qualified_name(), "a.b.C");
    }

    #[test]
    fn undotted_name_lives_in_default_package() {
        let class = MetaClass::new(&DomainType::new("Root"));
        assert!(class.pkg.is_default());
        assert_eq!(class.qualified_name(), "Root");
    }

    #[test]
    fn members_are_partitioned_without_loss() {
        let domain_type = simple_object();
        let class = MetaClass::new(&domain_type);

        assert_eq!(class.properties.len(), 2);
        assert_eq!(class.actions.len(), 2);
        assert_eq!(class.member_count(), domain_type.members.len());
        assert!(class.actions.iter().all(|a| domain_type
            .actions()
            .any(|m| m.name == a.name)));
    }

    #[test]
    fn repeated_names_collapse() {
        let domain_type = simple_object()
            .with_member(Member::property("name").with_return_type("java.lang.Integer"))
            .with_member(Member::action("delete"));
        let class = MetaClass::new(&domain_type);

        assert_eq!(domain_type.members.len(), 6);
        assert_eq!(class.member_count(), 4);
        // first occurrence wins
        assert_eq!(
            class.property("name").and_then(|p| p.type_name.as_deref()),
            Some("String")
        );
    }

    #[test]
    fn type_names_are_simplified() {
        assert_eq!(simple_type_name("java.lang.String"), "String");
        assert_eq!(simple_type_name("int"), "int");
        assert_eq!(simple_type_name("java.util.List<a.B>"), "List<a.B>");
    }
}
