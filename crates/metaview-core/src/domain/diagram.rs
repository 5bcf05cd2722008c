//! PlantUML class-diagram text for a [`MetaClass`].
//!
//! The builder produces plain multi-line text. The compact quoted form with
//! `\n` escapes that some render transports expect is produced only by
//! [`DiagramText::to_transport_literal`].

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::meta::MetaClass;
use crate::domain::transfer::{DomainType, Layout};

pub const START: &str = "@startuml";
pub const END: &str = "@enduml";

/// Diagram source text. Not cached; produced once per render request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagramText(String);

impl DiagramText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    /// Single-line literal: wrapped in `"`, newlines as `\n`, quotes and
    /// backslashes escaped.
    pub fn to_transport_literal(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 16);
        out.push('"');
        for c in self.0.chars() {
            match c {
                '\n' => out.push_str("\\n"),
                '\r' => {}
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                other => out.push(other),
            }
        }
        out.push('"');
        out
    }
}

impl fmt::Display for DiagramText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a metaclass (and optionally its layout) into diagram text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramBuilder;

impl DiagramBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the class diagram.
    ///
    /// Line order is fixed: header, package line, class header, property
    /// lines, action lines, closing brace, footer. Members follow the layout
    /// order when a layout is given; the rest follow by name.
    ///
    /// A class without a package (undotted canonical name) is emitted at the
    /// top level, with no package line and no closing brace.
    pub fn build(&self, class: &MetaClass, layout: Option<&Layout>) -> DiagramText {
        let (property_order, action_order) = layout
            .map(|l| (l.property_order(), l.action_order()))
            .unwrap_or_default();

        let properties = ordered(
            class.properties.iter().map(|p| (p.name.as_str(), p)),
            &property_order,
        );
        let actions = ordered(
            class.actions.iter().map(|a| (a.name.as_str(), a)),
            &action_order,
        );

        let mut lines = Vec::with_capacity(properties.len() + actions.len() + 6);
        lines.push(START.to_string());
        let packaged = !class.pkg.is_default();
        if packaged {
            lines.push(format!("package {} {{", class.pkg.name));
        }
        lines.push(format!("class {}", class.name));
        for property in properties {
            lines.push(match &property.type_name {
                Some(type_name) => format!("{} : {} {}", class.name, property.name, type_name),
                None => format!("{} : {}", class.name, property.name),
            });
        }
        for action in actions {
            lines.push(format!("{} : {}()", class.name, action.name));
        }
        if packaged {
            lines.push("}".to_string());
        }
        lines.push(END.to_string());

        DiagramText(lines.join("\n"))
    }

    pub fn build_for_type(&self, domain_type: &DomainType, layout: Option<&Layout>) -> DiagramText {
        self.build(&MetaClass::new(domain_type), layout)
    }
}

/// Items named in `preferred` first, in that order; the rest in their natural order.
fn ordered<'a, T>(items: impl Iterator<Item = (&'a str, &'a T)>, preferred: &[&str]) -> Vec<&'a T> {
    let items: Vec<(&str, &T)> = items.collect();
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(items.len());

    for id in preferred {
        if let Some((name, item)) = items.iter().find(|(name, _)| name == id) {
            if seen.insert(*name) {
                out.push(*item);
            }
        }
    }
    out.extend(
        items
            .iter()
            .filter(|(name, _)| !seen.contains(name))
            .map(|(_, item)| *item),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transfer::{Col, FieldSet, LayoutMember, Member, Row};

    fn simple_object() -> MetaClass {
        MetaClass::new(
            &DomainType::new("domainapp.modules.simple.dom.impl.SimpleObject")
                .with_member(Member::property("name").with_return_type("java.lang.String"))
                .with_member(Member::action("rebuildMetamodel")),
        )
    }

    fn layout_with(properties: &[&str]) -> Layout {
        Layout {
            css_class: None,
            rows: vec![Row {
                css_class: None,
                cols: vec![Col {
                    span: 12,
                    field_sets: vec![FieldSet {
                        properties: properties.iter().map(|p| LayoutMember::new(*p)).collect(),
                        ..FieldSet::default()
                    }],
                    ..Col::default()
                }],
            }],
        }
    }

    #[test]
    fn builds_simple_object_diagram() {
        let text = DiagramBuilder::new().build(&simple_object(), None);
        let expected = "@startuml\n\
                        package domainapp.modules.simple.dom.impl {\n\
                        class SimpleObject\n\
                        SimpleObject : name String\n\
                        SimpleObject : rebuildMetamodel()\n\
                        }\n\
                        @enduml";
        assert_eq!(text.as_str(), expected);
    }

    #[test]
    fn transport_literal_is_quoted_single_line() {
        let literal = DiagramBuilder::new()
            .build(&simple_object(), None)
            .to_transport_literal();

        assert!(literal.starts_with("\"@startuml"));
        assert!(literal.ends_with("@enduml\""));
        assert!(literal.contains("package domainapp.modules.simple.dom.impl {\\n"));
        assert!(literal.contains("class SimpleObject\\n"));
        assert!(!literal.contains('\n'));
    }

    #[test]
    fn escapes_embedded_quotes() {
        assert_eq!(DiagramText::new("a \"b\"\\").to_transport_literal(), r#""a \"b\"\\""#);
    }

    #[test]
    fn layout_order_precedes_name_order() {
        let class = MetaClass::new(
            &DomainType::new("a.B")
                .with_member(Member::property("alpha"))
                .with_member(Member::property("beta"))
                .with_member(Member::property("gamma")),
        );
        let text = DiagramBuilder::new().build(&class, Some(&layout_with(&["gamma", "missing"])));
        let members: Vec<&str> = text.lines().filter(|l| l.starts_with("B : ")).collect();
        assert_eq!(members, vec!["B : gamma", "B : alpha", "B : beta"]);
    }

    #[test]
    fn undotted_name_has_no_package_block() {
        let class = MetaClass::new(&DomainType::new("Root").with_member(Member::property("id")));
        let text = DiagramBuilder::new().build(&class, None);
        assert_eq!(text.as_str(), "@startuml\nclass Root\nRoot : id\n@enduml");
    }

    #[test]
    fn properties_precede_actions() {
        let text = DiagramBuilder::new().build(&simple_object(), None);
        let lines: Vec<&str> = text.lines().collect();
        let position = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();

        assert!(position("package") < position("class SimpleObject"));
        assert!(position("class SimpleObject") < position(": name"));
        assert!(position(": name") < position("rebuildMetamodel()"));
        assert!(position("rebuildMetamodel()") < position("}"));
    }
}
