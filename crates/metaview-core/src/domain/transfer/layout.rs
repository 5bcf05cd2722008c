//! Bootstrap-grid object layout.
//!
//! The server nests columns as `{"cols": [{"col": {...}}]}`; the wrapper is
//! unwrapped on deserialization so [`Row::cols`] holds plain [`Col`]s, and
//! put back on serialization so a serialized layout parses again.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    #[serde(rename = "row")]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    #[serde(default)]
    pub cols: Vec<Col>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColCell", into = "ColCell")]
pub struct Col {
    pub span: u8,
    pub css_class: Option<String>,
    pub field_sets: Vec<FieldSet>,
    pub tab_groups: Vec<TabGroup>,
    pub actions: Vec<LayoutMember>,
}

#[derive(Serialize, Deserialize)]
struct ColCell {
    col: ColBody,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColBody {
    #[serde(default)]
    span: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    css_class: Option<String>,
    #[serde(rename = "fieldSet", default)]
    field_sets: Vec<FieldSet>,
    #[serde(rename = "tabGroup", default)]
    tab_groups: Vec<TabGroup>,
    #[serde(rename = "action", default)]
    actions: Vec<LayoutMember>,
}

impl From<ColCell> for Col {
    fn from(cell: ColCell) -> Self {
        let body = cell.col;
        Self {
            span: body.span,
            css_class: body.css_class,
            field_sets: body.field_sets,
            tab_groups: body.tab_groups,
            actions: body.actions,
        }
    }
}

impl From<Col> for ColCell {
    fn from(col: Col) -> Self {
        Self {
            col: ColBody {
                span: col.span,
                css_class: col.css_class,
                field_sets: col.field_sets,
                tab_groups: col.tab_groups,
                actions: col.actions,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabGroup {
    #[serde(rename = "tab", default)]
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "row", default)]
    pub rows: Vec<Row>,
}

/// A group of properties (and their associated actions) shown together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "property", default)]
    pub properties: Vec<LayoutMember>,
    #[serde(rename = "action", default)]
    pub actions: Vec<LayoutMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMember {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named: Option<String>,
}

impl LayoutMember {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            named: None,
        }
    }
}

impl Layout {
    /// Property ids in the order the layout presents them, depth first.
    pub fn property_order(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for row in &self.rows {
            collect_row(row, &mut ids, &mut Vec::new());
        }
        ids
    }

    /// Action ids in layout order: column actions, then field-set actions.
    pub fn action_order(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for row in &self.rows {
            collect_row(row, &mut Vec::new(), &mut ids);
        }
        ids
    }

    pub fn field_sets(&self) -> Vec<&FieldSet> {
        let mut sets = Vec::new();
        for row in &self.rows {
            collect_field_sets(row, &mut sets);
        }
        sets
    }
}

fn collect_row<'a>(row: &'a Row, properties: &mut Vec<&'a str>, actions: &mut Vec<&'a str>) {
    for col in &row.cols {
        actions.extend(col.actions.iter().map(|a| a.id.as_str()));
        for set in &col.field_sets {
            properties.extend(set.properties.iter().map(|p| p.id.as_str()));
            actions.extend(set.actions.iter().map(|a| a.id.as_str()));
        }
        for tab in col.tab_groups.iter().flat_map(|g| g.tabs.iter()) {
            for nested in &tab.rows {
                collect_row(nested, properties, actions);
            }
        }
    }
}

fn collect_field_sets<'a>(row: &'a Row, sets: &mut Vec<&'a FieldSet>) {
    for col in &row.cols {
        sets.extend(col.field_sets.iter());
        for tab in col.tab_groups.iter().flat_map(|g| g.tabs.iter()) {
            for nested in &tab.rows {
                collect_field_sets(nested, sets);
            }
        }
    }
}
