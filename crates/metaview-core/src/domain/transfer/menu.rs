use serde::{Deserialize, Serialize};

use super::Link;

/// One menu of the application menu bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub named: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class_fa: Option<String>,
    #[serde(rename = "section", default)]
    pub sections: Vec<Section>,
    /// Collects service actions not referenced by any other menu.
    #[serde(default)]
    pub unreferenced_actions: bool,
}

impl Menu {
    pub fn service_actions(&self) -> impl Iterator<Item = &ServiceAction> {
        self.sections.iter().flat_map(|s| s.service_actions.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named: Option<String>,
    #[serde(rename = "serviceAction", default)]
    pub service_actions: Vec<ServiceAction>,
}

/// A menu item pointing at an action of a domain service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAction {
    pub object_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl ServiceAction {
    /// Label shown to the user, falling back to the action id.
    pub fn label(&self) -> &str {
        self.named.as_deref().unwrap_or(&self.id)
    }
}

/// A menu bar section: an ordered list of menus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    #[serde(rename = "menu")]
    pub menus: Vec<Menu>,
}
