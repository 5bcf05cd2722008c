use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Link;

/// The currently authenticated user, as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Server version and optional capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub spec_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impl_version: Option<String>,
    #[serde(default)]
    pub optional_capabilities: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Version {
    pub fn supports(&self, capability: &str) -> bool {
        matches!(
            self.optional_capabilities.get(capability).and_then(|v| v.as_str()),
            Some("yes")
        )
    }
}
