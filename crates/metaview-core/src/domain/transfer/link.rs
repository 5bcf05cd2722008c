use serde::{Deserialize, Serialize};

use super::PayloadKind;

const PROFILE_MARKER: &str = "repr-types/";
const RELATION_MARKER: &str = "rels/";

/// A hypermedia link as it appears in every Restful Objects representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

fn default_method() -> String {
    "GET".into()
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            method: default_method(),
            media_type: None,
            title: None,
            arguments: None,
        }
    }

    pub fn with_profile(mut self, profile: &str) -> Self {
        self.media_type = Some(format!(
            "application/json;profile=\"urn:org.restfulobjects:{PROFILE_MARKER}{profile}\""
        ));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The representation type named by the media-type profile,
    /// e.g. `domain-type` for `...;profile="urn:org.restfulobjects:repr-types/domain-type"`.
    pub fn profile(&self) -> Option<&str> {
        let media_type = self.media_type.as_deref()?;
        let start = media_type.find(PROFILE_MARKER)? + PROFILE_MARKER.len();
        let rest = &media_type[start..];
        let end = rest.find(['"', ';']).unwrap_or(rest.len());
        Some(&rest[..end]).filter(|p| !p.is_empty())
    }

    /// Payload kind the target of this link is expected to parse into.
    pub fn payload_kind(&self) -> Option<PayloadKind> {
        self.profile().and_then(PayloadKind::from_profile)
    }

    /// The relation name without its URN namespace (`urn:org.restfulobjects:rels/property` → `property`).
    ///
    /// Relation parameters (`;method="..."`) are dropped.
    pub fn relation(&self) -> &str {
        let rel = self.rel.split(';').next().unwrap_or_default();
        match rel.rfind(RELATION_MARKER) {
            Some(idx) => &rel[idx + RELATION_MARKER.len()..],
            None => rel,
        }
    }

    /// Last non-empty path segment of the href.
    pub fn last_segment(&self) -> &str {
        self.href
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    pub fn is_self(&self) -> bool {
        self.relation() == "self"
    }
}
