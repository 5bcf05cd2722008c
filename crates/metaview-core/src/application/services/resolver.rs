//! Link resolution: fetch, parse and post to an aggregator.
//!
//! Every request runs in its own task. Completions are posted to an
//! [`AggregatorHandle`]; failures are posted too, so waiting models can give
//! up on a resource instead of stalling.

use std::sync::Arc;

use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, instrument, warn};

use crate::application::HandlerRegistry;
use crate::application::ports::ResourceFetcher;
use crate::application::services::aggregator::AggregatorHandle;
use crate::domain::{Layout, Link, PayloadKind, TransferObject};
use crate::error::MetaviewResult;

const REL_USER: &str = "urn:org.restfulobjects:rels/user";
const REL_VERSION: &str = "urn:org.restfulobjects:rels/version";
const REL_DOMAIN_TYPES: &str = "urn:org.restfulobjects:rels/domain-types";
const REL_LAYOUT: &str = "urn:org.apache.isis.restfulobjects:rels/layout";
const REL_DOMAIN_TYPE: &str = "urn:org.restfulobjects:rels/domain-type";

/// Fetches links and parses the responses with the handler registry.
#[derive(Clone)]
pub struct LinkResolver {
    fetcher: Arc<dyn ResourceFetcher>,
    registry: Arc<HandlerRegistry>,
}

impl LinkResolver {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, registry: Arc<HandlerRegistry>) -> Self {
        Self { fetcher, registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Fetch `link` and parse the body, without involving an aggregator.
    #[instrument(skip_all, fields(href = %link.href))]
    pub async fn fetch_and_parse(
        &self,
        link: &Link,
        kind: Option<PayloadKind>,
    ) -> MetaviewResult<TransferObject> {
        let raw = self.fetcher.fetch(link).await?;
        let obj = self.registry.parse_for_link(link, kind, &raw)?;
        debug!(kind = %obj.kind(), bytes = raw.len(), "Resolved");
        Ok(obj)
    }

    /// Spawn one request; its outcome is posted to `handle`.
    pub fn resolve(
        &self,
        link: Link,
        kind: Option<PayloadKind>,
        handle: AggregatorHandle,
    ) -> JoinHandle<()> {
        let resolver = self.clone();
        tokio::spawn(async move {
            resolver.resolve_now(&link, kind, &handle).await;
        })
    }

    /// Spawn one request per link.
    pub fn resolve_all(
        &self,
        links: impl IntoIterator<Item = Link>,
        kind: Option<PayloadKind>,
        handle: &AggregatorHandle,
    ) -> Vec<JoinHandle<()>> {
        links
            .into_iter()
            .map(|link| self.resolve(link, kind, handle.clone()))
            .collect()
    }

    async fn resolve_now(
        &self,
        link: &Link,
        kind: Option<PayloadKind>,
        handle: &AggregatorHandle,
    ) -> Option<TransferObject> {
        match self.fetch_and_parse(link, kind).await {
            Ok(obj) => {
                handle.send(obj.clone());
                Some(obj)
            }
            Err(e) => {
                warn!(href = %link.href, error = %e, "Resolution failed");
                handle.fail(link.href.clone(), &e);
                None
            }
        }
    }
}

// ── System view ──────────────────────────────────────────────────────────────

/// Links that make up the system view.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemLinks {
    pub user: Link,
    pub version: Link,
    pub domain_types: Link,
    /// Without a layout link the loader completes the view itself once the
    /// other requests have finished.
    pub layout: Option<Link>,
}

impl SystemLinks {
    /// Conventional resource paths below a Restful Objects base URL.
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            user: Link::new(REL_USER, format!("{base}/user")).with_profile("user"),
            version: Link::new(REL_VERSION, format!("{base}/version")).with_profile("version"),
            domain_types: Link::new(REL_DOMAIN_TYPES, format!("{base}/domain-types"))
                .with_profile("type-list"),
            layout: None,
        }
    }

    pub fn with_layout(mut self, href: impl Into<String>) -> Self {
        self.layout = Some(Link::new(REL_LAYOUT, href).with_profile("layout-bs3"));
        self
    }
}

/// Loads user, version, domain types and layout into a system view.
#[derive(Clone)]
pub struct SystemLoader {
    resolver: LinkResolver,
}

impl SystemLoader {
    pub fn new(resolver: LinkResolver) -> Self {
        Self { resolver }
    }

    /// Spawn the system requests. The returned task finishes after every
    /// request has been posted.
    #[instrument(skip_all, fields(user = %links.user.href))]
    pub fn load(&self, links: SystemLinks, handle: AggregatorHandle) -> JoinHandle<()> {
        let resolver = self.resolver.clone();
        tokio::spawn(async move {
            let mut requests = JoinSet::new();
            let mut spawn = |link: Link| {
                let resolver = resolver.clone();
                let handle = handle.clone();
                requests.spawn(async move { resolver.resolve_now(&link, None, &handle).await });
            };
            spawn(links.user);
            spawn(links.version);
            spawn(links.domain_types);
            let has_layout = links.layout.is_some();
            if let Some(layout) = links.layout {
                spawn(layout);
            }
            while requests.join_next().await.is_some() {}

            if !has_layout {
                debug!("No layout link, completing with the default layout");
                handle.send(TransferObject::Layout(Layout::default()));
            }
        })
    }
}

// ── Type diagram ─────────────────────────────────────────────────────────────

/// Loads a domain type and the descriptions of its property members.
#[derive(Clone)]
pub struct TypeLoader {
    resolver: LinkResolver,
}

impl TypeLoader {
    pub fn new(resolver: LinkResolver) -> Self {
        Self { resolver }
    }

    /// Link to `{base}/domain-types/{canonical_name}`.
    pub fn type_link(base_url: &str, canonical_name: &str) -> Link {
        Link::new(
            REL_DOMAIN_TYPE,
            format!("{}/domain-types/{}", base_url.trim_end_matches('/'), canonical_name),
        )
        .with_profile("domain-type")
    }

    /// Spawn the domain-type request, then one request per property member
    /// with a description link, and the layout request if given.
    #[instrument(skip_all, fields(href = %type_link.href))]
    pub fn load(
        &self,
        type_link: Link,
        layout: Option<Link>,
        handle: AggregatorHandle,
    ) -> JoinHandle<()> {
        let resolver = self.resolver.clone();
        tokio::spawn(async move {
            let layout_task = layout.map(|link| resolver.resolve(link, Some(PayloadKind::Layout), handle.clone()));

            let Some(TransferObject::DomainType(domain_type)) = resolver
                .resolve_now(&type_link, Some(PayloadKind::DomainType), &handle)
                .await
            else {
                return;
            };

            let description_links: Vec<Link> = domain_type
                .properties()
                .filter(|m| m.return_type.is_none())
                .filter_map(|m| m.href.as_ref())
                .map(|href| Link::new("urn:org.restfulobjects:rels/details", href.clone()))
                .collect();
            debug!(count = description_links.len(), "Resolving member descriptions");

            let tasks = resolver.resolve_all(
                description_links,
                Some(PayloadKind::MemberDescription),
                &handle,
            );
            for task in tasks.into_iter().chain(layout_task) {
                if let Err(e) = task.await {
                    warn!(error = %e, "Resolution task aborted");
                }
            }
        })
    }
}

// ── Object view ──────────────────────────────────────────────────────────────

/// Loads a domain object, then the layout it links to.
#[derive(Clone)]
pub struct ObjectLoader {
    resolver: LinkResolver,
}

impl ObjectLoader {
    pub fn new(resolver: LinkResolver) -> Self {
        Self { resolver }
    }

    /// Spawn the object request. An object without a layout link is
    /// completed with the default layout.
    #[instrument(skip_all, fields(href = %object_link.href))]
    pub fn load(&self, object_link: Link, handle: AggregatorHandle) -> JoinHandle<()> {
        let resolver = self.resolver.clone();
        tokio::spawn(async move {
            let object = match resolver.resolve_now(&object_link, None, &handle).await {
                Some(TransferObject::DomainObject(object)) => object,
                Some(TransferObject::ResultObject(result)) => result.result,
                _ => return,
            };
            match object.layout_link() {
                Some(layout) => {
                    resolver
                        .resolve_now(layout, Some(PayloadKind::Layout), &handle)
                        .await;
                }
                None => {
                    debug!("Object has no layout link, using the default layout");
                    handle.send(TransferObject::Layout(Layout::default()));
                }
            }
        })
    }
}
