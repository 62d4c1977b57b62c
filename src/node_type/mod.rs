//! Pluggable node types
//!
//! Each menu node carries a `type` field naming how it renders: a category
//! or product link, a CMS page or block, a custom URL or a plain wrapper.
//! Per-kind data fetching
//! is a capability trait dispatched through an enum-keyed registry; kinds
//! that need backing resources get them constructor-injected. A kind the
//! registry was never wired for is a configuration error, not a fallback.

mod category;
mod cms_block;
mod cms_page;
mod product;

pub use category::{CategoryFetcher, CategoryUrlSource};
pub use cms_block::{CmsBlockFetcher, CmsBlockSource};
pub use cms_page::{CmsPageFetcher, CmsPageSource};
pub use product::{ProductFetcher, ProductUrlSource};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::instrument;

use crate::errors::{NodeTypeError, NodeTypeResult};
use crate::record::{NodeId, NodeRecord, Payload, NODE_TYPE_FIELD};

/// Kind of a menu node, parsed from its `type` payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Category,
    Product,
    CmsPage,
    CmsBlock,
    CustomUrl,
    Wrapper,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Category => "category",
            NodeKind::Product => "product",
            NodeKind::CmsPage => "cms_page",
            NodeKind::CmsBlock => "cms_block",
            NodeKind::CustomUrl => "custom_url",
            NodeKind::Wrapper => "wrapper",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = NodeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(NodeKind::Category),
            "product" => Ok(NodeKind::Product),
            "cms_page" => Ok(NodeKind::CmsPage),
            "cms_block" => Ok(NodeKind::CmsBlock),
            "custom_url" => Ok(NodeKind::CustomUrl),
            "wrapper" => Ok(NodeKind::Wrapper),
            other => Err(NodeTypeError::UnknownKind(other.to_string())),
        }
    }
}

/// Kind of a node record, from its `type` field.
pub fn kind_of(record: &NodeRecord) -> NodeTypeResult<NodeKind> {
    match record.payload.get(NODE_TYPE_FIELD) {
        Some(Value::String(kind)) => kind.parse(),
        _ => Err(NodeTypeError::UnknownKind("(unset)".to_string())),
    }
}

/// Per-kind node data fetcher.
///
/// The defaults cover self-contained kinds: node data is the record payload
/// keyed by id, and there is no static configuration.
pub trait NodeDataFetcher: Send + Sync {
    /// Resolve display data for `nodes` within one store scope, keyed by
    /// node id.
    fn fetch_data(
        &self,
        nodes: &[NodeRecord],
        store: &str,
    ) -> NodeTypeResult<HashMap<NodeId, Payload>> {
        let _ = store;
        Ok(nodes
            .iter()
            .map(|node| (node.id, node.stripped_payload()))
            .collect())
    }

    /// Kind-wide configuration data for one store scope.
    fn config_data(&self, store: &str) -> NodeTypeResult<Payload> {
        let _ = store;
        Ok(Payload::new())
    }
}

/// Custom URL nodes carry their target in the payload; the defaults apply.
pub struct CustomUrlFetcher;

impl NodeDataFetcher for CustomUrlFetcher {}

/// Wrapper nodes render container markup only.
pub struct WrapperFetcher;

impl NodeDataFetcher for WrapperFetcher {}

/// Registry dispatching fetchers by node kind.
pub struct NodeTypeRegistry {
    fetchers: HashMap<NodeKind, Box<dyn NodeDataFetcher>>,
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self {
            fetchers: HashMap::new(),
        }
    }

    /// Registry with the resource-free kinds wired. The catalog-backed
    /// kinds need injected sources and are registered by the caller.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NodeKind::CustomUrl, Box::new(CustomUrlFetcher));
        registry.register(NodeKind::Wrapper, Box::new(WrapperFetcher));
        registry
    }

    pub fn register(&mut self, kind: NodeKind, fetcher: Box<dyn NodeDataFetcher>) {
        self.fetchers.insert(kind, fetcher);
    }

    /// Fetcher for `kind`, or `MissingFetcher` when the registry was wired
    /// without one.
    pub fn fetcher(&self, kind: NodeKind) -> NodeTypeResult<&dyn NodeDataFetcher> {
        self.fetchers
            .get(&kind)
            .map(Box::as_ref)
            .ok_or(NodeTypeError::MissingFetcher(kind))
    }

    /// Group `nodes` by kind and resolve each group through its fetcher.
    #[instrument(level = "debug", skip(self, nodes))]
    pub fn resolve(
        &self,
        nodes: &[NodeRecord],
        store: &str,
    ) -> NodeTypeResult<HashMap<NodeId, Payload>> {
        let mut by_kind: HashMap<NodeKind, Vec<NodeRecord>> = HashMap::new();
        for node in nodes {
            by_kind.entry(kind_of(node)?).or_default().push(node.clone());
        }

        let mut resolved = HashMap::new();
        for (kind, group) in by_kind {
            resolved.extend(self.fetcher(kind)?.fetch_data(&group, store)?);
        }
        Ok(resolved)
    }
}

/// Numeric content reference of a record (`content` field), used by kinds
/// whose payload points at an entity id.
pub(crate) fn content_id(record: &NodeRecord) -> Option<i64> {
    match record.payload.get("content") {
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.parse().ok(),
        _ => None,
    }
}
