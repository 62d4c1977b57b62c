//! CMS page node fetcher

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use super::NodeDataFetcher;
use crate::errors::NodeTypeResult;
use crate::record::{NodeId, NodeRecord, Payload};

/// Lookup of CMS page URLs by page identifier, scoped to a store.
pub trait CmsPageSource: Send + Sync {
    fn page_urls(
        &self,
        identifiers: &[String],
        store: &str,
    ) -> NodeTypeResult<HashMap<String, String>>;
}

/// Fetcher for CMS page nodes: the record's `content` field holds the page
/// identifier, resolved to a URL through the injected source.
pub struct CmsPageFetcher {
    pages: Arc<dyn CmsPageSource>,
}

impl CmsPageFetcher {
    pub fn new(pages: Arc<dyn CmsPageSource>) -> Self {
        Self { pages }
    }
}

impl NodeDataFetcher for CmsPageFetcher {
    #[instrument(level = "debug", skip(self, nodes))]
    fn fetch_data(
        &self,
        nodes: &[NodeRecord],
        store: &str,
    ) -> NodeTypeResult<HashMap<NodeId, Payload>> {
        let identifiers: Vec<String> = nodes.iter().filter_map(page_identifier).collect();
        let urls = self.pages.page_urls(&identifiers, store)?;

        let mut resolved = HashMap::new();
        for node in nodes {
            let mut data = node.stripped_payload();
            if let Some(url) = page_identifier(node).and_then(|id| urls.get(&id)) {
                data.insert("url".to_string(), Value::String(url.clone()));
            }
            resolved.insert(node.id, data);
        }
        Ok(resolved)
    }
}

fn page_identifier(record: &NodeRecord) -> Option<String> {
    record
        .payload
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string)
}
