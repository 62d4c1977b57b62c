//! Product node fetcher

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use super::{content_id, NodeDataFetcher};
use crate::errors::NodeTypeResult;
use crate::record::{NodeId, NodeRecord, Payload};

/// Lookup of product URL keys, scoped to a store.
pub trait ProductUrlSource: Send + Sync {
    /// URL key per product id; ids not available in the store are absent.
    fn url_keys(&self, product_ids: &[i64], store: &str) -> NodeTypeResult<HashMap<i64, String>>;
}

/// Fetcher for product nodes: the record's `content` field holds the
/// product id, resolved to a URL key through the injected source.
pub struct ProductFetcher {
    urls: Arc<dyn ProductUrlSource>,
}

impl ProductFetcher {
    pub fn new(urls: Arc<dyn ProductUrlSource>) -> Self {
        Self { urls }
    }
}

impl NodeDataFetcher for ProductFetcher {
    #[instrument(level = "debug", skip(self, nodes))]
    fn fetch_data(
        &self,
        nodes: &[NodeRecord],
        store: &str,
    ) -> NodeTypeResult<HashMap<NodeId, Payload>> {
        let product_ids: Vec<i64> = nodes.iter().filter_map(content_id).collect();
        let url_keys = self.urls.url_keys(&product_ids, store)?;

        let mut resolved = HashMap::new();
        for node in nodes {
            let mut data = node.stripped_payload();
            if let Some(url_key) = content_id(node).and_then(|id| url_keys.get(&id)) {
                data.insert("url_key".to_string(), Value::String(url_key.clone()));
            }
            resolved.insert(node.id, data);
        }
        Ok(resolved)
    }
}
