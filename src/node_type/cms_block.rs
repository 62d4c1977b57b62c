//! CMS block node fetcher

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use super::NodeDataFetcher;
use crate::errors::NodeTypeResult;
use crate::record::{NodeId, NodeRecord, Payload};

/// Lookup of CMS block markup by block identifier, scoped to a store.
pub trait CmsBlockSource: Send + Sync {
    fn block_contents(
        &self,
        identifiers: &[String],
        store: &str,
    ) -> NodeTypeResult<HashMap<String, String>>;
}

/// Fetcher for CMS block nodes: the record's `content` field holds the
/// block identifier, resolved to the block markup through the injected
/// source. Blocks are embedded, so the markup rides along in the node data
/// instead of a link target.
pub struct CmsBlockFetcher {
    blocks: Arc<dyn CmsBlockSource>,
}

impl CmsBlockFetcher {
    pub fn new(blocks: Arc<dyn CmsBlockSource>) -> Self {
        Self { blocks }
    }
}

impl NodeDataFetcher for CmsBlockFetcher {
    #[instrument(level = "debug", skip(self, nodes))]
    fn fetch_data(
        &self,
        nodes: &[NodeRecord],
        store: &str,
    ) -> NodeTypeResult<HashMap<NodeId, Payload>> {
        let identifiers: Vec<String> = nodes.iter().filter_map(block_identifier).collect();
        let contents = self.blocks.block_contents(&identifiers, store)?;

        let mut resolved = HashMap::new();
        for node in nodes {
            let mut data = node.stripped_payload();
            if let Some(markup) = block_identifier(node).and_then(|id| contents.get(&id)) {
                data.insert("block_content".to_string(), Value::String(markup.clone()));
            }
            resolved.insert(node.id, data);
        }
        Ok(resolved)
    }
}

fn block_identifier(record: &NodeRecord) -> Option<String> {
    record
        .payload
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string)
}
