//! Menu import service
//!
//! Reads an exchange file, decodes it, creates the menu and persists the
//! forest top-down: each node receives a freshly assigned id, its parent's
//! new id and its depth as `level` (roots at level 0). A decode failure
//! aborts before anything is written.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::codec::{decode_menu, MenuNode};
use crate::errors::ExchangeError;
use crate::exchange::read_exchange_file;
use crate::record::{MenuId, NodeId};
use crate::services::ServiceResult;
use crate::store::MenuSink;

/// Outcome of one menu import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub menu_id: MenuId,
    pub identifier: String,
    pub nodes: usize,
}

#[derive(Debug, Default)]
pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    /// Import one exchange file into the sink.
    #[instrument(level = "debug", skip(self, sink))]
    pub fn import_file(
        &self,
        sink: &mut dyn MenuSink,
        path: &Path,
    ) -> ServiceResult<ImportSummary> {
        let record = read_exchange_file(path)?;
        let decoded = decode_menu(&record)?;

        let identifier = decoded
            .menu
            .get("identifier")
            .and_then(Value::as_str)
            .filter(|identifier| !identifier.is_empty())
            .ok_or_else(|| ExchangeError::MissingField("identifier".to_string()))?
            .to_string();

        let menu_id = sink.insert_menu(decoded.menu.clone(), decoded.stores.clone())?;
        debug!(menu_id, %identifier, "created menu");

        let mut nodes = 0;
        self.persist_level(sink, menu_id, None, 0, &decoded.forest, &mut nodes)?;

        Ok(ImportSummary {
            menu_id,
            identifier,
            nodes,
        })
    }

    /// Persist one sibling group, then descend. Sibling order is forest
    /// order, so the stored sequence round-trips through a later export.
    fn persist_level(
        &self,
        sink: &mut dyn MenuSink,
        menu_id: MenuId,
        parent_id: Option<NodeId>,
        level: u32,
        nodes: &[MenuNode],
        count: &mut usize,
    ) -> ServiceResult<()> {
        for node in nodes {
            let id = sink.insert_node(menu_id, parent_id, level, node.payload.clone())?;
            *count += 1;
            self.persist_level(sink, menu_id, Some(id), level + 1, &node.children, count)?;
        }
        Ok(())
    }
}
