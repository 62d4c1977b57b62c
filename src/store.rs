//! Menu/node store boundary
//!
//! Services depend on the `MenuSource`/`MenuSink` traits only, so they can
//! be tested against in-memory implementations. `JsonCatalog` is the
//! file-backed implementation used by the CLI: one JSON document holding
//! menus, nodes and the node-type resource tables.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::errors::{NodeTypeResult, StoreResult, StoreError};
use crate::node_type::{CategoryUrlSource, CmsBlockSource, CmsPageSource, ProductUrlSource};
use crate::record::{
    MenuId, MenuRecord, NodeId, NodeRecord, Payload, StoreId, LEVEL, MENU_ID,
};

/// Read side: supplies menus and their flat node records.
pub trait MenuSource {
    fn menus(&self) -> Vec<&MenuRecord>;

    fn menu_by_identifier(&self, identifier: &str) -> StoreResult<&MenuRecord>;

    /// Node records of one menu, already filtered, in storage order. The
    /// assembler relies on this order being stable.
    fn nodes_for_menu(&self, menu_id: MenuId) -> Vec<NodeRecord>;
}

/// Write side: import target assigning fresh identifiers.
pub trait MenuSink {
    fn insert_menu(&mut self, payload: Payload, stores: Vec<StoreId>) -> StoreResult<MenuId>;

    fn insert_node(
        &mut self,
        menu_id: MenuId,
        parent_id: Option<NodeId>,
        level: u32,
        payload: Payload,
    ) -> StoreResult<NodeId>;
}

/// Category URL key row, store-scoped. Store `"0"` is the all-stores scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category_id: i64,
    pub store: StoreId,
    pub url_key: String,
}

/// Product URL key row, store-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    pub product_id: i64,
    pub store: StoreId,
    pub url_key: String,
}

/// CMS page URL row, store-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub identifier: String,
    pub store: StoreId,
    pub url: String,
}

/// CMS block markup row, store-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntry {
    pub identifier: String,
    pub store: StoreId,
    pub content: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    menus: Vec<MenuRecord>,
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    categories: Vec<CategoryEntry>,
    #[serde(default)]
    products: Vec<ProductEntry>,
    #[serde(default)]
    pages: Vec<PageEntry>,
    #[serde(default)]
    blocks: Vec<BlockEntry>,
}

/// JSON-file-backed menu catalog.
#[derive(Debug)]
pub struct JsonCatalog {
    path: PathBuf,
    document: CatalogDocument,
}

impl JsonCatalog {
    /// Load an existing catalog file.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path)?;
        let document = serde_json::from_str(&content)?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Load a catalog, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("catalog not found, starting empty: {}", path.display());
            Ok(Self {
                path: path.to_path_buf(),
                document: CatalogDocument::default(),
            })
        }
    }

    /// Persist the catalog back to its file.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn next_menu_id(&self) -> MenuId {
        self.document
            .menus
            .iter()
            .map(|menu| menu.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn next_node_id(&self) -> NodeId {
        self.document
            .nodes
            .iter()
            .map(|node| node.id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl MenuSource for JsonCatalog {
    fn menus(&self) -> Vec<&MenuRecord> {
        self.document.menus.iter().collect()
    }

    fn menu_by_identifier(&self, identifier: &str) -> StoreResult<&MenuRecord> {
        self.document
            .menus
            .iter()
            .find(|menu| menu.identifier() == Some(identifier))
            .ok_or_else(|| StoreError::MenuNotFound(identifier.to_string()))
    }

    fn nodes_for_menu(&self, menu_id: MenuId) -> Vec<NodeRecord> {
        self.document
            .nodes
            .iter()
            .filter(|node| {
                node.payload
                    .get(MENU_ID)
                    .and_then(Value::as_i64)
                    .is_some_and(|id| id == menu_id)
            })
            .cloned()
            .collect()
    }
}

impl MenuSink for JsonCatalog {
    fn insert_menu(&mut self, payload: Payload, stores: Vec<StoreId>) -> StoreResult<MenuId> {
        let id = self.next_menu_id();
        let mut payload = payload;
        payload.shift_remove(MENU_ID);
        self.document.menus.push(MenuRecord {
            id,
            stores,
            payload,
        });
        Ok(id)
    }

    fn insert_node(
        &mut self,
        menu_id: MenuId,
        parent_id: Option<NodeId>,
        level: u32,
        payload: Payload,
    ) -> StoreResult<NodeId> {
        let id = self.next_node_id();
        let mut payload = payload;
        payload.insert(MENU_ID.to_string(), json!(menu_id));
        payload.insert(LEVEL.to_string(), json!(level));
        self.document.nodes.push(NodeRecord {
            id,
            parent_id,
            payload,
        });
        Ok(id)
    }
}

impl CategoryUrlSource for JsonCatalog {
    fn url_keys(
        &self,
        category_ids: &[i64],
        store: &str,
    ) -> NodeTypeResult<HashMap<i64, String>> {
        Ok(self
            .document
            .categories
            .iter()
            .filter(|entry| entry.store == store || entry.store == "0")
            .filter(|entry| category_ids.contains(&entry.category_id))
            .map(|entry| (entry.category_id, entry.url_key.clone()))
            .collect())
    }
}

impl ProductUrlSource for JsonCatalog {
    fn url_keys(&self, product_ids: &[i64], store: &str) -> NodeTypeResult<HashMap<i64, String>> {
        Ok(self
            .document
            .products
            .iter()
            .filter(|entry| entry.store == store || entry.store == "0")
            .filter(|entry| product_ids.contains(&entry.product_id))
            .map(|entry| (entry.product_id, entry.url_key.clone()))
            .collect())
    }
}

impl CmsPageSource for JsonCatalog {
    fn page_urls(
        &self,
        identifiers: &[String],
        store: &str,
    ) -> NodeTypeResult<HashMap<String, String>> {
        Ok(self
            .document
            .pages
            .iter()
            .filter(|entry| entry.store == store || entry.store == "0")
            .filter(|entry| identifiers.contains(&entry.identifier))
            .map(|entry| (entry.identifier.clone(), entry.url.clone()))
            .collect())
    }
}

impl CmsBlockSource for JsonCatalog {
    fn block_contents(
        &self,
        identifiers: &[String],
        store: &str,
    ) -> NodeTypeResult<HashMap<String, String>> {
        Ok(self
            .document
            .blocks
            .iter()
            .filter(|entry| entry.store == store || entry.store == "0")
            .filter(|entry| identifiers.contains(&entry.identifier))
            .map(|entry| (entry.identifier.clone(), entry.content.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn menu_payload(identifier: &str) -> Payload {
        let mut payload = Payload::new();
        payload.insert("title".into(), json!("Menu"));
        payload.insert("identifier".into(), json!(identifier));
        payload
    }

    #[test]
    fn given_saved_catalog_when_reloading_then_contents_survive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");

        let mut catalog = JsonCatalog::open(&path).unwrap();
        let menu_id = catalog
            .insert_menu(menu_payload("main"), vec!["1".into()])
            .unwrap();
        catalog
            .insert_node(menu_id, None, 0, Payload::new())
            .unwrap();
        catalog.save().unwrap();

        let reloaded = JsonCatalog::load(&path).unwrap();
        assert_eq!(reloaded.menus().len(), 1);
        assert_eq!(reloaded.nodes_for_menu(menu_id).len(), 1);
    }

    #[test]
    fn given_missing_identifier_when_looking_up_then_menu_not_found() {
        let temp = TempDir::new().unwrap();
        let catalog = JsonCatalog::open(&temp.path().join("catalog.json")).unwrap();

        let result = catalog.menu_by_identifier("nope");

        assert!(matches!(result, Err(StoreError::MenuNotFound(_))));
    }

    #[test]
    fn given_existing_ids_when_inserting_then_ids_stay_monotonic() {
        let temp = TempDir::new().unwrap();
        let mut catalog = JsonCatalog::open(&temp.path().join("catalog.json")).unwrap();

        let first = catalog.insert_menu(menu_payload("a"), vec![]).unwrap();
        let second = catalog.insert_menu(menu_payload("b"), vec![]).unwrap();

        assert!(second > first);
    }
}
