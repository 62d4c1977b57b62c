//! Tests for node-type dispatch backed by the JSON catalog

use std::sync::Arc;

use menutree::errors::NodeTypeError;
use menutree::node_type::{
    CategoryFetcher, CmsBlockFetcher, CmsPageFetcher, NodeKind, NodeTypeRegistry, ProductFetcher,
};
use menutree::store::{JsonCatalog, MenuSource};
use serde_json::json;
use tempfile::TempDir;

/// Catalog document with one menu, three typed nodes and the resource
/// tables the category/cms_page fetchers resolve against.
fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    menutree::util::testing::init_test_setup();
    let path = dir.path().join("catalog.json");
    let document = json!({
        "menus": [
            { "menu_id": 1, "stores": ["1"], "title": "Main", "identifier": "main" }
        ],
        "nodes": [
            { "node_id": 1, "parent_id": null, "menu_id": 1, "level": 0,
              "title": "Women", "type": "category", "content": 42 },
            { "node_id": 2, "parent_id": null, "menu_id": 1, "level": 0,
              "title": "About", "type": "cms_page", "content": "about-us" },
            { "node_id": 3, "parent_id": null, "menu_id": 1, "level": 0,
              "title": "Blog", "type": "custom_url", "content": "https://blog.example" },
            { "node_id": 4, "parent_id": null, "menu_id": 1, "level": 0,
              "title": "Bestseller", "type": "product", "content": 501 },
            { "node_id": 5, "parent_id": null, "menu_id": 1, "level": 0,
              "title": "Promo", "type": "cms_block", "content": "promo-banner" }
        ],
        "categories": [
            { "category_id": 42, "store": "1", "url_key": "women" },
            { "category_id": 42, "store": "2", "url_key": "femmes" }
        ],
        "products": [
            { "product_id": 501, "store": "0", "url_key": "wool-sweater" }
        ],
        "pages": [
            { "identifier": "about-us", "store": "0", "url": "/about-us" }
        ],
        "blocks": [
            { "identifier": "promo-banner", "store": "0", "content": "<p>Free shipping</p>" }
        ]
    });
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

fn wired_registry(catalog: &Arc<JsonCatalog>) -> NodeTypeRegistry {
    let mut registry = NodeTypeRegistry::with_defaults();
    registry.register(
        NodeKind::Category,
        Box::new(CategoryFetcher::new(catalog.clone())),
    );
    registry.register(
        NodeKind::Product,
        Box::new(ProductFetcher::new(catalog.clone())),
    );
    registry.register(
        NodeKind::CmsPage,
        Box::new(CmsPageFetcher::new(catalog.clone())),
    );
    registry.register(
        NodeKind::CmsBlock,
        Box::new(CmsBlockFetcher::new(catalog.clone())),
    );
    registry
}

// ============================================================
// Resolution Tests
// ============================================================

#[test]
fn given_wired_registry_when_resolving_then_each_kind_gets_its_data() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let catalog = Arc::new(JsonCatalog::load(&write_catalog(&temp)).unwrap());
    let registry = wired_registry(&catalog);
    let nodes = catalog.nodes_for_menu(1);

    // Act
    let resolved = registry.resolve(&nodes, "1").unwrap();

    // Assert
    assert_eq!(resolved.len(), 5);
    assert_eq!(resolved[&1]["url_key"], json!("women"));
    assert_eq!(resolved[&2]["url"], json!("/about-us"));
    // custom_url resolves through the default identity fetch
    assert_eq!(resolved[&3]["content"], json!("https://blog.example"));
    assert_eq!(resolved[&4]["url_key"], json!("wool-sweater"));
    assert_eq!(resolved[&5]["block_content"], json!("<p>Free shipping</p>"));
}

#[test]
fn given_store_scoped_category_when_resolving_other_store_then_other_key() {
    let temp = TempDir::new().unwrap();
    let catalog = Arc::new(JsonCatalog::load(&write_catalog(&temp)).unwrap());
    let registry = wired_registry(&catalog);
    let nodes = catalog.nodes_for_menu(1);

    let resolved = registry.resolve(&nodes, "2").unwrap();

    assert_eq!(resolved[&1]["url_key"], json!("femmes"));
}

// ============================================================
// Configuration Error Tests
// ============================================================

#[test]
fn given_unwired_kind_when_resolving_then_missing_fetcher_error() {
    let temp = TempDir::new().unwrap();
    let catalog = Arc::new(JsonCatalog::load(&write_catalog(&temp)).unwrap());
    // Defaults only: no category or cms_page fetcher registered
    let registry = NodeTypeRegistry::with_defaults();
    let nodes = catalog.nodes_for_menu(1);

    let result = registry.resolve(&nodes, "1");

    assert!(matches!(result, Err(NodeTypeError::MissingFetcher(_))));
}

#[test]
fn given_node_with_unknown_type_when_resolving_then_unknown_kind_error() {
    use menutree::record::{NodeRecord, Payload};

    let mut payload = Payload::new();
    payload.insert("type".into(), json!("carousel"));
    let nodes = vec![NodeRecord::new(1, None, payload)];

    let result = NodeTypeRegistry::with_defaults().resolve(&nodes, "0");

    assert!(matches!(result, Err(NodeTypeError::UnknownKind(_))));
}
