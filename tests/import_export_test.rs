//! End-to-end import/export tests against the JSON catalog

use std::path::Path;

use menutree::codec::decode_menu;
use menutree::exchange::read_exchange_file;
use menutree::record::Payload;
use menutree::services::{ExportService, ImportService};
use menutree::store::{JsonCatalog, MenuSink, MenuSource};
use serde_json::{json, Value};
use tempfile::TempDir;

fn payload(fields: &[(&str, Value)]) -> Payload {
    let mut payload = Payload::new();
    for (key, value) in fields {
        payload.insert(key.to_string(), value.clone());
    }
    payload
}

/// Catalog with one menu: Home (custom_url) > Sale (category), plus a
/// second root About (cms_page).
fn seed_catalog(path: &Path) -> JsonCatalog {
    menutree::util::testing::init_test_setup();
    let mut catalog = JsonCatalog::open(path).unwrap();

    let menu_id = catalog
        .insert_menu(
            payload(&[("title", json!("Main Menu")), ("identifier", json!("main"))]),
            vec!["1".into(), "2".into()],
        )
        .unwrap();

    let home = catalog
        .insert_node(
            menu_id,
            None,
            0,
            payload(&[
                ("title", json!("Home")),
                ("type", json!("custom_url")),
                ("content", json!("/")),
            ]),
        )
        .unwrap();
    catalog
        .insert_node(
            menu_id,
            Some(home),
            1,
            payload(&[
                ("title", json!("Sale")),
                ("type", json!("category")),
                ("content", json!(42)),
            ]),
        )
        .unwrap();
    catalog
        .insert_node(
            menu_id,
            None,
            0,
            payload(&[
                ("title", json!("About")),
                ("type", json!("cms_page")),
                ("content", json!("about-us")),
            ]),
        )
        .unwrap();

    catalog.save().unwrap();
    catalog
}

// ============================================================
// Export Tests
// ============================================================

#[test]
fn given_seeded_catalog_when_exporting_then_file_holds_menu_and_forest() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let catalog = seed_catalog(&temp.path().join("catalog.json"));

    // Act
    let service = ExportService::new(temp.path().join("exports"));
    let path = service.export_menu(&catalog, "main").unwrap();

    // Assert
    let decoded = decode_menu(&read_exchange_file(&path).unwrap()).unwrap();
    assert_eq!(decoded.stores, vec!["1".to_string(), "2".to_string()]);
    assert_eq!(decoded.forest.len(), 2);
    assert_eq!(decoded.forest[0].payload["title"], json!("Home"));
    assert_eq!(decoded.forest[0].children[0].payload["title"], json!("Sale"));
    assert_eq!(decoded.forest[1].payload["title"], json!("About"));
    // Structural fields written by the sink never reach the export payload
    assert!(decoded.forest[0].payload.get("menu_id").is_none());
    assert!(decoded.forest[0].payload.get("level").is_none());
}

// ============================================================
// Import Tests
// ============================================================

#[test]
fn given_export_file_when_importing_then_ids_parents_and_levels_assigned() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let source = seed_catalog(&temp.path().join("source.json"));
    let file = ExportService::new(temp.path().join("exports"))
        .export_menu(&source, "main")
        .unwrap();

    // Act
    let mut target = JsonCatalog::open(&temp.path().join("target.json")).unwrap();
    let summary = ImportService::new().import_file(&mut target, &file).unwrap();

    // Assert
    assert_eq!(summary.identifier, "main");
    assert_eq!(summary.nodes, 3);

    let menu = target.menu_by_identifier("main").unwrap();
    assert_eq!(menu.stores, vec!["1".to_string(), "2".to_string()]);

    let nodes = target.nodes_for_menu(summary.menu_id);
    assert_eq!(nodes.len(), 3);

    let home = nodes.iter().find(|n| n.payload["title"] == json!("Home")).unwrap();
    let sale = nodes.iter().find(|n| n.payload["title"] == json!("Sale")).unwrap();
    let about = nodes.iter().find(|n| n.payload["title"] == json!("About")).unwrap();

    assert_eq!(home.parent_id, None);
    assert_eq!(sale.parent_id, Some(home.id));
    assert_eq!(about.parent_id, None);
    assert_eq!(home.payload["level"], json!(0));
    assert_eq!(sale.payload["level"], json!(1));
    assert_eq!(about.payload["level"], json!(0));
}

#[test]
fn given_imported_menu_when_re_exporting_then_forest_round_trips() {
    // Arrange: export, import into a fresh catalog, export again
    let temp = TempDir::new().unwrap();
    let source = seed_catalog(&temp.path().join("source.json"));
    let exports = ExportService::new(temp.path().join("exports"));
    let first = exports.export_menu(&source, "main").unwrap();

    let mut target = JsonCatalog::open(&temp.path().join("target.json")).unwrap();
    ImportService::new().import_file(&mut target, &first).unwrap();

    // Act
    let second = exports.export_menu(&target, "main").unwrap();

    // Assert: both files decode to the same forest
    let first_decoded = decode_menu(&read_exchange_file(&first).unwrap()).unwrap();
    let second_decoded = decode_menu(&read_exchange_file(&second).unwrap()).unwrap();
    assert_eq!(first_decoded.forest, second_decoded.forest);
    assert_eq!(first_decoded.stores, second_decoded.stores);
}

#[test]
fn given_menu_without_nodes_when_importing_then_zero_nodes_created() {
    let temp = TempDir::new().unwrap();
    let mut catalog = JsonCatalog::open(&temp.path().join("empty.json")).unwrap();
    catalog
        .insert_menu(
            payload(&[("title", json!("Bare")), ("identifier", json!("bare"))]),
            vec![],
        )
        .unwrap();
    let file = ExportService::new(temp.path().join("exports"))
        .export_menu(&catalog, "bare")
        .unwrap();

    let mut target = JsonCatalog::open(&temp.path().join("target.json")).unwrap();
    let summary = ImportService::new().import_file(&mut target, &file).unwrap();

    assert_eq!(summary.nodes, 0);
    assert!(target.nodes_for_menu(summary.menu_id).is_empty());
}
