//! Tests for the delimited exchange file layer

use menutree::codec::{decode_menu, encode_menu, MenuNode};
use menutree::exchange::{read_exchange_file, write_exchange_file};
use menutree::record::{menu_export_fields, Payload};
use serde_json::{json, Value};
use tempfile::TempDir;

fn payload(fields: &[(&str, Value)]) -> Payload {
    let mut payload = Payload::new();
    for (key, value) in fields {
        payload.insert(key.to_string(), value.clone());
    }
    payload
}

// ============================================================
// Quoting Tests
// ============================================================

#[test]
fn given_payload_with_comma_and_quote_when_round_tripping_then_exact() {
    // Arrange: a forest whose blob contains the delimiter, the quote
    // character and a line break once embedded in the CSV cell
    let temp = TempDir::new().unwrap();
    let tricky_title = "Best \"Sellers\", now\nwith newline";
    let forest = vec![MenuNode::new(payload(&[
        ("title", json!(tricky_title)),
        ("type", json!("custom_url")),
    ]))];
    let menu = payload(&[
        ("title", json!("Menu, with comma")),
        ("identifier", json!("tricky")),
    ]);
    let record = encode_menu(&menu, &["1".into()], &forest).unwrap();

    // Act
    let path =
        write_exchange_file(temp.path(), "tricky", &menu_export_fields(), &record).unwrap();
    let decoded = decode_menu(&read_exchange_file(&path).unwrap()).unwrap();

    // Assert
    assert_eq!(decoded.menu.get("title"), Some(&json!("Menu, with comma")));
    assert_eq!(decoded.forest[0].payload["title"], json!(tricky_title));
}

// ============================================================
// Header Tests
// ============================================================

#[test]
fn given_menu_export_when_writing_then_header_ends_with_relation_fields() {
    let temp = TempDir::new().unwrap();
    let menu = payload(&[("title", json!("Main")), ("identifier", json!("main"))]);
    let record = encode_menu(&menu, &[], &[]).unwrap();

    let path = write_exchange_file(temp.path(), "main", &menu_export_fields(), &record).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let header = content.lines().next().unwrap();
    assert_eq!(header, "title,identifier,css_class,creation_time,update_time,stores,nodes");
}

// ============================================================
// File Naming Tests
// ============================================================

#[test]
fn given_repeated_exports_when_writing_then_files_exist_under_target_dir() {
    let temp = TempDir::new().unwrap();
    let menu = payload(&[("title", json!("Main")), ("identifier", json!("main"))]);
    let record = encode_menu(&menu, &[], &[]).unwrap();

    let first = write_exchange_file(temp.path(), "main", &menu_export_fields(), &record).unwrap();
    let second = write_exchange_file(temp.path(), "main", &menu_export_fields(), &record).unwrap();

    assert!(first.exists());
    assert!(second.exists());
    assert!(first.file_name().unwrap().to_string_lossy().starts_with("main-"));
}

#[test]
fn given_missing_target_dir_when_writing_then_created() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("var").join("exports");
    let menu = payload(&[("identifier", json!("main"))]);
    let record = encode_menu(&menu, &[], &[]).unwrap();

    let path = write_exchange_file(&nested, "main", &menu_export_fields(), &record).unwrap();

    assert!(path.starts_with(&nested));
    assert!(path.exists());
}
