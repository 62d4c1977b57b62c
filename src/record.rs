//! Core entities: flat menu/node records and their field names

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node identifier assigned by the persistence layer.
pub type NodeId = i64;

/// Menu identifier assigned by the persistence layer.
pub type MenuId = i64;

/// Store scope identifier, kept as text end to end.
pub type StoreId = String;

/// Field map carried by menus and nodes.
///
/// Backed by serde_json's insertion-ordered map (`preserve_order`), so
/// payload iteration order is the order fields were first written.
pub type Payload = Map<String, Value>;

/// Structural node fields. These describe tree position and scope, are
/// reconstructed on import, and must never leak into an exported payload.
pub const NODE_ID: &str = "node_id";
pub const PARENT_ID: &str = "parent_id";
pub const MENU_ID: &str = "menu_id";
pub const LEVEL: &str = "level";

pub const NODE_STRUCTURAL_FIELDS: [&str; 4] = [NODE_ID, PARENT_ID, MENU_ID, LEVEL];

/// Relation columns appended after the menu schema fields in export files.
pub const STORES_FIELD: &str = "stores";
pub const NODES_FIELD: &str = "nodes";

/// Menu schema fields, in table order.
pub const MENU_FIELDS: [&str; 6] = [
    MENU_ID,
    "title",
    "identifier",
    "css_class",
    "creation_time",
    "update_time",
];

/// Menu fields excluded from export records. The internal numeric id is
/// meaningless across import/export boundaries.
pub const MENU_EXCLUDED_FIELDS: [&str; 1] = [MENU_ID];

/// Node payload field naming its node type.
pub const NODE_TYPE_FIELD: &str = "type";

/// Flat node record as yielded by a record source.
///
/// The source owns its records for the duration of one assembly pass; the
/// assembler never mutates them, it builds new composites from the payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique node id
    #[serde(rename = "node_id")]
    pub id: NodeId,
    /// Parent node id, None for roots
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    /// All remaining fields
    #[serde(flatten)]
    pub payload: Payload,
}

impl NodeRecord {
    pub fn new(id: NodeId, parent_id: Option<NodeId>, payload: Payload) -> Self {
        Self {
            id,
            parent_id,
            payload,
        }
    }

    /// Payload with the structural fields removed.
    ///
    /// Uses order-preserving removal: the remaining fields keep their
    /// original sequence in the exported blob.
    pub fn stripped_payload(&self) -> Payload {
        let mut payload = self.payload.clone();
        for field in NODE_STRUCTURAL_FIELDS {
            payload.shift_remove(field);
        }
        payload
    }
}

/// Menu entity with its store associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    /// Internal numeric id
    #[serde(rename = "menu_id")]
    pub id: MenuId,
    /// Associated store ids, in association order
    #[serde(default)]
    pub stores: Vec<StoreId>,
    /// Menu attributes (title, identifier, css_class, ...)
    #[serde(flatten)]
    pub payload: Payload,
}

impl MenuRecord {
    /// The menu's exchange identifier (`identifier` attribute), if set.
    pub fn identifier(&self) -> Option<&str> {
        self.payload.get("identifier").and_then(Value::as_str)
    }
}

/// Header for menu export files: schema fields minus the excluded ones,
/// with the two relation columns appended last.
pub fn menu_export_fields() -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = MENU_FIELDS
        .iter()
        .filter(|field| !MENU_EXCLUDED_FIELDS.contains(field))
        .copied()
        .collect();
    fields.push(STORES_FIELD);
    fields.push(NODES_FIELD);
    fields
}
