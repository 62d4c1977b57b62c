//! Exchange codec: menu + stores + forest to a flat exchange record and back
//!
//! The nodes blob is JSON. Each serialized node carries its payload fields
//! inline plus a `nodes` array for children, omitted when the node is a
//! leaf. An empty forest encodes as a null field, never as `[]`.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::errors::{ExchangeError, ExchangeResult};
use crate::record::{Payload, StoreId, MENU_EXCLUDED_FIELDS, NODES_FIELD, STORES_FIELD};

/// Composite menu node: payload plus ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Node payload fields, serialized inline
    #[serde(flatten)]
    pub payload: Payload,
    /// Child nodes, in attachment order
    #[serde(rename = "nodes", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            children: Vec::new(),
        }
    }

    /// Total node count of this subtree, self included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MenuNode::count).sum::<usize>()
    }
}

/// One exchange unit per menu: a flat field map ready for delimited
/// packaging, with `stores` comma-joined and the forest folded into the
/// `nodes` blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuExchangeRecord {
    pub fields: Payload,
}

impl MenuExchangeRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Decoded exchange record.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMenu {
    /// Menu attributes, internal id excluded
    pub menu: Payload,
    /// Store ids in serialized order
    pub stores: Vec<StoreId>,
    /// Node forest, empty when the menu had no nodes
    pub forest: Vec<MenuNode>,
}

/// Encode a menu, its store associations and its node forest into one
/// exchange record.
///
/// Stores are joined in iteration order; no sort is applied, so callers
/// needing determinism must pre-sort. The menu's internal numeric id is
/// excluded: a re-import creates a new one.
#[instrument(level = "debug", skip(menu, stores, forest))]
pub fn encode_menu(
    menu: &Payload,
    stores: &[StoreId],
    forest: &[MenuNode],
) -> ExchangeResult<MenuExchangeRecord> {
    let mut fields = menu.clone();
    for excluded in MENU_EXCLUDED_FIELDS {
        fields.shift_remove(excluded);
    }

    fields.insert(
        STORES_FIELD.to_string(),
        Value::String(stores.iter().join(",")),
    );

    let nodes_value = if forest.is_empty() {
        Value::Null
    } else {
        Value::String(serde_json::to_string(forest).map_err(ExchangeError::BlobSerialize)?)
    };
    fields.insert(NODES_FIELD.to_string(), nodes_value);

    Ok(MenuExchangeRecord { fields })
}

/// Decode an exchange record back into menu payload, stores and forest.
///
/// Fails fast with `MalformedBlob` when a nodes blob is present but does not
/// parse; no partial forest is ever returned.
#[instrument(level = "debug", skip(record))]
pub fn decode_menu(record: &MenuExchangeRecord) -> ExchangeResult<DecodedMenu> {
    let mut menu = record.fields.clone();

    let stores = match menu.shift_remove(STORES_FIELD) {
        Some(Value::String(joined)) if !joined.is_empty() => {
            joined.split(',').map(str::to_string).collect()
        }
        _ => Vec::new(),
    };

    let forest = match menu.shift_remove(NODES_FIELD) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(blob)) if blob.is_empty() => Vec::new(),
        Some(Value::String(blob)) => {
            serde_json::from_str(&blob).map_err(ExchangeError::MalformedBlob)?
        }
        // Tolerate an already-parsed value, e.g. a record assembled in memory
        Some(value) => serde_json::from_value(value).map_err(ExchangeError::MalformedBlob)?,
    };

    Ok(DecodedMenu {
        menu,
        stores,
        forest,
    })
}
