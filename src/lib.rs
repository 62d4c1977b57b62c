//! menutree: hierarchical navigation menu toolkit
//!
//! Reconstructs multi-root menu trees from flat, parent-referenced record
//! sets, round-trips them through a CSV exchange format, and resolves node
//! display data through pluggable, enum-dispatched node types.

pub mod arena;
pub mod assembler;
pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod exchange;
pub mod exitcode;
pub mod node_type;
pub mod record;
pub mod services;
pub mod store;
pub mod tree_display;
pub mod util;

pub use arena::{NodeArena, TreeNode};
pub use assembler::TreeAssembler;
pub use codec::{decode_menu, encode_menu, DecodedMenu, MenuExchangeRecord, MenuNode};
pub use record::{MenuRecord, NodeRecord, Payload};
