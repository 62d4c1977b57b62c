use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::arena::NodeArena;
use crate::record::{NodeId, NodeRecord};

/// Builds a forest from a flat, parent-referenced node record set.
///
/// Single pass over the input, O(n) with amortized O(1) parent lookups via
/// two id-keyed maps: roots found so far and every non-root built so far.
/// Source records are never mutated; the arena holds new composites built
/// from stripped payload copies.
///
/// Records whose parent is never observed are orphans: they enter the arena
/// (and can still collect children of their own) but stay unreachable from
/// any root, so the whole orphan subtree is absent from the output. This is
/// deliberate, not an error; callers wanting detection can diff record ids
/// against `NodeArena::flatten_ids()`.
pub struct TreeAssembler {
    roots_by_id: HashMap<NodeId, Index>,
    non_roots_by_id: HashMap<NodeId, Index>,
}

impl Default for TreeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeAssembler {
    pub fn new() -> Self {
        Self {
            roots_by_id: HashMap::new(),
            non_roots_by_id: HashMap::new(),
        }
    }

    /// Assemble records into a forest. Never fails: malformed linkage only
    /// reduces what is reachable.
    ///
    /// Root order is input order; child order is attachment order, which for
    /// a stable record source is also input order.
    #[instrument(level = "debug", skip(self, records))]
    pub fn assemble(&mut self, records: &[NodeRecord]) -> NodeArena {
        let mut arena = NodeArena::new();
        self.roots_by_id.clear();
        self.non_roots_by_id.clear();

        for record in records {
            let payload = record.stripped_payload();

            let Some(parent_id) = record.parent_id else {
                let idx = arena.insert_root(record.id, payload);
                self.roots_by_id.insert(record.id, idx);
                continue;
            };

            let idx = arena.insert_detached(record.id, payload);
            self.non_roots_by_id.insert(record.id, idx);

            if let Some(&parent_idx) = self
                .roots_by_id
                .get(&parent_id)
                .or_else(|| self.non_roots_by_id.get(&parent_id))
            {
                arena.attach(parent_idx, idx);
            } else {
                // Parent not seen: the node stays detached and drops out
                debug!(node = record.id, parent = parent_id, "orphaned node record");
            }
        }

        arena
    }
}
