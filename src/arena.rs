use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::codec::MenuNode;
use crate::record::{NodeId, Payload};

/// Tree node in the arena-based forest structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Original node id from the record source
    pub id: NodeId,
    /// Node payload (structural fields already stripped)
    pub payload: Payload,
    /// Index of parent node in the arena, None for roots and detached nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, in attachment order
    pub children: Vec<Index>,
}

/// Arena-based forest for menu node hierarchies.
///
/// All parent/child relations are index lists into the arena, never embedded
/// node values. Appending a child through a node's index mutates the same
/// node every other link already points at, so late attachments stay visible
/// through previously inserted parents.
///
/// Nodes inserted detached and never attached (orphans) remain in the arena
/// but are unreachable from `roots`, so every traversal skips them.
#[derive(Debug, Default)]
pub struct NodeArena {
    /// Arena storage for all nodes, reachable or not
    arena: Arena<TreeNode>,
    /// Root node indices, in first-seen order
    roots: Vec<Index>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a root node. Root order is insertion order.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn insert_root(&mut self, id: NodeId, payload: Payload) -> Index {
        let idx = self.arena.insert(TreeNode {
            id,
            payload,
            parent: None,
            children: Vec::new(),
        });
        self.roots.push(idx);
        idx
    }

    /// Insert a node with no parent link yet. The node stays unreachable
    /// until `attach` links it under a parent.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn insert_detached(&mut self, id: NodeId, payload: Payload) -> Index {
        self.arena.insert(TreeNode {
            id,
            payload,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Link `child` as the last child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes reachable from a root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first iterator over reachable nodes, roots first.
    pub fn iter(&self) -> ForestIterator {
        ForestIterator::new(self)
    }

    /// Maximum depth over all roots. Empty forest has depth 0.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.node_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn node_depth(&self, idx: Index) -> usize {
        if let Some(node) = self.get_node(idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.node_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Original ids of reachable nodes, depth-first. Diffing these against
    /// the assembly input is how callers detect dropped orphans.
    pub fn flatten_ids(&self) -> Vec<NodeId> {
        self.iter().map(|(_, node)| node.id).collect()
    }

    /// Extract the nested composite view: depth-first, children in
    /// attachment order, roots in first-seen order. Detached nodes are
    /// absent from the result.
    #[instrument(level = "debug", skip(self))]
    pub fn to_forest(&self) -> Vec<MenuNode> {
        self.roots
            .iter()
            .filter_map(|&root| self.extract_node(root))
            .collect()
    }

    fn extract_node(&self, idx: Index) -> Option<MenuNode> {
        let node = self.get_node(idx)?;
        let children = node
            .children
            .iter()
            .filter_map(|&child| self.extract_node(child))
            .collect();
        Some(MenuNode {
            payload: node.payload.clone(),
            children,
        })
    }
}

pub struct ForestIterator<'a> {
    arena: &'a NodeArena,
    stack: Vec<Index>,
}

impl<'a> ForestIterator<'a> {
    fn new(arena: &'a NodeArena) -> Self {
        // Roots pushed in reverse so the first root pops first
        let stack = arena.roots.iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
