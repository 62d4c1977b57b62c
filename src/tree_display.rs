use generational_arena::Index;
use serde_json::Value;
use termtree::Tree;

use crate::arena::NodeArena;

/// Terminal rendering of an assembled forest.
pub trait ForestDisplay {
    fn to_tree_strings(&self) -> Vec<Tree<String>>;
}

impl ForestDisplay for NodeArena {
    fn to_tree_strings(&self) -> Vec<Tree<String>> {
        fn label(arena: &NodeArena, idx: Index) -> String {
            let Some(node) = arena.get_node(idx) else {
                return String::new();
            };
            let title = node
                .payload
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("(untitled)");
            match node.payload.get("type").and_then(Value::as_str) {
                Some(kind) => format!("{title} [{kind}]"),
                None => title.to_string(),
            }
        }

        fn build_tree(arena: &NodeArena, idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(idx) {
                for &child_idx in &node.children {
                    let mut child_tree = Tree::new(label(arena, child_idx));
                    build_tree(arena, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        self.roots()
            .iter()
            .map(|&root| {
                let mut tree = Tree::new(label(self, root));
                build_tree(self, root, &mut tree);
                tree
            })
            .collect()
    }
}
