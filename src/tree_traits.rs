use generational_arena::Index;
use termtree::Tree;

use crate::arena::RecordArena;
use crate::record::ROOT_PARENT;
use crate::store::TreeStore;

/// Render a hierarchy as a displayable termtree.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeStore {
    /// The whole forest under a synthetic sentinel label, node labels are
    /// record ids.
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &RecordArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                let mut child_tree = Tree::new(node.id.to_string());
                for &child_idx in &node.children {
                    build_tree(arena, child_idx, &mut child_tree);
                }
                parent_tree.push(child_tree);
            }
        }

        let arena = self.tree();
        let mut tree = Tree::new(ROOT_PARENT.to_string());
        for &root_idx in arena.roots() {
            build_tree(arena, root_idx, &mut tree);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn test_forest_rendering() {
        let store = TreeStore::new(vec![
            Record::new(1, "root"),
            Record::new(2, 1),
            Record::new("x", "root"),
        ]);
        let rendered = store.to_tree_string().to_string();
        assert!(rendered.starts_with("root"));
        assert!(rendered.contains('2'));
        assert!(rendered.contains('x'));
    }
}
