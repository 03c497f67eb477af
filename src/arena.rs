use std::collections::VecDeque;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::record::RecordId;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct RecordNode {
    /// Id of the record this node stands for
    pub id: RecordId,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based forest of record nodes.
///
/// Uses generational arena for memory-safe node references. Holds every tree
/// rooted at a sentinel-parented record; roots keep input order.
#[derive(Debug, Default)]
pub struct RecordArena {
    arena: Arena<RecordNode>,
    roots: Vec<Index>,
}

impl RecordArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, id: RecordId, parent: Option<Index>) -> Index {
        let node = RecordNode {
            id,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&RecordNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Direct children of a node, in insertion order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = &RecordNode> + '_ {
        self.get_node(idx)
            .into_iter()
            .flat_map(move |node| {
                node.children
                    .iter()
                    .filter_map(move |&child| self.get_node(child))
            })
    }

    /// Locate a node by record id via depth-first search, first match wins.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: &RecordId) -> Option<Index> {
        self.iter()
            .find(|(_, node)| &node.id == id)
            .map(|(idx, _)| idx)
    }

    /// Pre-order iteration over the whole forest.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Level-order iteration over a subtree, excluding the start node itself.
    pub fn iter_descendants(&self, start: Index) -> DescendantIterator {
        DescendantIterator::new(self, start)
    }

    /// Maximum depth over all trees in the forest; 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

pub struct TreeIterator<'a> {
    arena: &'a RecordArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a RecordArena) -> Self {
        // Roots in reverse so the first root pops first
        let stack = arena.roots.iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a RecordNode);

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

pub struct DescendantIterator<'a> {
    arena: &'a RecordArena,
    queue: VecDeque<Index>,
}

impl<'a> DescendantIterator<'a> {
    fn new(arena: &'a RecordArena, start: Index) -> Self {
        let mut queue = VecDeque::new();
        if let Some(node) = arena.get_node(start) {
            queue.extend(node.children.iter().copied());
        }
        Self { arena, queue }
    }
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = (Index, &'a RecordNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.arena.get_node(current_idx) {
                self.queue.extend(node.children.iter().copied());
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root(1)
    // ├── 2
    // │   ├── 4
    // │   └── 5
    // └── 3
    fn sample() -> RecordArena {
        let mut arena = RecordArena::new();
        let n1 = arena.insert_node(1.into(), None);
        let n2 = arena.insert_node(2.into(), Some(n1));
        arena.insert_node(3.into(), Some(n1));
        arena.insert_node(4.into(), Some(n2));
        arena.insert_node(5.into(), Some(n2));
        arena
    }

    #[test]
    fn test_preorder_iteration() {
        let arena = sample();
        let ids: Vec<String> = arena.iter().map(|(_, n)| n.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "5", "3"]);
    }

    #[test]
    fn test_descendants_level_order() {
        let arena = sample();
        let root = arena.find(&1.into()).unwrap();
        let ids: Vec<String> = arena
            .iter_descendants(root)
            .map(|(_, n)| n.id.to_string())
            .collect();
        assert_eq!(ids, vec!["2", "3", "4", "5"]);
    }

    #[test]
    fn test_find_missing_id() {
        let arena = sample();
        assert!(arena.find(&99.into()).is_none());
    }

    #[test]
    fn test_depth() {
        let arena = sample();
        assert_eq!(arena.depth(), 3);
        assert_eq!(RecordArena::new().depth(), 0);
    }
}
