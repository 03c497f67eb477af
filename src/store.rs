use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::arena::RecordArena;
use crate::builder::TreeBuilder;
use crate::errors::TreeResult;
use crate::record::{ParentRef, Record, RecordId};

/// Read-only index over a flat, parent-linked record collection.
///
/// Built once from an input snapshot; holds three independent structures:
///
/// - the snapshot itself, returned verbatim by [`get_all`](Self::get_all),
/// - a lookup table for O(1) retrieval by id,
/// - an arena-based forest linking children under parents, rooted at records
///   whose parent is the `"root"` sentinel.
///
/// Every query borrows the store's canonical copies; nothing hands out a
/// mutable path into internal state.
#[derive(Debug)]
pub struct TreeStore {
    snapshot: Vec<Record>,
    lookup: HashMap<RecordId, Record>,
    tree: RecordArena,
}

impl TreeStore {
    /// Build the index. Lenient: dangling parents drop out of the tree,
    /// duplicate ids overwrite silently in the lookup table.
    #[instrument(level = "debug", skip(records))]
    pub fn new(records: Vec<Record>) -> Self {
        let lookup: HashMap<RecordId, Record> = records
            .iter()
            .map(|record| (record.id.clone(), record.clone()))
            .collect();
        let tree = TreeBuilder::new().build(&records);

        Self {
            snapshot: records,
            lookup,
            tree,
        }
    }

    /// Build the index, failing fast on malformed input (duplicate ids,
    /// dangling parents, the reserved `"root"` id, parent cycles).
    pub fn validated(records: Vec<Record>) -> TreeResult<Self> {
        TreeBuilder::validate(&records)?;
        Ok(Self::new(records))
    }

    /// The original input sequence, untouched by tree building.
    pub fn get_all(&self) -> &[Record] {
        &self.snapshot
    }

    /// Retrieve a record by id from the lookup table. O(1).
    #[instrument(level = "trace", skip(self))]
    pub fn get_item(&self, id: &RecordId) -> Option<&Record> {
        self.lookup.get(id)
    }

    /// Direct children of a record, in input order.
    ///
    /// `None` if the id was never indexed; `Some(empty)` if it exists but has
    /// no children in the tree (leaves and orphaned records alike).
    #[instrument(level = "debug", skip(self))]
    pub fn get_children(&self, id: &RecordId) -> Option<Vec<&Record>> {
        if !self.lookup.contains_key(id) {
            return None;
        }

        let children = match self.tree.find(id) {
            Some(idx) => self
                .tree
                .children(idx)
                .filter_map(|node| self.lookup.get(&node.id))
                .collect(),
            // Indexed but never attached (dangling parent): no children
            None => Vec::new(),
        };
        Some(children)
    }

    /// Every descendant of a record: direct children first, then the children
    /// of each as visited, level by level. Empty if the id has no descendants
    /// or does not exist.
    #[instrument(level = "debug", skip(self))]
    pub fn get_all_children(&self, id: &RecordId) -> Vec<&Record> {
        let Some(start) = self.tree.find(id) else {
            return Vec::new();
        };
        self.tree
            .iter_descendants(start)
            .filter_map(|(_, node)| self.lookup.get(&node.id))
            .collect()
    }

    /// Ancestor chain: the record itself first, then each parent up to and
    /// including the root record. A root queried on itself yields `[self]`;
    /// an unknown id yields an empty chain.
    ///
    /// Root uniqueness is a caller precondition; the walk simply follows the
    /// single parent reference of each record. Dangling parents and parent
    /// cycles terminate the chain instead of looping.
    #[instrument(level = "debug", skip(self))]
    pub fn get_all_parents(&self, id: &RecordId) -> Vec<&Record> {
        let mut chain = Vec::new();
        let mut seen: HashSet<&RecordId> = HashSet::new();

        let Some(mut current) = self.lookup.get(id) else {
            return chain;
        };

        loop {
            chain.push(current);
            seen.insert(&current.id);

            match &current.parent {
                ParentRef::Root => break,
                ParentRef::Id(parent_id) => {
                    if seen.contains(parent_id) {
                        break;
                    }
                    match self.lookup.get(parent_id) {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
            }
        }

        chain
    }

    /// Top-level records (parent equals the sentinel), in input order.
    pub fn roots(&self) -> Vec<&Record> {
        self.tree
            .roots()
            .iter()
            .filter_map(|&idx| self.tree.get_node(idx))
            .filter_map(|node| self.lookup.get(&node.id))
            .collect()
    }

    /// The prebuilt hierarchy forest.
    pub fn tree(&self) -> &RecordArena {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}
