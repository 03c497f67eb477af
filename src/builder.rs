use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::arena::RecordArena;
use crate::errors::{TreeError, TreeResult};
use crate::record::{ParentRef, Record, RecordId, ROOT_PARENT};

/// Constructs the hierarchy forest from a flat record collection.
///
/// Linking is lenient: dangling parent references leave a record unattached,
/// duplicate ids and cycles are skipped via a visited guard. Use
/// [`TreeBuilder::validate`] to reject malformed input up front instead.
pub struct TreeBuilder {
    relationship_cache: HashMap<RecordId, Vec<RecordId>>,
    visited: HashSet<RecordId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            relationship_cache: HashMap::new(),
            visited: HashSet::new(),
        }
    }

    /// Build the forest: roots are all records with a sentinel parent, in
    /// input order; children attach under their parent in input order.
    #[instrument(level = "debug", skip(self, records))]
    pub fn build(&mut self, records: &[Record]) -> RecordArena {
        // Reset state for a fresh build
        self.relationship_cache.clear();
        self.visited.clear();

        for record in records {
            if let ParentRef::Id(parent_id) = &record.parent {
                self.relationship_cache
                    .entry(parent_id.clone())
                    .or_default()
                    .push(record.id.clone());
            }
        }

        let mut tree = RecordArena::new();
        // Roots pushed in reverse so they pop off the stack in input order
        let mut stack: Vec<(RecordId, Option<Index>)> = records
            .iter()
            .filter(|r| r.parent.is_root())
            .rev()
            .map(|r| (r.id.clone(), None))
            .collect();

        while let Some((current_id, parent_idx)) = stack.pop() {
            // Visited guard: duplicate ids and cycles get skipped, not re-attached
            if !self.visited.insert(current_id.clone()) {
                debug!("skipping already attached record: {}", current_id);
                continue;
            }

            let current_idx = tree.insert_node(current_id.clone(), parent_idx);

            if let Some(children) = self.relationship_cache.get(&current_id) {
                // Reversed so siblings pop in input order
                for child in children.iter().rev() {
                    stack.push((child.clone(), Some(current_idx)));
                }
            }
        }

        tree
    }

    /// Eager validation of the input collection: duplicate ids, the reserved
    /// `"root"` id, dangling parent references, and parent cycles all fail fast.
    #[instrument(level = "debug", skip(records))]
    pub fn validate(records: &[Record]) -> TreeResult<()> {
        let mut ids = HashSet::new();
        for record in records {
            if matches!(&record.id, RecordId::Text(s) if s == ROOT_PARENT) {
                return Err(TreeError::ReservedRootId);
            }
            if !ids.insert(&record.id) {
                return Err(TreeError::DuplicateId(record.id.clone()));
            }
        }

        for record in records {
            if let ParentRef::Id(parent_id) = &record.parent {
                if !ids.contains(parent_id) {
                    return Err(TreeError::DanglingParent {
                        id: record.id.clone(),
                        parent: parent_id.clone(),
                    });
                }
            }
        }

        // Ids are unique and every parent resolves, so any record the forest
        // misses sits on a parent cycle.
        let tree = TreeBuilder::new().build(records);
        if tree.len() < records.len() {
            let reached: HashSet<&RecordId> = tree.iter().map(|(_, node)| &node.id).collect();
            if let Some(record) = records.iter().find(|r| !reached.contains(&r.id)) {
                return Err(TreeError::CycleDetected(record.id.clone()));
            }
        }

        Ok(())
    }
}
