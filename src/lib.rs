//! Index a flat, parent-linked record collection into a navigable tree.
//!
//! Records carry an id (string or integer), a parent reference, and arbitrary
//! extra fields that pass through unexamined. A [`TreeStore`] is built once
//! from an input snapshot and answers ancestry and descendant queries from
//! prebuilt structures, never re-scanning the collection per query.
//!
//! ```
//! use treestore::{Record, RecordId, TreeStore};
//!
//! let store = TreeStore::new(vec![
//!     Record::new(1, "root"),
//!     Record::new(2, 1),
//!     Record::new(3, 1),
//!     Record::new(4, 2),
//! ]);
//!
//! let children = store.get_children(&RecordId::from(1)).unwrap();
//! assert_eq!(children.len(), 2);
//!
//! let chain = store.get_all_parents(&RecordId::from(4));
//! let ids: Vec<String> = chain.iter().map(|r| r.id.to_string()).collect();
//! assert_eq!(ids, vec!["4", "2", "1"]);
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod errors;
pub mod record;
pub mod store;
pub mod tree_traits;
pub mod util;

pub use errors::{TreeError, TreeResult};
pub use record::{ParentRef, Record, RecordId, ROOT_PARENT};
pub use store::TreeStore;
pub use tree_traits::TreeNodeConvert;
