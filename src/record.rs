//! Record model: identifiers, parent references, and opaque payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved parent marker: a record whose parent equals this sentinel has no parent.
/// The literal is not a valid record id.
pub const ROOT_PARENT: &str = "root";

/// Record identifier, either numeric or textual.
///
/// Caller-supplied and expected to be unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// Parent reference: another record's id, or the root sentinel.
///
/// On the wire this is the raw id value; the literal string `"root"` maps to
/// the sentinel in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordId", into = "RecordId")]
pub enum ParentRef {
    Root,
    Id(RecordId),
}

impl ParentRef {
    pub fn is_root(&self) -> bool {
        matches!(self, ParentRef::Root)
    }
}

impl From<RecordId> for ParentRef {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Text(ref s) if s == ROOT_PARENT => ParentRef::Root,
            other => ParentRef::Id(other),
        }
    }
}

impl From<ParentRef> for RecordId {
    fn from(parent: ParentRef) -> Self {
        match parent {
            ParentRef::Root => RecordId::Text(ROOT_PARENT.to_string()),
            ParentRef::Id(id) => id,
        }
    }
}

impl From<i64> for ParentRef {
    fn from(n: i64) -> Self {
        ParentRef::Id(RecordId::Int(n))
    }
}

impl From<&str> for ParentRef {
    fn from(s: &str) -> Self {
        ParentRef::from(RecordId::from(s))
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Root => write!(f, "{}", ROOT_PARENT),
            ParentRef::Id(id) => write!(f, "{}", id),
        }
    }
}

/// A flat data item: id, parent reference, and arbitrary extra fields.
///
/// The payload is captured verbatim via serde flattening and never interpreted;
/// it rides along through indexing and comes back intact from every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub parent: ParentRef,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, parent: impl Into<ParentRef>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            payload: Map::new(),
        }
    }

    /// Attach an extra payload field (builder style, mainly for tests and demos).
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }
}
