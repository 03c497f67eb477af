use thiserror::Error;

use crate::record::RecordId;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("duplicate record id: {0}")]
    DuplicateId(RecordId),

    #[error("record {id} references missing parent: {parent}")]
    DanglingParent { id: RecordId, parent: RecordId },

    #[error("'root' is reserved as the parent sentinel and cannot be a record id")]
    ReservedRootId,

    #[error("cycle detected in parent chain at: {0}")]
    CycleDetected(RecordId),
}

pub type TreeResult<T> = Result<T, TreeError>;
