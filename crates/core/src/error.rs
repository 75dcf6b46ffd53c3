use crate::types::DbId;

/// Domain error taxonomy shared by all workflows.
///
/// Validation and auth failures are raised before any external call;
/// `Upload`, `Insert`, and `Delete` wrap errors from the object store and
/// data store with a human-readable message. `Internal` is the catch-all
/// for unexpected failures caught at the outermost layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Insert failed: {0}")]
    Insert(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
