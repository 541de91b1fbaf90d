//! Store Error Types

use thiserror::Error;

use crate::collection::Collection;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Document-store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Collection name not known to this deployment
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Document does not exist
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: Collection, id: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
