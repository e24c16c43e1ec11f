use std::time::Duration;

use thiserror::Error;

/// Failure reported by any record store, whatever the backing database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No {collection} document with id {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    #[error("Store operation exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed {collection} document: {reason}")]
    InvalidDocument {
        collection: &'static str,
        reason: String,
    },
}

impl StoreError {
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn invalid_document(collection: &'static str, reason: impl ToString) -> Self {
        Self::InvalidDocument {
            collection,
            reason: reason.to_string(),
        }
    }
}
