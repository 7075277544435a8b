use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::AddressId;

/// Failure taxonomy of the record store contract. Anything beyond a missing
/// target id is backing-store trouble and is never retried by callers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreError {
    #[error("no address entry found for id {0}")]
    NotFound(AddressId),
    #[error("backing store failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
