//! Error types for task domain validation.

use super::ContextId;
use thiserror::Error;

/// Errors returned while constructing a context or folder catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two catalog entries carry the same id.
    #[error("duplicate catalog entry id {0}")]
    DuplicateId(ContextId),
}
