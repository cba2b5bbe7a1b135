//! Error types for the product repository.

use crate::store::StoreError;
use thiserror::Error;

/// Errors a repository operation can return.
///
/// Every variant renders as the human-readable message shown to the user;
/// authentication and store failures are additionally retained as the
/// repository's error state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    /// A mutation was attempted with no resolved user identity.
    #[error("User not authenticated")]
    AuthenticationRequired,

    /// A required field was missing, or a duplicate name was rejected.
    #[error("{0}")]
    Validation(String),

    /// The record store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The repository actor is no longer running.
    #[error("Product repository closed")]
    Closed,

    /// The repository actor dropped the response channel.
    #[error("Product repository dropped the response")]
    Dropped,
}
