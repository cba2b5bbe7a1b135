//! Mailbox protocol between [`RepositoryClient`] and [`ProductRepository`].
//!
//! [`RepositoryClient`]: crate::clients::RepositoryClient
//! [`ProductRepository`]: crate::repository::ProductRepository

use crate::model::{Product, ProductDraft, ProductId, ProductPatch};
use crate::repository::error::RepositoryError;
use crate::repository::reconcile::{ReconcileChoice, SubmitOutcome};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, RepositoryError>>;

/// Requests the repository actor processes, one at a time, in arrival order.
///
/// `Update`, `MarkAsSold`, and `Resolve` with the mark-as-sold choice reply
/// `Ok(None)` when the id matches nothing; a missing row is a no-op, not an
/// error. `Delete` likewise succeeds on absent ids.
#[derive(Debug)]
pub enum RepositoryRequest {
    /// Replace the cached list from the store. Replies with the row count.
    Load { respond_to: Response<usize> },

    /// Snapshot of the cached list, newest-first. Never calls the store.
    List { respond_to: Response<Vec<Product>> },

    /// Insert a new product without duplicate screening.
    Create {
        draft: ProductDraft,
        respond_to: Response<Product>,
    },

    /// Screen the draft's name against the cached list, then create or
    /// report the collision.
    Submit {
        draft: ProductDraft,
        respond_to: Response<SubmitOutcome>,
    },

    /// Apply the caller's decision for a previously reported collision.
    Resolve {
        existing_id: ProductId,
        draft: ProductDraft,
        choice: ReconcileChoice,
        respond_to: Response<Option<Product>>,
    },

    /// Write the `Some` fields of the patch, then patch the cache.
    Update {
        id: ProductId,
        patch: ProductPatch,
        respond_to: Response<Option<Product>>,
    },

    /// Remove the row and the cached entry.
    Delete {
        id: ProductId,
        respond_to: Response<()>,
    },

    /// Set the product's status to delivered.
    MarkAsSold {
        id: ProductId,
        respond_to: Response<Option<Product>>,
    },

    /// The retained message of the most recent failure, if any.
    LastError {
        respond_to: oneshot::Sender<Option<String>>,
    },
}
