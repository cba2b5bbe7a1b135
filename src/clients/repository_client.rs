//! # Repository Client
//!
//! The async handle callers use to talk to the repository actor. Requests
//! travel over the actor's mpsc mailbox and results come back over oneshot
//! channels; the client is cheap to clone and share across tasks.

use crate::model::{Product, ProductDraft, ProductId, ProductPatch};
use crate::repository::error::RepositoryError;
use crate::repository::message::RepositoryRequest;
use crate::repository::reconcile::{ReconcileChoice, SubmitOutcome};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the product repository actor.
#[derive(Clone)]
pub struct RepositoryClient {
    sender: mpsc::Sender<RepositoryRequest>,
}

impl RepositoryClient {
    pub fn new(sender: mpsc::Sender<RepositoryRequest>) -> Self {
        Self { sender }
    }

    /// Replaces the cached list from the store; returns the row count.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, RepositoryError> {
        debug!("Sending load request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Load { respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// Snapshot of the cached list, newest-first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        debug!("Sending list request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::List { respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// Creates a product, bypassing duplicate screening.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        debug!("Sending create request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Create { draft, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// Submits a new product through duplicate screening.
    ///
    /// A [`SubmitOutcome::DuplicateFound`] reply means nothing was written
    /// yet; pass the returned draft to [`resolve`](Self::resolve) together
    /// with the user's choice.
    #[instrument(skip(self, draft))]
    pub async fn submit(&self, draft: ProductDraft) -> Result<SubmitOutcome, RepositoryError> {
        debug!("Sending submit request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Submit { draft, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// Applies the caller's decision for a reported name collision.
    ///
    /// Replies `Ok(None)` when marking sold and the existing product has
    /// meanwhile vanished from the cache.
    #[instrument(skip(self, draft))]
    pub async fn resolve(
        &self,
        existing_id: ProductId,
        draft: ProductDraft,
        choice: ReconcileChoice,
    ) -> Result<Option<Product>, RepositoryError> {
        debug!(?choice, "Sending resolve request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Resolve {
                existing_id,
                draft,
                choice,
                respond_to,
            })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// Writes the `Some` fields of the patch; `Ok(None)` for unknown ids.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        debug!("Sending update request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Update {
                id,
                patch,
                respond_to,
            })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// Deletes the product; absent ids succeed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        debug!("Sending delete request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Delete { id, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// Marks the product delivered.
    #[instrument(skip(self))]
    pub async fn mark_as_sold(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        debug!("Sending mark-as-sold request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::MarkAsSold { id, respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)?
    }

    /// The retained message of the most recent failure, if any.
    #[instrument(skip(self))]
    pub async fn last_error(&self) -> Result<Option<String>, RepositoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::LastError { respond_to })
            .await
            .map_err(|_| RepositoryError::Closed)?;
        response.await.map_err(|_| RepositoryError::Dropped)
    }
}
