//! The repository event loop and its operation handlers.

use crate::identity::IdentityProvider;
use crate::model::{
    Product, ProductDraft, ProductId, ProductPatch, ProductStatus, UserId, UserIdentity,
};
use crate::repository::error::RepositoryError;
use crate::repository::message::RepositoryRequest;
use crate::repository::reconcile::{
    check_duplicate, second_entry_name, DuplicateCheck, ReconcileChoice, SubmitOutcome,
};
use crate::store::{NewProductRecord, ProductChanges, ProductRecord, RecordStore};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// External collaborators, injected when the actor starts running.
///
/// Keeping them out of the constructor lets the system wire collaborators
/// after the client has already been handed out.
pub struct RepositoryContext {
    pub store: Arc<dyn RecordStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// The actor owning the signed-in user's product list.
///
/// State is touched only from inside [`run`](ProductRepository::run), so the
/// list and the retained error need no locking. The list is kept
/// newest-first: loads arrive pre-sorted from the store and creates prepend.
///
/// The cache remembers which user it was built for. An operation that
/// resolves a different user starts from an empty cache; the previous
/// owner's entries are never screened, patched, or listed as the new
/// user's.
pub struct ProductRepository {
    receiver: mpsc::Receiver<RepositoryRequest>,
    products: Vec<Product>,
    cache_owner: Option<UserId>,
    last_error: Option<String>,
}

impl ProductRepository {
    pub fn new(receiver: mpsc::Receiver<RepositoryRequest>) -> Self {
        Self {
            receiver,
            products: Vec::new(),
            cache_owner: None,
            last_error: None,
        }
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: RepositoryContext) {
        info!("Product repository started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RepositoryRequest::Load { respond_to } => {
                    debug!("Load");
                    let result = self.handle_load(&context).await;
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::List { respond_to } => {
                    debug!(count = self.products.len(), "List");
                    let _ = respond_to.send(Ok(self.products.clone()));
                }
                RepositoryRequest::Create { draft, respond_to } => {
                    debug!(?draft, "Create");
                    let result = self.handle_create(&context, draft).await;
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::Submit { draft, respond_to } => {
                    debug!(?draft, "Submit");
                    let result = self.handle_submit(&context, draft).await;
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::Resolve {
                    existing_id,
                    draft,
                    choice,
                    respond_to,
                } => {
                    debug!(%existing_id, ?choice, "Resolve");
                    let result = self
                        .handle_resolve(&context, existing_id, draft, choice)
                        .await;
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(%id, ?patch, "Update");
                    let result = self.handle_update(&context, id, patch).await;
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::Delete { id, respond_to } => {
                    debug!(%id, "Delete");
                    let result = self.handle_delete(&context, id).await;
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::MarkAsSold { id, respond_to } => {
                    debug!(%id, "MarkAsSold");
                    let patch = ProductPatch {
                        status: Some(ProductStatus::Delivered),
                        ..ProductPatch::default()
                    };
                    let result = self.handle_update(&context, id, patch).await;
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::LastError { respond_to } => {
                    let _ = respond_to.send(self.last_error.clone());
                }
            }
        }

        info!(count = self.products.len(), "Shutdown");
    }

    async fn handle_load(&mut self, context: &RepositoryContext) -> Result<usize, RepositoryError> {
        // A missing session skips the store entirely and leaves the retained
        // error as it was; only attempted store calls update it.
        let Some(user) = context.identity.current_user().await else {
            return Err(RepositoryError::AuthenticationRequired);
        };
        self.claim_cache(user.id);
        match context.store.select_products(user.id).await {
            Ok(rows) => {
                self.products = rows.into_iter().map(to_product).collect();
                self.last_error = None;
                info!(count = self.products.len(), "Loaded");
                Ok(self.products.len())
            }
            Err(e) => Err(self.record_failure(e.into())),
        }
    }

    async fn handle_create(
        &mut self,
        context: &RepositoryContext,
        draft: ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let row = build_row(&draft)?;
        let user = self.require_user(context).await?;
        self.claim_cache(user.id);
        match context.store.insert_product(user.id, row).await {
            Ok(record) => {
                let product = to_product(record);
                self.products.insert(0, product.clone());
                info!(id = %product.id, count = self.products.len(), "Created");
                Ok(product)
            }
            Err(e) => Err(self.record_failure(e.into())),
        }
    }

    async fn handle_submit(
        &mut self,
        context: &RepositoryContext,
        draft: ProductDraft,
    ) -> Result<SubmitOutcome, RepositoryError> {
        draft.validate().map_err(RepositoryError::Validation)?;
        // Screening must run against the submitting user's own list, so the
        // user is resolved before the scan, not at the create inside it.
        let user = self.require_user(context).await?;
        self.claim_cache(user.id);
        match check_duplicate(&self.products, &draft.name) {
            DuplicateCheck::NoDuplicate => self
                .handle_create(context, draft)
                .await
                .map(SubmitOutcome::Created),
            DuplicateCheck::Resolvable(existing) => {
                info!(id = %existing.id, name = %existing.name, "Name collision needs a decision");
                Ok(SubmitOutcome::DuplicateFound { existing, draft })
            }
            DuplicateCheck::Conflict(existing) => {
                debug!(id = %existing.id, "Name collision rejected");
                Err(RepositoryError::Validation(
                    "A product with this name already exists".to_string(),
                ))
            }
        }
    }

    async fn handle_resolve(
        &mut self,
        context: &RepositoryContext,
        existing_id: ProductId,
        draft: ProductDraft,
        choice: ReconcileChoice,
    ) -> Result<Option<Product>, RepositoryError> {
        match choice {
            ReconcileChoice::MarkAsSold => {
                // Only status and the update timestamp change; the values
                // entered on the form are discarded.
                let patch = ProductPatch {
                    status: Some(ProductStatus::Delivered),
                    ..ProductPatch::default()
                };
                self.handle_update(context, existing_id, patch).await
            }
            ReconcileChoice::CreateNew => {
                let renamed = ProductDraft {
                    name: second_entry_name(&draft.name),
                    ..draft
                };
                self.handle_create(context, renamed).await.map(Some)
            }
        }
    }

    async fn handle_update(
        &mut self,
        context: &RepositoryContext,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let user = self.require_user(context).await?;
        self.claim_cache(user.id);
        let now = Utc::now();
        let changes = ProductChanges {
            name: patch.name.clone(),
            selling_price: patch.price,
            purchase_price: patch.purchase_price,
            status: patch.status,
            quantity: patch.quantity,
            updated_at: now,
        };
        // The cache is patched only after the store confirms the write, so a
        // failed call can never leave the two diverged.
        if let Err(e) = context.store.update_product(user.id, id, changes).await {
            return Err(self.record_failure(e.into()));
        }
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            debug!(%id, "Update matched no cached product");
            return Ok(None);
        };
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(purchase) = patch.purchase_price {
            product.purchase_price = purchase;
        }
        if let Some(status) = patch.status {
            product.status = status;
        }
        if let Some(quantity) = patch.quantity {
            product.quantity = quantity;
        }
        product.updated_at = Some(now);
        info!(%id, "Updated");
        Ok(Some(product.clone()))
    }

    async fn handle_delete(
        &mut self,
        context: &RepositoryContext,
        id: ProductId,
    ) -> Result<(), RepositoryError> {
        let user = self.require_user(context).await?;
        self.claim_cache(user.id);
        if let Err(e) = context.store.delete_product(user.id, id).await {
            return Err(self.record_failure(e.into()));
        }
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() < before {
            info!(%id, count = self.products.len(), "Deleted");
        } else {
            debug!(%id, "Delete matched no cached product");
        }
        Ok(())
    }

    async fn require_user(
        &mut self,
        context: &RepositoryContext,
    ) -> Result<UserIdentity, RepositoryError> {
        match context.identity.current_user().await {
            Some(user) => Ok(user),
            None => Err(self.record_failure(RepositoryError::AuthenticationRequired)),
        }
    }

    /// Drops the cached list when it was built for a different user.
    ///
    /// After a session switch the snapshot still holds the previous owner's
    /// entries until the next operation resolves the new user; those entries
    /// must not be screened or patched on the new user's behalf. A cleared
    /// cache makes stale-id updates and deletes fall through as no-ops, the
    /// same as any other unknown id.
    fn claim_cache(&mut self, owner: UserId) {
        if self.cache_owner != Some(owner) {
            if self.cache_owner.is_some() {
                debug!(%owner, count = self.products.len(), "Clearing another user's cache");
            }
            self.products.clear();
            self.cache_owner = Some(owner);
        }
    }

    /// Retains the failure message and hands the error back for the reply.
    fn record_failure(&mut self, err: RepositoryError) -> RepositoryError {
        warn!(error = %err, "Operation failed");
        self.last_error = Some(err.to_string());
        err
    }
}

/// Maps a store row into the domain model (`selling_price` becomes `price`).
fn to_product(record: ProductRecord) -> Product {
    Product {
        id: record.id,
        name: record.name,
        price: record.selling_price,
        purchase_price: record.purchase_price,
        status: record.status,
        quantity: record.quantity,
        category: record.category,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// Validates a draft and maps it onto store columns.
fn build_row(draft: &ProductDraft) -> Result<NewProductRecord, RepositoryError> {
    let (selling_price, purchase_price) = draft.validate().map_err(RepositoryError::Validation)?;
    Ok(NewProductRecord {
        name: draft.name.clone(),
        selling_price,
        purchase_price,
        status: draft.status,
        quantity: draft.quantity_or_default(),
        category: draft.category.clone(),
    })
}
