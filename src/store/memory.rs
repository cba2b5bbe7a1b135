//! In-process [`RecordStore`] used by the demo and by tests.

use crate::model::{ProductId, UserId};
use crate::store::{NewProductRecord, ProductChanges, ProductRecord, RecordStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// An owner-scoped product table held in memory.
///
/// Rows keep an insertion sequence number so that `select_products` stays
/// newest-first even when two rows share a `created_at` timestamp.
///
/// For failure testing, errors can be queued with
/// [`enqueue_failure`](MemoryStore::enqueue_failure); each queued error is
/// returned by exactly one subsequent call, in order, before any real work
/// happens.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<StoredRow>,
    next_seq: u64,
    failures: VecDeque<StoreError>,
}

#[derive(Debug)]
struct StoredRow {
    record: ProductRecord,
    seq: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error to be returned by the next store call.
    pub fn enqueue_failure(&self, err: StoreError) {
        self.inner().failures.push_back(err);
    }

    /// Number of rows across all owners.
    pub fn row_count(&self) -> usize {
        self.inner().rows.len()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking test held it; the data is
        // still a plain Vec, so recover rather than propagate.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_failure(&self) -> Option<StoreError> {
        self.inner().failures.pop_front()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select_products(&self, owner: UserId) -> Result<Vec<ProductRecord>, StoreError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let inner = self.inner();
        let mut matched: Vec<&StoredRow> = inner
            .rows
            .iter()
            .filter(|row| row.record.user_id == owner)
            .collect();
        matched.sort_by(|a, b| {
            b.record
                .created_at
                .cmp(&a.record.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(matched.into_iter().map(|row| row.record.clone()).collect())
    }

    async fn insert_product(
        &self,
        owner: UserId,
        row: NewProductRecord,
    ) -> Result<ProductRecord, StoreError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut inner = self.inner();
        let record = ProductRecord {
            id: ProductId(Uuid::new_v4()),
            user_id: owner,
            name: row.name,
            selling_price: row.selling_price,
            purchase_price: row.purchase_price,
            status: row.status,
            quantity: row.quantity,
            category: row.category,
            created_at: Utc::now(),
            updated_at: None,
        };
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.rows.push(StoredRow {
            record: record.clone(),
            seq,
        });
        debug!(id = %record.id, owner = %owner, "Row inserted");
        Ok(record)
    }

    async fn update_product(
        &self,
        owner: UserId,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<(), StoreError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut inner = self.inner();
        let Some(row) = inner
            .rows
            .iter_mut()
            .find(|row| row.record.id == id && row.record.user_id == owner)
        else {
            // Zero rows matched; the table reports success either way.
            debug!(%id, owner = %owner, "Update matched no row");
            return Ok(());
        };
        if let Some(name) = changes.name {
            row.record.name = name;
        }
        if let Some(price) = changes.selling_price {
            row.record.selling_price = price;
        }
        if let Some(purchase) = changes.purchase_price {
            row.record.purchase_price = purchase;
        }
        if let Some(status) = changes.status {
            row.record.status = status;
        }
        if let Some(quantity) = changes.quantity {
            row.record.quantity = quantity;
        }
        row.record.updated_at = Some(changes.updated_at);
        Ok(())
    }

    async fn delete_product(&self, owner: UserId, id: ProductId) -> Result<(), StoreError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut inner = self.inner();
        inner
            .rows
            .retain(|row| !(row.record.id == id && row.record.user_id == owner));
        Ok(())
    }
}
