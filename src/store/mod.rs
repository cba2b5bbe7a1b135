//! # Record Store
//!
//! The owner-scoped table abstraction the product repository persists into.
//!
//! The store speaks in row types whose fields match the `products` table
//! columns (`selling_price`, `purchase_price`, ...); translating between the
//! domain model's `price` and the column name is the repository's job, not
//! the store's. Every operation is scoped by the owning [`UserId`]: a caller
//! can never read or touch another owner's rows.

pub mod memory;

pub use memory::MemoryStore;

use crate::model::{ProductId, ProductStatus, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures a store call can surface.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The store could not be reached or answered with a transport failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The row violated a table constraint.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The row exists but belongs to a different owner.
    #[error("permission denied for this row")]
    PermissionDenied,
}

/// A full row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub user_id: UserId,
    pub name: String,
    pub selling_price: f64,
    pub purchase_price: f64,
    pub status: ProductStatus,
    pub quantity: u32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Column values for an insert; `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductRecord {
    pub name: String,
    pub selling_price: f64,
    pub purchase_price: f64,
    pub status: ProductStatus,
    pub quantity: u32,
    pub category: Option<String>,
}

/// Column updates for an existing row; only `Some` columns are written.
///
/// `updated_at` is unconditional: every update stamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub selling_price: Option<f64>,
    pub purchase_price: Option<f64>,
    pub status: Option<ProductStatus>,
    pub quantity: Option<u32>,
    pub updated_at: DateTime<Utc>,
}

/// The persistent, owner-scoped `products` table.
///
/// Updates and deletes that match no row succeed silently; the table treats
/// "row absent" the same as "zero rows affected".
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All rows for `owner`, newest-first by `created_at`.
    async fn select_products(&self, owner: UserId) -> Result<Vec<ProductRecord>, StoreError>;

    /// Inserts one row and returns it with the assigned id and timestamp.
    async fn insert_product(
        &self,
        owner: UserId,
        row: NewProductRecord,
    ) -> Result<ProductRecord, StoreError>;

    /// Applies `changes` to the row with `id`, if `owner` owns it.
    async fn update_product(
        &self,
        owner: UserId,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<(), StoreError>;

    /// Removes the row with `id`, if `owner` owns it.
    async fn delete_product(&self, owner: UserId, id: ProductId) -> Result<(), StoreError>;
}
