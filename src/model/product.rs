//! The product entity and its create/update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for products, assigned by the record store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a product.
///
/// Any status may be set to any other via a direct update; the only
/// system-driven transition is `returned`/`failed` to `delivered`, performed
/// by mark-as-sold and by duplicate resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Pending,
    Delivered,
    Returned,
    Failed,
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Delivered => "delivered",
            ProductStatus::Returned => "returned",
            ProductStatus::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// A tracked product owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Selling price.
    pub price: f64,
    /// Cost to acquire.
    pub purchase_price: f64,
    pub status: ProductStatus,
    pub quantity: u32,
    /// Free text, carried through but unused by any logic.
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Margin of a sale at the listed price; negative when sold at a loss.
    pub fn profit(&self) -> f64 {
        self.price - self.purchase_price
    }
}

/// User-entered fields for a new product, prior to validation.
///
/// The prices are optional here because the form may leave them blank;
/// [`validate`](ProductDraft::validate) enforces their presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: Option<f64>,
    pub purchase_price: Option<f64>,
    pub status: ProductStatus,
    pub quantity: Option<u32>,
    pub category: Option<String>,
}

impl ProductDraft {
    /// Creates a draft with both prices filled in and a `pending` status.
    pub fn new(name: impl Into<String>, price: f64, purchase_price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            purchase_price: Some(purchase_price),
            status: ProductStatus::Pending,
            quantity: None,
            category: None,
        }
    }

    /// Checks the required fields and returns `(price, purchase_price)`.
    ///
    /// The name must be non-blank and both prices present. The name itself is
    /// kept as entered; only the blank check uses the trimmed form.
    pub fn validate(&self) -> Result<(f64, f64), String> {
        match (self.price, self.purchase_price) {
            (Some(price), Some(purchase)) if !self.name.trim().is_empty() => Ok((price, purchase)),
            _ => Err("Name, selling price, and purchase price are required".to_string()),
        }
    }

    /// Quantity to persist: a missing or zero quantity becomes 1.
    pub fn quantity_or_default(&self) -> u32 {
        self.quantity.filter(|q| *q > 0).unwrap_or(1)
    }
}

/// Partial update payload; only `Some` fields are written.
///
/// `category` is deliberately absent: it is settable at creation only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub purchase_price: Option<f64>,
    pub status: Option<ProductStatus>,
    pub quantity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_complete_draft() {
        let draft = ProductDraft::new("Walnut Desk", 250.0, 180.0);
        assert_eq!(draft.validate(), Ok((250.0, 180.0)));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let draft = ProductDraft::new("   ", 250.0, 180.0);
        let err = draft.validate().unwrap_err();
        assert_eq!(err, "Name, selling price, and purchase price are required");
    }

    #[test]
    fn validate_rejects_missing_prices() {
        let mut draft = ProductDraft::new("Walnut Desk", 250.0, 180.0);
        draft.purchase_price = None;
        assert!(draft.validate().is_err());

        let mut draft = ProductDraft::new("Walnut Desk", 250.0, 180.0);
        draft.price = None;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn quantity_defaults_to_one() {
        let mut draft = ProductDraft::new("Walnut Desk", 250.0, 180.0);
        assert_eq!(draft.quantity_or_default(), 1);

        draft.quantity = Some(0);
        assert_eq!(draft.quantity_or_default(), 1);

        draft.quantity = Some(4);
        assert_eq!(draft.quantity_or_default(), 4);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ProductStatus::Delivered).unwrap();
        assert_eq!(json, "\"delivered\"");
        let back: ProductStatus = serde_json::from_str("\"returned\"").unwrap();
        assert_eq!(back, ProductStatus::Returned);
    }
}
