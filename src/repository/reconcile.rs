//! Duplicate-name screening for new product submissions.
//!
//! A user should not silently end up with two unrelated entries sharing a
//! name unless the earlier one failed or was returned. Screening runs inside
//! the repository actor at submission time, against the cached list.

use crate::model::{Product, ProductDraft, ProductStatus};

/// Outcome of screening a submission against the cached product list.
#[derive(Debug, Clone, PartialEq)]
pub enum DuplicateCheck {
    /// No existing product shares the name.
    NoDuplicate,
    /// A returned or failed product shares the name; the caller must choose
    /// between marking it sold and creating a renamed entry.
    Resolvable(Product),
    /// A pending or delivered product shares the name; the submission is
    /// rejected outright.
    Conflict(Product),
}

/// The caller's decision for a resolvable duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileChoice {
    /// Mark the existing entry delivered; the newly entered values are
    /// discarded.
    MarkAsSold,
    /// Keep the existing entry and create a renamed one carrying the newly
    /// entered values.
    CreateNew,
}

/// Reply to a submission: either a stored product or a pending decision.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Product),
    /// The draft collided with `existing`; resolve with
    /// [`resolve`](crate::clients::RepositoryClient::resolve), passing the
    /// draft back unchanged.
    DuplicateFound {
        existing: Product,
        draft: ProductDraft,
    },
}

/// Scans `products` for an entry named `name` under case-insensitive
/// comparison. The first match wins; with a newest-first list that is the
/// most recently created entry.
pub fn check_duplicate(products: &[Product], name: &str) -> DuplicateCheck {
    let wanted = name.to_lowercase();
    let Some(existing) = products.iter().find(|p| p.name.to_lowercase() == wanted) else {
        return DuplicateCheck::NoDuplicate;
    };
    match existing.status {
        ProductStatus::Returned | ProductStatus::Failed => {
            DuplicateCheck::Resolvable(existing.clone())
        }
        ProductStatus::Pending | ProductStatus::Delivered => {
            DuplicateCheck::Conflict(existing.clone())
        }
    }
}

/// Label for the renamed entry of a resolved duplicate.
///
/// The suffix is a fixed literal. A third entry with the same base name
/// produces the same "#2" label again; whether that submission even gets
/// this far depends on the status of the entry the screen matches first.
pub fn second_entry_name(name: &str) -> String {
    format!("{name} #2")
}
