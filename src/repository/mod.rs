//! # Product Repository Actor
//!
//! The repository owns the signed-in user's product list. It runs as a
//! message-driven actor: one task holds the in-memory sequence, processes
//! requests strictly in arrival order, and mirrors every mutation to the
//! record store before touching its own state.
//!
//! ## Structure
//!
//! - [`actor`] - [`ProductRepository`], the event loop and operation handlers
//! - [`message`] - [`RepositoryRequest`], the mailbox protocol
//! - [`reconcile`] - duplicate-name screening and resolution choices
//! - [`error`] - [`RepositoryError`], the operation failure surface
//! - [`new()`] - factory that creates the actor and its client
//!
//! ## Why an actor
//!
//! Every mutation flows through one mailbox, so two rapid submissions can
//! never interleave their screen-then-write steps: duplicate screening, the
//! store call, and the cache patch happen as one uninterrupted unit. The
//! list needs no lock because exactly one task owns it.
//!
//! ## Error state
//!
//! The actor retains the message of the most recent authentication or store
//! failure, readable via
//! [`last_error`](crate::clients::RepositoryClient::last_error). A
//! successful [`load`](crate::clients::RepositoryClient::load) clears it.
//! Validation failures are returned to the caller but never retained; they
//! belong to the submitting form, not the repository.

pub mod actor;
pub mod error;
pub mod message;
pub mod reconcile;

pub use actor::{ProductRepository, RepositoryContext};
pub use error::RepositoryError;
pub use message::RepositoryRequest;
pub use reconcile::{check_duplicate, DuplicateCheck, ReconcileChoice, SubmitOutcome};

use crate::clients::RepositoryClient;
use tokio::sync::mpsc;

/// Creates a new repository actor and its client.
pub fn new(capacity: usize) -> (ProductRepository, RepositoryClient) {
    let (sender, receiver) = mpsc::channel(capacity);
    let actor = ProductRepository::new(receiver);
    let client = RepositoryClient::new(sender);
    (actor, client)
}
