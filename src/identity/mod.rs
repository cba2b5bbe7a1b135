//! # Identity Provider
//!
//! The external authentication/session service the tracker consumes.
//!
//! Session lifecycle belongs entirely to the provider; the tracker only asks
//! "who is signed in right now" and reacts to the [`SessionEvent`] stream.
//! The repository resolves the current user through this seam on every
//! operation rather than reading any ambient global, which keeps ownership
//! scoping explicit and testable.

pub mod memory;

pub use memory::MemoryIdentity;

use crate::model::{SignUpProfile, UserIdentity};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

/// Failures the identity provider can surface.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered")]
    EmailTaken,

    #[error("Unable to validate email address: invalid format")]
    InvalidEmail,

    /// The provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Session lifecycle notifications, broadcast to all subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(UserIdentity),
    SignedOut,
    TokenRefreshed,
}

/// The external authentication/session service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The user owning the current session, if any.
    async fn current_user(&self) -> Option<UserIdentity>;

    /// Registers an account. Does not start a session; the caller signs in
    /// separately once the account is confirmed.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: SignUpProfile,
    ) -> Result<(), IdentityError>;

    /// Starts a session for the given credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, IdentityError>;

    /// Ends the current session. Succeeds when no session exists.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Requests a password-reset message. Succeeds for unknown addresses so
    /// that callers cannot probe which emails have accounts.
    async fn reset_password_request(&self, email: &str) -> Result<(), IdentityError>;

    /// Subscribes to session lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}
