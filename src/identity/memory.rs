//! In-process [`IdentityProvider`] used by the demo and by tests.

use crate::identity::{IdentityError, IdentityProvider, SessionEvent};
use crate::model::{SignUpProfile, UserId, UserIdentity};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 16;

/// A self-contained account registry standing in for a hosted auth service.
///
/// Passwords are held verbatim: this type models the provider's observable
/// behavior for the rest of the system, it is not an authentication
/// implementation. Reset requests are recorded so tests can observe them.
pub struct MemoryIdentity {
    inner: Mutex<Inner>,
    events: broadcast::Sender<SessionEvent>,
}

#[derive(Default)]
struct Inner {
    /// Keyed by lowercased email.
    accounts: HashMap<String, Account>,
    current: Option<UserIdentity>,
    reset_requests: Vec<String>,
}

struct Account {
    id: UserId,
    email: String,
    name: String,
    password: String,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Mutex::new(Inner::default()),
            events,
        }
    }

    /// Emails that asked for a password reset, oldest first.
    pub fn reset_requests(&self) -> Vec<String> {
        self.inner().reset_requests.clone()
    }

    /// Re-issues the current session's token, the way a hosted provider does
    /// on a schedule. Emits [`SessionEvent::TokenRefreshed`]; without a
    /// session there is nothing to refresh and nothing is emitted.
    pub fn refresh_session(&self) {
        if self.inner().current.is_some() {
            debug!("Session token refreshed");
            self.emit(SessionEvent::TokenRefreshed);
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine; senders do not require listeners.
        let _ = self.events.send(event);
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.inner().current.clone()
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: SignUpProfile,
    ) -> Result<(), IdentityError> {
        if email.is_empty() || !email.contains('@') {
            return Err(IdentityError::InvalidEmail);
        }
        let key = email.to_lowercase();
        let mut inner = self.inner();
        if inner.accounts.contains_key(&key) {
            return Err(IdentityError::EmailTaken);
        }
        inner.accounts.insert(
            key,
            Account {
                id: UserId(Uuid::new_v4()),
                email: email.to_string(),
                name: profile.name,
                password: password.to_string(),
            },
        );
        info!(email, "Account registered");
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, IdentityError> {
        let key = email.to_lowercase();
        let user = {
            let mut inner = self.inner();
            let account = inner
                .accounts
                .get(&key)
                .filter(|account| account.password == password)
                .ok_or(IdentityError::InvalidCredentials)?;
            let user = UserIdentity {
                id: account.id,
                email: account.email.clone(),
                name: Some(account.name.clone()),
            };
            inner.current = Some(user.clone());
            user
        };
        info!(user_id = %user.id, "Session started");
        self.emit(SessionEvent::SignedIn(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let ended = self.inner().current.take();
        match ended {
            Some(user) => {
                info!(user_id = %user.id, "Session ended");
                self.emit(SessionEvent::SignedOut);
            }
            None => debug!("Sign-out without a session"),
        }
        Ok(())
    }

    async fn reset_password_request(&self, email: &str) -> Result<(), IdentityError> {
        self.inner().reset_requests.push(email.to_string());
        info!(email, "Password reset requested");
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> SignUpProfile {
        SignUpProfile {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let identity = MemoryIdentity::new();
        identity
            .sign_up("ada@example.com", "hunter42", profile("Ada"))
            .await
            .unwrap();

        // Registration alone starts no session.
        assert!(identity.current_user().await.is_none());

        let user = identity.sign_in("ada@example.com", "hunter42").await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(identity.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn sign_in_is_email_case_insensitive() {
        let identity = MemoryIdentity::new();
        identity
            .sign_up("Ada@Example.com", "hunter42", profile("Ada"))
            .await
            .unwrap();

        let user = identity.sign_in("ada@example.com", "hunter42").await.unwrap();
        // The address keeps the casing it was registered with.
        assert_eq!(user.email, "Ada@Example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let identity = MemoryIdentity::new();
        identity
            .sign_up("ada@example.com", "hunter42", profile("Ada"))
            .await
            .unwrap();

        let err = identity
            .sign_up("ADA@example.com", "other", profile("Imposter"))
            .await
            .unwrap_err();
        assert_eq!(err, IdentityError::EmailTaken);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let identity = MemoryIdentity::new();
        identity
            .sign_up("ada@example.com", "hunter42", profile("Ada"))
            .await
            .unwrap();

        let err = identity
            .sign_in("ada@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err, IdentityError::InvalidCredentials);
        assert!(identity.current_user().await.is_none());
    }

    #[tokio::test]
    async fn session_events_reach_subscribers() {
        let identity = MemoryIdentity::new();
        let mut events = identity.subscribe();
        identity
            .sign_up("ada@example.com", "hunter42", profile("Ada"))
            .await
            .unwrap();

        let user = identity.sign_in("ada@example.com", "hunter42").await.unwrap();
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedIn(user));

        identity.sign_out().await.unwrap();
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut);
    }

    #[tokio::test]
    async fn token_refresh_is_broadcast_mid_session() {
        let identity = MemoryIdentity::new();
        identity
            .sign_up("ada@example.com", "hunter42", profile("Ada"))
            .await
            .unwrap();
        identity.sign_in("ada@example.com", "hunter42").await.unwrap();

        let mut events = identity.subscribe();
        identity.refresh_session();
        assert_eq!(events.recv().await.unwrap(), SessionEvent::TokenRefreshed);

        // No session, no refresh
        identity.sign_out().await.unwrap();
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut);
        identity.refresh_session();
        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn sign_out_without_session_emits_nothing() {
        let identity = MemoryIdentity::new();
        let mut events = identity.subscribe();

        identity.sign_out().await.unwrap();

        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn reset_requests_succeed_for_unknown_emails() {
        let identity = MemoryIdentity::new();
        identity
            .reset_password_request("nobody@example.com")
            .await
            .unwrap();
        assert_eq!(identity.reset_requests(), ["nobody@example.com"]);
    }
}
