//! Account flows: sign-up, sign-in, and password-reset requests.
//!
//! These are the client-side halves of the auth pages. Field validation
//! happens here, before the identity provider is involved; provider failures
//! pass through unchanged.

use crate::identity::{IdentityError, IdentityProvider};
use crate::model::{SignUpProfile, UserIdentity};
use thiserror::Error;
use tracing::info;

/// Failures of an account flow, rendered as the message shown on the form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Raw sign-up form fields.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub repeat_password: String,
}

impl SignUpForm {
    /// Field checks, in the order the form reports them.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::Validation("Please enter your name".to_string()));
        }
        if self.password.len() < 6 {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if self.password != self.repeat_password {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }
}

/// Validates the form and registers the account.
///
/// Registration starts no session; the user signs in afterwards.
pub async fn sign_up(identity: &dyn IdentityProvider, form: &SignUpForm) -> Result<(), AuthError> {
    form.validate()?;
    identity
        .sign_up(
            &form.email,
            &form.password,
            SignUpProfile {
                name: form.name.clone(),
            },
        )
        .await?;
    info!(email = %form.email, "Sign-up completed");
    Ok(())
}

/// Checks both fields are present and starts a session.
pub async fn sign_in(
    identity: &dyn IdentityProvider,
    email: &str,
    password: &str,
) -> Result<UserIdentity, AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    let user = identity.sign_in(email, password).await?;
    info!(user_id = %user.id, "Sign-in completed");
    Ok(user)
}

/// Forwards a password-reset request to the provider.
pub async fn request_password_reset(
    identity: &dyn IdentityProvider,
    email: &str,
) -> Result<(), AuthError> {
    identity.reset_password_request(email).await?;
    info!(email, "Password reset requested");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MemoryIdentity;

    fn form() -> SignUpForm {
        SignUpForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter42".to_string(),
            repeat_password: "hunter42".to_string(),
        }
    }

    #[test]
    fn blank_name_is_reported_first() {
        let mut bad = form();
        bad.name = "  ".to_string();
        bad.password = "x".to_string();
        assert_eq!(
            bad.validate(),
            Err(AuthError::Validation("Please enter your name".to_string()))
        );
    }

    #[test]
    fn short_password_is_rejected() {
        let mut bad = form();
        bad.password = "12345".to_string();
        bad.repeat_password = "12345".to_string();
        assert_eq!(
            bad.validate(),
            Err(AuthError::Validation(
                "Password must be at least 6 characters".to_string()
            ))
        );
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let mut bad = form();
        bad.repeat_password = "hunter43".to_string();
        assert_eq!(
            bad.validate(),
            Err(AuthError::Validation("Passwords do not match".to_string()))
        );
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trip() {
        let identity = MemoryIdentity::new();
        sign_up(&identity, &form()).await.unwrap();

        let user = sign_in(&identity, "ada@example.com", "hunter42")
            .await
            .unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
    }

    #[tokio::test]
    async fn sign_in_requires_both_fields() {
        let identity = MemoryIdentity::new();
        let err = sign_in(&identity, "", "hunter42").await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Validation("Email and password are required".to_string())
        );
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let identity = MemoryIdentity::new();
        let err = sign_in(&identity, "ghost@example.com", "nope")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Identity(IdentityError::InvalidCredentials));
    }

    #[tokio::test]
    async fn reset_requests_reach_the_provider() {
        let identity = MemoryIdentity::new();
        request_password_reset(&identity, "ada@example.com")
            .await
            .unwrap();
        assert_eq!(identity.reset_requests(), ["ada@example.com"]);
    }
}
