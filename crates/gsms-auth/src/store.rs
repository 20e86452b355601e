//! Seams between the session gate and the systems holding identities,
//! sessions and profiles.

use async_trait::async_trait;
use gsms_models::{IdentityId, RoleClaim, UserProfile};

use crate::error::StoreError;
use crate::session::SessionToken;

pub const INVALID_LOGIN_MESSAGE: &str = "Invalid login credentials";
pub const ALREADY_REGISTERED_MESSAGE: &str = "User already registered";
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
}

/// Attributes stored on the profile created at sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpMetadata {
    pub role_claim: RoleClaim,
    pub display_name: String,
}

/// Credential store bound to one request's session.
///
/// A successful `sign_in` or `sign_up` leaves the handle holding the new
/// session, readable through [`session`](Self::session). `sign_out` forgets
/// the token before contacting the backend, so the handle is anonymous
/// afterwards whatever the outcome.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity, StoreError>;

    async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<Identity, StoreError>;

    /// Revokes the current session. Succeeds when there is none.
    async fn sign_out(&mut self) -> Result<(), StoreError>;

    async fn current_identity(&self) -> Result<Option<Identity>, StoreError>;

    fn session(&self) -> Option<&SessionToken>;
}

/// Builds request-scoped credential stores.
pub trait CredentialProvider: Send + Sync {
    fn scoped(&self, token: Option<SessionToken>) -> Box<dyn CredentialStore>;
}

#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    async fn get_by_identity(&self, identity_id: IdentityId)
    -> Result<Option<UserProfile>, StoreError>;
}

/// Lowercased, trimmed form used as the lookup key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Rejects passwords the store will not accept at sign-up.
pub fn check_new_password(password: &str) -> Result<(), StoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(StoreError::credential(format!(
            "Password should be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
