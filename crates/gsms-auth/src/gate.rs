//! The session gate.
//!
//! Every sign-in, sign-up and sign-out of the application goes through
//! [`SessionGate`], as does every protected view (via
//! [`SessionGate::require_session`]). The gate owns no storage: it borrows a
//! request-scoped [`CredentialStore`], the [`ProfileDirectory`] and,
//! optionally, the [`PageCache`].
//!
//! Outcomes are values. Success is a [`Navigation`] the HTTP layer renders
//! as a redirect; failure is an [`AuthError`] whose message the login form
//! shows inline.

use gsms_cache::PageCache;
use gsms_models::{RoleClaim, UserProfile, UserRole};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{AuthError, StoreError};
use crate::store::{CredentialStore, Identity, ProfileDirectory, SignUpMetadata};

/// Role assumed for a signed-in identity whose profile cannot be read.
pub const FALLBACK_ROLE: UserRole = UserRole::Staff;

/// Where the caller should be sent next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Dashboard,
    Home,
}

impl Navigation {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Home => "/",
        }
    }
}

/// Who a protected view is being rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub identity: Identity,
    pub display_name: String,
    pub role: UserRole,
    /// `None` when the profile was missing or could not be read.
    pub profile: Option<UserProfile>,
}

impl SessionView {
    fn new(identity: Identity, profile: Option<UserProfile>) -> Self {
        let display_name = profile
            .as_ref()
            .map(|p| p.full_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| identity.email.clone());
        let role = profile.as_ref().map_or(FALLBACK_ROLE, |p| p.user_type);

        Self {
            identity,
            display_name,
            role,
            profile,
        }
    }

    pub fn profile_loaded(&self) -> bool {
        self.profile.is_some()
    }
}

pub struct SessionGate<'a> {
    store: &'a mut dyn CredentialStore,
    profiles: &'a dyn ProfileDirectory,
    cache: Option<&'a dyn PageCache>,
}

impl<'a> SessionGate<'a> {
    pub fn new(
        store: &'a mut dyn CredentialStore,
        profiles: &'a dyn ProfileDirectory,
        cache: Option<&'a dyn PageCache>,
    ) -> Self {
        Self {
            store,
            profiles,
            cache,
        }
    }

    /// Signs in with email and password.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Navigation, AuthError> {
        let identity = self.sign_in(email, password).await?;
        info!(identity_id = %identity.id, "Signed in");

        self.invalidate_site().await;
        Ok(Navigation::Dashboard)
    }

    /// Creates an identity and its profile, and signs it in.
    #[instrument(skip(self, password))]
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        role_claim: RoleClaim,
        display_name: &str,
    ) -> Result<Navigation, AuthError> {
        let metadata = SignUpMetadata {
            role_claim,
            display_name: display_name.to_string(),
        };

        let identity = self
            .store
            .sign_up(email, password, &metadata)
            .await
            .map_err(|err| surface(err, "sign-up"))?;
        info!(identity_id = %identity.id, role = %role_claim, "Registered");

        self.invalidate_site().await;
        Ok(Navigation::Dashboard)
    }

    /// Signs in and checks that the stored role is the one claimed.
    ///
    /// When the role differs or cannot be read, the session just created is
    /// revoked before returning [`AuthError::RoleMismatch`].
    #[instrument(skip(self, password))]
    pub async fn authenticate_with_role(
        &mut self,
        email: &str,
        password: &str,
        role_claim: RoleClaim,
    ) -> Result<Navigation, AuthError> {
        let identity = self.sign_in(email, password).await?;

        let verified = match self.profiles.get_by_identity(identity.id).await {
            Ok(Some(profile)) => {
                let matches = role_claim.matches(profile.user_type);
                if !matches {
                    debug!(
                        identity_id = %identity.id,
                        stored = %profile.user_type,
                        "Stored role differs from claim"
                    );
                }
                matches
            }
            Ok(None) => {
                warn!(identity_id = %identity.id, "No profile for signed-in identity");
                false
            }
            Err(err) => {
                warn!(identity_id = %identity.id, error = %err, "Profile lookup failed");
                false
            }
        };

        if !verified {
            self.revoke().await;
            return Err(AuthError::RoleMismatch);
        }

        info!(identity_id = %identity.id, role = %role_claim, "Signed in with role");
        self.invalidate_site().await;
        Ok(Navigation::Dashboard)
    }

    /// Signs out. Safe to call with no session; store failures are logged.
    #[instrument(skip(self))]
    pub async fn deauthenticate(&mut self) -> Navigation {
        self.revoke().await;
        self.invalidate_site().await;
        Navigation::Home
    }

    /// Resolves the caller of a protected view, or the redirect to send an
    /// anonymous caller to.
    #[instrument(skip(self))]
    pub async fn require_session(&self) -> Result<SessionView, Navigation> {
        let identity = match self.store.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Err(Navigation::Home),
            Err(err) => {
                warn!(error = %err, "Session lookup failed");
                return Err(Navigation::Home);
            }
        };

        let profile = match self.profiles.get_by_identity(identity.id).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(identity_id = %identity.id, error = %err, "Profile lookup failed");
                None
            }
        };

        Ok(SessionView::new(identity, profile))
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.store
            .sign_in(email, password)
            .await
            .map_err(|err| surface(err, "sign-in"))
    }

    async fn revoke(&mut self) {
        if let Err(err) = self.store.sign_out().await {
            error!(error = %err, "Failed to revoke session");
        }
    }

    async fn invalidate_site(&self) {
        let Some(cache) = self.cache else {
            return;
        };

        match cache.invalidate_site().await {
            Ok(removed) => debug!(cache.removed = removed, "Page cache invalidated"),
            Err(err) => warn!(error = %err, "Failed to invalidate page cache"),
        }
    }
}

fn surface(err: StoreError, operation: &'static str) -> AuthError {
    if let StoreError::Unavailable(cause) = &err {
        error!(operation, error = %format!("{:#}", cause), "Credential store unavailable");
    }
    err.into()
}
