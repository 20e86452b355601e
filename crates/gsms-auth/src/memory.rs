//! In-memory credential store, profile directory and page cache.
//!
//! Passwords are kept in plain text. Only for tests.

use async_trait::async_trait;
use gsms_cache::{CacheError, PageCache};
use gsms_models::{IdentityId, UserProfile, UserRole};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::session::SessionToken;
use crate::store::{
    ALREADY_REGISTERED_MESSAGE, CredentialProvider, CredentialStore, INVALID_LOGIN_MESSAGE,
    Identity, ProfileDirectory, SignUpMetadata, check_new_password, normalize_email,
};

#[derive(Debug)]
struct StoredIdentity {
    id: IdentityId,
    email: String,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    identities: HashMap<String, StoredIdentity>,
    sessions: HashMap<String, IdentityId>,
    profiles: HashMap<IdentityId, UserProfile>,
    unavailable: bool,
    profile_lookups_fail: bool,
    sign_out_fails: bool,
}

impl State {
    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable(anyhow::anyhow!("memory store offline")));
        }
        Ok(())
    }

    fn open_session(&mut self, id: IdentityId) -> SessionToken {
        let token = SessionToken::generate();
        self.sessions.insert(token.digest(), id);
        token
    }
}

/// Shared state behind every handle. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an identity without a profile.
    pub fn add_identity(&self, email: &str, password: &str) -> IdentityId {
        let id = IdentityId::new();
        let email = normalize_email(email);
        self.lock().identities.insert(
            email.clone(),
            StoredIdentity {
                id,
                email,
                password: password.to_string(),
            },
        );
        id
    }

    pub fn add_profile(&self, identity_id: IdentityId, role: UserRole, full_name: &str) {
        self.lock()
            .profiles
            .insert(identity_id, UserProfile::new(identity_id, role, full_name));
    }

    pub fn profile(&self, identity_id: IdentityId) -> Option<UserProfile> {
        self.lock().profiles.get(&identity_id).cloned()
    }

    /// Number of live sessions across all identities.
    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn fail_profile_lookups(&self, fail: bool) {
        self.lock().profile_lookups_fail = fail;
    }

    /// Makes `sign_out` fail after the handle has forgotten its token, leaving
    /// the session behind.
    pub fn fail_sign_out(&self, fail: bool) {
        self.lock().sign_out_fails = fail;
    }
}

impl CredentialProvider for MemoryBackend {
    fn scoped(&self, token: Option<SessionToken>) -> Box<dyn CredentialStore> {
        Box::new(MemoryCredentialStore {
            backend: self.clone(),
            token,
        })
    }
}

#[async_trait]
impl ProfileDirectory for MemoryBackend {
    async fn get_by_identity(
        &self,
        identity_id: IdentityId,
    ) -> Result<Option<UserProfile>, StoreError> {
        let state = self.lock();
        state.check_available()?;
        if state.profile_lookups_fail {
            return Err(StoreError::Unavailable(anyhow::anyhow!("profile lookup failed")));
        }
        Ok(state.profiles.get(&identity_id).cloned())
    }
}

pub struct MemoryCredentialStore {
    backend: MemoryBackend,
    token: Option<SessionToken>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity, StoreError> {
        let mut state = self.backend.lock();
        state.check_available()?;

        let identity = match state.identities.get(&normalize_email(email)) {
            Some(stored) if stored.password == password => Identity {
                id: stored.id,
                email: stored.email.clone(),
            },
            _ => return Err(StoreError::credential(INVALID_LOGIN_MESSAGE)),
        };

        if let Some(previous) = self.token.take() {
            state.sessions.remove(&previous.digest());
        }
        self.token = Some(state.open_session(identity.id));

        Ok(identity)
    }

    async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<Identity, StoreError> {
        check_new_password(password)?;

        let mut state = self.backend.lock();
        state.check_available()?;

        let email = normalize_email(email);
        if state.identities.contains_key(&email) {
            return Err(StoreError::credential(ALREADY_REGISTERED_MESSAGE));
        }

        let identity = Identity {
            id: IdentityId::new(),
            email: email.clone(),
        };
        state.identities.insert(
            email.clone(),
            StoredIdentity {
                id: identity.id,
                email,
                password: password.to_string(),
            },
        );
        state.profiles.insert(
            identity.id,
            UserProfile::new(
                identity.id,
                metadata.role_claim.as_role(),
                metadata.display_name.clone(),
            ),
        );

        if let Some(previous) = self.token.take() {
            state.sessions.remove(&previous.digest());
        }
        self.token = Some(state.open_session(identity.id));

        Ok(identity)
    }

    async fn sign_out(&mut self) -> Result<(), StoreError> {
        let Some(token) = self.token.take() else {
            return Ok(());
        };

        let mut state = self.backend.lock();
        if state.sign_out_fails {
            return Err(StoreError::Unavailable(anyhow::anyhow!("sign-out failed")));
        }
        state.sessions.remove(&token.digest());
        Ok(())
    }

    async fn current_identity(&self) -> Result<Option<Identity>, StoreError> {
        let Some(token) = &self.token else {
            return Ok(None);
        };

        let state = self.backend.lock();
        state.check_available()?;

        let identity = state.sessions.get(&token.digest()).and_then(|id| {
            state.identities.values().find(|stored| stored.id == *id).map(|stored| Identity {
                id: stored.id,
                email: stored.email.clone(),
            })
        });
        Ok(identity)
    }

    fn session(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }
}

/// Page cache that counts invalidations.
#[derive(Debug, Default)]
pub struct CountingPageCache {
    invalidations: AtomicU64,
    failing: AtomicBool,
}

impl CountingPageCache {
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::SeqCst)
    }

    /// Makes every following invalidation fail.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageCache for CountingPageCache {
    async fn invalidate_site(&self) -> Result<u64, CacheError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::Connection(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "cache offline",
            ))));
        }
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(0)
    }
}
