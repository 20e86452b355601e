//! PostgreSQL-backed credential store and profile directory.
//!
//! Identities carry a bcrypt hash of the password. Sessions are rows keyed
//! by the SHA-256 digest of the token handed to the client.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use gsms_core::password::{hash_password, verify_password};
use gsms_models::{IdentityId, UserProfile};
use sqlx::PgPool;
use std::sync::OnceLock;
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::session::SessionToken;
use crate::store::{
    ALREADY_REGISTERED_MESSAGE, CredentialProvider, CredentialStore, INVALID_LOGIN_MESSAGE,
    Identity, ProfileDirectory, SignUpMetadata, check_new_password, normalize_email,
};

static MISSING_IDENTITY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash checked when the email is unknown, so a miss costs the same bcrypt
/// work as a wrong password.
fn missing_identity_hash() -> Option<&'static str> {
    MISSING_IDENTITY_HASH
        .get_or_init(|| hash_password("gsms-missing-identity").ok())
        .as_deref()
}

#[derive(Clone)]
pub struct PgCredentialProvider {
    pool: PgPool,
    session_ttl: Duration,
}

impl PgCredentialProvider {
    pub fn new(pool: PgPool, session_ttl: Duration) -> Self {
        Self { pool, session_ttl }
    }
}

impl CredentialProvider for PgCredentialProvider {
    fn scoped(&self, token: Option<SessionToken>) -> Box<dyn CredentialStore> {
        Box::new(PgCredentialStore {
            pool: self.pool.clone(),
            session_ttl: self.session_ttl,
            token,
        })
    }
}

pub struct PgCredentialStore {
    pool: PgPool,
    session_ttl: Duration,
    token: Option<SessionToken>,
}

#[derive(sqlx::FromRow)]
struct IdentityWithHash {
    id: IdentityId,
    email: String,
    password_hash: String,
}

impl PgCredentialStore {
    async fn open_session<'e, E>(&self, executor: E, id: IdentityId) -> Result<SessionToken, StoreError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let token = SessionToken::generate();

        sqlx::query(
            "INSERT INTO sessions (token_hash, identity_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token.digest())
        .bind(id)
        .bind(Utc::now() + self.session_ttl)
        .execute(executor)
        .await?;

        Ok(token)
    }

    async fn drop_previous_session(&mut self) -> Result<(), StoreError> {
        if let Some(previous) = self.token.take() {
            sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
                .bind(previous.digest())
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self, password))]
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity, StoreError> {
        let stored = sqlx::query_as::<_, IdentityWithHash>(
            "SELECT id, email, password_hash FROM identities WHERE email = $1",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        let Some(stored) = stored else {
            if let Some(hash) = missing_identity_hash() {
                let _ = verify_password(password, hash);
            }
            return Err(StoreError::credential(INVALID_LOGIN_MESSAGE));
        };

        let is_valid =
            verify_password(password, &stored.password_hash).map_err(StoreError::Unavailable)?;
        if !is_valid {
            return Err(StoreError::credential(INVALID_LOGIN_MESSAGE));
        }

        self.drop_previous_session().await?;
        let token = self.open_session(&self.pool, stored.id).await?;
        self.token = Some(token);

        debug!(identity_id = %stored.id, "Session opened");

        Ok(Identity {
            id: stored.id,
            email: stored.email,
        })
    }

    /// Identity, profile and session are written in one transaction.
    #[instrument(skip(self, password))]
    async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        metadata: &SignUpMetadata,
    ) -> Result<Identity, StoreError> {
        check_new_password(password)?;
        let password_hash = hash_password(password).map_err(StoreError::Unavailable)?;

        let mut tx = self.pool.begin().await?;

        let identity = sqlx::query_as::<_, Identity>(
            "INSERT INTO identities (email, password_hash) VALUES ($1, $2)
             ON CONFLICT (email) DO NOTHING
             RETURNING id, email",
        )
        .bind(normalize_email(email))
        .bind(&password_hash)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::credential(ALREADY_REGISTERED_MESSAGE))?;

        sqlx::query("INSERT INTO user_profiles (user_id, user_type, full_name) VALUES ($1, $2, $3)")
            .bind(identity.id)
            .bind(metadata.role_claim.as_role())
            .bind(metadata.display_name.trim())
            .execute(&mut *tx)
            .await?;

        let token = self.open_session(&mut *tx, identity.id).await?;

        tx.commit().await?;

        self.drop_previous_session().await?;
        self.token = Some(token);

        debug!(identity_id = %identity.id, "Identity registered");

        Ok(identity)
    }

    #[instrument(skip(self))]
    async fn sign_out(&mut self) -> Result<(), StoreError> {
        let Some(token) = self.token.take() else {
            return Ok(());
        };

        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token.digest())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn current_identity(&self) -> Result<Option<Identity>, StoreError> {
        let Some(token) = &self.token else {
            return Ok(None);
        };

        let identity = sqlx::query_as::<_, Identity>(
            "SELECT i.id, i.email
             FROM sessions s
             JOIN identities i ON i.id = s.identity_id
             WHERE s.token_hash = $1 AND s.expires_at > NOW()",
        )
        .bind(token.digest())
        .fetch_optional(&self.pool)
        .await?;

        Ok(identity)
    }

    fn session(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }
}

#[derive(Clone)]
pub struct PgProfileDirectory {
    pool: PgPool,
}

impl PgProfileDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileDirectory for PgProfileDirectory {
    #[instrument(skip(self))]
    async fn get_by_identity(
        &self,
        identity_id: IdentityId,
    ) -> Result<Option<UserProfile>, StoreError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT id, user_id, user_type, full_name, phone_number, profile_image_url,
                    date_of_birth, gender, address, created_at, updated_at
             FROM user_profiles
             WHERE user_id = $1",
        )
        .bind(identity_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}

/// Deletes sessions past their expiry. Returns how many were removed.
#[instrument(skip(pool))]
pub async fn purge_expired_sessions(pool: &PgPool) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsms_models::{RoleClaim, UserRole};

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.unwrap();
        sqlx::migrate!("../../migrations").run(&pool).await.unwrap();
        pool
    }

    fn unique_email() -> String {
        format!("pg-{}@example.com", uuid::Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore = "requires Postgres"]
    async fn test_sign_up_then_sign_in_round_trip() {
        let pool = pool().await;
        let provider = PgCredentialProvider::new(pool.clone(), Duration::hours(1));
        let directory = PgProfileDirectory::new(pool);
        let email = unique_email();

        let metadata = SignUpMetadata {
            role_claim: RoleClaim::Parent,
            display_name: "Efua Asante".to_string(),
        };
        let mut store = provider.scoped(None);
        let created = store.sign_up(&email, "secret1", &metadata).await.unwrap();
        assert_eq!(store.current_identity().await.unwrap(), Some(created.clone()));

        let profile = directory.get_by_identity(created.id).await.unwrap().unwrap();
        assert_eq!(profile.user_type, UserRole::Parent);
        assert_eq!(profile.full_name, "Efua Asante");

        let mut other = provider.scoped(None);
        let err = other.sign_up(&email, "secret2", &metadata).await.unwrap_err();
        assert_eq!(err.to_string(), "User already registered");

        let signed_in = other.sign_in(&email.to_uppercase(), "secret1").await.unwrap();
        assert_eq!(signed_in.id, created.id);

        other.sign_out().await.unwrap();
        other.sign_out().await.unwrap();
        assert!(other.current_identity().await.unwrap().is_none());
    }

    #[test]
    fn test_missing_identity_hash_never_matches() {
        let hash = missing_identity_hash().unwrap();
        assert!(hash.starts_with("$2b$12$"));
        assert!(!verify_password("secret1", hash).unwrap());
    }

    #[tokio::test]
    #[ignore = "requires Postgres"]
    async fn test_unknown_email_rejected_like_wrong_password() {
        let pool = pool().await;
        let provider = PgCredentialProvider::new(pool, Duration::hours(1));

        let mut store = provider.scoped(None);
        let err = store.sign_in(&unique_email(), "secret1").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(store.session().is_none());
    }

    #[tokio::test]
    #[ignore = "requires Postgres"]
    async fn test_purge_removes_expired_sessions() {
        let pool = pool().await;
        let expired = PgCredentialProvider::new(pool.clone(), Duration::seconds(-1));
        let email = unique_email();
        let metadata = SignUpMetadata {
            role_claim: RoleClaim::Staff,
            display_name: "Adwoa Mensah".to_string(),
        };

        let created = expired
            .scoped(None)
            .sign_up(&email, "secret1", &metadata)
            .await
            .unwrap();
        for _ in 0..3 {
            expired.scoped(None).sign_in(&email, "secret1").await.unwrap();
        }

        let live = PgCredentialProvider::new(pool.clone(), Duration::hours(1));
        let mut kept = live.scoped(None);
        kept.sign_in(&email, "secret1").await.unwrap();

        assert!(purge_expired_sessions(&pool).await.unwrap() >= 4);

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE identity_id = $1")
                .bind(created.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(remaining, 1);
        assert_eq!(kept.current_identity().await.unwrap().map(|i| i.id), Some(created.id));
    }

    #[tokio::test]
    #[ignore = "requires Postgres"]
    async fn test_wrong_password_rejected() {
        let pool = pool().await;
        let provider = PgCredentialProvider::new(pool, Duration::hours(1));
        let email = unique_email();
        let metadata = SignUpMetadata {
            role_claim: RoleClaim::Student,
            display_name: "Kwesi".to_string(),
        };
        provider
            .scoped(None)
            .sign_up(&email, "secret1", &metadata)
            .await
            .unwrap();

        let mut store = provider.scoped(None);
        let err = store.sign_in(&email, "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(store.session().is_none());
    }
}
