use anyhow::{Context, bail};
use gsms_auth::store::{check_new_password, normalize_email};
use gsms_core::hash_password;
use gsms_models::{IdentityId, UserRole};
use sqlx::PgPool;

/// Creates an identity with an `admin` profile.
pub async fn create_admin(
    db: &PgPool,
    email: &str,
    password: &str,
    full_name: &str,
) -> anyhow::Result<IdentityId> {
    check_new_password(password)?;
    if full_name.trim().is_empty() {
        bail!("Full name is required");
    }

    let password_hash = hash_password(password)?;

    let mut tx = db.begin().await?;

    let identity_id = sqlx::query_scalar::<_, IdentityId>(
        "INSERT INTO identities (email, password_hash)
         VALUES ($1, $2)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(normalize_email(email))
    .bind(&password_hash)
    .fetch_optional(&mut *tx)
    .await
    .context("Failed to insert identity")?;

    let Some(identity_id) = identity_id else {
        tx.rollback().await?;
        bail!("A user with this email already exists");
    };

    sqlx::query("INSERT INTO user_profiles (user_id, user_type, full_name) VALUES ($1, $2, $3)")
        .bind(identity_id)
        .bind(UserRole::Admin)
        .bind(full_name.trim())
        .execute(&mut *tx)
        .await
        .context("Failed to insert admin profile")?;

    tx.commit().await?;

    Ok(identity_id)
}
