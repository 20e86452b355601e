//! Development data.

pub mod models;
pub mod people;

pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig};

use gsms_cache::{CacheConfig, PageCache};
use gsms_core::password::hash_password_with_cost;
use sqlx::PgPool;
use std::time::Instant;

/// Seeds parents, then staff, then students linked to the parents.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...");

    // One hash, shared by every seeded identity.
    let password_hash = hash_password_with_cost(SEED_PASSWORD, 4)?;

    println!("👪 Seeding {} parents...", config.parents);
    let parents = people::generate_parents(config.parents);
    let parent_ids = people::insert_people(db, &parents, &password_hash, &[]).await?;

    println!("🧑‍🏫 Seeding {} staff...", config.staff);
    let staff = people::generate_staff(config.staff);
    people::insert_people(db, &staff, &password_hash, &[]).await?;

    println!("🎓 Seeding {} students...", config.students);
    let students = people::generate_students(config.students);
    people::insert_people(db, &students, &password_hash, &parent_ids).await?;

    println!(
        "\n✅ Seeding complete in {:?} (password for every seeded user: {})",
        start_time.elapsed(),
        SEED_PASSWORD
    );

    Ok(())
}

/// Deletes every seeded identity; profiles and records cascade.
pub async fn clear_seed(db: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM identities WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

/// Drops cached listings after the record tables changed. Returns the number
/// of pages removed, or `None` when no Redis is configured.
pub async fn refresh_page_cache(config: &CacheConfig) -> anyhow::Result<Option<u64>> {
    let Some(cache) = config.connect().await? else {
        return Ok(None);
    };
    Ok(Some(cache.invalidate_site().await?))
}
