use gsms_core::AppError;
use gsms_models::records::{LISTING_LIMIT, ParentSummary};
use sqlx::PgPool;
use tracing::instrument;

/// Parent and guardian records.
pub struct ParentService;

impl ParentService {
    #[instrument(skip(db))]
    pub async fn list_recent(db: &PgPool) -> Result<Vec<ParentSummary>, AppError> {
        let rows = sqlx::query_as::<_, ParentSummary>(
            "SELECT r.id, r.parent_id, r.relationship, r.occupation,
                    p.full_name, p.phone_number, r.created_at
             FROM parents r
             LEFT JOIN user_profiles p ON p.id = r.user_profile_id
             ORDER BY r.created_at DESC
             LIMIT $1",
        )
        .bind(LISTING_LIMIT)
        .fetch_all(db)
        .await?;

        Ok(rows)
    }
}
