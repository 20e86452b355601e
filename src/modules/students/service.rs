use gsms_core::AppError;
use gsms_models::records::{LISTING_LIMIT, StudentSummary};
use sqlx::PgPool;
use tracing::instrument;

pub struct StudentService;

impl StudentService {
    /// Most recently created students, with the owner's name and phone number.
    #[instrument(skip(db))]
    pub async fn list_recent(db: &PgPool) -> Result<Vec<StudentSummary>, AppError> {
        let rows = sqlx::query_as::<_, StudentSummary>(
            "SELECT r.id, r.student_id, r.ges_id, r.class, r.section, r.roll_number,
                    r.admission_date, r.is_active,
                    p.full_name, p.phone_number, r.created_at
             FROM students r
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
