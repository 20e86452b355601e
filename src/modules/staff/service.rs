use gsms_core::AppError;
use gsms_models::records::{LISTING_LIMIT, StaffSummary};
use sqlx::PgPool;
use tracing::instrument;

pub struct StaffService;

impl StaffService {
    /// Latest staff records. Salary and tax identifiers are not selected.
    #[instrument(skip(db))]
    pub async fn list_recent(db: &PgPool) -> Result<Vec<StaffSummary>, AppError> {
        let rows = sqlx::query_as::<_, StaffSummary>(
            "SELECT r.id, r.staff_id, r.employee_type, r.department, r.designation,
                    r.joining_date, r.is_active,
                    p.full_name, p.phone_number, r.created_at
             FROM staff r
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
