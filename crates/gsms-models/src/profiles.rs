//! The `user_profiles` row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{IdentityId, ProfileId};
use crate::roles::UserRole;

/// Application-level record attaching a role and display attributes to an
/// identity. At most one exists per identity (unique `user_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserProfile {
    pub id: ProfileId,
    pub user_id: IdentityId,
    pub user_type: UserRole,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub profile_image_url: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserProfile {
    /// A fresh profile with only the required attributes set.
    pub fn new(user_id: IdentityId, user_type: UserRole, full_name: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ProfileId::new(),
            user_id,
            user_type,
            full_name: full_name.into(),
            phone_number: None,
            profile_image_url: None,
            date_of_birth: None,
            gender: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }
}
