//! Student, staff and parent listings.
//!
//! Each summary is a record row joined with the owning profile's name and
//! phone number. Listings return the most recently created records first.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of rows a listing returns.
pub const LISTING_LIMIT: i64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentSummary {
    pub id: Uuid,
    pub student_id: String,
    pub ges_id: Option<String>,
    pub class: Option<String>,
    pub section: Option<String>,
    pub roll_number: Option<String>,
    pub admission_date: chrono::NaiveDate,
    pub is_active: bool,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffSummary {
    pub id: Uuid,
    pub staff_id: String,
    pub employee_type: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub joining_date: chrono::NaiveDate,
    pub is_active: bool,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ParentSummary {
    pub id: Uuid,
    pub parent_id: String,
    pub relationship: Option<String>,
    pub occupation: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentsResponse {
    pub data: Vec<StudentSummary>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StaffResponse {
    pub data: Vec<StaffSummary>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParentsResponse {
    pub data: Vec<ParentSummary>,
    pub total: usize,
}

impl From<Vec<StudentSummary>> for StudentsResponse {
    fn from(data: Vec<StudentSummary>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}

impl From<Vec<StaffSummary>> for StaffResponse {
    fn from(data: Vec<StaffSummary>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}

impl From<Vec<ParentSummary>> for ParentsResponse {
    fn from(data: Vec<ParentSummary>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}
