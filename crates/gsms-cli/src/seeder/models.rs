//! Seed rows and seeding configuration.

use chrono::NaiveDate;
use gsms_models::UserRole;

/// Email domain of every seeded identity. Clearing the seed deletes by it.
pub const SEED_EMAIL_DOMAIN: &str = "seed.gsms.example";

/// Password given to every seeded identity.
pub const SEED_PASSWORD: &str = "password123";

pub struct PersonSeed {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub record: RecordSeed,
}

pub enum RecordSeed {
    Student {
        student_id: String,
        ges_id: String,
        class: String,
        section: String,
        roll_number: String,
        admission_date: NaiveDate,
    },
    Staff {
        staff_id: String,
        employee_type: String,
        department: String,
        designation: String,
        joining_date: NaiveDate,
        salary: f64,
        ssnit_number: String,
    },
    Parent {
        parent_id: String,
        relationship: String,
        occupation: String,
    },
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub students: usize,
    pub staff: usize,
    pub parents: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 120,
            staff: 20,
            parents: 60,
        }
    }
}
