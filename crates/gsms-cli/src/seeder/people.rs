//! Fake students, staff and parents.
//!
//! Rows are generated in parallel and inserted one person at a time
//! (identity, profile, record) inside a single transaction.

use chrono::{Days, NaiveDate, Utc};
use fake::Fake;
use fake::faker::job::en::Title;
use fake::faker::name::en::{FirstName, LastName};
use gsms_models::UserRole;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{PersonSeed, RecordSeed, SEED_EMAIL_DOMAIN};

const CLASSES: &[&str] = &[
    "Basic 1", "Basic 2", "Basic 3", "Basic 4", "Basic 5", "Basic 6", "JHS 1", "JHS 2", "JHS 3",
];
const SECTIONS: &[&str] = &["A", "B", "C"];
const DEPARTMENTS: &[&str] = &[
    "Mathematics",
    "English",
    "Science",
    "Social Studies",
    "Ghanaian Language",
    "Administration",
];
const DESIGNATIONS: &[&str] = &["Teacher", "Senior Teacher", "Head of Department", "Bursar"];
const RELATIONSHIPS: &[&str] = &["Mother", "Father", "Guardian"];

fn pick<'a>(options: &[&'a str]) -> &'a str {
    options[(0..options.len()).fake::<usize>()]
}

fn days_ago(max_days: u64) -> NaiveDate {
    let today = Utc::now().date_naive();
    today
        .checked_sub_days(Days::new((0..max_days).fake::<u64>()))
        .unwrap_or(today)
}

fn phone_number() -> String {
    format!("+23324{:07}", (0..10_000_000u32).fake::<u32>())
}

fn person(role: UserRole, idx: usize, record: RecordSeed) -> PersonSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email = format!(
        "{}.{}+{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        role,
        idx,
        SEED_EMAIL_DOMAIN
    );

    PersonSeed {
        full_name: format!("{} {}", first_name, last_name),
        email,
        phone_number: phone_number(),
        role,
        record,
    }
}

pub fn generate_students(count: usize) -> Vec<PersonSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let class = pick(CLASSES);
            person(
                UserRole::Student,
                idx,
                RecordSeed::Student {
                    student_id: format!("STU{:05}", idx + 1),
                    ges_id: format!("GES-{:08}", (0..100_000_000u32).fake::<u32>()),
                    class: class.to_string(),
                    section: pick(SECTIONS).to_string(),
                    roll_number: format!("{}", idx % 40 + 1),
                    admission_date: days_ago(5 * 365),
                },
            )
        })
        .collect()
}

pub fn generate_staff(count: usize) -> Vec<PersonSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let designation = pick(DESIGNATIONS);
            let employee_type = if designation == "Bursar" {
                "non-teaching"
            } else {
                "teaching"
            };
            person(
                UserRole::Staff,
                idx,
                RecordSeed::Staff {
                    staff_id: format!("STF{:04}", idx + 1),
                    employee_type: employee_type.to_string(),
                    department: pick(DEPARTMENTS).to_string(),
                    designation: designation.to_string(),
                    joining_date: days_ago(15 * 365),
                    salary: f64::from((1_800..9_000u32).fake::<u32>()),
                    ssnit_number: format!("C{:012}", (0..1_000_000_000_000u64).fake::<u64>()),
                },
            )
        })
        .collect()
}

pub fn generate_parents(count: usize) -> Vec<PersonSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            person(
                UserRole::Parent,
                idx,
                RecordSeed::Parent {
                    parent_id: format!("PAR{:05}", idx + 1),
                    relationship: pick(RELATIONSHIPS).to_string(),
                    occupation: Title().fake(),
                },
            )
        })
        .collect()
}

/// Inserts people and returns the record ids, in input order.
///
/// `parents` are assigned to students round-robin.
pub async fn insert_people(
    db: &PgPool,
    people: &[PersonSeed],
    password_hash: &str,
    parents: &[Uuid],
) -> anyhow::Result<Vec<Uuid>> {
    let start_time = Instant::now();
    let mut tx = db.begin().await?;
    let mut record_ids = Vec::with_capacity(people.len());

    for (idx, seed) in people.iter().enumerate() {
        let parent = (!parents.is_empty()).then(|| parents[idx % parents.len()]);
        record_ids.push(insert_person(&mut tx, seed, password_hash, parent).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} people in {:?}",
        record_ids.len(),
        start_time.elapsed()
    );

    Ok(record_ids)
}

async fn insert_person(
    tx: &mut Transaction<'_, Postgres>,
    seed: &PersonSeed,
    password_hash: &str,
    parent: Option<Uuid>,
) -> anyhow::Result<Uuid> {
    let identity_id: Uuid = sqlx::query_scalar(
        "INSERT INTO identities (email, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(&seed.email)
    .bind(password_hash)
    .fetch_one(&mut **tx)
    .await?;

    let profile_id: Uuid = sqlx::query_scalar(
        "INSERT INTO user_profiles (user_id, user_type, full_name, phone_number)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(identity_id)
    .bind(seed.role)
    .bind(&seed.full_name)
    .bind(&seed.phone_number)
    .fetch_one(&mut **tx)
    .await?;

    let record_id: Uuid = match &seed.record {
        RecordSeed::Student {
            student_id,
            ges_id,
            class,
            section,
            roll_number,
            admission_date,
        } => {
            sqlx::query_scalar(
                "INSERT INTO students
                    (user_profile_id, student_id, ges_id, class, section, roll_number,
                     admission_date, parent_id)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 RETURNING id",
            )
            .bind(profile_id)
            .bind(student_id)
            .bind(ges_id)
            .bind(class)
            .bind(section)
            .bind(roll_number)
            .bind(admission_date)
            .bind(parent)
            .fetch_one(&mut **tx)
            .await?
        }
        RecordSeed::Staff {
            staff_id,
            employee_type,
            department,
            designation,
            joining_date,
            salary,
            ssnit_number,
        } => {
            sqlx::query_scalar(
                "INSERT INTO staff
                    (user_profile_id, staff_id, employee_type, department, designation,
                     joining_date, salary, ssnit_number)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 RETURNING id",
            )
            .bind(profile_id)
            .bind(staff_id)
            .bind(employee_type)
            .bind(department)
            .bind(designation)
            .bind(joining_date)
            .bind(salary)
            .bind(ssnit_number)
            .fetch_one(&mut **tx)
            .await?
        }
        RecordSeed::Parent {
            parent_id,
            relationship,
            occupation,
        } => {
            sqlx::query_scalar(
                "INSERT INTO parents (user_profile_id, parent_id, relationship, occupation)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id",
            )
            .bind(profile_id)
            .bind(parent_id)
            .bind(relationship)
            .bind(occupation)
            .fetch_one(&mut **tx)
            .await?
        }
    };

    Ok(record_id)
}
