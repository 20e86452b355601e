//! # GSMS CLI
//!
//! Administrative tasks that have no HTTP surface:
//!
//! - [`admin`]: creating admin accounts. Admin is never a role a caller can
//!   claim at sign-up, so this is the only way one comes to exist.
//! - [`seeder`]: filling a development database with fake students, staff
//!   and parents.
//!
//! ```ignore
//! use gsms_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;
