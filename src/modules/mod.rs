pub mod auth;
pub mod dashboard;
pub mod parents;
pub mod staff;
pub mod students;
