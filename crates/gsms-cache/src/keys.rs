//! Cache key generation.
//!
//! All keys share the shape `<prefix>:page:<page>[:<scope>]`, so one
//! pattern covers every cached page.

use uuid::Uuid;

fn build_key(prefix: &str, parts: &[&str]) -> String {
    format!("{}:{}", prefix, parts.join(":"))
}

/// Keys for cached page data.
pub mod pages {
    use super::*;

    /// Dashboard shell of a single identity.
    pub fn dashboard(prefix: &str, identity_id: Uuid) -> String {
        build_key(prefix, &["page", "dashboard", &identity_id.to_string()])
    }

    pub fn students(prefix: &str) -> String {
        build_key(prefix, &["page", "students"])
    }

    pub fn staff(prefix: &str) -> String {
        build_key(prefix, &["page", "staff"])
    }

    pub fn parents(prefix: &str) -> String {
        build_key(prefix, &["page", "parents"])
    }

    /// Pattern matching every cached page.
    pub fn site_pattern(prefix: &str) -> String {
        format!("{}:page:*", prefix)
    }
}
