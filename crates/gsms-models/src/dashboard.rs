//! The dashboard shell: header identity and sidebar navigation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::roles::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

impl NavItem {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub display_name: String,
    pub initials: String,
    pub role: UserRole,
    pub navigation: Vec<NavItem>,
}

impl DashboardResponse {
    pub fn new(display_name: String, role: UserRole) -> Self {
        Self {
            initials: initials(&display_name),
            navigation: navigation_for(role),
            display_name,
            role,
        }
    }
}

/// Up to two uppercase initials from a display name ("Kwame Nkrumah" -> "KN").
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Sidebar entries visible to a role.
pub fn navigation_for(role: UserRole) -> Vec<NavItem> {
    let mut items = vec![NavItem::new("Dashboard", "/dashboard")];

    match role {
        UserRole::Admin => items.extend([
            NavItem::new("Students", "/dashboard/students"),
            NavItem::new("Staff", "/dashboard/staff"),
            NavItem::new("Parents", "/dashboard/parents"),
            NavItem::new("Settings", "/dashboard/settings"),
        ]),
        UserRole::Staff => items.extend([
            NavItem::new("Students", "/dashboard/students"),
            NavItem::new("Parents", "/dashboard/parents"),
        ]),
        UserRole::Parent => items.push(NavItem::new("Students", "/dashboard/students")),
        UserRole::Student => {}
    }

    items.push(NavItem::new("My Profile", "/dashboard/profile"));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_two_words() {
        assert_eq!(initials("Kwame Nkrumah"), "KN");
    }

    #[test]
    fn test_initials_truncates_to_two() {
        assert_eq!(initials("ama serwaa owusu"), "AS");
    }

    #[test]
    fn test_initials_single_word_email_fallback() {
        assert_eq!(initials("kofi@example.com"), "K");
    }

    #[test]
    fn test_initials_empty() {
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn test_navigation_admin_sees_staff() {
        let nav = navigation_for(UserRole::Admin);
        assert!(nav.iter().any(|item| item.href == "/dashboard/staff"));
    }

    #[test]
    fn test_navigation_student_is_minimal() {
        let labels: Vec<_> = navigation_for(UserRole::Student)
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(labels, vec!["Dashboard", "My Profile"]);
    }

    #[test]
    fn test_dashboard_response_derives_fields() {
        let response = DashboardResponse::new("Efua Mensah".to_string(), UserRole::Staff);
        assert_eq!(response.initials, "EM");
        assert_eq!(response.navigation, navigation_for(UserRole::Staff));
    }
}
