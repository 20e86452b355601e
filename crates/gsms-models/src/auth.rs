//! Form and response shapes of the authentication endpoints.
//!
//! The forms are submitted as `application/x-www-form-urlencoded`. Field
//! names follow the web client (`userType`, `fullName`); snake_case aliases
//! are accepted as well.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::IdentityId;
use crate::roles::{RoleClaim, UserRole};

/// Plain email/password sign-in.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    #[validate(email(message = "A valid email address is required"))]
    #[schema(example = "kofi.mensah@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Sign-in scoped to the role the caller selects on the login page.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RoleLoginForm {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(rename = "userType", alias = "user_type")]
    pub user_type: RoleClaim,
}

/// Account creation with the role and name stored on the new profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterForm {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password should be at least 6 characters"))]
    pub password: String,
    #[serde(rename = "userType", alias = "user_type")]
    pub user_type: RoleClaim,
    #[serde(rename = "fullName", alias = "full_name")]
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
}

/// Who the current session belongs to, with fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub identity_id: IdentityId,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    /// False when the profile could not be loaded and fallbacks were used.
    pub profile_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_valid() {
        let form = LoginForm {
            email: "ama@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_login_form_rejects_bad_email() {
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_login_form_rejects_empty_password() {
        let form = LoginForm {
            email: "ama@example.com".to_string(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_form_short_password() {
        let form = RegisterForm {
            email: "ama@example.com".to_string(),
            password: "12345".to_string(),
            user_type: RoleClaim::Parent,
            full_name: "Ama Owusu".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_form_requires_name() {
        let form = RegisterForm {
            email: "ama@example.com".to_string(),
            password: "123456".to_string(),
            user_type: RoleClaim::Parent,
            full_name: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_role_login_form_reads_camel_case_and_alias() {
        let camel: RoleLoginForm = serde_json::from_str(
            r#"{"email":"a@b.com","password":"x","userType":"staff"}"#,
        )
        .unwrap();
        assert_eq!(camel.user_type, RoleClaim::Staff);

        let snake: RoleLoginForm = serde_json::from_str(
            r#"{"email":"a@b.com","password":"x","user_type":"parent"}"#,
        )
        .unwrap();
        assert_eq!(snake.user_type, RoleClaim::Parent);
    }
}
