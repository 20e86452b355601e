use anyhow::anyhow;
use axum::{
    Form,
    extract::{FromRequest, Request, rejection::FormRejection},
};
use gsms_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn rejection_error(rejection: FormRejection) -> AppError {
    if matches!(rejection, FormRejection::InvalidFormContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/x-www-form-urlencoded' header"
        ));
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("unknown variant") {
        return AppError::bad_request(anyhow!("Invalid user type"));
    }

    AppError::bad_request(anyhow!("Invalid form body"))
}

/// `application/x-www-form-urlencoded` body, deserialized then validated.
///
/// Malformed bodies answer 400, validation failures 422, both as
/// `{"error": "..."}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedForm(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use gsms_models::{LoginForm, RegisterForm};

    fn form_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_form_is_extracted() {
        let req = form_request("email=ama%40example.com&password=secret");
        let ValidatedForm(form) = ValidatedForm::<LoginForm>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(form.email, "ama@example.com");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let req = form_request("email=ama%40example.com");
        let err = ValidatedForm::<LoginForm>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "password is required");
    }

    #[tokio::test]
    async fn test_validation_failure_is_unprocessable() {
        let req = form_request(
            "email=ama%40example.com&password=123&userType=parent&fullName=Ama",
        );
        let err = ValidatedForm::<RegisterForm>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message(), "Password should be at least 6 characters");
    }

    #[tokio::test]
    async fn test_admin_claim_is_rejected() {
        let req = form_request(
            "email=ama%40example.com&password=123456&userType=admin&fullName=Ama",
        );
        let err = ValidatedForm::<RegisterForm>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid user type");
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let err = ValidatedForm::<LoginForm>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
