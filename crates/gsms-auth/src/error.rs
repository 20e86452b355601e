//! Errors raised by the stores and by the session gate.

use thiserror::Error;

/// Message returned when a sign-in succeeds but the stored role differs from
/// the claimed one, or the role cannot be determined.
pub const ROLE_MISMATCH_MESSAGE: &str = "Invalid credentials for the selected user type";

/// Message shown to callers when a store is unreachable.
pub const UNAVAILABLE_MESSAGE: &str = "Authentication service unavailable";

/// Failure reported by a credential store or profile directory.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected credentials or sign-up data. The message is shown to the
    /// caller verbatim.
    #[error("{0}")]
    Credential(String),

    #[error("store unavailable: {0:#}")]
    Unavailable(anyhow::Error),
}

impl StoreError {
    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential(message.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.into())
    }
}

/// Failure of a session gate operation.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Credential(String),

    #[error("{}", ROLE_MISMATCH_MESSAGE)]
    RoleMismatch,

    /// The cause is logged where it happens; callers only see the generic message.
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Infrastructure(anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Credential(message) => Self::Credential(message),
            StoreError::Unavailable(cause) => Self::Infrastructure(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_message_is_verbatim() {
        let err: AuthError = StoreError::credential("Invalid login credentials").into();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn test_role_mismatch_message() {
        assert_eq!(
            AuthError::RoleMismatch.to_string(),
            "Invalid credentials for the selected user type"
        );
    }

    #[test]
    fn test_unavailable_hides_cause() {
        let err: AuthError = StoreError::Unavailable(anyhow::anyhow!("connection refused")).into();
        assert!(matches!(err, AuthError::Infrastructure(_)));
        assert_eq!(err.to_string(), "Authentication service unavailable");
    }
}
