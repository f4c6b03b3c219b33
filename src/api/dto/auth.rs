//! DTOs for registration and login.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Credentials submitted to `/register` and `/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(
        length(min = 1, max = 64),
        custom(function = "not_blank", message = "Username must not be blank")
    )]
    pub username: String,

    #[validate(
        length(min = 1, max = 1024),
        custom(function = "not_blank", message = "Password must not be blank")
    )]
    pub password: String,
}

/// Successful authentication: the session token to send as `Bearer`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub message: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_credentials() {
        assert!(request("alice", "secret123").validate().is_ok());
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let errors = request("   ", "secret123").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let errors = request("alice", "").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_overlong_username_is_rejected() {
        assert!(request(&"a".repeat(65), "secret123").validate().is_err());
    }
}
