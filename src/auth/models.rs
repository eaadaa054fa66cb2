//! Request and response bodies for the credential endpoints, and the
//! validators that turn raw request bodies into typed credentials.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::db::models::User;
use crate::error::FieldError;

// Dotted domain ending in a 2-7 letter alphabetic TLD.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*@([A-Za-z0-9_-]+\.)+[A-Za-z]{2,7}$")
        .expect("email pattern compiles")
});

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration input that passed validation; `email` is normalized.
#[derive(Debug, Clone, Validate)]
pub struct NewCredentials {
    #[validate(regex(path = *EMAIL_REGEX, message = "Please provide a valid email"))]
    pub email: String,

    #[validate(
        length(min = 6, message = "Password should be at least 6 characters long"),
        custom(function = "fits_bcrypt_input")
    )]
    pub password: String,
}

/// Login input that passed validation; `email` is normalized.
#[derive(Debug, Clone, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// bcrypt only reads the first 72 bytes; longer passwords would collide.
fn fits_bcrypt_input(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut err = ValidationError::new("password_too_long");
        err.message = Some(
            format!("Password should be at most {} bytes long", MAX_PASSWORD_BYTES).into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Lowercase and trim, the form emails are stored and looked up in.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl RegisterRequest {
    pub fn into_credentials(self) -> Result<NewCredentials, Vec<FieldError>> {
        let credentials = NewCredentials {
            email: normalize_email(&self.email),
            password: self.password,
        };
        credentials.validate().map_err(field_errors)?;
        Ok(credentials)
    }
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<LoginCredentials, Vec<FieldError>> {
        let credentials = LoginCredentials {
            email: normalize_email(&self.email),
            password: self.password,
        };
        credentials.validate().map_err(field_errors)?;
        Ok(credentials)
    }
}

fn field_errors(errors: ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Account as exposed over HTTP.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub email: String,
    pub token: String,
    /// Seconds until `token` expires.
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_registration_is_normalized() {
        let creds = register("  Alice@Example.COM ", "secret1").into_credentials().unwrap();
        assert_eq!(creds.email, "alice@example.com");
        assert_eq!(creds.password, "secret1");
    }

    #[test]
    fn test_password_is_not_trimmed() {
        let creds = register("a@example.com", " pass ").into_credentials().unwrap();
        assert_eq!(creds.password, " pass ");
    }

    #[test]
    fn test_malformed_email() {
        let errors = register("not-an-email", "secret1").into_credentials().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("email", "Please provide a valid email")]);
    }

    #[test]
    fn test_short_password() {
        let errors = register("a@example.com", "12345").into_credentials().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("password", "Password should be at least 6 characters long")]
        );
    }

    #[test]
    fn test_email_needs_dotted_domain() {
        for email in ["a@localhost", "a@b", "a@[127.0.0.1]", "a@example.c", "a@example.c0m", "a@@example.com"] {
            let errors = register(email, "secret1").into_credentials().unwrap_err();
            assert_eq!(errors[0].field, "email", "{:?} should be rejected", email);
        }
        for email in ["first.last@mail.example.org", "under_score-dash@example.museum"] {
            assert!(register(email, "secret1").into_credentials().is_ok(), "{:?} should pass", email);
        }
    }

    #[test]
    fn test_password_over_bcrypt_limit() {
        let long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        let errors = register("a@example.com", &long).into_credentials().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("password", "Password should be at most 72 bytes long")]
        );

        let exact = "x".repeat(MAX_PASSWORD_BYTES);
        assert!(register("a@example.com", &exact).into_credentials().is_ok());
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Six characters, more than six bytes.
        assert!(register("a@example.com", "ééééé1").into_credentials().is_ok());
    }

    #[test]
    fn test_all_field_errors_reported() {
        let errors = register("", "").into_credentials().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginRequest {
            email: "   ".to_string(),
            password: String::new(),
        }
        .into_credentials()
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_login_email_is_normalized() {
        let creds = LoginRequest {
            email: " Bob@Example.com".to_string(),
            password: "whatever".to_string(),
        }
        .into_credentials()
        .unwrap();
        assert_eq!(creds.email, "bob@example.com");
    }

    #[test]
    fn test_profile_from_user() {
        let user = User::new("a@example.com".to_string(), "hash".to_string());
        let id = user.id;
        let profile = UserProfile::from(user);
        assert_eq!(profile.id, id);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("hash"));
    }
}
