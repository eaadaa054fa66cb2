use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {}", describe_fields(.0))]
    ValidationError(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),
}

/// A single rejected input field, reported back to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::DatabaseError(DatabaseError::Duplicate)
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::DatabaseError(DatabaseError::ConnectionError(err.to_string()))
            }
            _ => AppError::DatabaseError(DatabaseError::QueryError(err.to_string())),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::DatabaseError(DatabaseError::ConnectionError(err.to_string()))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("password hashing failed: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("blocking task failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => AppError::AuthError(AuthError::TokenExpired),
            _ => AppError::AuthError(AuthError::InvalidToken),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Server-side failures are logged in full and reported generically.
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let mut body = json!({
            "status": status.as_u16(),
            "message": message,
        });
        if let AppError::ValidationError(fields) = self {
            body["fields"] = json!(fields);
        }

        HttpResponse::build(status).json(json!({ "error": body }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(e) => match e {
                AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            },
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(DatabaseError::Duplicate) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("No authorization token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Email already registered")]
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use std::io;

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::InternalError(_)));

        let config_err = config::ConfigError::NotFound(String::from("key not found"));
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::ConfigError(_)));

        let db_err = sqlx::Error::RowNotFound;
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::NotFound(_)));

        let db_err = sqlx::Error::PoolTimedOut;
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::DatabaseError(DatabaseError::ConnectionError(_))));

        let hash_err = bcrypt::hash("secret", 99).unwrap_err();
        let app_err: AppError = hash_err.into();
        assert!(matches!(app_err, AppError::InternalError(_)));
    }

    #[test]
    fn test_jwt_error_conversion() {
        use jsonwebtoken::errors::{Error, ErrorKind};

        let app_err: AppError = Error::from(ErrorKind::ExpiredSignature).into();
        assert!(matches!(app_err, AppError::AuthError(AuthError::TokenExpired)));

        let app_err: AppError = Error::from(ErrorKind::InvalidSignature).into();
        assert!(matches!(app_err, AppError::AuthError(AuthError::InvalidToken)));

        let app_err: AppError = Error::from(ErrorKind::InvalidToken).into();
        assert!(matches!(app_err, AppError::AuthError(AuthError::InvalidToken)));
    }

    #[test]
    fn test_error_status_codes() {
        let err = AppError::AuthError(AuthError::PasswordMismatch);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::AuthError(AuthError::MissingToken);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::AuthError(AuthError::TokenExpired);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::ValidationError(vec![FieldError::new("email", "invalid")]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::NotFound("Email not found".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::DatabaseError(DatabaseError::Duplicate);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = AppError::DatabaseError(DatabaseError::QueryError("boom".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::ValidationError(vec![
            FieldError::new("email", "Please provide a valid email"),
            FieldError::new("password", "too short"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation error: email: Please provide a valid email; password: too short"
        );

        let err = AppError::AuthError(AuthError::PasswordMismatch);
        assert_eq!(err.to_string(), "Authentication error: Passwords do not match");

        let err = AppError::NotFound("Email not found".to_string());
        assert_eq!(err.to_string(), "Email not found");
    }

    #[actix_web::test]
    async fn test_validation_response_lists_fields() {
        let err = AppError::ValidationError(vec![FieldError::new("password", "too short")]);
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["status"], 400);
        assert_eq!(json["error"]["fields"][0]["field"], "password");
        assert_eq!(json["error"]["fields"][0]["message"], "too short");
    }

    #[actix_web::test]
    async fn test_server_error_hides_detail() {
        let err = AppError::DatabaseError(DatabaseError::QueryError("relation users missing".into()));
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["status"], 500);
        assert_eq!(json["error"]["message"], "Internal server error");
        assert!(json["error"].get("fields").is_none());
    }
}
