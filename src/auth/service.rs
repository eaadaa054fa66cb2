use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use crate::auth::models::{LoginCredentials, NewCredentials};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{Claims, TokenKeys};
use crate::config::AuthConfig;
use crate::db::models::User;
use crate::db::UserStore;
use crate::error::{AppError, AuthError, DatabaseError};
use crate::Result;

/// A successful login: the account and the token issued for it.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenKeys,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            store,
            tokens: TokenKeys::new(&config.jwt_secret, Duration::hours(config.token_expiry_hours)),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenKeys {
        &self.tokens
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub async fn register(&self, credentials: NewCredentials) -> Result<User> {
        // Cheap early exit; the store's uniqueness check stays authoritative.
        if self.store.find_by_email(&credentials.email).await?.is_some() {
            warn!("Registration rejected, email already registered");
            return Err(DatabaseError::Duplicate.into());
        }

        let hash = hash_password(&credentials.password, self.bcrypt_cost).await?;
        let user = self.store.insert_user(&User::new(credentials.email, hash)).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome> {
        let user = self
            .store
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AppError::NotFound("Email not found".to_string()))?;

        if !verify_password(&credentials.password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login rejected, password mismatch");
            return Err(AuthError::PasswordMismatch.into());
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, "Login successful");

        Ok(LoginOutcome { user, token })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.tokens.verify(token)
    }
}
