use actix_web::{web, HttpResponse};
use tracing::info;

use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::auth::token::Claims;
use crate::error::AppError;
use crate::AppState;

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let credentials = req.into_inner().into_credentials().map_err(AppError::ValidationError)?;
    info!("Received registration request for email: {}", credentials.email);

    let user = state.auth_service.register(credentials).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User Created Successfully",
        user: user.into(),
    }))
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let credentials = req.into_inner().into_credentials().map_err(AppError::ValidationError)?;
    info!("Received login request for email: {}", credentials.email);

    let outcome = state.auth_service.login(credentials).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        email: outcome.user.email,
        token: outcome.token,
        expires_in: state.auth_service.tokens().ttl().num_seconds(),
    }))
}

pub async fn free_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "You are free to access me anytime"
    }))
}

/// Only reachable through `require_auth`, which supplies the claims.
pub async fn auth_endpoint(claims: web::ReqData<Claims>) -> HttpResponse {
    info!(user_id = %claims.sub, "Authorized access");
    HttpResponse::Ok().json(serde_json::json!({
        "message": "You are authorized to access me",
        "email": claims.email,
    }))
}
