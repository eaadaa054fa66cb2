//! Bearer-token gate for protected routes.
//!
//! Wrap a resource with `actix_web::middleware::from_fn(require_auth)`; the
//! handler can then take `web::ReqData<Claims>`.

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderMap, AUTHORIZATION},
    middleware::Next,
    web, Error, HttpMessage, ResponseError,
};
use tracing::warn;

use crate::auth::token::Claims;
use crate::error::{AppError, AuthError};
use crate::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;

    let token = value
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AuthError::InvalidToken)?;

    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok(token)
}

pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    match authorize(&req) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(err) => {
            warn!(path = %req.path(), "Rejected request: {}", err);
            let response = err.error_response();
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}

fn authorize(req: &ServiceRequest) -> Result<Claims, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("application state not configured".into()))?;

    let token = bearer_token(req.headers())?;
    state.auth_service.verify_token(token)
}
