pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::from_fn;
use actix_web::{web, HttpResponse};
use tracing::info;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{AuthService, Claims};
pub use db::{MemoryUserStore, PgUserStore, User, UserStore};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers every route and the JSON extractor config on an `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(vec![error::FieldError::new("body", err.to_string())]).into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health_check))
        .route("/register", web::post().to(auth::handlers::register))
        .route("/login", web::post().to(auth::handlers::login))
        .route("/free-endpoint", web::get().to(auth::handlers::free_endpoint))
        .service(
            web::resource("/auth-endpoint")
                .wrap(from_fn(auth::require_auth))
                .route(web::get().to(auth::handlers::auth_endpoint)),
        );
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        let store: Arc<dyn UserStore> = if config.database.use_memory_store {
            info!("Using in-memory user store; accounts are lost on restart");
            Arc::new(MemoryUserStore::new())
        } else {
            let store = PgUserStore::connect(
                &config.database.url,
                config.database.max_connections,
                Duration::from_secs(5),
            )
            .await?;
            info!("Connected to user database");
            Arc::new(store)
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Settings, store: Arc<dyn UserStore>) -> Self {
        let auth_service = AuthService::new(store, &config.auth);
        Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
        }
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.auth_service.store().close().await;
        Ok(())
    }
}
