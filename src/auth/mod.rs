//! Authentication module
//!
//! Registration, login and token issuance, plus the bearer-token gate that
//! protects routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
mod service;
mod token;

pub use middleware::require_auth;
pub use service::{AuthService, LoginOutcome};
pub use token::{Claims, TokenKeys};
