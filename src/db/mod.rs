//! Credential store for user accounts.
//!
//! Accounts are keyed by their normalized email. `PgUserStore` is the
//! production backend; `MemoryUserStore` keeps everything in process.

pub mod memory;
pub mod models;
pub mod operations;

use async_trait::async_trait;

use crate::Result;

pub use memory::MemoryUserStore;
pub use models::User;
pub use operations::PgUserStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new account. Fails with `DatabaseError::Duplicate` when the
    /// email is already taken; nothing is written in that case.
    async fn insert_user(&self, user: &User) -> Result<User>;

    /// Exact match on the stored (normalized) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Release backend resources on shutdown.
    async fn close(&self) {}
}
