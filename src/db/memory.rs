use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::models::User;
use crate::db::UserStore;
use crate::error::DatabaseError;
use crate::Result;

/// Accounts held in process memory, keyed by email.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(DatabaseError::Duplicate.into());
        }
        users.insert(user.email.clone(), user.clone());

        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }
}
