//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserChanges, UserLookup};
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    fail: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every following call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a user directly, bypassing uniqueness checks
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn get_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::database("mock database unavailable"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find(&self, lookup: &UserLookup) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| lookup.matches(u)).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::UniqueViolation {
                field: "email".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, lookup: &UserLookup, changes: UserChanges) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        let Some(id) = users.values().find(|u| lookup.matches(u)).map(|u| u.id) else {
            return Ok(0);
        };

        if let Some(username) = &changes.username {
            if users
                .values()
                .any(|u| u.id != id && u.username.as_deref() == Some(username.as_str()))
            {
                return Err(DomainError::UniqueViolation {
                    field: "username".to_string(),
                });
            }
        }

        match users.get_mut(&id) {
            Some(user) => {
                user.apply(&changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
