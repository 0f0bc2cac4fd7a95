//! User store held in a map

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use af_core::domain::entities::user::{User, UserChanges, UserLookup};
use af_core::errors::DomainError;
use af_core::repositories::UserRepository;

/// Enforces the same uniqueness rules as the `users` table
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn taken<'a>(
    mut users: impl Iterator<Item = &'a User>,
    id: Uuid,
    username: Option<&str>,
) -> bool {
    username.is_some_and(|name| users.any(|u| u.id != id && u.username.as_deref() == Some(name)))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(&self, lookup: &UserLookup) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| lookup.matches(u))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::UniqueViolation {
                field: "email".to_string(),
            });
        }
        if taken(users.values(), user.id, user.username.as_deref()) {
            return Err(DomainError::UniqueViolation {
                field: "username".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, lookup: &UserLookup, changes: UserChanges) -> Result<u64, DomainError> {
        let mut users = self.users.write().await;

        let Some(id) = users.values().find(|u| lookup.matches(u)).map(|u| u.id) else {
            return Ok(0);
        };
        if taken(users.values(), id, changes.username.as_deref()) {
            return Err(DomainError::UniqueViolation {
                field: "username".to_string(),
            });
        }

        Ok(users.get_mut(&id).map_or(0, |user| {
            user.apply(&changes);
            1
        }))
    }
}
