//! User entity representing an account registered by e-mail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
///
/// Created at pre-registration with only the e-mail populated; the username
/// and password are set once the e-mail is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, unique once set
    pub username: Option<String>,

    /// E-mail address, unique
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Whether the account may log in
    pub is_active: bool,

    /// Whether the e-mail address has been confirmed
    pub email_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a pending user known only by e-mail
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: None,
            email: email.into(),
            password_hash: None,
            is_active: true,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a set of changes in place
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(username) = &changes.username {
            self.username = Some(username.clone());
        }
        if let Some(password_hash) = &changes.password_hash {
            self.password_hash = Some(password_hash.clone());
        }
        if let Some(verified) = changes.email_verified {
            self.email_verified = verified;
        }
        if let Some(active) = changes.is_active {
            self.is_active = active;
        }
        self.updated_at = Utc::now();
    }

    /// Whether the user can be logged in with a password at all
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Typed predicate selecting a single user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(Uuid),
    Username(String),
    Email(String),
}

impl UserLookup {
    /// Whether the given user satisfies this predicate
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserLookup::Id(id) => user.id == *id,
            UserLookup::Username(name) => user.username.as_deref() == Some(name.as_str()),
            UserLookup::Email(email) => user.email == *email,
        }
    }
}

/// Partial update of a user; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub email_verified: Option<bool>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Changes applied when an e-mail is confirmed
    pub fn verification(username: String, password_hash: String) -> Self {
        Self {
            username: Some(username),
            password_hash: Some(password_hash),
            email_verified: Some(true),
            is_active: None,
        }
    }

    /// Changes applied when a password is replaced
    pub fn password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password_hash.is_none()
            && self.email_verified.is_none()
            && self.is_active.is_none()
    }
}

/// Public view of a user returned to the account owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}
