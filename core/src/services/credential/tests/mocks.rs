//! Test fixture wiring the credential service to in-memory mocks

use std::sync::Arc;

use crate::domain::entities::notification::NotificationQueue;
use crate::domain::entities::user::User;
use crate::repositories::MockUserRepository;
use crate::services::cache::MockCache;
use crate::services::credential::{CredentialService, CredentialServiceConfig};
use crate::services::notification::RecordingPublisher;
use crate::services::password::PasswordHasher;
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::token_store::CooldownPolicy;

pub const EMAIL: &str = "user@example.com";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "s3cret-password";

pub type TestService = CredentialService<MockUserRepository, MockCache, RecordingPublisher>;

pub struct Fixture {
    pub users: Arc<MockUserRepository>,
    pub cache: Arc<MockCache>,
    pub publisher: Arc<RecordingPublisher>,
    pub hasher: PasswordHasher,
    pub service: TestService,
}

impl Fixture {
    pub fn new() -> Self {
        let users = Arc::new(MockUserRepository::new());
        let cache = Arc::new(MockCache::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let hasher = PasswordHasher::new(4);
        let tokens = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "test-secret".to_string(),
            access_token_expiry: 600,
            refresh_token_expiry: 3600,
            ..Default::default()
        }));
        let config = CredentialServiceConfig {
            verify_policy: CooldownPolicy::new(3600, 60),
            reset_token_lifetime: 900,
            base_url: "https://app.example.com/".to_string(),
        };

        let service = CredentialService::new(
            users.clone(),
            cache.clone(),
            publisher.clone(),
            tokens,
            hasher.clone(),
            config,
        );

        Self {
            users,
            cache,
            publisher,
            hasher,
            service,
        }
    }

    /// Token carried by the last published link
    pub async fn last_token(&self) -> String {
        let (_, message) = self.publisher.last().await.expect("nothing published");
        message
            .link
            .split("token=")
            .nth(1)
            .expect("link without token")
            .to_string()
    }

    pub async fn last_queue(&self) -> Option<NotificationQueue> {
        self.publisher.last().await.map(|(queue, _)| queue)
    }

    /// Insert a verified user with a known password
    pub async fn verified_user(&self) -> User {
        let mut user = User::new(EMAIL);
        user.username = Some(USERNAME.to_string());
        user.password_hash = Some(self.hasher.hash(PASSWORD).await.unwrap());
        user.email_verified = true;
        self.users.insert(user.clone()).await;
        user
    }

    /// Pre-register and verify through the public workflow
    pub async fn registered_user(&self) -> User {
        self.service.pre_register(EMAIL).await.unwrap();
        let token = self.last_token().await;
        self.service
            .verify_email(&token, USERNAME, PASSWORD)
            .await
            .unwrap();
        self.users.get_by_email(EMAIL).await.unwrap()
    }
}
