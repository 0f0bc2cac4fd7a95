//! Application wired to the in-memory adapters

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};

use af_api::{create_app, AppState, HealthProbes, SessionGuard};
use af_core::services::{
    CooldownPolicy, CredentialService, CredentialServiceConfig, PasswordHasher, TokenService,
    TokenServiceConfig,
};
use af_infra::memory::{InMemoryCache, InMemoryPublisher, InMemoryUserRepository};
use af_shared::config::CookieConfig;

pub const EMAIL: &str = "user@example.com";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "s3cret-password";

pub type MemoryState = AppState<InMemoryUserRepository, InMemoryCache, InMemoryPublisher>;

pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub cache: Arc<InMemoryCache>,
    pub publisher: Arc<InMemoryPublisher>,
    pub state: web::Data<MemoryState>,
    pub guard: web::Data<SessionGuard>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let publisher = Arc::new(InMemoryPublisher::new());
        let tokens = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "api-test-secret".to_string(),
            access_token_expiry: 600,
            refresh_token_expiry: 3600,
            ..Default::default()
        }));
        let config = CredentialServiceConfig {
            verify_policy: CooldownPolicy::new(3600, 60),
            reset_token_lifetime: 900,
            base_url: "https://app.example.com/".to_string(),
        };

        let credentials = CredentialService::new(
            users.clone(),
            cache.clone(),
            publisher.clone(),
            tokens.clone(),
            PasswordHasher::new(4),
            config,
        );
        let cookies = CookieConfig::default();

        Self {
            users,
            cache,
            publisher,
            state: web::Data::new(AppState::new(Arc::new(credentials), cookies.clone())),
            guard: web::Data::new(SessionGuard::new(tokens, cookies)),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        create_app(
            self.state.clone(),
            self.guard.clone(),
            web::Data::new(HealthProbes::new()),
        )
    }

    /// Token carried by the last link mailed to `email`
    pub fn last_token(&self, email: &str) -> String {
        let (_, message) = self.publisher.last_for(email).expect("nothing mailed");
        message
            .link
            .split("token=")
            .nth(1)
            .expect("link without token")
            .to_string()
    }

    /// Register and verify the default user without going through HTTP
    pub async fn verified_user(&self) {
        let credentials = &self.state.credentials;
        credentials.pre_register(EMAIL).await.unwrap();
        let token = self.last_token(EMAIL);
        credentials
            .verify_email(&token, USERNAME, PASSWORD)
            .await
            .unwrap();
    }
}

/// Cookies set by a response, owned so they can be sent back
pub fn cookies_of<B>(response: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
    response
        .response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect()
}

pub fn cookie_named(cookies: &[Cookie<'static>], name: &str) -> Cookie<'static> {
    cookies
        .iter()
        .find(|cookie| cookie.name() == name)
        .cloned()
        .unwrap_or_else(|| panic!("cookie {name} not set"))
}
