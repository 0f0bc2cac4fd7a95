pub mod password;
pub mod registration;
pub mod session;

use std::sync::Arc;

use af_core::repositories::UserRepository;
use af_core::services::{CacheStore, CredentialService, NotificationPublisher};
use af_shared::config::CookieConfig;

/// Application state that holds shared services
pub struct AppState<U, C, P>
where
    U: UserRepository,
    C: CacheStore,
    P: NotificationPublisher,
{
    pub credentials: Arc<CredentialService<U, C, P>>,
    pub cookies: CookieConfig,
}

impl<U, C, P> AppState<U, C, P>
where
    U: UserRepository,
    C: CacheStore,
    P: NotificationPublisher,
{
    pub fn new(credentials: Arc<CredentialService<U, C, P>>, cookies: CookieConfig) -> Self {
        Self {
            credentials,
            cookies,
        }
    }
}
