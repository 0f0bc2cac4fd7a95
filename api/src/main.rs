use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use af_api::{create_app, AppState, HealthProbes, SessionGuard};
use af_core::repositories::UserRepository;
use af_core::services::{
    CacheStore, CredentialService, CredentialServiceConfig, NotificationPublisher, PasswordHasher,
    TokenService, TokenServiceConfig,
};
use af_infra::broker::RedisQueuePublisher;
use af_infra::cache::{RedisCache, RedisClient};
use af_infra::database::{DatabasePool, MySqlUserRepository};
use af_infra::memory::{InMemoryCache, InMemoryPublisher, InMemoryUserRepository};
use af_shared::AppConfig;

/// Where users, tokens and notifications live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageBackend {
    /// MySQL users, Redis cache and Redis queues
    External,
    /// Process-local state, development only
    Memory,
}

impl StorageBackend {
    fn from_env() -> Self {
        match std::env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            _ => StorageBackend::External,
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = af_infra::load_config().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
        )
        .init();

    tracing::info!(environment = %config.environment, "Starting AuthFlow API");

    if !config.tokens.is_consistent() {
        tracing::warn!("MIN_RESEND_TOKEN_LIFETIME exceeds VERIFY_TOKEN_LIFETIME; resend is always allowed");
    }
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set, using the development default");
    }

    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let hasher = PasswordHasher::new(config.auth.bcrypt_cost);
    let workflow = CredentialServiceConfig::from_config(&config.tokens, &config.server);

    match StorageBackend::from_env() {
        StorageBackend::External => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to the database")?;
            pool.ensure_schema().await.context("failed to prepare the schema")?;

            let cache_client = RedisClient::new(config.cache.clone())
                .await
                .context("failed to connect to the cache")?;
            let broker_client = RedisClient::new(af_shared::CacheConfig {
                url: config.broker.url.clone(),
                ..config.cache.clone()
            })
            .await
            .context("failed to connect to the broker")?;

            let credentials = CredentialService::new(
                Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
                Arc::new(RedisCache::new(cache_client.clone())),
                Arc::new(RedisQueuePublisher::new(broker_client, config.broker.clone())),
                tokens.clone(),
                hasher,
                workflow,
            );
            let probes = HealthProbes::new()
                .with(Arc::new(pool.clone()))
                .with(Arc::new(cache_client));

            serve(&config, credentials, tokens, probes).await?;
            pool.close().await;
        }
        StorageBackend::Memory => {
            anyhow::ensure!(
                !config.environment.is_production(),
                "STORAGE_BACKEND=memory is not allowed in production"
            );
            tracing::warn!("Using in-memory storage; all state is lost on exit");

            let credentials = CredentialService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryCache::new()),
                Arc::new(InMemoryPublisher::new()),
                tokens.clone(),
                hasher,
                workflow,
            );

            serve(&config, credentials, tokens, HealthProbes::new()).await?;
        }
    }

    tracing::info!("AuthFlow API stopped");
    Ok(())
}

async fn serve<U, C, P>(
    config: &AppConfig,
    credentials: CredentialService<U, C, P>,
    tokens: Arc<TokenService>,
    probes: HealthProbes,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    let app_state = web::Data::new(AppState::new(
        Arc::new(credentials),
        config.auth.cookies.clone(),
    ));
    let session_guard = web::Data::new(SessionGuard::new(tokens, config.auth.cookies.clone()));
    let probes = web::Data::new(probes);

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), session_guard.clone(), probes.clone())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")
}
