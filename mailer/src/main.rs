use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use af_core::domain::entities::notification::NotificationQueue;
use af_infra::broker::QueueConsumer;
use af_infra::cache::{CacheConfig, RedisClient};
use af_mailer::{run_queue, supervise, SmtpMailer};
use af_shared::config::{BrokerConfig, Environment, MailConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter())),
        )
        .init();

    tracing::info!(environment = %environment, "Starting AuthFlow mailer");

    let mail_config = MailConfig::from_env();
    let broker_config = BrokerConfig::from_env();
    let cache_config = CacheConfig {
        url: broker_config.url.clone(),
        ..CacheConfig::from_env()
    };

    let mailer = Arc::new(SmtpMailer::new(&mail_config).context("invalid SMTP configuration")?);
    let client = RedisClient::new(cache_config)
        .await
        .context("failed to connect to the broker")?;

    let mut workers = tokio::task::JoinSet::new();
    for queue in NotificationQueue::ALL {
        let consumer = QueueConsumer::new(client.clone(), broker_config.clone(), queue)
            .await
            .with_context(|| format!("failed to open consumer for {}", queue))?;
        let mailer = Arc::clone(&mailer);
        workers.spawn(async move { (queue, run_queue(mailer.as_ref(), consumer).await) });
    }

    let outcome = supervise(&mut workers, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await;

    workers.shutdown().await;
    outcome.context("mailer stopped unexpectedly")?;
    tracing::info!("Mailer stopped");
    Ok(())
}
