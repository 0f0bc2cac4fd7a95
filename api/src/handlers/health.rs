//! Liveness and dependency health endpoints

use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};
use async_trait::async_trait;

use af_infra::cache::RedisClient;
use af_infra::database::DatabasePool;
use af_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

/// A dependency whose reachability is reported by `GET /health`
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected probe result".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl HealthCheck for RedisClient {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected PING reply".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Registered dependency probes
#[derive(Clone, Default)]
pub struct HealthProbes {
    probes: Vec<std::sync::Arc<dyn HealthCheck>>,
}

impl HealthProbes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, probe: std::sync::Arc<dyn HealthCheck>) -> Self {
        self.probes.push(probe);
        self
    }

    async fn run(&self) -> HashMap<String, ServiceHealth> {
        let mut services = HashMap::new();
        for probe in &self.probes {
            let started = Instant::now();
            let health = match probe.check().await {
                Ok(()) => ServiceHealth::healthy(started.elapsed().as_millis() as u64),
                Err(message) => {
                    tracing::warn!(service = probe.name(), error = %message, "Health check failed");
                    ServiceHealth::unhealthy(message)
                }
            };
            services.insert(probe.name().to_string(), health);
        }
        services
    }
}

/// Handler for GET /
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "PONG",
        "service": "auth-service",
    }))
}

/// Handler for GET /health
///
/// 200 when every dependency answers, 503 otherwise.
pub async fn health_check(probes: web::Data<HealthProbes>) -> HttpResponse {
    let health = HealthResponse::from_services(probes.run().await, env!("CARGO_PKG_VERSION"));

    match health.status {
        HealthStatus::Healthy => HttpResponse::Ok().json(health),
        _ => HttpResponse::ServiceUnavailable().json(health),
    }
}
