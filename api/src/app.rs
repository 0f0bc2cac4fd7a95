//! Application factory
//!
//! Builds the Actix-web application from already constructed services so the
//! binary and the integration tests share the same routing.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use af_core::repositories::UserRepository;
use af_core::services::{CacheStore, NotificationPublisher};
use af_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::{json_error_handler, query_error_handler};
use crate::handlers::health::{health_check, ping, HealthProbes};
use crate::middleware::auth::SessionGuard;
use crate::routes::auth::{
    password::{change_password, forgot_password, reset_password},
    registration::{pre_register, resend_verification, verify_email},
    session::{login, logout, me, refresh},
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, C, P>(
    app_state: web::Data<AppState<U, C, P>>,
    session_guard: web::Data<SessionGuard>,
    probes: web::Data<HealthProbes>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    P: NotificationPublisher + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(session_guard)
        .app_data(probes)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(TracingLogger::default())
        .route("/", web::get().to(ping))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .route("/pre_register", web::post().to(pre_register::<U, C, P>))
                .route(
                    "/resend_verification",
                    web::post().to(resend_verification::<U, C, P>),
                )
                .route("/verify_email", web::post().to(verify_email::<U, C, P>))
                .route("/login", web::post().to(login::<U, C, P>))
                .route("/logout", web::post().to(logout::<U, C, P>))
                .route("/refresh", web::post().to(refresh::<U, C, P>))
                .route("/me", web::get().to(me::<U, C, P>))
                .route("/change_password", web::post().to(change_password::<U, C, P>))
                .route("/forgot_password", web::post().to(forgot_password::<U, C, P>))
                .route("/reset_password", web::post().to(reset_password::<U, C, P>)),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
