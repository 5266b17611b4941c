use crate::admin::{AdminGateway, AdminStore, GatewayConfig, PasswordHasher, PgAdminStore};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Extension, Json, Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

pub mod handlers;
mod openapi;

pub use openapi::openapi;

use handlers::{admin, health, root};

/// Pool and listener settings for [`new`].
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub port: u16,
    pub max_connections: u32,
}

/// Build the application router around a gateway.
///
/// The store behind the gateway is up to the caller, which keeps the router
/// usable with an in-process store.
#[must_use]
pub fn router(gateway: Arc<AdminGateway>) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .route("/admin/users", post(admin::create::create_admin))
        .route(
            "/admin/users/reset-password",
            post(admin::reset::reset_password),
        )
        .route("/auth/admin/login", post(admin::login::login))
        .route("/debug/admin", get(admin::lookup::lookup_admin))
        .route("/openapi.json", get(|| async { Json(openapi()) }))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(gateway)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to connect to the database or bind the listener
pub async fn new(
    server: ServerConfig,
    dsn: &str,
    gateway_config: GatewayConfig,
    hasher: PasswordHasher,
) -> Result<()> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(server.max_connections)
        .max_lifetime(Duration::from_secs(60 * 2))
        .acquire_timeout(gateway_config.store_timeout())
        .test_before_acquire(true)
        .connect(dsn)
        .await
        .context("Failed to connect to database")?;

    let store: Arc<dyn AdminStore> = Arc::new(PgAdminStore::new(pool));
    let gateway = Arc::new(AdminGateway::new(gateway_config, hasher, store));

    let app = router(gateway);

    let listener = TcpListener::bind(format!("::0:{}", server.port)).await?;

    info!("Listening on [::]:{}", server.port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Gracefully shutdown"),
        Err(err) => {
            error!("Failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_span_without_request_id() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .map_err(|err| err.to_string());
        assert!(request.is_ok());
        if let Ok(request) = request {
            let _span = make_span(&request);
        }
    }
}
