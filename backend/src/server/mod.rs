//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig, SettingsError};
pub use state_builders::build_eligibility_checker;

use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

use tracing::info;
use voting_backend::Trace;
#[cfg(debug_assertions)]
use voting_backend::doc::ApiDoc;
use voting_backend::inbound::http::health::{HealthState, StorageKind, live, ready};
use voting_backend::inbound::http::state::HttpState;
use voting_backend::inbound::http::{api_scope, route_not_found};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

#[cfg(feature = "metrics")]
fn default_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("voting")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Persistence adapters are chosen from `config`: Diesel repositories when a
/// pool is attached, the in-memory store otherwise.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or registering
/// metrics fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let storage = if config.db_pool.is_some() {
        StorageKind::Postgres
    } else {
        StorageKind::Memory
    };
    let bind_addr = config.bind_addr;

    #[cfg(feature = "metrics")]
    let prometheus = match config.prometheus {
        Some(metrics) => metrics,
        None => default_metrics()?,
    };

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready(storage);
    Ok(server)
}

/// Wait for `signal`, fail liveness, then stop accepting connections and let
/// in-flight requests finish.
pub async fn drain_on<F>(signal: F, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested; draining");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
