//! Liveness and readiness probes.
//!
//! Readiness also reports which vote store the process was wired with, so an
//! operator can tell a PostgreSQL-backed instance from an in-memory one.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store backing the voting services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Diesel repositories over PostgreSQL.
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Probe verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// The probe passed.
    Up,
    /// The probe failed.
    Down,
}

/// Probe response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProbeBody {
    /// Verdict for this probe.
    pub status: ProbeStatus,
    /// Absent until the server finished wiring its adapters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageKind>,
}

/// Shared readiness and liveness flags.
///
/// Starts live but not ready; `mark_ready` records the store in use.
#[derive(Debug)]
pub struct HealthState {
    storage: OnceLock<StorageKind>,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            storage: OnceLock::new(),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a state that is live but not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service ready to take traffic on `storage`. Only the first
    /// call wins.
    pub fn mark_ready(&self, storage: StorageKind) {
        let _ = self.storage.set(storage);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether adapters are wired.
    pub fn is_ready(&self) -> bool {
        self.storage.get().is_some()
    }

    /// Whether the process is not draining.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn respond(&self, up: bool) -> HttpResponse {
        let body = ProbeBody {
            status: if up { ProbeStatus::Up } else { ProbeStatus::Down },
            storage: self.storage.get().copied(),
        };
        let mut response = if up {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(body)
    }
}

/// Readiness probe: 200 once adapters are wired, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Ready to serve votes", body = ProbeBody),
        (status = 503, description = "Still starting up", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_ready() && state.is_alive())
}

/// Liveness probe: 200 until the process starts draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process alive", body = ProbeBody),
        (status = 503, description = "Draining for shutdown", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_alive())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, ProbeBody) {
        let app = test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_reports_storage_once_wired() {
        let state = web::Data::new(HealthState::new());
        let (status, body) = probe(state.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.storage, None);

        state.mark_ready(StorageKind::Memory);
        state.mark_ready(StorageKind::Postgres);
        let (status, body) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            ProbeBody {
                status: ProbeStatus::Up,
                storage: Some(StorageKind::Memory),
            }
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn draining_fails_both_probes() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready(StorageKind::Postgres);
        assert_eq!(probe(state.clone(), "/health/live").await.0, StatusCode::OK);

        state.mark_unhealthy();
        assert_eq!(
            probe(state.clone(), "/health/live").await.0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        let (status, body) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, ProbeStatus::Down);
    }
}
