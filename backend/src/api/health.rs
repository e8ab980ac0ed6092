//! Health endpoints driven by the server lifecycle.
//!
//! The server moves through [`Phase::Starting`], [`Phase::Serving`] and
//! [`Phase::Draining`] in that order and never back. Readiness holds only
//! while serving; liveness holds until draining begins.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle phase reported by the health endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    /// The listener is not bound yet.
    Starting = 0,
    /// Accepting requests.
    Serving = 1,
    /// Shutdown has begun; in-flight requests are finishing.
    Draining = 2,
}

impl Phase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Body of both health endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub phase: Phase,
}

/// Lifecycle phase shared between the server and its workers.
///
/// # Examples
/// ```
/// use users_api::api::health::{HealthState, Phase};
///
/// let state = HealthState::new();
/// state.mark_ready();
/// state.mark_draining();
/// state.mark_ready();
/// assert_eq!(state.phase(), Phase::Draining);
/// ```
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting as u8),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Enter [`Phase::Serving`]. Has no effect once draining.
    pub fn mark_ready(&self) {
        let _ = self.phase.compare_exchange(
            Phase::Starting as u8,
            Phase::Serving as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Enter [`Phase::Draining`].
    pub fn mark_draining(&self) {
        self.phase.store(Phase::Draining as u8, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Serving
    }

    pub fn is_alive(&self) -> bool {
        self.phase() != Phase::Draining
    }

    fn respond(&self, healthy: bool) -> HttpResponse {
        let mut builder = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(HealthStatus {
                phase: self.phase(),
            })
    }
}

/// Readiness: 200 while serving, 503 while starting or draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting traffic", body = HealthStatus),
        (status = 503, description = "Starting or draining", body = HealthStatus)
    ),
    operation_id = "ready"
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_ready())
}

/// Liveness: 200 until draining begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is alive", body = HealthStatus),
        (status = 503, description = "Draining", body = HealthStatus)
    ),
    operation_id = "live"
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_alive())
}
