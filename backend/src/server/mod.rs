//! Server construction and route wiring.
//!
//! The application is an explicit value assembled by [`build_app`] at
//! startup; nothing is registered through global state.

mod config;
mod shutdown;

pub use config::ServerConfig;
pub use shutdown::{serve_until, wait_for_signal};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use ortho_config::OrthoError;
use thiserror::Error;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::api::health::{HealthState, live, ready};
use crate::api::root::root;
use crate::api::users::{self, UserRoutes};
use crate::api::not_found;
use crate::doc::ApiDoc;

/// Path serving the OpenAPI document when docs are enabled.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Swagger UI entry point. The UI itself lives under `/docs/`.
pub const DOCS_PATH: &str = "/docs";

/// Failures raised while starting the service.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Settings could not be loaded from CLI, environment, or file.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Arc<OrthoError>),
    /// The listener could not bind its address.
    #[error("failed to bind {host}:{port}: {source}")]
    Bind {
        /// Host that was requested.
        host: String,
        /// Port that was requested.
        port: u16,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err)
    }
}

/// Options shaping the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOptions {
    /// User route patterns to register.
    pub routes: UserRoutes,
    /// Serve Swagger UI and the OpenAPI document.
    pub docs: bool,
}

impl From<&ServerConfig> for AppOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            routes: config.routes,
            docs: config.docs,
        }
    }
}

/// Assemble the application: middleware, routes, and the JSON 404 fallback.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use users_api::api::health::HealthState;
/// use users_api::api::users::UserRoutes;
/// use users_api::server::{build_app, AppOptions};
///
/// let options = AppOptions { routes: UserRoutes { legacy: true }, docs: false };
/// let _app = build_app(web::Data::new(HealthState::new()), options);
/// ```
pub fn build_app(
    health_state: web::Data<HealthState>,
    options: AppOptions,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppOptions { routes, docs } = options;

    App::new()
        .app_data(health_state)
        .wrap(Trace)
        .service(root)
        .configure(|cfg| users::configure(cfg, routes))
        .service(ready)
        .service(live)
        .configure(|cfg| {
            if docs {
                cfg.service(web::redirect(DOCS_PATH, "/docs/"))
                    .service(SwaggerUi::new("/docs/{_:.*}").url(OPENAPI_PATH, ApiDoc::openapi()));
            }
        })
        .default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is marked once the socket is bound. Signal handling is left to
/// the caller; pair the server with [`serve_until`] so health drains first.
///
/// # Errors
/// Returns [`StartupError::Bind`] when the listener cannot bind.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> Result<Server, StartupError> {
    let options = AppOptions::from(&config);
    let ServerConfig {
        bind_addr: (host, port),
        ..
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), options))
        .disable_signals()
        .bind((host.as_str(), port))
        .map_err(|source| StartupError::Bind {
            host: host.clone(),
            port,
            source,
        })?
        .run();

    info!(
        %host,
        port,
        legacy_routes = options.routes.legacy,
        docs = options.docs,
        "users api listening"
    );
    health_state.mark_ready();
    Ok(server)
}
