//! HTTP server configuration object and helpers.

use crate::api::users::UserRoutes;
use crate::settings::AppSettings;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) routes: UserRoutes,
    pub(crate) docs: bool,
}

impl ServerConfig {
    /// Bind to `host:port` with canonical routes only and docs disabled.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            bind_addr: (host.into(), port),
            routes: UserRoutes { legacy: false },
            docs: false,
        }
    }

    /// Also serve the slash-less legacy user routes.
    #[must_use]
    pub fn with_legacy_routes(mut self, legacy: bool) -> Self {
        self.routes = UserRoutes { legacy };
        self
    }

    /// Serve Swagger UI and the OpenAPI document.
    #[must_use]
    pub fn with_docs(mut self, docs: bool) -> Self {
        self.docs = docs;
        self
    }

    /// Return the host and port the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_addr.0.as_str(), self.bind_addr.1)
    }
}

impl From<&AppSettings> for ServerConfig {
    fn from(settings: &AppSettings) -> Self {
        Self::new(settings.host(), settings.port())
            .with_legacy_routes(settings.legacy_routes())
            .with_docs(settings.docs())
    }
}
