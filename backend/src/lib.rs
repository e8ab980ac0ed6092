//! User management HTTP API.
//!
//! Create, read, update, and delete endpoints over user records with a
//! placeholder country enrichment. No store is wired in.

pub mod api;
pub mod doc;
pub mod middleware;
pub mod models;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
