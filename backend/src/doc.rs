//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint (root, users, health) together
//! with the request, response, and error schemas they reference. The document
//! is served at `/openapi.json` with Swagger UI at `/docs` when enabled, and
//! printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::api::health::{HealthStatus, Phase};
use crate::api::users::{CreatedUser, MessageResponse, UserPlaceholder, UserUpdated};
use crate::models::{Country, Error, ErrorCode, User, UserCreate};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "User CRUD endpoints with placeholder country enrichment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::root::root,
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        User,
        UserCreate,
        Country,
        CreatedUser,
        UserPlaceholder,
        UserUpdated,
        MessageResponse,
        HealthStatus,
        Phase,
        Error,
        ErrorCode
    )),
    tags(
        (name = "root", description = "Service greeting"),
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
