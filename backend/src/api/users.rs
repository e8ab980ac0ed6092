//! Users API handlers.
//!
//! ```text
//! POST   /users/            {"first_name":"Ada",...}
//! GET    /users/{user_id}
//! PATCH  /users/{user_id}   {"id":null,"first_name":"Ada",...}
//! DELETE /users/{user_id}
//! ```
//!
//! No store is wired in: create and update echo their input, reads return a
//! fixed placeholder, and delete only confirms.

use actix_web::web;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::api::extract::{UserId, ValidatedJson};
use crate::models::{Country, Error, User, UserCreate};

/// Pattern for the user collection.
pub const USERS_ROUTE: &str = "/users/";

/// Canonical pattern for routes addressing one user.
pub const USER_ROUTE: &str = "/users/{user_id}";

/// Pattern historically served without a separating slash, e.g. `/users42`.
pub const LEGACY_USER_ROUTE: &str = "/users{user_id}";

const PLACEHOLDER_USER_DATA: &str = "Sample user data";

/// Route patterns to register for single-user operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRoutes {
    /// Also answer on [`LEGACY_USER_ROUTE`].
    pub legacy: bool,
}

impl UserRoutes {
    fn patterns(self) -> Vec<&'static str> {
        if self.legacy {
            vec![USER_ROUTE, LEGACY_USER_ROUTE]
        } else {
            vec![USER_ROUTE]
        }
    }
}

/// Register the users routes on an application or scope.
///
/// Each pattern is one resource, so a known path with an unsupported method
/// answers 405 rather than falling through to the application's 404.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::api::users::{configure, UserRoutes};
///
/// let app = App::new().configure(|cfg| configure(cfg, UserRoutes { legacy: false }));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, routes: UserRoutes) {
    cfg.service(web::resource(USERS_ROUTE).route(web::post().to(create_user)))
        .service(
            web::resource(routes.patterns())
                .route(web::get().to(get_user))
                .route(web::patch().to(update_user))
                .route(web::delete().to(delete_user)),
        );
}

/// Created user echoed back with its enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedUser {
    #[serde(flatten)]
    pub user: UserCreate,
    pub country: Country,
}

/// Placeholder returned for any user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPlaceholder {
    #[schema(example = 42)]
    pub user_id: i64,
    #[schema(example = "Sample user data")]
    pub user_data: String,
    pub country: Country,
}

/// Update confirmation echoing the submitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserUpdated {
    #[schema(example = "User with ID 42 has been updated")]
    pub message: String,
    pub updated_data: User,
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User with ID 42 has been deleted")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create a user. Nothing is stored; the body is echoed with a country.
#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserCreate,
    responses(
        (status = 200, description = "Echoed user", body = CreatedUser),
        (status = 400, description = "Unreadable body", body = Error),
        (status = 422, description = "Body does not match UserCreate", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(payload: ValidatedJson<UserCreate>) -> web::Json<CreatedUser> {
    let user = payload.into_inner();
    debug!(email = %user.email, "create user accepted");
    web::Json(CreatedUser {
        user,
        country: Country::placeholder(),
    })
}

/// Fetch a user. Returns the same placeholder for every id.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Placeholder user", body = UserPlaceholder),
        (status = 422, description = "user_id is not an integer", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(user_id: UserId) -> web::Json<UserPlaceholder> {
    debug!(%user_id, "get user");
    web::Json(UserPlaceholder {
        user_id: user_id.0,
        user_data: PLACEHOLDER_USER_DATA.to_owned(),
        country: Country::placeholder(),
    })
}

/// Update a user. Nothing is mutated; the body is echoed.
#[utoipa::path(
    patch,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    request_body = User,
    responses(
        (status = 200, description = "Update confirmation", body = UserUpdated),
        (status = 400, description = "Unreadable body", body = Error),
        (status = 422, description = "Body or user_id does not match", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(user_id: UserId, payload: ValidatedJson<User>) -> web::Json<UserUpdated> {
    debug!(%user_id, "update user");
    web::Json(UserUpdated {
        message: format!("User with ID {user_id} has been updated"),
        updated_data: payload.into_inner(),
    })
}

/// Delete a user. Nothing is removed, so repeated calls answer identically.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deletion confirmation", body = MessageResponse),
        (status = 422, description = "user_id is not an integer", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(user_id: UserId) -> web::Json<MessageResponse> {
    debug!(%user_id, "delete user");
    web::Json(MessageResponse::new(format!(
        "User with ID {user_id} has been deleted"
    )))
}
