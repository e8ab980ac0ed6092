//! REST API modules.

pub mod extract;
pub mod health;
pub mod root;
pub mod users;

use actix_web::{HttpRequest, HttpResponse};

use crate::models::{ApiResult, Error};

/// Fallback for requests no route matches.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}
