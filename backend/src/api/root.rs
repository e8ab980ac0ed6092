//! Root greeting endpoint.

use actix_web::{get, web};

use crate::api::users::MessageResponse;

/// Greet callers of the service root.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = MessageResponse)),
    tags = ["root"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> web::Json<MessageResponse> {
    web::Json(MessageResponse::new("Hello World"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn root_says_hello() {
        let app = test::init_service(App::new().service(root)).await;
        let request = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body, json!({"message": "Hello World"}));
    }
}
