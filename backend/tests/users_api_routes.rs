//! End-to-end behaviour of the assembled route table.

use std::ffi::OsString;

use actix_http::Request;
use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use env_lock::lock_env;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use users_api::api::health::HealthState;
use users_api::api::users::UserRoutes;
use users_api::server::{AppOptions, OPENAPI_PATH, ServerConfig, build_app};
use users_api::settings::AppSettings;

#[fixture]
fn options() -> AppOptions {
    AppOptions {
        routes: UserRoutes { legacy: true },
        docs: true,
    }
}

#[fixture]
fn new_user() -> Value {
    json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "phone_number": "+1 555 0100",
        "residence_country": "United States",
        "email": "grace@example.com"
    })
}

async fn init_app(
    options: AppOptions,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(build_app(web::Data::new(HealthState::new()), options)).await
}

async fn json_call(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    request: TestRequest,
) -> (StatusCode, Value) {
    let response = test::call_service(app, request.to_request()).await;
    assert!(
        response.headers().contains_key("trace-id"),
        "every response carries a trace id"
    );
    let status = response.status();
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn full_user_lifecycle(options: AppOptions, new_user: Value) {
    let app = init_app(options).await;

    let (status, created) = json_call(
        &app,
        TestRequest::post().uri("/users/").set_json(&new_user),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["email"], "grace@example.com");
    assert_eq!(created["country"]["country_code"], "EX");

    let (status, fetched) = json_call(&app, TestRequest::get().uri("/users/7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["user_id"], 7);
    assert_eq!(fetched["user_data"], "Sample user data");

    let mut update = new_user.clone();
    update["id"] = json!(7);
    let (status, updated) = json_call(
        &app,
        TestRequest::patch().uri("/users/7").set_json(&update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        updated["message"]
            .as_str()
            .is_some_and(|m| m.contains("User with ID 7"))
    );
    assert_eq!(updated["updated_data"], update);

    let (status, deleted) = json_call(&app, TestRequest::delete().uri("/users/7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "User with ID 7 has been deleted");
}

#[rstest]
#[case("/users/42")]
#[case("/users42")]
#[actix_web::test]
async fn canonical_and_legacy_routes_agree(options: AppOptions, #[case] uri: &str) {
    let app = init_app(options).await;
    let (status, body) = json_call(&app, TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 42);
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_rejected_before_handler(options: AppOptions) {
    let app = init_app(options).await;
    let (status, body) = json_call(
        &app,
        TestRequest::post()
            .uri("/users/")
            .set_json(json!({"first_name": "Grace"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let missing: Vec<_> = body["details"]["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|error| error["loc"][1].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(
        missing,
        vec!["last_name", "phone_number", "residence_country", "email"]
    );
}

#[rstest]
#[actix_web::test]
async fn root_and_docs_are_served(options: AppOptions) {
    let app = init_app(options).await;

    let (status, greeting) = json_call(&app, TestRequest::get().uri("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(greeting, json!({"message": "Hello World"}));

    let (status, doc) = json_call(&app, TestRequest::get().uri(OPENAPI_PATH)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users/{user_id}"]["patch"].is_object());
}

#[rstest]
#[actix_web::test]
async fn wrong_method_on_user_route_is_not_accepted(options: AppOptions) {
    let app = init_app(options).await;
    let response = test::call_service(
        &app,
        TestRequest::post().uri("/users/42").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn default_settings_serve_legacy_routes_and_docs() {
    let _guard = lock_env([
        ("USERS_API_HOST", None::<String>),
        ("USERS_API_PORT", None::<String>),
        ("USERS_API_LEGACY_ROUTES", None::<String>),
        ("USERS_API_DOCS", None::<String>),
    ]);
    let settings =
        AppSettings::load_from_iter([OsString::from("users-api")]).expect("config should load");
    let app = init_app(AppOptions::from(&ServerConfig::from(&settings))).await;

    let (status, body) = json_call(&app, TestRequest::get().uri("/users42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 42);

    let (status, _) = json_call(&app, TestRequest::get().uri(OPENAPI_PATH)).await;
    assert_eq!(status, StatusCode::OK);
}
