//! Request extractors that check declared shapes before a handler runs.

use actix_web::dev::{JsonBody, Payload};
use actix_web::error::JsonPayloadError;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::Value;

use crate::models::Error;
use crate::models::schema::{self, Schema, Violation};

/// Largest JSON body accepted by [`ValidatedJson`].
pub const JSON_LIMIT: usize = 64 * 1024;

/// Path segment name carrying the user identifier.
pub const USER_ID_PARAM: &str = "user_id";

/// JSON body checked against `T`'s [`Schema`] before deserialisation.
///
/// Rejections are reported as [`Error`] envelopes. Oversized or unreadable
/// bodies are `invalid_request`; anything that is not a JSON object of the
/// declared shape, including a non-JSON content type, is `validation_failed`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Unwrap the validated body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Schema + 'static> FromRequest for ValidatedJson<T> {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = JsonBody::<Value>::new(req, payload, None, true).limit(JSON_LIMIT);
        Box::pin(async move {
            let value = body.await.map_err(map_payload_error)?;
            let parsed = schema::validate::<T>(value)?;
            Ok(Self(parsed))
        })
    }
}

fn map_payload_error(err: JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::Deserialize(source) => Error::validation_failed(vec![Violation::new(
            vec![schema::BODY_LOC.to_owned()],
            "json_invalid",
            format!("JSON decode error: {source}"),
        )]),
        JsonPayloadError::ContentType => Error::validation_failed(vec![Violation::new(
            vec![schema::BODY_LOC.to_owned()],
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
        )]),
        JsonPayloadError::OverflowKnownLength { limit, .. } | JsonPayloadError::Overflow { limit } => {
            Error::invalid_request(format!("request body exceeds {limit} bytes"))
        }
        other => Error::invalid_request(format!("request body could not be read: {other}")),
    }
}

/// User identifier parsed from the `user_id` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get(USER_ID_PARAM).unwrap_or_default();
        ready(raw.parse().map(Self).map_err(|_| {
            Error::validation_failed(vec![Violation::new(
                vec!["path".to_owned(), USER_ID_PARAM.to_owned()],
                "int_parsing",
                "Input should be a valid integer, unable to parse string as an integer",
            )])
        }))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorCode, UserCreate};
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde_json::json;

    async fn extract_body(req: TestRequest) -> Result<UserCreate, Error> {
        let (req, mut payload) = req.to_http_parts();
        ValidatedJson::<UserCreate>::from_request(&req, &mut payload)
            .await
            .map(ValidatedJson::into_inner)
    }

    fn first_violation_code(err: &Error) -> Option<String> {
        err.details.as_ref()?["errors"][0]["code"]
            .as_str()
            .map(str::to_owned)
    }

    #[actix_web::test]
    async fn non_json_content_type_is_a_validation_failure() {
        let err = extract_body(
            TestRequest::post()
                .insert_header(("content-type", "application/x-www-form-urlencoded"))
                .set_payload("first_name=Ada"),
        )
        .await
        .expect_err("form body is rejected");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(
            first_violation_code(&err).as_deref(),
            Some("model_attributes_type")
        );
        let loc = err.details.as_ref().map(|details| &details["errors"][0]["loc"]);
        assert_eq!(loc, Some(&json!(["body"])));
    }

    #[actix_web::test]
    async fn malformed_json_is_a_validation_failure() {
        let err = extract_body(
            TestRequest::post()
                .insert_header(("content-type", "application/json"))
                .set_payload("{\"first_name\":"),
        )
        .await
        .expect_err("truncated JSON is rejected");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(first_violation_code(&err).as_deref(), Some("json_invalid"));
    }

    #[actix_web::test]
    async fn oversized_body_is_invalid_request() {
        let filler = "x".repeat(JSON_LIMIT);
        let err = extract_body(TestRequest::post().set_json(json!({ "first_name": filler })))
            .await
            .expect_err("oversized body is rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("-7", Some(-7))]
    #[case("abc", None)]
    #[case("4.2", None)]
    #[case("99999999999999999999", None)]
    #[actix_web::test]
    async fn user_id_parses_signed_integers(#[case] raw: &str, #[case] expected: Option<i64>) {
        let req = TestRequest::default()
            .param(USER_ID_PARAM, raw.to_owned())
            .to_http_request();
        let result = UserId::extract(&req).await;
        match expected {
            Some(id) => assert_eq!(result.expect("integer id").0, id),
            None => {
                let err = result.expect_err("non-integer id is rejected");
                assert_eq!(err.code, ErrorCode::ValidationFailed);
                assert_eq!(first_violation_code(&err).as_deref(), Some("int_parsing"));
            }
        }
    }
}
