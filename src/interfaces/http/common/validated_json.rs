//! JSON extractor that also runs `validator` rules.
//!
//! Malformed bodies are answered with 400, rule violations with 422. Both
//! use the [`ApiResponse`] envelope so clients see one error shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// `Json<T>` plus `Validate::validate()`.
///
/// ```ignore
/// async fn create_client(ValidatedJson(body): ValidatedJson<CreateClientRequest>) {
///     // body.email has already passed #[validate(email)]
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: message` pairs, ordered by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    fields.sort();

    if fields.is_empty() {
        "Validation failed".to_string()
    } else {
        fields.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection.body_text()),
            ),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::Service;

    #[derive(Debug, Deserialize, Validate)]
    struct Guest {
        #[validate(length(min = 1, max = 20))]
        first_name: String,
        #[validate(email)]
        email: String,
    }

    async fn handler(ValidatedJson(guest): ValidatedJson<Guest>) -> String {
        guest.first_name
    }

    async fn post_json(body: &str) -> (StatusCode, serde_json::Value) {
        let mut svc = Router::new().route("/guests", post(handler)).into_service();
        let req = Request::builder()
            .method("POST")
            .uri("/guests")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let (status, _) = post_json(r#"{"first_name":"Ana","email":"ana@example.com"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, json) = post_json("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn rule_violations_are_422_and_name_fields() {
        let (status, json) = post_json(r#"{"first_name":"","email":"nope"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error = json["error"].as_str().unwrap();
        assert!(error.starts_with("email:"));
        assert!(error.contains("first_name:"));
    }
}
