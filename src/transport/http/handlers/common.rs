use crate::error::BookError;
use crate::transport::http::types::MessageBody;
use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value as JsonValue;

/// Every non-success response leaves the HTTP layer through this type.
///
/// Clients match on the text, so the two body shapes are kept distinct:
/// fixed validation/not-found outcomes are a bare JSON string, failures that
/// carry an underlying error are `{ "message": ... }`.
#[derive(Debug)]
pub enum ApiError {
    Plain(StatusCode, &'static str),
    Message(StatusCode, String),
}

impl ApiError {
    /// A failed write on create is the client's problem (bad or conflicting data).
    pub fn rejected_write(err: BookError) -> Self {
        ApiError::Message(StatusCode::BAD_REQUEST, err.to_string())
    }

    pub fn bad_json(err: serde_json::Error) -> Self {
        ApiError::Message(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", err))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Plain(status, _) | ApiError::Message(status, _) => *status,
        }
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Reads a JSON request body. A body that is empty or not declared as JSON
/// reads as `{}`; a declared JSON body that does not parse is a 400.
pub fn json_body_or_empty(headers: &HeaderMap, body: &Bytes) -> Result<JsonValue, ApiError> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(ApiError::bad_json)
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        tracing::error!(error = %err, "book store failure");
        ApiError::Message(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Plain(status, text) => (status, Json(text)).into_response(),
            ApiError::Message(status, message) => (status, Json(MessageBody { message })).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderValue;
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        headers
    }

    #[test]
    fn missing_or_foreign_content_type_reads_as_empty_object() {
        let body = Bytes::from_static(b"{\"bookId\": 3}");
        assert_eq!(json_body_or_empty(&HeaderMap::new(), &body).unwrap(), json!({}));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert_eq!(json_body_or_empty(&headers, &body).unwrap(), json!({}));
    }

    #[test]
    fn empty_json_body_reads_as_empty_object() {
        assert_eq!(json_body_or_empty(&json_headers(), &Bytes::new()).unwrap(), json!({}));
        assert_eq!(json_body_or_empty(&json_headers(), &Bytes::from_static(b"  \n")).unwrap(), json!({}));
    }

    #[test]
    fn json_body_is_parsed_and_syntax_errors_are_bad_request() {
        let parsed = json_body_or_empty(&json_headers(), &Bytes::from_static(b"{\"bookId\": 3}")).unwrap();
        assert_eq!(parsed, json!({ "bookId": 3 }));

        let err = json_body_or_empty(&json_headers(), &Bytes::from_static(b"{\"bookId\":")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_internal_error() {
        let err = ApiError::from(BookError::InvalidPayload("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejected_writes_map_to_bad_request_with_message() {
        let err = ApiError::rejected_write(BookError::Rejected("UNIQUE constraint failed".to_string()));
        match err {
            ApiError::Message(status, message) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "UNIQUE constraint failed");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
