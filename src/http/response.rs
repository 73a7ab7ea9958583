//! HTTP response building module
//!
//! Every response of the service is `200 OK` with a JSON body; the outcome is
//! carried inside the body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Body used if serialization itself fails
const SERIALIZE_FAILURE_BODY: &str =
    r#"{"result":{"title":"","short_description":""},"message":"internal error","status":"Error"}"#;

/// Build a `200 OK` JSON response
pub fn build_json_response<T: Serialize>(body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_vec(body).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to serialize response: {e}"));
        SERIALIZE_FAILURE_BODY.as_bytes().to_vec()
    });
    let content_length = json.len();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to build JSON response: {e}"));
            Response::new(Full::new(Bytes::from_static(SERIALIZE_FAILURE_BODY.as_bytes())))
        })
}
