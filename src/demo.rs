//! Sample message applications served by the binary.

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use serde_json::json;

use crate::bridge::{callable_fn, BoxError, MessageCallable, Next};
use crate::http::{MessageRequest, MessageResponse};

/// Answers every request with `200 hello world`.
pub fn hello_world() -> impl MessageCallable + Clone {
    callable_fn(|_request: MessageRequest, response: MessageResponse, _next: Option<Next>| async move {
        let (mut parts, _) = response.into_parts();
        parts.status = StatusCode::OK;
        parts.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        Ok::<_, BoxError>(MessageResponse::from_parts(parts, Bytes::from_static(b"hello world")))
    })
}

/// Describes the incoming request as JSON.
pub fn echo() -> impl MessageCallable + Clone {
    callable_fn(|request: MessageRequest, response: MessageResponse, _next: Option<Next>| async move {
        let document = json!({
            "method": request.method().as_str(),
            "path": request.uri().path(),
            "query": request.uri().query(),
            "headers": request.headers().len(),
            "body_bytes": request.body().len(),
        });

        let (mut parts, _) = response.into_parts();
        parts.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        let body = serde_json::to_vec(&document)?;
        Ok::<_, BoxError>(MessageResponse::from_parts(parts, Bytes::from(body)))
    })
}
