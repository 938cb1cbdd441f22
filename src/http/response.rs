//! Response construction helpers.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};

use crate::convert::{ConversionError, Part};
use crate::http::{KernelResponse, MessageResponse};

/// A fresh message response: 200 OK, no headers, empty body.
pub fn empty_message_response() -> MessageResponse {
    MessageResponse::new(Bytes::new())
}

/// Map an error surfaced by the bridge to a kernel response for the client.
///
/// A request body that could not be buffered is the client's fault; anything
/// else is reported as an internal error without leaking its details.
pub fn error_response(error: &(dyn std::error::Error + 'static)) -> KernelResponse {
    let (status, message) = match error.downcast_ref::<ConversionError>() {
        Some(ConversionError::Body {
            part: Part::Request,
            ..
        }) => (StatusCode::BAD_REQUEST, "Request body could not be read"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    };

    let mut response = KernelResponse::new(Body::from(message));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgeError;

    #[test]
    fn empty_response_is_blank_ok() {
        let response = empty_message_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn invalid_target_maps_to_internal_error() {
        let response = error_response(&BridgeError::InvalidTarget);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unreadable_request_body_maps_to_bad_request() {
        let error = ConversionError::Body {
            part: Part::Request,
            source: axum::Error::new(std::io::Error::other("reset")),
        };
        let response = error_response(&error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_errors_map_to_internal_error() {
        let error = std::io::Error::other("boom");
        let response = error_response(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
