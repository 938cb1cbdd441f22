//! Kernel → message conversion.
//!
//! # Design Decisions
//! - Bodies are buffered in full; the message model has no streaming body
//! - A hard limit bounds memory per conversion

use async_trait::async_trait;
use axum::body::Body;

use crate::bridge::BoxError;
use crate::convert::{ConversionError, MessageFactory, Part};
use crate::http::{KernelRequest, KernelResponse, MessageRequest, MessageResponse};

/// Default upper bound for a buffered body (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Buffers streaming kernel bodies into message values.
#[derive(Debug, Clone, Copy)]
pub struct BufferedMessageFactory {
    body_limit: usize,
}

impl BufferedMessageFactory {
    pub fn new(body_limit: usize) -> Self {
        Self { body_limit }
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    async fn buffer(&self, body: Body, part: Part) -> Result<axum::body::Bytes, ConversionError> {
        axum::body::to_bytes(body, self.body_limit)
            .await
            .map_err(|source| ConversionError::Body { part, source })
    }
}

impl Default for BufferedMessageFactory {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_LIMIT)
    }
}

#[async_trait]
impl MessageFactory for BufferedMessageFactory {
    async fn create_request(&self, request: KernelRequest) -> Result<MessageRequest, BoxError> {
        let (parts, body) = request.into_parts();
        let body = self.buffer(body, Part::Request).await?;
        Ok(MessageRequest::from_parts(parts, body))
    }

    async fn create_response(&self, response: KernelResponse) -> Result<MessageResponse, BoxError> {
        let (parts, body) = response.into_parts();
        let body = self.buffer(body, Part::Response).await?;
        Ok(MessageResponse::from_parts(parts, body))
    }
}
