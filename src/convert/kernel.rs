//! Message → kernel conversion.

use async_trait::async_trait;
use axum::body::Body;

use crate::bridge::BoxError;
use crate::convert::KernelFactory;
use crate::http::{KernelRequest, KernelResponse, MessageRequest, MessageResponse};

/// Wraps buffered bodies back into streaming ones. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKernelFactory;

#[async_trait]
impl KernelFactory for DefaultKernelFactory {
    async fn create_request(&self, request: MessageRequest) -> Result<KernelRequest, BoxError> {
        let (parts, body) = request.into_parts();
        Ok(KernelRequest::from_parts(parts, Body::from(body)))
    }

    async fn create_response(&self, response: MessageResponse) -> Result<KernelResponse, BoxError> {
        let (parts, body) = response.into_parts();
        Ok(KernelResponse::from_parts(parts, Body::from(body)))
    }
}
