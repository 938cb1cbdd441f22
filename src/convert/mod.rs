//! Conversion between the kernel and message models.
//!
//! # Data Flow
//! ```text
//! MessageRequest  ──KernelFactory::create_request──▶  KernelRequest
//! MessageResponse ──KernelFactory::create_response─▶  KernelResponse
//!
//! KernelRequest   ──MessageFactory::create_request──▶ MessageRequest
//! KernelResponse  ──MessageFactory::create_response─▶ MessageResponse
//! ```
//!
//! # Design Decisions
//! - One strategy per direction, each swappable on the bridge
//! - Parts (method, URI, headers, status, extensions) move across untouched
//! - Only the kernel → message direction can fail, since it buffers a stream

pub mod kernel;
pub mod message;

use async_trait::async_trait;
use thiserror::Error;

use crate::bridge::BoxError;
use crate::http::{KernelRequest, KernelResponse, MessageRequest, MessageResponse};

pub use kernel::DefaultKernelFactory;
pub use message::{BufferedMessageFactory, DEFAULT_BODY_LIMIT};

/// Builds kernel-side values from message-side values ("to-kernel").
#[async_trait]
pub trait KernelFactory: Send + Sync {
    async fn create_request(&self, request: MessageRequest) -> Result<KernelRequest, BoxError>;

    async fn create_response(&self, response: MessageResponse) -> Result<KernelResponse, BoxError>;
}

/// Builds message-side values from kernel-side values ("to-message").
#[async_trait]
pub trait MessageFactory: Send + Sync {
    async fn create_request(&self, request: KernelRequest) -> Result<MessageRequest, BoxError>;

    async fn create_response(&self, response: KernelResponse) -> Result<MessageResponse, BoxError>;
}

/// Which half of an exchange a conversion touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Request,
    Response,
}

impl Part {
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Request => "request",
            Part::Response => "response",
        }
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures raised by the default converters.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Failed to buffer {part} body: {source}")]
    Body {
        part: Part,
        #[source]
        source: axum::Error,
    },
}
