//! Message calling convention.
//!
//! A message callable receives a request, a response to build upon and an
//! optional continuation standing for the rest of the middleware chain.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::bridge::kernel::{HttpKernel, RequestType};
use crate::bridge::BoxError;
use crate::convert::{KernelFactory, MessageFactory};
use crate::http::{MessageRequest, MessageResponse};
use crate::observability::metrics;

/// Continuation handed to a message callable.
pub type Next = Arc<dyn MessageCallable>;

/// Middleware-style callable over buffered messages.
#[async_trait]
pub trait MessageCallable: Send + Sync {
    async fn invoke(
        &self,
        request: MessageRequest,
        response: MessageResponse,
        next: Option<Next>,
    ) -> Result<MessageResponse, BoxError>;
}

/// Message callable backed by an async closure.
///
/// Created with [`callable_fn`].
#[derive(Clone)]
pub struct CallableFn<F> {
    f: F,
}

/// Build a message callable from a three-argument async closure.
pub fn callable_fn<F, Fut>(f: F) -> CallableFn<F>
where
    F: Fn(MessageRequest, MessageResponse, Option<Next>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<MessageResponse, BoxError>> + Send + 'static,
{
    CallableFn { f }
}

#[async_trait]
impl<F, Fut> MessageCallable for CallableFn<F>
where
    F: Fn(MessageRequest, MessageResponse, Option<Next>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<MessageResponse, BoxError>> + Send + 'static,
{
    async fn invoke(
        &self,
        request: MessageRequest,
        response: MessageResponse,
        next: Option<Next>,
    ) -> Result<MessageResponse, BoxError> {
        (self.f)(request, response, next).await
    }
}

/// Callable view of a kernel handler.
///
/// The incoming response and continuation are dropped: a kernel handler
/// builds its own response and has no chain to continue.
pub(crate) struct KernelCallable {
    pub(crate) kernel: Arc<dyn HttpKernel>,
    pub(crate) to_kernel: Arc<dyn KernelFactory>,
    pub(crate) to_message: Arc<dyn MessageFactory>,
}

#[async_trait]
impl MessageCallable for KernelCallable {
    async fn invoke(
        &self,
        request: MessageRequest,
        _response: MessageResponse,
        _next: Option<Next>,
    ) -> Result<MessageResponse, BoxError> {
        let kernel_request = self.to_kernel.create_request(request).await?;
        metrics::record_conversion("to_kernel", "request");

        let kernel_response = self
            .kernel
            .handle(kernel_request, RequestType::Main, true)
            .await?;

        let response = self.to_message.create_response(kernel_response).await?;
        metrics::record_conversion("to_message", "response");
        Ok(response)
    }
}
