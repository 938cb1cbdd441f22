//! The bridge between kernel handlers and message callables.
//!
//! # Data Flow
//! ```text
//! kernel caller ──handle──▶ Bridge ──(kernel target)────────────────▶ HttpKernel
//!                                  └─(callable target)─ to-message ─▶ MessageCallable
//!                                                       ◀─ to-kernel ─┘
//!
//! message caller ──invoke──▶ Bridge ──(callable target)─────────────▶ MessageCallable
//!                                   └─(kernel target)── to-kernel ──▶ HttpKernel
//!                                                       ◀─ to-message ┘
//! ```
//!
//! Conversions happen only when the caller's convention differs from the
//! target's. Errors from converters and targets pass through unchanged.

pub mod callable;
pub mod error;
pub mod kernel;

use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::convert::{BufferedMessageFactory, DefaultKernelFactory, KernelFactory, MessageFactory};
use crate::http::response::empty_message_response;
use crate::http::{KernelRequest, KernelResponse, MessageRequest, MessageResponse};
use crate::observability::metrics;

pub use callable::{callable_fn, CallableFn, MessageCallable, Next};
pub use error::{BoxError, BridgeError};
pub use kernel::{kernel_fn, CallableKernel, HttpKernel, RequestType, ServiceKernel};

use callable::KernelCallable;

/// The wrapped application, classified once at construction.
#[derive(Clone)]
pub enum Target {
    Kernel(Arc<dyn HttpKernel>),
    Callable(Arc<dyn MessageCallable>),
}

impl Target {
    pub fn kernel(kernel: impl HttpKernel + 'static) -> Self {
        Target::Kernel(Arc::new(kernel))
    }

    pub fn callable(callable: impl MessageCallable + 'static) -> Self {
        Target::Callable(Arc::new(callable))
    }

    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Kernel(_) => "kernel",
            Target::Callable(_) => "callable",
        }
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Target").field(&self.kind()).finish()
    }
}

/// Adapter exposing both the kernel and the message calling conventions over
/// a single target.
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct Bridge {
    target: Option<Target>,
    to_kernel: Arc<dyn KernelFactory>,
    to_message: Arc<dyn MessageFactory>,
}

impl Bridge {
    /// Create a bridge with the default converters.
    ///
    /// `None` yields a bridge whose every call fails with
    /// [`BridgeError::InvalidTarget`].
    pub fn new(target: impl Into<Option<Target>>) -> Self {
        Self {
            target: target.into(),
            to_kernel: Arc::new(DefaultKernelFactory),
            to_message: Arc::new(BufferedMessageFactory::default()),
        }
    }

    pub fn from_kernel(kernel: impl HttpKernel + 'static) -> Self {
        Self::new(Target::kernel(kernel))
    }

    pub fn from_callable(callable: impl MessageCallable + 'static) -> Self {
        Self::new(Target::callable(callable))
    }

    /// Replace the message → kernel converter.
    pub fn set_kernel_factory(&mut self, factory: impl KernelFactory + 'static) {
        self.to_kernel = Arc::new(factory);
    }

    /// Replace the kernel → message converter.
    pub fn set_message_factory(&mut self, factory: impl MessageFactory + 'static) {
        self.to_message = Arc::new(factory);
    }

    pub fn with_kernel_factory(mut self, factory: impl KernelFactory + 'static) -> Self {
        self.set_kernel_factory(factory);
        self
    }

    pub fn with_message_factory(mut self, factory: impl MessageFactory + 'static) -> Self {
        self.set_message_factory(factory);
        self
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    fn resolve_target(&self) -> Result<&Target, BridgeError> {
        self.target.as_ref().ok_or_else(|| {
            tracing::error!("Bridge has no usable target");
            BridgeError::InvalidTarget
        })
    }

    /// Kernel convention.
    ///
    /// A kernel target receives the call as is. A callable target receives the
    /// converted request together with a fresh empty response.
    pub async fn handle(
        &self,
        request: KernelRequest,
        request_type: RequestType,
        catch_errors: bool,
    ) -> Result<KernelResponse, BoxError> {
        let target = self.resolve_target()?;
        metrics::record_dispatch("kernel", target.kind());

        match target {
            Target::Kernel(kernel) => {
                tracing::debug!(?request_type, "Delegating to kernel target");
                kernel.handle(request, request_type, catch_errors).await
            }
            Target::Callable(callable) => {
                tracing::debug!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "Converting kernel request for callable target"
                );

                let message_request = self.to_message.create_request(request).await?;
                metrics::record_conversion("to_message", "request");

                let message_response = callable
                    .invoke(message_request, empty_message_response(), None)
                    .await?;

                let response = self.to_kernel.create_response(message_response).await?;
                metrics::record_conversion("to_kernel", "response");
                Ok(response)
            }
        }
    }

    /// [`handle`](Self::handle) as a main request with errors caught.
    pub async fn handle_main(&self, request: KernelRequest) -> Result<KernelResponse, BoxError> {
        self.handle(request, RequestType::Main, true).await
    }

    /// Message convention.
    ///
    /// With a continuation, the continuation runs and receives this bridge's
    /// callable view as its own continuation. Without one, the callable view
    /// runs directly.
    pub async fn invoke(
        &self,
        request: MessageRequest,
        response: MessageResponse,
        next: Option<Next>,
    ) -> Result<MessageResponse, BoxError> {
        let callable = self.message_callable()?;

        match next {
            Some(next) => {
                tracing::debug!("Handing callable view to continuation");
                next.invoke(request, response, Some(callable)).await
            }
            None => callable.invoke(request, response, None).await,
        }
    }

    /// The target seen as a message callable.
    ///
    /// A kernel target is wrapped so that it converts on the way in and out.
    pub fn message_callable(&self) -> Result<Next, BridgeError> {
        let target = self.resolve_target()?;
        metrics::record_dispatch("message", target.kind());

        Ok(match target {
            Target::Callable(callable) => callable.clone(),
            Target::Kernel(kernel) => Arc::new(KernelCallable {
                kernel: kernel.clone(),
                to_kernel: self.to_kernel.clone(),
                to_message: self.to_message.clone(),
            }),
        })
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpKernel for Bridge {
    async fn handle(
        &self,
        request: KernelRequest,
        request_type: RequestType,
        catch_errors: bool,
    ) -> Result<KernelResponse, BoxError> {
        Bridge::handle(self, request, request_type, catch_errors).await
    }
}

#[async_trait]
impl MessageCallable for Bridge {
    async fn invoke(
        &self,
        request: MessageRequest,
        response: MessageResponse,
        next: Option<Next>,
    ) -> Result<MessageResponse, BoxError> {
        Bridge::invoke(self, request, response, next).await
    }
}

impl tower::Service<KernelRequest> for Bridge {
    type Response = KernelResponse;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<KernelResponse, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: KernelRequest) -> Self::Future {
        let bridge = self.clone();
        Box::pin(async move { bridge.handle_main(request).await })
    }
}
