//! Kernel calling convention.
//!
//! A kernel handler turns one streaming request into one streaming response.
//! The request type and catch flag are part of the signature but their
//! meaning belongs to the handler.

use std::future::Future;

use async_trait::async_trait;
use tower::{Service, ServiceExt};

use crate::bridge::BoxError;
use crate::http::{KernelRequest, KernelResponse};

/// Kind of request being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestType {
    /// Top-level request coming from the client.
    #[default]
    Main,
    /// Request issued internally while handling another one.
    Sub,
}

/// Handler object with a single `handle` operation.
#[async_trait]
pub trait HttpKernel: Send + Sync {
    async fn handle(
        &self,
        request: KernelRequest,
        request_type: RequestType,
        catch_errors: bool,
    ) -> Result<KernelResponse, BoxError>;

    /// `handle` with the conventional defaults: main request, errors caught.
    async fn handle_main(&self, request: KernelRequest) -> Result<KernelResponse, BoxError> {
        self.handle(request, RequestType::Main, true).await
    }
}

/// Kernel handler backed by an async closure.
///
/// Created with [`kernel_fn`].
#[derive(Clone)]
pub struct CallableKernel<F> {
    handler: F,
}

/// Build a kernel handler from `Fn(KernelRequest) -> Future<Output = Result<..>>`.
///
/// The request type and catch flag are ignored.
pub fn kernel_fn<F, Fut>(handler: F) -> CallableKernel<F>
where
    F: Fn(KernelRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<KernelResponse, BoxError>> + Send + 'static,
{
    CallableKernel { handler }
}

#[async_trait]
impl<F, Fut> HttpKernel for CallableKernel<F>
where
    F: Fn(KernelRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<KernelResponse, BoxError>> + Send + 'static,
{
    async fn handle(
        &self,
        request: KernelRequest,
        _request_type: RequestType,
        _catch_errors: bool,
    ) -> Result<KernelResponse, BoxError> {
        (self.handler)(request).await
    }
}

/// Kernel handler backed by a tower service, such as an axum `Router`.
///
/// Each request is served by a fresh clone driven with `oneshot`.
#[derive(Clone)]
pub struct ServiceKernel<S> {
    service: S,
}

impl<S> ServiceKernel<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn into_inner(self) -> S {
        self.service
    }
}

#[async_trait]
impl<S> HttpKernel for ServiceKernel<S>
where
    S: Service<KernelRequest, Response = KernelResponse> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
{
    async fn handle(
        &self,
        request: KernelRequest,
        _request_type: RequestType,
        _catch_errors: bool,
    ) -> Result<KernelResponse, BoxError> {
        self.service.clone().oneshot(request).await.map_err(Into::into)
    }
}
