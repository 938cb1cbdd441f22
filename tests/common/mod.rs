//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::StatusCode;

use stack_bridge::bridge::{callable_fn, kernel_fn, BoxError, HttpKernel, MessageCallable, Next};
use stack_bridge::convert::{
    BufferedMessageFactory, DefaultKernelFactory, KernelFactory, MessageFactory,
};
use stack_bridge::http::{KernelRequest, KernelResponse, MessageRequest, MessageResponse};
use stack_bridge::Bridge;

/// Call counts shared between the counting converters and the test.
#[derive(Debug, Default)]
pub struct Counts {
    pub kernel_request: AtomicUsize,
    pub kernel_response: AtomicUsize,
    pub message_request: AtomicUsize,
    pub message_response: AtomicUsize,
    pub target: AtomicUsize,
}

impl Counts {
    /// (to-kernel request, to-kernel response, to-message request, to-message response)
    pub fn conversions(&self) -> (usize, usize, usize, usize) {
        (
            self.kernel_request.load(Ordering::SeqCst),
            self.kernel_response.load(Ordering::SeqCst),
            self.message_request.load(Ordering::SeqCst),
            self.message_response.load(Ordering::SeqCst),
        )
    }

    pub fn target_calls(&self) -> usize {
        self.target.load(Ordering::SeqCst)
    }
}

/// To-kernel converter that counts and delegates to the default.
pub struct CountingKernelFactory(pub Arc<Counts>);

#[async_trait]
impl KernelFactory for CountingKernelFactory {
    async fn create_request(&self, request: MessageRequest) -> Result<KernelRequest, BoxError> {
        self.0.kernel_request.fetch_add(1, Ordering::SeqCst);
        DefaultKernelFactory.create_request(request).await
    }

    async fn create_response(&self, response: MessageResponse) -> Result<KernelResponse, BoxError> {
        self.0.kernel_response.fetch_add(1, Ordering::SeqCst);
        DefaultKernelFactory.create_response(response).await
    }
}

/// To-message converter that counts and delegates to the default.
pub struct CountingMessageFactory(pub Arc<Counts>);

#[async_trait]
impl MessageFactory for CountingMessageFactory {
    async fn create_request(&self, request: KernelRequest) -> Result<MessageRequest, BoxError> {
        self.0.message_request.fetch_add(1, Ordering::SeqCst);
        BufferedMessageFactory::default().create_request(request).await
    }

    async fn create_response(&self, response: KernelResponse) -> Result<MessageResponse, BoxError> {
        self.0.message_response.fetch_add(1, Ordering::SeqCst);
        BufferedMessageFactory::default().create_response(response).await
    }
}

/// Attach counting converters to a bridge.
pub fn instrument(bridge: Bridge, counts: &Arc<Counts>) -> Bridge {
    bridge
        .with_kernel_factory(CountingKernelFactory(counts.clone()))
        .with_message_factory(CountingMessageFactory(counts.clone()))
}

/// Kernel handler answering `200 hello world`, counting its calls.
pub fn kernel_hello_world(counts: &Arc<Counts>) -> impl HttpKernel {
    let counts = counts.clone();
    kernel_fn(move |_request: KernelRequest| {
        counts.target.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, BoxError>(KernelResponse::new(Body::from("hello world"))) }
    })
}

/// Message callable answering `200 hello world`, counting its calls.
pub fn callable_hello_world(counts: &Arc<Counts>) -> impl MessageCallable {
    let counts = counts.clone();
    callable_fn(
        move |_request: MessageRequest, _response: MessageResponse, _next: Option<Next>| {
            counts.target.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, BoxError>(hello_world_message()) }
        },
    )
}

pub fn hello_world_message() -> MessageResponse {
    let mut response = MessageResponse::new(Bytes::from_static(b"hello world"));
    *response.status_mut() = StatusCode::OK;
    response
}

pub fn message_request(path: &str) -> MessageRequest {
    axum::http::Request::builder()
        .method("GET")
        .uri(path)
        .body(Bytes::new())
        .unwrap()
}

pub fn kernel_request(path: &str) -> KernelRequest {
    axum::http::Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: KernelResponse) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
