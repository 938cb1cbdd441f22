//! HTTP models and the serving surface.
//!
//! # Models
//! ```text
//! kernel model   KernelRequest  = Request<Body>   (streaming, framework-side)
//!                KernelResponse = Response<Body>
//!
//! message model  MessageRequest  = Request<Bytes> (buffered value objects)
//!                MessageResponse = Response<Bytes>
//! ```
//!
//! Both sides share `http::request::Parts` / `http::response::Parts`; only the
//! body representation differs.

pub mod response;
pub mod server;

use axum::body::{Body, Bytes};

/// Streaming request handled by kernel-style handlers.
pub type KernelRequest = axum::http::Request<Body>;

/// Streaming response produced by kernel-style handlers.
pub type KernelResponse = axum::http::Response<Body>;

/// Buffered request passed to message callables.
pub type MessageRequest = axum::http::Request<Bytes>;

/// Buffered response produced by message callables.
pub type MessageResponse = axum::http::Response<Bytes>;

pub use server::BridgeServer;
