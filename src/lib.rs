//! Bridge between kernel-style HTTP handlers and message-style middleware.

pub mod bridge;
pub mod config;
pub mod convert;
pub mod demo;
pub mod http;
pub mod observability;

pub use bridge::{Bridge, BridgeError, HttpKernel, MessageCallable, Next, RequestType, Target};
pub use config::BridgeConfig;
pub use http::BridgeServer;
