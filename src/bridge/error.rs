//! Bridge error types.

use thiserror::Error;

/// Type-erased error used at every call seam.
///
/// Errors raised by converters or by the wrapped target travel through the
/// bridge untouched and can be recovered with `downcast_ref`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors originating in the bridge itself.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Need either a kernel handler or a message callable")]
    InvalidTarget,
}
