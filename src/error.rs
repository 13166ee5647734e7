//! Error types for tracrpc-client.

use thiserror::Error;

use crate::transport::TransportError;

/// Main error type for all client operations.
#[derive(Debug, Error)]
pub enum TracRpcError {
    /// A required parameter was omitted, or parameters were packed out of order.
    ///
    /// Always raised before any remote call is issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reported by the underlying transport, passed through as-is.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The reply does not have the type or arity the method expects.
    #[error("{method}: unexpected {field} form. expected={expected}, got={actual}")]
    ShapeMismatch {
        /// Remote method that produced the reply.
        method: &'static str,
        /// Offending field, element or `reply` for the top-level value.
        field: String,
        /// Expected wire type.
        expected: &'static str,
        /// Description of the value actually received.
        actual: String,
    },

    /// Binary payload was not valid base64.
    #[error("base64 decode error: {0}")]
    Decoding(#[from] base64::DecodeError),

    /// The remote method is recognised but intentionally not implemented.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// Client configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias using TracRpcError.
pub type Result<T> = std::result::Result<T, TracRpcError>;
