//! Transport module - the single call contract the facades depend on.
//!
//! The XML encoding, HTTP connection, authentication and retries all live
//! behind [`Transport`]. This crate only hands it a method name plus packed
//! positional arguments and receives one decoded [`Value`] back.
//!
//! Provides:
//! - [`Transport`] - the call contract
//! - [`TransportError`] - failures reported by an implementation
//! - [`MockTransport`] - canned replies and call recording for tests
//!
//! # Example
//!
//! ```
//! use tracrpc_client::protocol::Value;
//! use tracrpc_client::transport::{Transport, TransportError};
//!
//! let echo = |method: &str, _args: Option<&[Value]>| -> Result<Value, TransportError> {
//!     Ok(Value::from(method))
//! };
//! let reply = Transport::call(&echo, "wiki.getAllPages", None).unwrap();
//! assert_eq!(reply, Value::from("wiki.getAllPages"));
//! ```

mod mock;

use thiserror::Error;

use crate::protocol::Value;

pub use mock::{MockTransport, RecordedCall};

/// Errors that occur at the transport layer.
///
/// The client never interprets these; they reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The server answered with an XML-RPC `<fault>`.
    #[error("fault {code}: {message}")]
    Fault {
        /// `faultCode` of the response.
        code: i32,
        /// `faultString` of the response.
        message: String,
    },
    /// The peer is unreachable or the connection was dropped.
    #[error("connection lost: {0}")]
    ConnectionLost(String),
    /// The call did not complete in time.
    #[error("request timed out")]
    Timeout,
    /// I/O or HTTP-level failure.
    #[error("I/O error: {0}")]
    Io(String),
    /// Anything else the implementation needs to report.
    #[error("{0}")]
    Other(String),
}

/// One blocking request/response round trip.
///
/// `args` is `None` for methods without parameters and `Some` (possibly
/// empty) for packed positional arguments. Implementations used from several
/// threads must be safe for concurrent calls themselves.
pub trait Transport: Send + Sync {
    /// Invoke `method` and return its decoded reply.
    fn call(&self, method: &str, args: Option<&[Value]>) -> Result<Value, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&str, Option<&[Value]>) -> Result<Value, TransportError> + Send + Sync,
{
    fn call(&self, method: &str, args: Option<&[Value]>) -> Result<Value, TransportError> {
        self(method, args)
    }
}
