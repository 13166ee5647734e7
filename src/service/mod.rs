//! Service facades - one typed method per remote procedure.
//!
//! Every facade method follows the same steps:
//! 1. Check required parameters (no call is made if one is missing)
//! 2. Pack positional arguments
//! 3. Issue exactly one transport call
//! 4. Decode the reply into the method's result type
//!
//! Each facade module owns a `methods` table with its remote method names.

pub mod search;
pub mod system;
pub mod ticket;
pub mod wiki;

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TracRpcError};
use crate::protocol::{pack_args_with, Args, Decode, Decoder, Omission, Param, Value};
use crate::transport::Transport;

pub use search::{SearchFilter, SearchResult, SearchService};
pub use system::{ApiVersion, SystemService};
pub use ticket::{TicketComponentService, TicketService};
pub use wiki::{PageAttributes, PageInfo, WikiService};

/// Shared call path for all facades.
#[derive(Clone)]
pub(crate) struct Rpc {
    transport: Arc<dyn Transport>,
    omission: Omission,
}

impl Rpc {
    pub(crate) fn new(transport: Arc<dyn Transport>, omission: Omission) -> Self {
        Self {
            transport,
            omission,
        }
    }

    /// Pack positional parameters under the configured omission policy.
    pub(crate) fn pack<I>(&self, params: I) -> Result<Args>
    where
        I: IntoIterator<Item = Param>,
    {
        pack_args_with(self.omission, params)
    }

    /// Call `method` and decode its reply as `T`.
    ///
    /// `args` is `None` for parameterless methods.
    pub(crate) fn call<T: Decode>(&self, method: &'static str, args: Option<Args>) -> Result<T> {
        let reply = self.call_raw(method, args)?;
        Decoder::new(method).decode(reply)
    }

    /// Call `method` and return the undecoded reply.
    pub(crate) fn call_raw(&self, method: &'static str, args: Option<Args>) -> Result<Value> {
        tracing::debug!(method, args = ?args.as_ref().map(Args::len), "calling remote method");

        let reply = self
            .transport
            .call(method, args.as_ref().map(Args::as_slice))?;

        tracing::trace!(method, reply = reply.kind(), "received reply");
        Ok(reply)
    }
}

impl fmt::Debug for Rpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rpc")
            .field("omission", &self.omission)
            .finish_non_exhaustive()
    }
}

/// Reject a missing identifying parameter before anything is sent.
pub(crate) fn required<'a>(method: &'static str, name: &str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or_else(|| {
        tracing::debug!(method, param = name, "required parameter missing");
        TracRpcError::InvalidArgument(format!("{method}: {name} is required"))
    })
}

/// Error for methods that are recognised but never sent.
pub(crate) fn unimplemented(method: &'static str) -> TracRpcError {
    tracing::debug!(method, "method is not implemented");
    TracRpcError::Unimplemented(method)
}
