//! Client builder and service handles.
//!
//! The [`ClientBuilder`] collects configuration and wraps a [`Transport`] into
//! a [`Client`]. The client exposes one facade per remote service; all of
//! them share the same transport and settings.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tracrpc_client::transport::MockTransport;
//! use tracrpc_client::{Client, Omission};
//!
//! let transport = Arc::new(MockTransport::with_reply(vec!["WikiStart", "SandBox"]));
//! let client = Client::builder()
//!     .omission(Omission::Trailing)
//!     .build(transport);
//!
//! let pages = client.wiki().get_all_pages().unwrap();
//! assert_eq!(pages, vec!["WikiStart", "SandBox"]);
//! ```

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::protocol::Omission;
use crate::service::{Rpc, SearchService, SystemService, TicketService, WikiService};
use crate::transport::Transport;

/// Builder for configuring and creating a [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings with `config`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the omission policy used when packing arguments.
    ///
    /// Default: [`Omission::Trailing`]
    pub fn omission(mut self, omission: Omission) -> Self {
        self.config.omission = omission;
        self
    }

    /// Build the client on top of `transport`.
    pub fn build(self, transport: Arc<dyn Transport>) -> Client {
        tracing::debug!(omission = ?self.config.omission, "building client");

        let rpc = Rpc::new(transport, self.config.omission);
        Client {
            search: SearchService::new(rpc.clone()),
            system: SystemService::new(rpc.clone()),
            ticket: TicketService::new(rpc.clone()),
            wiki: WikiService::new(rpc),
            config: self.config,
        }
    }
}

/// Typed client for the Trac RPC interface.
///
/// Holds no state besides the transport handle, so it can be shared across
/// threads whenever the transport can.
#[derive(Debug, Clone)]
pub struct Client {
    search: SearchService,
    system: SystemService,
    ticket: TicketService,
    wiki: WikiService,
    config: ClientConfig,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        ClientBuilder::new().build(transport)
    }

    /// `search.*` methods.
    pub fn search(&self) -> &SearchService {
        &self.search
    }

    /// `system.*` methods.
    pub fn system(&self) -> &SystemService {
        &self.system
    }

    /// `ticket.*` methods.
    pub fn ticket(&self) -> &TicketService {
        &self.ticket
    }

    /// `wiki.*` methods.
    pub fn wiki(&self) -> &WikiService {
        &self.wiki
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
