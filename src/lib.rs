//! # tracrpc-client
//!
//! Typed Rust client for the Trac XML-RPC interface.
//!
//! Each remote service (search, system, ticket, wiki) is a facade with one
//! method per remote procedure. A facade call packs its positional arguments,
//! issues exactly one call through a [`Transport`], and decodes the reply into
//! a typed result or a [`TracRpcError`].
//!
//! ## Architecture
//!
//! - **Protocol**: [`protocol::Value`] tagged union, [`protocol::Param`]
//!   optional parameters, trailing-omission packing, shape-checked decoding
//! - **Codec**: base64 for attachment payloads
//! - **Transport**: a single blocking call contract; XML encoding, HTTP and
//!   authentication live behind it
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tracrpc_client::transport::MockTransport;
//! use tracrpc_client::{Client, TracRpcError};
//!
//! let transport = Arc::new(MockTransport::with_reply("= WikiStart ="));
//! let client = Client::new(transport.clone());
//!
//! let text = client.wiki().get_page(Some("WikiStart"), None).unwrap();
//! assert_eq!(text, "= WikiStart =");
//!
//! // A missing page name is rejected before anything is sent.
//! let err = client.wiki().get_page(None, Some(2)).unwrap_err();
//! assert!(matches!(err, TracRpcError::InvalidArgument(_)));
//! assert_eq!(transport.call_count(), 1);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;

mod client;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Result, TracRpcError};
pub use protocol::{param, Omission, Param, Value};
pub use service::{
    ApiVersion, PageAttributes, PageInfo, SearchFilter, SearchResult, SearchService,
    SystemService, TicketComponentService, TicketService, WikiService,
};
pub use transport::{Transport, TransportError};
