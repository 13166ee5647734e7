//! Codec module - binary payload encoding.
//!
//! XML-RPC carries binary data as base64 text inside a `<base64>` element:
//!
//! - [`Base64Codec`] - bytes to/from the text-safe representation
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects;
//! the wire format fixes the encoding, so there is nothing to select at runtime.
//!
//! # Example
//!
//! ```
//! use tracrpc_client::codec::Base64Codec;
//!
//! let text = Base64Codec::encode("滋賀".as_bytes());
//! assert_eq!(text, "5ruL6LOA");
//! assert_eq!(&Base64Codec::decode(&text).unwrap()[..], "滋賀".as_bytes());
//! ```

mod base64;

pub use self::base64::Base64Codec;
