//! Base64 codec for attachment payloads.
//!
//! Encoding uses the standard alphabet with padding, as XML-RPC requires.
//! Decoding ignores ASCII whitespace because servers commonly wrap long
//! base64 bodies across lines.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;

use crate::error::Result;
use crate::protocol::Value;

/// Codec between raw bytes and the `<base64>` text representation.
pub struct Base64Codec;

impl Base64Codec {
    /// Encode bytes to base64 text. Never fails.
    #[inline]
    pub fn encode(data: &[u8]) -> String {
        STANDARD.encode(data)
    }

    /// Encode bytes directly into a wire [`Value::Base64`].
    #[inline]
    pub fn encode_value(data: &[u8]) -> Value {
        Value::Base64(Self::encode(data))
    }

    /// Decode base64 text to bytes.
    ///
    /// # Errors
    ///
    /// Returns `Decoding` if the text is not valid padded base64.
    pub fn decode(text: &str) -> Result<Bytes> {
        let decoded = if text.bytes().any(|b| b.is_ascii_whitespace()) {
            let compact: Vec<u8> = text
                .bytes()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            STANDARD.decode(compact)?
        } else {
            STANDARD.decode(text)?
        };
        Ok(Bytes::from(decoded))
    }
}
