//! Client configuration.
//!
//! ```
//! use tracrpc_client::{ClientConfig, Omission};
//!
//! let config = ClientConfig::from_json(r#"{ "omission": "permissive" }"#).unwrap();
//! assert_eq!(config.omission, Omission::Permissive);
//!
//! // Missing keys fall back to defaults.
//! assert_eq!(ClientConfig::from_json("{}").unwrap(), ClientConfig::default());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::protocol::Omission;

/// Settings applied to every facade of a [`Client`](crate::Client).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Where omitted parameters may appear in a positional call.
    ///
    /// Default: [`Omission::Trailing`]
    pub omission: Omission,
}

impl ClientConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `Config` on malformed JSON, unknown keys or bad values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
