//! Optional positional parameters.
//!
//! A [`Param`] is either a present value or an explicit omission. An omitted
//! parameter means "let the server use its default", never "send a zero".
//!
//! # Example
//!
//! ```
//! use tracrpc_client::protocol::{param, Param, Value};
//!
//! assert_eq!(param::string("WikiStart"), Param::Present(Value::from("WikiStart")));
//! assert_eq!(Param::from(None::<i32>), Param::Omitted);
//! ```

use chrono::{DateTime, Utc};

use super::Value;

/// A parameter that is either present or omitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Param {
    /// The parameter is sent with this value.
    Present(Value),
    /// The parameter is left out of the call.
    #[default]
    Omitted,
}

impl Param {
    /// Check if the parameter carries a value.
    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Param::Present(_))
    }

    /// Consume the parameter, yielding its value if present.
    #[inline]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Param::Present(v) => Some(v),
            Param::Omitted => None,
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Param::Present(v.into()),
            None => Param::Omitted,
        }
    }
}

/// Present string parameter.
pub fn string(val: impl Into<String>) -> Param {
    Param::Present(Value::String(val.into()))
}

/// Present integer parameter.
pub fn int(val: i32) -> Param {
    Param::Present(Value::Int(val))
}

/// Present boolean parameter.
pub fn boolean(val: bool) -> Param {
    Param::Present(Value::Bool(val))
}

/// Present timestamp parameter.
pub fn time(val: DateTime<Utc>) -> Param {
    Param::Present(Value::DateTime(val))
}

/// Present parameter of any wire type (arrays, structs, base64).
pub fn value(val: impl Into<Value>) -> Param {
    Param::Present(val.into())
}
