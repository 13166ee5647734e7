//! Decoded wire values.
//!
//! Every reply handed over by a [`Transport`](crate::transport::Transport) is
//! a [`Value`]. Decoders match on its variants instead of inspecting types at
//! runtime, so a shape mismatch is an ordinary `Err`, never a panic.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// A single XML-RPC value, as produced by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `<nil/>`, the only value [`Value::is_nil`] accepts.
    Nil,
    /// `<boolean>`.
    Bool(bool),
    /// `<int>` / `<i4>`.
    Int(i32),
    /// `<double>`.
    Double(f64),
    /// `<string>`.
    String(String),
    /// `<dateTime.iso8601>`, interpreted as UTC.
    DateTime(DateTime<Utc>),
    /// `<base64>`, kept in its encoded text form.
    Base64(String),
    /// `<array>`.
    Array(Vec<Value>),
    /// `<struct>`.
    Struct(BTreeMap<String, Value>),
}

impl Value {
    /// Wire type name, used in shape mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::DateTime(_) => "dateTime.iso8601",
            Value::Base64(_) => "base64",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    /// Returns true for the absent marker.
    ///
    /// Containers are never nil: an empty array is a valid, present value.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Short human-readable description (type plus a preview of the content).
    pub fn describe(&self) -> String {
        const PREVIEW: usize = 32;

        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => format!("boolean({b})"),
            Value::Int(i) => format!("int({i})"),
            Value::Double(d) => format!("double({d})"),
            Value::String(s) if s.chars().count() > PREVIEW => {
                let head: String = s.chars().take(PREVIEW).collect();
                format!("string({head:?}...)")
            }
            Value::String(s) => format!("string({s:?})"),
            Value::DateTime(t) => format!("dateTime.iso8601({})", t.format("%Y%m%dT%H:%M:%S")),
            Value::Base64(s) => format!("base64({} chars)", s.len()),
            Value::Array(items) => format!("array(len={})", items.len()),
            Value::Struct(fields) => {
                let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
                format!("struct({{{}}})", keys.join(","))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::Array(v.iter().cloned().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Struct(v)
    }
}
