//! Reply decoding and validation.
//!
//! A [`Decoder`] is bound to the remote method whose reply it reads, so every
//! mismatch names that method. Shapes:
//!
//! - scalars: exact wire type ([`Decoder::scalar`])
//! - homogeneous lists ([`Decoder::list`])
//! - fixed-arity tuples whose fields may be nil ([`Decoder::tuple`], [`Decoder::nilable`])
//! - structs whose declared keys are all required ([`Decoder::record`])
//! - base64 payloads ([`Decoder::binary`])
//!
//! Types implement [`Decode`] to compose these.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::Value;
use crate::codec::Base64Codec;
use crate::error::{Result, TracRpcError};

/// Field name used for the top-level reply value.
const REPLY: &str = "reply";

/// Extraction of a single wire type from a [`Value`].
///
/// On mismatch the original value is handed back for diagnostics.
pub trait FromValue: Sized {
    /// Wire type name reported in mismatches.
    const EXPECTED: &'static str;

    /// Extract `Self`, or return the value unchanged.
    fn from_value(value: Value) -> std::result::Result<Self, Value>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromValue for i32 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "double";

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Double(d) => Ok(d),
            other => Err(other),
        }
    }
}

impl FromValue for DateTime<Utc> {
    const EXPECTED: &'static str = "dateTime.iso8601";

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::DateTime(t) => Ok(t),
            other => Err(other),
        }
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any";

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        Ok(value)
    }
}

/// A typed result decoded from a method reply.
pub trait Decode: Sized {
    /// Decode `value` in the context of `decoder`'s method.
    fn decode(decoder: &Decoder, value: Value) -> Result<Self>;
}

macro_rules! decode_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode(decoder: &Decoder, value: Value) -> Result<Self> {
                    decoder.scalar(value)
                }
            }
        )*
    };
}

decode_scalar!(String, bool, i32, f64, DateTime<Utc>, Value);

impl<T: Decode> Decode for Vec<T> {
    fn decode(decoder: &Decoder, value: Value) -> Result<Self> {
        decoder.list(value, T::decode)
    }
}

/// Reply decoder bound to one remote method.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    method: &'static str,
}

impl Decoder {
    /// Create a decoder for replies of `method`.
    pub fn new(method: &'static str) -> Self {
        Self { method }
    }

    /// Method this decoder reports in errors.
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Decode a whole reply into `T`.
    pub fn decode<T: Decode>(&self, value: Value) -> Result<T> {
        T::decode(self, value)
    }

    /// Build a `ShapeMismatch` for `field`.
    pub fn mismatch(&self, field: impl Into<String>, expected: &'static str, actual: &Value) -> TracRpcError {
        TracRpcError::ShapeMismatch {
            method: self.method,
            field: field.into(),
            expected,
            actual: actual.describe(),
        }
    }

    /// Extract exactly the wire type `T` from the top-level reply.
    pub fn scalar<T: FromValue>(&self, value: Value) -> Result<T> {
        self.field(REPLY, value)
    }

    /// Extract exactly the wire type `T`, reporting `field` on mismatch.
    pub fn field<T: FromValue>(&self, field: &str, value: Value) -> Result<T> {
        T::from_value(value).map_err(|actual| self.mismatch(field, T::EXPECTED, &actual))
    }

    /// Extract `T`, treating nil as `T::default()`.
    pub fn nilable<T: FromValue + Default>(&self, field: &str, value: Value) -> Result<T> {
        if value.is_nil() {
            return Ok(T::default());
        }
        self.field(field, value)
    }

    /// Decode an array, element by element. An empty array is valid.
    pub fn list<T, F>(&self, value: Value, mut each: F) -> Result<Vec<T>>
    where
        F: FnMut(&Self, Value) -> Result<T>,
    {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(self.mismatch(REPLY, "array", &other)),
        };
        items.into_iter().map(|item| each(self, item)).collect()
    }

    /// Split an array of exactly `N` elements.
    pub fn tuple<const N: usize>(&self, value: Value) -> Result<[Value; N]> {
        match value {
            Value::Array(items) => <[Value; N]>::try_from(items)
                .map_err(|items| self.mismatch(REPLY, arity_name(N), &Value::Array(items))),
            other => Err(self.mismatch(REPLY, arity_name(N), &other)),
        }
    }

    /// Open a struct for field-by-field extraction.
    pub fn record(&self, value: Value) -> Result<Record<'_>> {
        match value {
            Value::Struct(fields) => Ok(Record {
                decoder: self,
                fields,
            }),
            other => Err(self.mismatch(REPLY, "struct", &other)),
        }
    }

    /// Decode a base64 payload. Accepts `<base64>` or a plain string holding the encoded text.
    pub fn binary(&self, value: Value) -> Result<Bytes> {
        match value {
            Value::Base64(text) | Value::String(text) => Base64Codec::decode(&text),
            other => Err(self.mismatch(REPLY, "base64", &other)),
        }
    }
}

/// Human-readable arity, e.g. `array of 5`.
fn arity_name(n: usize) -> &'static str {
    match n {
        1 => "array of 1",
        2 => "array of 2",
        3 => "array of 3",
        4 => "array of 4",
        5 => "array of 5",
        _ => "fixed-size array",
    }
}

/// A struct reply whose declared keys are all required.
#[derive(Debug)]
pub struct Record<'a> {
    decoder: &'a Decoder,
    fields: BTreeMap<String, Value>,
}

impl Record<'_> {
    /// Take the required key `key` as wire type `T`.
    ///
    /// A missing key is a `ShapeMismatch` with `actual` reported as `missing`.
    pub fn required<T: FromValue>(&mut self, key: &str) -> Result<T> {
        match self.fields.remove(key) {
            Some(value) => self.decoder.field(key, value),
            None => Err(TracRpcError::ShapeMismatch {
                method: self.decoder.method,
                field: key.to_string(),
                expected: T::EXPECTED,
                actual: "missing".to_string(),
            }),
        }
    }

    /// Take `key` if present; nil and absence both yield `None`.
    pub fn optional<T: FromValue>(&mut self, key: &str) -> Result<Option<T>> {
        match self.fields.remove(key) {
            None | Some(Value::Nil) => Ok(None),
            Some(value) => self.decoder.field(key, value).map(Some),
        }
    }
}
