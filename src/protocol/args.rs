//! Positional argument packing.
//!
//! Remote methods take positional arguments, so an omitted parameter can only
//! be dropped from the end of the list. Packing with [`Omission::Trailing`]
//! rejects a present parameter that follows an omitted one;
//! [`Omission::Permissive`] skips omitted parameters wherever they are.
//!
//! # Example
//!
//! ```
//! use tracrpc_client::protocol::{pack_args, param, Param, Value};
//!
//! let args = pack_args([param::string("WikiStart"), Param::Omitted]).unwrap();
//! assert_eq!(args.as_slice(), &[Value::from("WikiStart")]);
//!
//! // Gaps are rejected.
//! assert!(pack_args([Param::Omitted, param::int(2)]).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::{Param, Value};
use crate::error::{Result, TracRpcError};

/// How omitted parameters are allowed to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Omission {
    /// Only trailing parameters may be omitted.
    #[default]
    Trailing,
    /// Omitted parameters are skipped wherever they occur.
    Permissive,
}

/// Packed positional arguments for a single call.
///
/// An empty `Args` is still an argument list: the transport receives
/// `Some(&[])`, which is distinct from `None` (no argument list at all).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args(Vec<Value>);

impl Args {
    /// Number of packed arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no argument was packed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the packed values.
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Consume into the packed values.
    #[inline]
    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

/// Pack parameters with the trailing-omission rule enforced.
pub fn pack_args<I>(params: I) -> Result<Args>
where
    I: IntoIterator<Item = Param>,
{
    pack_args_with(Omission::Trailing, params)
}

/// Pack parameters under the given omission policy.
///
/// # Errors
///
/// With [`Omission::Trailing`], returns `InvalidArgument` if a present
/// parameter follows an omitted one.
pub fn pack_args_with<I>(omission: Omission, params: I) -> Result<Args>
where
    I: IntoIterator<Item = Param>,
{
    let params = params.into_iter();
    let mut packed = Vec::with_capacity(params.size_hint().0);
    let mut first_omitted: Option<usize> = None;

    for (position, param) in params.enumerate() {
        match param {
            Param::Present(value) => {
                if let (Omission::Trailing, Some(gap)) = (omission, first_omitted) {
                    return Err(TracRpcError::InvalidArgument(format!(
                        "parameter {position} is present but parameter {gap} before it was omitted"
                    )));
                }
                packed.push(value);
            }
            Param::Omitted => {
                first_omitted.get_or_insert(position);
            }
        }
    }

    Ok(Args(packed))
}
