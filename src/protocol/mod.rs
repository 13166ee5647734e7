//! Protocol module - argument packing and reply decoding.
//!
//! This module implements the value layer between typed facade calls and the
//! transport:
//! - [`Value`] tagged union for everything that crosses the wire
//! - [`Param`] optional positional parameters and their constructors
//! - [`pack_args`] trailing-omission packing into [`Args`]
//! - [`Decoder`] shape-checked reply extraction

mod args;
pub mod param;
mod reply;
mod value;

pub use args::{pack_args, pack_args_with, Args, Omission};
pub use param::Param;
pub use reply::{Decode, Decoder, FromValue, Record};
pub use value::Value;
