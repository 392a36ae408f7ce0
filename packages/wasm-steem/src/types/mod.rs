//! Shared value types for Steem transactions and API records
//!
//! The node's JSON is loosely typed: integers arrive as numbers or strings,
//! timestamps carry no offset, and string lists are sometimes a bare string.
//! These wrappers normalize each shape once at the decode boundary.

mod asset;
mod scalar;
mod time;

pub use asset::Asset;
pub use scalar::{Id, Int, StringSlice, UInt32};
pub use time::{Time, TIME_FORMAT};
