//! Fixed vocabularies of the ES|QL query language
//!
//! This crate holds the keyword tables shared by the query builder:
//!
//! - [`Command`] - clause kinds and their keywords
//! - [`AggFunction`] - standard and time series aggregation functions
//! - [`ChangePointType`] - CHANGE_POINT output types
//! - [`FuseMethod`] - FUSE scoring methods
//!
//! # Features
//!
//! - `std` - Standard library support (enabled by default)
//! - `serde` - Enable serde serialization/deserialization

#![cfg_attr(not(feature = "std"), no_std)]

mod aggregate;
mod change_point;
mod command;
mod fuse;

pub use aggregate::{AggFunction, AggFunctionParseError};
pub use change_point::{ChangePointType, ChangePointTypeParseError};
pub use command::{Command, CommandParseError};
pub use fuse::FuseMethod;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{AggFunction, ChangePointType, Command, FuseMethod};
}
