//! Data module: named arrays attached to mesh points and cells.
#![warn(missing_docs)]

#[allow(missing_docs)]
pub mod arrays;

pub use arrays::{ArrayValues, DataArray, DataArrays, ScalarType};
