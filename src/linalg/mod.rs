//! Sparse linear algebra for mesh PDE assembly.
//!
//! - [`SparseMatrix`] / [`SparseMatrixRow`]: row-per-unknown storage with a
//!   dedicated diagonal slot, patterned from [`Neighborhoods`](crate::neighborhood::Neighborhoods)
//! - [`Stencil`]: weighted rows to copy into a matrix
//! - [`DoubleVector`]: dense operands for the multiply kernels

pub mod double_vector;
pub mod sparse_matrix;
pub mod sparse_matrix_row;
pub mod stencil;

pub use double_vector::DoubleVector;
pub use sparse_matrix::{LARGE_DOUBLE, PIVOTING_TOLERANCE, SparseMatrix};
pub use sparse_matrix_row::SparseMatrixRow;
pub use stencil::{Stencil, uniform_stencils};
