//! MeshError: unified error type for vmtk-mesh public APIs
//!
//! Every fallible operation in this crate reports through this enum instead of
//! panicking. Detection sites also log through the `log` facade, so callers
//! that only inspect outputs still get a diagnostic trail.

use thiserror::Error;

use crate::topology::mesh::DataSetKind;

/// Unified error type for vmtk-mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A point id outside `0..number_of_points` was used.
    #[error("point id {id} out of range (mesh has {len} points)")]
    PointOutOfRange { id: usize, len: usize },
    /// A cell id outside `0..number_of_cells` was used.
    #[error("cell id {id} out of range (mesh has {len} cells)")]
    CellOutOfRange { id: usize, len: usize },
    /// A cell references a point the mesh does not have.
    #[error("cell {cell} references missing point {point}")]
    MissingCellPoint { cell: usize, point: usize },
    /// The operation needs a different kind of data set.
    #[error("unsupported data set: expected {expected:?}, found {found:?}")]
    UnsupportedDataSet {
        expected: DataSetKind,
        found: DataSetKind,
    },
    /// A named data array was not found.
    #[error("data array `{0}` not found")]
    MissingArray(String),
    /// A named data array exists but its length or component count is wrong.
    #[error("data array `{name}`: expected {expected} values, found {found}")]
    ArrayLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// Operand sizes of a linear-algebra call do not agree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A row index outside `0..number_of_rows` was used.
    #[error("row {row} out of range (matrix has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },
    /// An off-diagonal entry was addressed that is not in the row's pattern.
    #[error("element ({row}, {column}) is not in the sparsity pattern")]
    NotInPattern { row: usize, column: usize },
    /// A mesh operation was given an invalid parameter.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Local adjacency around an advancing front could not be walked.
    #[error("profile reconstruction failed at edge ({0}, {1})")]
    ProfileReconstruction(usize, usize),
    /// A segment kept advancing past the configured step limit.
    #[error("segment {segment} did not terminate within {steps} steps")]
    StepLimit { segment: usize, steps: usize },
    /// An options struct carries an unusable value.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}
