//! Row-per-unknown sparse matrix assembled from mesh neighborhoods.
//!
//! Each row keeps its diagonal in a dedicated slot and its off-diagonal
//! entries as an unsorted `(column, value)` list. The sparsity pattern is
//! fixed up front (from stencils or neighborhoods); afterwards `set_element`
//! and `add_element` only touch existing entries.
//!
//! For a system with `k` unknowns per vertex over `N` vertices, row
//! `i + v * N` holds variable `v` at vertex `i`; see
//! [`SparseMatrix::allocate_rows_from_neighborhoods`] for the block layout.

use crate::linalg::sparse_matrix_row::SparseMatrixRow;
use crate::linalg::stencil::Stencil;
use crate::mesh_error::MeshError;
use crate::neighborhood::Neighborhoods;
use crate::topology::mesh::Mesh;

/// Products with a magnitude below this snap to exactly zero.
pub const PIVOTING_TOLERANCE: f64 = 1.0e-12;
/// Products are clamped to `[-LARGE_DOUBLE, LARGE_DOUBLE]`.
pub const LARGE_DOUBLE: f64 = 1.0e64;

/// Sparse matrix with one [`SparseMatrixRow`] per degree of freedom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseMatrix {
    rows: Vec<SparseMatrixRow>,
}

impl SparseMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` empty rows.
    pub fn with_rows(n: usize) -> Self {
        let mut m = Self::new();
        m.set_number_of_rows(n);
        m
    }

    /// Drop every row.
    pub fn initialize(&mut self) {
        self.rows.clear();
    }

    /// Discard existing rows and allocate `n` empty ones.
    pub fn set_number_of_rows(&mut self, n: usize) {
        self.rows.clear();
        self.rows.resize_with(n, SparseMatrixRow::new);
    }

    #[inline]
    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn row(&self, i: usize) -> Option<&SparseMatrixRow> {
        self.rows.get(i)
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> Option<&mut SparseMatrixRow> {
        self.rows.get_mut(i)
    }

    pub fn rows(&self) -> &[SparseMatrixRow] {
        &self.rows
    }

    /// One row per stencil, pattern and values copied verbatim.
    pub fn copy_rows_from_stencils(&mut self, stencils: &[Stencil]) {
        self.rows = stencils.iter().map(SparseMatrixRow::from_stencil).collect();
    }

    /// Block sparsity pattern for `number_of_variables` unknowns per point.
    ///
    /// Row `i + k * N` (point `i`, variable `k`) gets, for every variable
    /// `n`, one entry per neighbor `j` at column `j + n * N`, plus a coupling
    /// entry at `i + n * N` when `n != k`. All values start at zero.
    pub fn allocate_rows_from_neighborhoods(
        &mut self,
        neighborhoods: &Neighborhoods,
        number_of_variables: usize,
    ) {
        if number_of_variables == 1 {
            self.rows = neighborhoods
                .iter()
                .map(SparseMatrixRow::from_neighborhood)
                .collect();
            return;
        }
        let n_points = neighborhoods.len();
        self.set_number_of_rows(n_points * number_of_variables);
        for k in 0..number_of_variables {
            for (i, neighborhood) in neighborhoods.iter().enumerate() {
                let row = &mut self.rows[i + k * n_points];
                for n in 0..number_of_variables {
                    let offset = n * n_points;
                    for &j in neighborhood.point_ids() {
                        row.push_element(j + offset, 0.0);
                    }
                    if n != k {
                        row.push_element(i + offset, 0.0);
                    }
                }
            }
        }
    }

    /// Build the default neighborhoods of `mesh`, then allocate from them.
    pub fn allocate_rows_from_data_set(
        &mut self,
        mesh: &Mesh,
        number_of_variables: usize,
    ) -> Result<(), MeshError> {
        let neighborhoods = Neighborhoods::for_data_set(mesh)?;
        self.allocate_rows_from_neighborhoods(&neighborhoods, number_of_variables);
        Ok(())
    }

    /// Value of `(i, j)`; zero when `j` is outside the row's pattern.
    pub fn element(&self, i: usize, j: usize) -> Result<f64, MeshError> {
        let row = self.checked_row(i)?;
        if i == j {
            return Ok(row.diagonal_element());
        }
        Ok(row
            .position(j)
            .and_then(|slot| row.element(slot))
            .unwrap_or(0.0))
    }

    pub fn set_element(&mut self, i: usize, j: usize, value: f64) -> Result<(), MeshError> {
        *self.entry_mut(i, j)? = value;
        Ok(())
    }

    pub fn add_element(&mut self, i: usize, j: usize, value: f64) -> Result<(), MeshError> {
        *self.entry_mut(i, j)? += value;
        Ok(())
    }

    /// `y = A x`, each output clamped after accumulation.
    pub fn multiply(&self, x: &[f64], y: &mut [f64]) -> Result<(), MeshError> {
        self.check_operands(x, y)?;
        for (i, row) in self.rows.iter().enumerate() {
            let mut acc = row.diagonal_element() * x[i];
            for (col, value) in row.iter() {
                acc += value * operand(x, col)?;
            }
            y[i] = clamp(acc);
        }
        Ok(())
    }

    /// `y = Aᵀ x`, each output clamped after accumulation.
    pub fn transpose_multiply(&self, x: &[f64], y: &mut [f64]) -> Result<(), MeshError> {
        self.check_operands(x, y)?;
        y.fill(0.0);
        for (i, row) in self.rows.iter().enumerate() {
            let xi = x[i];
            y[i] += row.diagonal_element() * xi;
            for (col, value) in row.iter() {
                let len = y.len();
                let slot = y.get_mut(col).ok_or(MeshError::DimensionMismatch {
                    expected: col + 1,
                    found: len,
                })?;
                *slot += value * xi;
            }
        }
        for v in y.iter_mut() {
            *v = clamp(*v);
        }
        Ok(())
    }

    /// Replace contents with an independent copy of `src`.
    pub fn deep_copy(&mut self, src: &SparseMatrix) {
        self.rows.clone_from(&src.rows);
    }

    /// Stored entries: every diagonal plus every off-diagonal slot.
    pub fn number_of_nonzeros(&self) -> usize {
        self.rows.iter().map(|r| r.number_of_elements() + 1).sum()
    }

    fn checked_row(&self, i: usize) -> Result<&SparseMatrixRow, MeshError> {
        self.rows.get(i).ok_or(MeshError::RowOutOfRange {
            row: i,
            rows: self.rows.len(),
        })
    }

    fn entry_mut(&mut self, i: usize, j: usize) -> Result<&mut f64, MeshError> {
        let rows = self.rows.len();
        let row = self
            .rows
            .get_mut(i)
            .ok_or(MeshError::RowOutOfRange { row: i, rows })?;
        if i == j {
            // diagonal lives outside the pattern
            return Ok(row.diagonal_mut());
        }
        row.value_mut(j)
            .ok_or(MeshError::NotInPattern { row: i, column: j })
    }

    fn check_operands(&self, x: &[f64], y: &[f64]) -> Result<(), MeshError> {
        let n = self.rows.len();
        for len in [x.len(), y.len()] {
            if len != n {
                return Err(MeshError::DimensionMismatch {
                    expected: n,
                    found: len,
                });
            }
        }
        Ok(())
    }
}

fn operand(x: &[f64], col: usize) -> Result<f64, MeshError> {
    x.get(col).copied().ok_or(MeshError::DimensionMismatch {
        expected: col + 1,
        found: x.len(),
    })
}

/// Snap tiny values to zero and cap huge ones.
#[inline]
pub fn clamp(value: f64) -> f64 {
    if value.abs() < PIVOTING_TOLERANCE {
        0.0
    } else if value > LARGE_DOUBLE {
        LARGE_DOUBLE
    } else if value < -LARGE_DOUBLE {
        -LARGE_DOUBLE
    } else {
        value
    }
}
