//! One row of a [`SparseMatrix`](super::sparse_matrix::SparseMatrix).

use crate::linalg::stencil::Stencil;
use crate::neighborhood::Neighborhood;

/// Off-diagonal `(column, value)` pairs plus a separate diagonal entry.
///
/// Column lookup is a linear scan: rows hold one neighborhood's worth of
/// entries, so the scan stays short.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseMatrixRow {
    element_ids: Vec<usize>,
    elements: Vec<f64>,
    diagonal: f64,
}

impl SparseMatrixRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern from a neighborhood's point ids, all values zero.
    pub fn from_neighborhood(neighborhood: &Neighborhood) -> Self {
        let ids = neighborhood.point_ids().to_vec();
        Self {
            elements: vec![0.0; ids.len()],
            element_ids: ids,
            diagonal: 0.0,
        }
    }

    /// Pattern and values from a stencil; the center weight goes on the diagonal.
    pub fn from_stencil(stencil: &Stencil) -> Self {
        Self {
            element_ids: stencil.point_ids().to_vec(),
            elements: stencil.weights().to_vec(),
            diagonal: stencil.center_weight(),
        }
    }

    #[inline]
    pub fn number_of_elements(&self) -> usize {
        self.element_ids.len()
    }

    #[inline]
    pub fn element_ids(&self) -> &[usize] {
        &self.element_ids
    }

    #[inline]
    pub fn elements(&self) -> &[f64] {
        &self.elements
    }

    pub fn element_id(&self, j: usize) -> Option<usize> {
        self.element_ids.get(j).copied()
    }

    pub fn element(&self, j: usize) -> Option<f64> {
        self.elements.get(j).copied()
    }

    pub fn push_element(&mut self, id: usize, value: f64) {
        self.element_ids.push(id);
        self.elements.push(value);
    }

    #[inline]
    pub fn diagonal_element(&self) -> f64 {
        self.diagonal
    }

    pub fn set_diagonal_element(&mut self, value: f64) {
        self.diagonal = value;
    }

    #[inline]
    pub fn diagonal_mut(&mut self) -> &mut f64 {
        &mut self.diagonal
    }

    /// Slot holding column `id`, first match.
    #[inline]
    pub fn position(&self, id: usize) -> Option<usize> {
        self.element_ids.iter().position(|&c| c == id)
    }

    /// Mutable value of column `id`, if it is in the pattern.
    pub fn value_mut(&mut self, id: usize) -> Option<&mut f64> {
        let j = self.position(id)?;
        self.elements.get_mut(j)
    }

    /// `(column, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.element_ids
            .iter()
            .copied()
            .zip(self.elements.iter().copied())
    }

    pub fn deep_copy(&mut self, src: &SparseMatrixRow) {
        self.clone_from(src);
    }
}
