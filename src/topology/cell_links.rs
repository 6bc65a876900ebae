//! CSR cell storage and the point-to-cell index built from it.
//!
//! Both structures are compressed-row arrays: an `offsets` vector of length
//! `n + 1` and a flat payload, so neighbor walks read contiguous slices in a
//! deterministic order (cells appear in insertion order).

use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;

/// Cells stored as offsets into a flat connectivity array.
#[derive(Clone, Debug, PartialEq)]
pub struct CellArray {
    types: Vec<CellType>,
    offsets: Vec<usize>,
    connectivity: Vec<usize>,
}

impl Default for CellArray {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            offsets: vec![0],
            connectivity: Vec::new(),
        }
    }
}

impl CellArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a cell and returns its id.
    pub fn push(&mut self, cell_type: CellType, points: &[usize]) -> usize {
        self.types.push(cell_type);
        self.connectivity.extend_from_slice(points);
        self.offsets.push(self.connectivity.len());
        self.types.len() - 1
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn cell(&self, id: usize) -> Option<&[usize]> {
        (id < self.len()).then(|| &self.connectivity[self.offsets[id]..self.offsets[id + 1]])
    }

    pub fn cell_type(&self, id: usize) -> Option<CellType> {
        self.types.get(id).copied()
    }

    /// Iterate `(type, points)` in cell-id order.
    pub fn iter(&self) -> impl Iterator<Item = (CellType, &[usize])> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(move |(i, &t)| (t, &self.connectivity[self.offsets[i]..self.offsets[i + 1]]))
    }

    /// Total number of connectivity entries.
    pub fn connectivity_len(&self) -> usize {
        self.connectivity.len()
    }
}

/// Point-to-cell incidence, built once per data set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellLinks {
    offsets: Vec<usize>,
    cells: Vec<usize>,
}

impl CellLinks {
    /// Build the index for `number_of_points` points.
    ///
    /// A cell that lists the same point twice is linked to it once.
    pub fn build(number_of_points: usize, cells: &CellArray) -> Result<Self, MeshError> {
        // 1) degree counts
        let mut degree = vec![0usize; number_of_points];
        for (cell, (_, points)) in cells.iter().enumerate() {
            for (k, &p) in points.iter().enumerate() {
                if p >= number_of_points {
                    return Err(MeshError::MissingCellPoint { cell, point: p });
                }
                if !points[..k].contains(&p) {
                    degree[p] += 1;
                }
            }
        }

        // prefix sums
        let mut offsets = vec![0usize; number_of_points + 1];
        for i in 0..number_of_points {
            offsets[i + 1] = offsets[i] + degree[i];
        }

        // 2) populate
        let mut links = vec![0usize; offsets[number_of_points]];
        let mut write = offsets.clone();
        for (cell, (_, points)) in cells.iter().enumerate() {
            for (k, &p) in points.iter().enumerate() {
                if points[..k].contains(&p) {
                    continue;
                }
                links[write[p]] = cell;
                write[p] += 1;
            }
        }

        Ok(Self {
            offsets,
            cells: links,
        })
    }

    /// Cells using point `p`, in ascending cell id. Empty for unknown points.
    #[inline]
    pub fn cells(&self, p: usize) -> &[usize] {
        if p + 1 >= self.offsets.len() {
            return &[];
        }
        &self.cells[self.offsets[p]..self.offsets[p + 1]]
    }

    pub fn number_of_points(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
}
