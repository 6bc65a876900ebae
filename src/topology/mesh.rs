//! Indexed mesh data set: points, cells, point-to-cell links and named arrays.
//!
//! This is the adjacency provider every algorithm in the crate consumes. Ids
//! are dense `usize` indices; the point-to-cell index is built once when the
//! mesh is constructed and the mesh is immutable afterwards (arrays excepted).

use serde::{Deserialize, Serialize};

use crate::data::arrays::DataArrays;
use crate::geometry::Vec3;
use crate::mesh_error::MeshError;
use crate::topology::cell_links::{CellArray, CellLinks};
use crate::topology::cell_type::CellType;

/// Runtime type tag of a data set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum DataSetKind {
    /// Surface-like data: vertices, lines, polygons.
    PolyData,
    /// Mixed-dimension volume data.
    UnstructuredGrid,
}

/// Immutable-topology mesh with mutable attribute arrays.
#[derive(Clone, Debug)]
pub struct Mesh {
    kind: DataSetKind,
    points: Vec<Vec3>,
    cells: CellArray,
    links: CellLinks,
    point_data: DataArrays,
    cell_data: DataArrays,
}

impl Mesh {
    /// Build a mesh and its point-to-cell links.
    pub fn new(kind: DataSetKind, points: Vec<Vec3>, cells: CellArray) -> Result<Self, MeshError> {
        for (id, (cell_type, pts)) in cells.iter().enumerate() {
            if let Some(expected) = cell_type.expected_len() {
                if pts.len() != expected {
                    return Err(MeshError::InvalidGeometry(format!(
                        "cell {id} of type {cell_type:?} has {} points, expected {expected}",
                        pts.len()
                    )));
                }
            }
        }
        let links = CellLinks::build(points.len(), &cells)?;
        Ok(Self {
            kind,
            points,
            cells,
            links,
            point_data: DataArrays::new(),
            cell_data: DataArrays::new(),
        })
    }

    /// Poly data from polygon vertex lists; types are inferred from lengths.
    pub fn from_polygons(points: Vec<Vec3>, polygons: &[Vec<usize>]) -> Result<Self, MeshError> {
        let mut cells = CellArray::new();
        for poly in polygons {
            cells.push(CellType::surface_from_len(poly.len()), poly);
        }
        Self::new(DataSetKind::PolyData, points, cells)
    }

    #[inline]
    pub fn kind(&self) -> DataSetKind {
        self.kind
    }

    #[inline]
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn number_of_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn cells(&self) -> &CellArray {
        &self.cells
    }

    pub fn links(&self) -> &CellLinks {
        &self.links
    }

    /// Coordinates of point `id`.
    #[inline]
    pub fn point(&self, id: usize) -> Result<Vec3, MeshError> {
        self.points
            .get(id)
            .copied()
            .ok_or(MeshError::PointOutOfRange {
                id,
                len: self.points.len(),
            })
    }

    /// Point ids of cell `id`.
    #[inline]
    pub fn cell_points(&self, id: usize) -> Result<&[usize], MeshError> {
        self.cells.cell(id).ok_or(MeshError::CellOutOfRange {
            id,
            len: self.cells.len(),
        })
    }

    pub fn cell_type(&self, id: usize) -> Result<CellType, MeshError> {
        self.cells.cell_type(id).ok_or(MeshError::CellOutOfRange {
            id,
            len: self.cells.len(),
        })
    }

    /// Cells using point `id`, ascending.
    #[inline]
    pub fn point_cells(&self, id: usize) -> Result<&[usize], MeshError> {
        self.check_point(id)?;
        Ok(self.links.cells(id))
    }

    /// Cells other than `exclude` that use both `p0` and `p1`.
    ///
    /// On a surface this is the manifold test for edge `(p0, p1)`: with
    /// `exclude` set to one of its cells, 0 results means a free edge, 1 a
    /// manifold edge, 2+ a non-manifold edge.
    pub fn cell_edge_neighbors(
        &self,
        exclude: Option<usize>,
        p0: usize,
        p1: usize,
    ) -> Result<Vec<usize>, MeshError> {
        self.check_point(p0)?;
        self.check_point(p1)?;
        let mut out = Vec::new();
        for &cell in self.links.cells(p0) {
            if Some(cell) == exclude {
                continue;
            }
            if self.links.cells(p1).binary_search(&cell).is_ok() {
                out.push(cell);
            }
        }
        Ok(out)
    }

    /// True when some polygon or line lists `p0` and `p1` consecutively.
    pub fn is_edge(&self, p0: usize, p1: usize) -> bool {
        for &cell in self.links.cells(p0) {
            let Some(pts) = self.cells.cell(cell) else {
                continue;
            };
            let n = pts.len();
            if n < 2 {
                continue;
            }
            let closed = self
                .cells
                .cell_type(cell)
                .is_some_and(|t| t.is_polygonal());
            let segments = if closed { n } else { n - 1 };
            for k in 0..segments {
                let (a, b) = (pts[k], pts[(k + 1) % n]);
                if (a == p0 && b == p1) || (a == p1 && b == p0) {
                    return true;
                }
            }
        }
        false
    }

    /// Points joined to `p` by a polygon or line edge, in cell order.
    pub fn point_edge_neighbors(&self, p: usize) -> Result<Vec<usize>, MeshError> {
        self.check_point(p)?;
        let mut out = Vec::new();
        for &cell in self.links.cells(p) {
            let (Some(pts), Some(cell_type)) = (self.cells.cell(cell), self.cells.cell_type(cell))
            else {
                continue;
            };
            let n = pts.len();
            if n < 2 || cell_type.dimension() > 2 {
                continue;
            }
            let closed = cell_type.is_polygonal();
            for (k, &v) in pts.iter().enumerate() {
                if v != p {
                    continue;
                }
                let prev = (k > 0 || closed).then(|| pts[(k + n - 1) % n]);
                let next = (k + 1 < n || closed).then(|| pts[(k + 1) % n]);
                for q in [prev, next].into_iter().flatten() {
                    if q != p && !out.contains(&q) {
                        out.push(q);
                    }
                }
            }
        }
        Ok(out)
    }

    pub fn point_data(&self) -> &DataArrays {
        &self.point_data
    }

    pub fn point_data_mut(&mut self) -> &mut DataArrays {
        &mut self.point_data
    }

    pub fn cell_data(&self) -> &DataArrays {
        &self.cell_data
    }

    pub fn cell_data_mut(&mut self) -> &mut DataArrays {
        &mut self.cell_data
    }

    #[inline]
    fn check_point(&self, id: usize) -> Result<(), MeshError> {
        if id < self.points.len() {
            Ok(())
        } else {
            Err(MeshError::PointOutOfRange {
                id,
                len: self.points.len(),
            })
        }
    }
}

/// Incremental construction of a [`Mesh`].
#[derive(Clone, Debug)]
pub struct MeshBuilder {
    kind: DataSetKind,
    points: Vec<Vec3>,
    cells: CellArray,
    point_data: DataArrays,
    cell_data: DataArrays,
}

impl MeshBuilder {
    pub fn new(kind: DataSetKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
            cells: CellArray::new(),
            point_data: DataArrays::new(),
            cell_data: DataArrays::new(),
        }
    }

    /// Appends a point and returns its id.
    pub fn insert_point(&mut self, p: Vec3) -> usize {
        self.points.push(p);
        self.points.len() - 1
    }

    /// Appends a cell and returns its id.
    pub fn insert_cell(&mut self, cell_type: CellType, points: &[usize]) -> usize {
        self.cells.push(cell_type, points)
    }

    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    pub fn point_data_mut(&mut self) -> &mut DataArrays {
        &mut self.point_data
    }

    pub fn cell_data_mut(&mut self) -> &mut DataArrays {
        &mut self.cell_data
    }

    pub fn build(self) -> Result<Mesh, MeshError> {
        let mut mesh = Mesh::new(self.kind, self.points, self.cells)?;
        mesh.point_data = self.point_data;
        mesh.cell_data = self.cell_data;
        Ok(mesh)
    }
}
