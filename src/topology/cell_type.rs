//! Cell type metadata for mesh cells.

use serde::{Deserialize, Serialize};

/// Cell types understood by the data set and the neighborhood builders.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 0D vertex.
    Vertex,
    /// 1D two-point segment.
    Line,
    /// 1D open or closed chain of segments.
    PolyLine,
    /// 2D simplex.
    Triangle,
    /// 2D tensor-product cell.
    Quad,
    /// 2D polygon with `n` vertices.
    Polygon(u8),
    /// 3D simplex.
    Tetra,
    /// 3D tensor-product cell.
    Hexahedron,
    /// 3D prism.
    Wedge,
    /// 3D pyramid.
    Pyramid,
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Vertex
    }
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Line | CellType::PolyLine => 1,
            CellType::Triangle | CellType::Quad | CellType::Polygon(_) => 2,
            CellType::Tetra | CellType::Hexahedron | CellType::Wedge | CellType::Pyramid => 3,
        }
    }

    /// Infers a surface cell type from its vertex count.
    pub fn surface_from_len(len: usize) -> Self {
        match len {
            1 => CellType::Vertex,
            2 => CellType::Line,
            3 => CellType::Triangle,
            4 => CellType::Quad,
            n => CellType::Polygon(n.min(u8::MAX as usize) as u8),
        }
    }

    /// Expected vertex count, when fixed.
    pub fn expected_len(self) -> Option<usize> {
        match self {
            CellType::Vertex => Some(1),
            CellType::Line => Some(2),
            CellType::Triangle => Some(3),
            CellType::Quad | CellType::Tetra => Some(4),
            CellType::Pyramid => Some(5),
            CellType::Wedge => Some(6),
            CellType::Hexahedron => Some(8),
            CellType::Polygon(n) => Some(n as usize),
            CellType::PolyLine => None,
        }
    }

    /// True for 2D cells whose vertex list is an ordered boundary loop.
    pub fn is_polygonal(self) -> bool {
        self.dimension() == 2
    }
}
