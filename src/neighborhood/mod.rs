//! Point neighborhoods: the vertices around a pivot point.
//!
//! A [`Neighborhood`] stores an ordered list of point ids surrounding a pivot
//! plus a boundary flag. How the list is computed depends on its
//! [`NeighborhoodKind`]:
//!
//! | kind | input | contents |
//! |------|-------|----------|
//! | `Empty` | any | nothing |
//! | `Polygon` | poly data | union of incident cell vertices |
//! | `PolygonManifold` | poly data | 1-ring ordered around the pivot |
//! | `PolygonManifoldExtended` | poly data | 1-ring plus visible opposite vertices |
//! | `UnstructuredGrid` | unstructured grid | union of incident 3D cell vertices |
//!
//! [`NeighborhoodFactory`] picks the kind for a data set and builds
//! neighborhoods; [`Neighborhoods`] holds one per point.

pub mod extended;
pub mod manifold;
pub mod neighborhoods;
pub mod ring;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;
use crate::topology::mesh::{DataSetKind, Mesh};

pub use neighborhoods::Neighborhoods;

/// Which neighborhood builder to run.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum NeighborhoodKind {
    /// Builds nothing.
    #[default]
    Empty,
    /// Unordered union of the vertices of all incident cells.
    Polygon,
    /// Ordered 1-ring of a 2-manifold surface vertex.
    PolygonManifold,
    /// 1-ring extended across its edges for low-valence vertices.
    PolygonManifoldExtended,
    /// Union of the vertices of all incident volume cells.
    UnstructuredGrid,
}

impl NeighborhoodKind {
    /// Data set kind the builder accepts; `None` accepts anything.
    pub fn required_data_set(self) -> Option<DataSetKind> {
        match self {
            NeighborhoodKind::Empty => None,
            NeighborhoodKind::Polygon
            | NeighborhoodKind::PolygonManifold
            | NeighborhoodKind::PolygonManifoldExtended => Some(DataSetKind::PolyData),
            NeighborhoodKind::UnstructuredGrid => Some(DataSetKind::UnstructuredGrid),
        }
    }
}

/// Neighbor ids of one pivot point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    kind: NeighborhoodKind,
    pivot: usize,
    point_ids: Vec<usize>,
    is_boundary: bool,
}

impl Neighborhood {
    pub fn new(kind: NeighborhoodKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    #[inline]
    pub fn kind(&self) -> NeighborhoodKind {
        self.kind
    }

    #[inline]
    pub fn pivot(&self) -> usize {
        self.pivot
    }

    pub fn set_pivot(&mut self, pivot: usize) {
        self.pivot = pivot;
    }

    #[inline]
    pub fn number_of_points(&self) -> usize {
        self.point_ids.len()
    }

    pub fn point_id(&self, i: usize) -> Option<usize> {
        self.point_ids.get(i).copied()
    }

    #[inline]
    pub fn point_ids(&self) -> &[usize] {
        &self.point_ids
    }

    /// True when the pivot lies on a free boundary of the surface.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.is_boundary
    }

    /// Recompute the neighbor list of the current pivot.
    ///
    /// On error (wrong data set kind, pivot out of range) the previous
    /// contents are left untouched.
    pub fn build(&mut self, mesh: &Mesh) -> Result<(), MeshError> {
        if let Some(expected) = self.kind.required_data_set() {
            if mesh.kind() != expected {
                log::error!(
                    "{:?} neighborhood needs {:?} input, got {:?}",
                    self.kind,
                    expected,
                    mesh.kind()
                );
                return Err(MeshError::UnsupportedDataSet {
                    expected,
                    found: mesh.kind(),
                });
            }
        }
        if self.kind != NeighborhoodKind::Empty {
            mesh.point(self.pivot)?;
        }
        let (point_ids, is_boundary) = match self.kind {
            NeighborhoodKind::Empty => (Vec::new(), false),
            NeighborhoodKind::Polygon => ring::polygon_ring(mesh, self.pivot)?,
            NeighborhoodKind::PolygonManifold => manifold::ordered_ring(mesh, self.pivot)?,
            NeighborhoodKind::PolygonManifoldExtended => {
                extended::extended_ring(mesh, self.pivot)?
            }
            NeighborhoodKind::UnstructuredGrid => (ring::volume_ring(mesh, self.pivot)?, false),
        };
        self.point_ids = point_ids;
        self.is_boundary = is_boundary;
        Ok(())
    }

    /// Copy neighbor ids and boundary flag from `src`, keeping this pivot.
    pub fn deep_copy(&mut self, src: &Neighborhood) {
        self.point_ids.clone_from(&src.point_ids);
        self.is_boundary = src.is_boundary;
    }
}

/// Chooses and builds neighborhoods by data set kind.
pub struct NeighborhoodFactory;

impl NeighborhoodFactory {
    /// Default kind for `mesh`: polygon rings on surfaces, volume unions otherwise.
    pub fn for_data_set(mesh: &Mesh) -> NeighborhoodKind {
        match mesh.kind() {
            DataSetKind::PolyData => NeighborhoodKind::Polygon,
            DataSetKind::UnstructuredGrid => NeighborhoodKind::UnstructuredGrid,
        }
    }

    /// A fresh, unbuilt neighborhood of `kind`.
    pub fn create(kind: NeighborhoodKind) -> Neighborhood {
        Neighborhood::new(kind)
    }

    /// Build the `kind` neighborhood of `pivot` on `mesh`.
    pub fn build(kind: NeighborhoodKind, mesh: &Mesh, pivot: usize) -> Result<Neighborhood, MeshError> {
        let mut n = Self::create(kind);
        n.set_pivot(pivot);
        n.build(mesh)?;
        Ok(n)
    }
}
