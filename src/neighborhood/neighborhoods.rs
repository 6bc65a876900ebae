//! One neighborhood per mesh point.

use crate::mesh_error::MeshError;
use crate::neighborhood::{Neighborhood, NeighborhoodFactory, NeighborhoodKind};
use crate::topology::mesh::Mesh;

/// Neighborhoods of every point of a data set, indexed by point id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Neighborhoods {
    kind: NeighborhoodKind,
    items: Vec<Neighborhood>,
}

impl Neighborhoods {
    /// Build a `kind` neighborhood for every point of `mesh`.
    pub fn build(mesh: &Mesh, kind: NeighborhoodKind) -> Result<Self, MeshError> {
        let mut items = Vec::with_capacity(mesh.number_of_points());
        for pivot in 0..mesh.number_of_points() {
            items.push(NeighborhoodFactory::build(kind, mesh, pivot)?);
        }
        log::debug!(
            "built {} {:?} neighborhoods",
            items.len(),
            kind
        );
        Ok(Self { kind, items })
    }

    /// Build with the kind [`NeighborhoodFactory::for_data_set`] picks.
    pub fn for_data_set(mesh: &Mesh) -> Result<Self, MeshError> {
        Self::build(mesh, NeighborhoodFactory::for_data_set(mesh))
    }

    #[inline]
    pub fn kind(&self) -> NeighborhoodKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, pivot: usize) -> Option<&Neighborhood> {
        self.items.get(pivot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighborhood> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Neighborhoods {
    type Item = &'a Neighborhood;
    type IntoIter = std::slice::Iter<'a, Neighborhood>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
