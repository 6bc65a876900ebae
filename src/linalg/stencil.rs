//! Weighted point stencils: one row of coefficients around a pivot.

use crate::mesh_error::MeshError;
use crate::neighborhood::{Neighborhood, Neighborhoods};

/// Neighbor weights plus a center weight for one pivot point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stencil {
    pivot: usize,
    point_ids: Vec<usize>,
    weights: Vec<f64>,
    center_weight: f64,
}

impl Stencil {
    pub fn new(
        pivot: usize,
        point_ids: Vec<usize>,
        weights: Vec<f64>,
        center_weight: f64,
    ) -> Result<Self, MeshError> {
        if point_ids.len() != weights.len() {
            return Err(MeshError::DimensionMismatch {
                expected: point_ids.len(),
                found: weights.len(),
            });
        }
        Ok(Self {
            pivot,
            point_ids,
            weights,
            center_weight,
        })
    }

    /// Umbrella stencil: `1/n` on every neighbor, `-1` at the center.
    pub fn uniform(neighborhood: &Neighborhood) -> Self {
        let n = neighborhood.number_of_points();
        let (weights, center_weight) = if n == 0 {
            (Vec::new(), 0.0)
        } else {
            (vec![1.0 / n as f64; n], -1.0)
        };
        Self {
            pivot: neighborhood.pivot(),
            point_ids: neighborhood.point_ids().to_vec(),
            weights,
            center_weight,
        }
    }

    #[inline]
    pub fn pivot(&self) -> usize {
        self.pivot
    }

    #[inline]
    pub fn point_ids(&self) -> &[usize] {
        &self.point_ids
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn center_weight(&self) -> f64 {
        self.center_weight
    }
}

/// Uniform stencils for every neighborhood, in point order.
pub fn uniform_stencils(neighborhoods: &Neighborhoods) -> Vec<Stencil> {
    neighborhoods.iter().map(Stencil::uniform).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_fail() {
        let err = Stencil::new(0, vec![1, 2], vec![0.5], -1.0).unwrap_err();
        assert_eq!(
            err,
            MeshError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn uniform_weights_sum_to_zero_row() {
        let tri = crate::topology::mesh::Mesh::from_polygons(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[vec![0, 1, 2]],
        )
        .unwrap();
        let n = crate::neighborhood::NeighborhoodFactory::build(
            crate::neighborhood::NeighborhoodKind::PolygonManifold,
            &tri,
            0,
        )
        .unwrap();
        let s = Stencil::uniform(&n);
        let sum: f64 = s.weights().iter().sum::<f64>() + s.center_weight();
        assert!(sum.abs() < 1e-15);
        assert_eq!(s.pivot(), 0);
    }
}
