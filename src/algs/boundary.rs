//! Boundary extraction: free-edge loops of a surface as polylines.
//!
//! A free edge is a polygon edge used by exactly one cell. Free-edge vertices
//! are chained by walking free edges; each chain of more than two points
//! becomes one polyline cell of the output. Output point `k` carries the
//! input id it was copied from in the `"OriginalPointIds"` point array.
//!
//! The walk always takes the first unconsumed free-edge neighbor, so a
//! vertex where two boundary loops touch (a pinch point) is consumed by
//! whichever loop reaches it first and the other loop is cut there.

use crate::data::arrays::{DataArray, ORIGINAL_POINT_IDS_ARRAY};
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::mesh::{DataSetKind, Mesh, MeshBuilder};

/// One chain of boundary vertices, in input ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryLoop {
    /// Ordered vertex ids; a closed loop does not repeat its first id.
    pub point_ids: Vec<usize>,
    /// True when the last vertex shares a free edge with the first.
    pub closed: bool,
}

impl BoundaryLoop {
    #[inline]
    pub fn len(&self) -> usize {
        self.point_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_ids.is_empty()
    }
}

/// Trace the free-edge chains of `mesh`, in discovery order.
pub fn boundary_loops(mesh: &Mesh) -> Result<Vec<BoundaryLoop>, MeshError> {
    if mesh.kind() != DataSetKind::PolyData {
        log::error!("boundary extraction needs poly data, got {:?}", mesh.kind());
        return Err(MeshError::UnsupportedDataSet {
            expected: DataSetKind::PolyData,
            found: mesh.kind(),
        });
    }
    let n = mesh.number_of_points();
    let mut candidates = Vec::new();
    let mut is_candidate = vec![false; n];
    let mut free_neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (cell, (cell_type, pts)) in mesh.cells().iter().enumerate() {
        if !cell_type.is_polygonal() {
            continue;
        }
        let len = pts.len();
        for k in 0..len {
            let (a, b) = (pts[k], pts[(k + 1) % len]);
            if a == b || !mesh.cell_edge_neighbors(Some(cell), a, b)?.is_empty() {
                continue;
            }
            for (p, q) in [(a, b), (b, a)] {
                if !is_candidate[p] {
                    is_candidate[p] = true;
                    candidates.push(p);
                }
                if !free_neighbors[p].contains(&q) {
                    free_neighbors[p].push(q);
                }
            }
        }
    }

    let mut consumed = vec![false; n];
    let mut loops = Vec::new();
    for &start in &candidates {
        if consumed[start] {
            continue;
        }
        consumed[start] = true;
        let mut chain = vec![start];
        let mut current = start;
        while let Some(&next) = free_neighbors[current].iter().find(|&&q| !consumed[q]) {
            consumed[next] = true;
            chain.push(next);
            current = next;
        }
        if chain.len() <= 2 {
            log::trace!("dropping {}-point boundary chain at {}", chain.len(), start);
            continue;
        }
        let closed = free_neighbors[current].contains(&start);
        loops.push(BoundaryLoop {
            point_ids: chain,
            closed,
        });
    }
    log::debug!("extracted {} boundary loops", loops.len());
    Ok(loops)
}

/// Boundary polylines of `mesh` as a poly data set.
///
/// Closed loops repeat their first point id at the end of the cell.
pub fn extract_boundaries(mesh: &Mesh) -> Result<Mesh, MeshError> {
    let loops = boundary_loops(mesh)?;
    let mut out = MeshBuilder::new(DataSetKind::PolyData);
    let mut original_ids = Vec::new();
    for boundary in &loops {
        let mut cell = Vec::with_capacity(boundary.len() + 1);
        for &p in &boundary.point_ids {
            cell.push(out.insert_point(mesh.point(p)?));
            original_ids.push(p as i64);
        }
        if boundary.closed {
            cell.push(cell[0]);
        }
        out.insert_cell(CellType::PolyLine, &cell);
    }
    out.point_data_mut().add_array(DataArray::from_i64(
        ORIGINAL_POINT_IDS_ARRAY,
        1,
        original_ids,
    )?);
    out.build()
}

/// Read the loops back from an [`extract_boundaries`] output.
pub fn loops_from_polylines(boundaries: &Mesh) -> Result<Vec<BoundaryLoop>, MeshError> {
    let ids = boundaries
        .point_data()
        .try_array(ORIGINAL_POINT_IDS_ARRAY)?
        .as_i64()
        .ok_or_else(|| MeshError::MissingArray(ORIGINAL_POINT_IDS_ARRAY.to_string()))?;
    let mut loops = Vec::with_capacity(boundaries.number_of_cells());
    for (_, cell) in boundaries.cells().iter() {
        let closed = cell.len() > 1 && cell.first() == cell.last();
        let open_len = if closed { cell.len() - 1 } else { cell.len() };
        let mut point_ids = Vec::with_capacity(open_len);
        for &k in &cell[..open_len] {
            let id = ids.get(k).copied().ok_or(MeshError::ArrayLengthMismatch {
                name: ORIGINAL_POINT_IDS_ARRAY.to_string(),
                expected: boundaries.number_of_points(),
                found: ids.len(),
            })?;
            point_ids.push(id as usize);
        }
        loops.push(BoundaryLoop { point_ids, closed });
    }
    Ok(loops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle_is_one_closed_loop() {
        let mesh = Mesh::from_polygons(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[vec![0, 1, 2]],
        )
        .unwrap();
        let loops = boundary_loops(&mesh).unwrap();
        assert_eq!(loops.len(), 1);
        assert!(loops[0].closed);
        assert_eq!(loops[0].point_ids, vec![0, 1, 2]);
    }

    #[test]
    fn closed_surface_has_no_boundary() {
        let mesh = crate::algs::meshgen::sphere_shell(1.0, 4, 6).unwrap();
        assert!(boundary_loops(&mesh).unwrap().is_empty());
        let out = extract_boundaries(&mesh).unwrap();
        assert_eq!(out.number_of_points(), 0);
        assert_eq!(out.number_of_cells(), 0);
    }

    #[test]
    fn polylines_round_trip_through_original_ids() {
        let mesh = crate::algs::meshgen::cylinder_shell(1.0, 2.0, 8, 2).unwrap();
        let out = extract_boundaries(&mesh).unwrap();
        let loops = loops_from_polylines(&out).unwrap();
        assert_eq!(loops, boundary_loops(&mesh).unwrap());
        assert_eq!(loops.len(), 2);
    }

    #[test]
    fn volume_input_is_rejected() {
        let grid = crate::algs::meshgen::structured_box_3d(1, 1, 1, [0.0; 3], [1.0; 3]).unwrap();
        assert!(matches!(
            boundary_loops(&grid),
            Err(MeshError::UnsupportedDataSet { .. })
        ));
    }
}
