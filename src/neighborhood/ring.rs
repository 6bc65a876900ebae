//! Unordered neighborhoods: unions of incident cell vertices.

use crate::mesh_error::MeshError;
use crate::topology::mesh::Mesh;

/// Polygon-surface neighborhood of `pivot`.
///
/// Collects the vertices of every incident cell, first occurrence order. The
/// pivot is on the boundary when one of its polygon edges has no second cell.
pub fn polygon_ring(mesh: &Mesh, pivot: usize) -> Result<(Vec<usize>, bool), MeshError> {
    let mut ids = Vec::new();
    let mut is_boundary = false;
    for &cell in mesh.point_cells(pivot)? {
        let pts = mesh.cell_points(cell)?;
        push_unique(&mut ids, pts, pivot);
        if !mesh.cell_type(cell)?.is_polygonal() || is_boundary {
            continue;
        }
        if let Some((next, prev)) = fan_neighbors(pts, pivot) {
            for q in [next, prev] {
                if mesh.cell_edge_neighbors(Some(cell), pivot, q)?.is_empty() {
                    is_boundary = true;
                }
            }
        }
    }
    Ok((ids, is_boundary))
}

/// Volume neighborhood of `pivot`: vertices of incident 3D cells.
pub fn volume_ring(mesh: &Mesh, pivot: usize) -> Result<Vec<usize>, MeshError> {
    let mut ids = Vec::new();
    for &cell in mesh.point_cells(pivot)? {
        if mesh.cell_type(cell)?.dimension() != 3 {
            continue;
        }
        push_unique(&mut ids, mesh.cell_points(cell)?, pivot);
    }
    Ok(ids)
}

/// The vertices after and before `pivot` in polygon `pts`.
pub(crate) fn fan_neighbors(pts: &[usize], pivot: usize) -> Option<(usize, usize)> {
    let n = pts.len();
    if n < 3 {
        return None;
    }
    let k = pts.iter().position(|&p| p == pivot)?;
    Some((pts[(k + 1) % n], pts[(k + n - 1) % n]))
}

fn push_unique(ids: &mut Vec<usize>, pts: &[usize], pivot: usize) {
    for &p in pts {
        if p != pivot && !ids.contains(&p) {
            ids.push(p);
        }
    }
}
