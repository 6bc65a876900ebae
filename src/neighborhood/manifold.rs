//! Ordered 1-ring of a 2-manifold surface vertex.
//!
//! The ring is walked face to face around the pivot. Starting from the first
//! incident polygon `f0`, whose neighbors of the pivot are `a` (after) and `b`
//! (before), the walk crosses edge `(pivot, b)` into the next face and keeps
//! going until it comes back to `a` (interior vertex) or meets an edge that
//! does not have exactly one other face (boundary). On a boundary the
//! opposite side is walked from `a` as well and the two halves are joined so
//! that consecutive ring entries always share a face with the pivot.

use crate::mesh_error::MeshError;
use crate::neighborhood::ring::fan_neighbors;
use crate::topology::mesh::Mesh;

/// Ordered 1-ring of `pivot` and its boundary flag.
pub fn ordered_ring(mesh: &Mesh, pivot: usize) -> Result<(Vec<usize>, bool), MeshError> {
    let mut faces = Vec::new();
    for &cell in mesh.point_cells(pivot)? {
        if mesh.cell_type(cell)?.is_polygonal() {
            faces.push(cell);
        }
    }
    let Some(&f0) = faces.first() else {
        return Ok((Vec::new(), false));
    };
    let Some((a, b)) = fan_neighbors(mesh.cell_points(f0)?, pivot) else {
        return Ok((Vec::new(), false));
    };
    let budget = faces.len();

    let forward = walk(mesh, pivot, f0, b, a, budget)?;
    if forward.closed {
        let mut ids = Vec::with_capacity(forward.ids.len() + 2);
        ids.push(a);
        ids.push(b);
        ids.extend(forward.ids);
        return Ok((ids, false));
    }

    let backward = walk(mesh, pivot, f0, a, b, budget)?;
    let mut ids = Vec::with_capacity(forward.ids.len() + backward.ids.len() + 2);
    ids.extend(backward.ids.iter().rev());
    ids.push(a);
    ids.push(b);
    ids.extend(forward.ids);
    Ok((ids, true))
}

struct Walk {
    ids: Vec<usize>,
    closed: bool,
}

/// Walk across `(pivot, start)` away from `face` until `stop` or a boundary.
fn walk(
    mesh: &Mesh,
    pivot: usize,
    face: usize,
    start: usize,
    stop: usize,
    budget: usize,
) -> Result<Walk, MeshError> {
    let mut ids = Vec::new();
    let (mut face, mut cur) = (face, start);
    for _ in 0..budget {
        let across = faces_across(mesh, face, pivot, cur)?;
        let [(next_face, next)] = across[..] else {
            return Ok(Walk { ids, closed: false });
        };
        if next == stop {
            return Ok(Walk { ids, closed: true });
        }
        if next == pivot || ids.contains(&next) || next == start {
            // pinched fan; stop rather than loop
            break;
        }
        ids.push(next);
        face = next_face;
        cur = next;
    }
    Ok(Walk { ids, closed: false })
}

/// Polygons other than `face` having `(pivot, cur)` as an edge, with the
/// pivot's other neighbor in each.
fn faces_across(
    mesh: &Mesh,
    face: usize,
    pivot: usize,
    cur: usize,
) -> Result<Vec<(usize, usize)>, MeshError> {
    let mut out = Vec::new();
    for cell in mesh.cell_edge_neighbors(Some(face), pivot, cur)? {
        if !mesh.cell_type(cell)?.is_polygonal() {
            continue;
        }
        match fan_neighbors(mesh.cell_points(cell)?, pivot) {
            Some((next, prev)) if prev == cur => out.push((cell, next)),
            Some((next, prev)) if next == cur => out.push((cell, prev)),
            _ => {}
        }
    }
    Ok(out)
}
