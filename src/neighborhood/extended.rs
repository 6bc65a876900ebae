//! 1-ring extended with visible second-ring vertices.
//!
//! Interior vertices of valence 3 or 4 give too few neighbors for a stable
//! stencil. For each edge `(r_i, r_{i+1})` of such a ring, the vertex `o`
//! opposite the pivot across that edge is added when it projects inside the
//! edge and sits on the other side of it from the pivot.

use crate::geometry::vector::{dot, scale, sub, Vec3};
use crate::mesh_error::MeshError;
use crate::neighborhood::manifold::ordered_ring;
use crate::topology::mesh::Mesh;

/// Extended ring of `pivot` and its boundary flag.
pub fn extended_ring(mesh: &Mesh, pivot: usize) -> Result<(Vec<usize>, bool), MeshError> {
    let (mut ids, is_boundary) = ordered_ring(mesh, pivot)?;
    let n = ids.len();
    if is_boundary || !(n == 3 || n == 4) {
        return Ok((ids, is_boundary));
    }
    let x = mesh.point(pivot)?;
    let ring = ids.clone();
    for i in 0..n {
        let (r0, r1) = (ring[i], ring[(i + 1) % n]);
        let (p0, p1) = (mesh.point(r0)?, mesh.point(r1)?);
        for cell in mesh.cell_edge_neighbors(None, r0, r1)? {
            if !mesh.cell_type(cell)?.is_polygonal() {
                continue;
            }
            let pts = mesh.cell_points(cell)?;
            if pts.contains(&pivot) {
                continue;
            }
            for &o in pts {
                if o == r0 || o == r1 || ids.contains(&o) {
                    continue;
                }
                if is_visible(x, p0, p1, mesh.point(o)?) {
                    ids.push(o);
                }
            }
        }
    }
    Ok((ids, false))
}

/// `o` projects strictly inside `[p0, p1]` and lies across it from `x`.
fn is_visible(x: Vec3, p0: Vec3, p1: Vec3, o: Vec3) -> bool {
    let e = sub(p1, p0);
    let ee = dot(e, e);
    if ee <= 0.0 {
        return false;
    }
    if dot(sub(o, p0), e) <= 0.0 || dot(sub(o, p1), e) >= 0.0 {
        return false;
    }
    let perp = |q: Vec3| {
        let d = sub(q, p0);
        sub(d, scale(e, dot(d, e) / ee))
    };
    dot(perp(x), perp(o)) < 0.0
}
