//! Basic mesh generators: disks, shells, tubes and tetrahedral boxes.
//!
//! All surfaces are returned as poly data; `structured_box_3d` returns an
//! unstructured grid of tetrahedra. Point ids are laid out ring by ring so the
//! lowest ids always sit on the first generated ring.

use serde::{Deserialize, Serialize};

use crate::geometry::vector::{add, centroid, lerp, normalize, scale, sub, Vec3};
use crate::mesh_error::MeshError;
use crate::topology::cell_links::CellArray;
use crate::topology::cell_type::CellType;
use crate::topology::mesh::{DataSetKind, Mesh};

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::InvalidGeometry(message.into())
}

fn build_mesh(
    kind: DataSetKind,
    vertices: Vec<Vec3>,
    cells: &[Vec<usize>],
    cell_type: CellType,
) -> Result<Mesh, MeshError> {
    let mut array = CellArray::new();
    for (cell_idx, vertices_of_cell) in cells.iter().enumerate() {
        if let Some(&v) = vertices_of_cell.iter().find(|&&v| v >= vertices.len()) {
            return Err(invalid_geometry(format!(
                "cell {cell_idx} references missing vertex {v}"
            )));
        }
        array.push(cell_type, vertices_of_cell);
    }
    Mesh::new(kind, vertices, array)
}

/// Triangles `(a0, a1, b1)` and `(a0, b1, b0)` joining two closed rings.
fn stitch_rings(ring_a: &[usize], ring_b: &[usize], cells: &mut Vec<Vec<usize>>) {
    let n = ring_a.len();
    for t in 0..n {
        let next = (t + 1) % n;
        let (a0, a1) = (ring_a[t], ring_a[next]);
        let (b0, b1) = (ring_b[t], ring_b[next]);
        cells.push(vec![a0, a1, b1]);
        cells.push(vec![a0, b1, b0]);
    }
}

/// Generate a structured box of tetrahedra, six per hexahedral block.
///
/// Every block is split around its `v0`–`v6` diagonal, so faces of
/// neighboring blocks match.
pub fn structured_box_3d(
    nx: usize,
    ny: usize,
    nz: usize,
    min: [f64; 3],
    max: [f64; 3],
) -> Result<Mesh, MeshError> {
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(invalid_geometry("nx, ny, and nz must be positive"));
    }

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let dz = (max[2] - min[2]) / nz as f64;
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        let z = min[2] + dz * k as f64;
        for j in 0..=ny {
            let y = min[1] + dy * j as f64;
            for i in 0..=nx {
                let x = min[0] + dx * i as f64;
                vertices.push([x, y, z]);
            }
        }
    }

    let mut cells = Vec::with_capacity(6 * nx * ny * nz);
    let row_stride = nx + 1;
    let slab_stride = row_stride * (ny + 1);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let base = k * slab_stride + j * row_stride + i;
                let v0 = base;
                let v1 = base + 1;
                let v3 = base + row_stride;
                let v2 = v3 + 1;
                let v4 = base + slab_stride;
                let v5 = v4 + 1;
                let v7 = v4 + row_stride;
                let v6 = v7 + 1;
                for [a, b] in [[v1, v2], [v2, v3], [v3, v7], [v7, v4], [v4, v5], [v5, v1]] {
                    cells.push(vec![v0, a, b, v6]);
                }
            }
        }
    }

    build_mesh(DataSetKind::UnstructuredGrid, vertices, &cells, CellType::Tetra)
}

/// Generate a flat triangulated disk with `n_rings` concentric rings of `n_sectors` points.
///
/// Point 0 is the center; the outer ring is the only boundary loop.
pub fn triangulated_disk(radius: f64, n_rings: usize, n_sectors: usize) -> Result<Mesh, MeshError> {
    if radius <= 0.0 {
        return Err(invalid_geometry("radius must be positive"));
    }
    if n_rings < 1 || n_sectors < 3 {
        return Err(invalid_geometry(
            "disk requires n_rings >= 1 and n_sectors >= 3",
        ));
    }

    let mut vertices = vec![[0.0, 0.0, 0.0]];
    let mut rings: Vec<Vec<usize>> = Vec::with_capacity(n_rings);
    for k in 1..=n_rings {
        let r = radius * k as f64 / n_rings as f64;
        let mut ring = Vec::with_capacity(n_sectors);
        for s in 0..n_sectors {
            let phi = std::f64::consts::TAU * s as f64 / n_sectors as f64;
            ring.push(vertices.len());
            vertices.push([r * phi.cos(), r * phi.sin(), 0.0]);
        }
        rings.push(ring);
    }

    let mut cells = Vec::new();
    for s in 0..n_sectors {
        cells.push(vec![0, rings[0][s], rings[0][(s + 1) % n_sectors]]);
    }
    for band in 0..n_rings - 1 {
        stitch_rings(&rings[band], &rings[band + 1], &mut cells);
    }

    build_mesh(DataSetKind::PolyData, vertices, &cells, CellType::Triangle)
}

/// Generate a spherical shell (triangulated) with `n_lat` by `n_lon` divisions.
pub fn sphere_shell(radius: f64, n_lat: usize, n_lon: usize) -> Result<Mesh, MeshError> {
    if radius <= 0.0 {
        return Err(invalid_geometry("radius must be positive"));
    }
    if n_lat < 2 || n_lon < 3 {
        return Err(invalid_geometry(
            "sphere shell requires n_lat >= 2 and n_lon >= 3",
        ));
    }

    let mut vertices = vec![[0.0, 0.0, radius]];
    let mut rings: Vec<Vec<usize>> = Vec::new();

    let two_pi = std::f64::consts::TAU;
    for lat in 1..n_lat {
        let theta = std::f64::consts::PI * (lat as f64) / (n_lat as f64);
        let sin_t = theta.sin();
        let cos_t = theta.cos();
        let mut ring = Vec::with_capacity(n_lon);
        for lon in 0..n_lon {
            let phi = two_pi * (lon as f64) / (n_lon as f64);
            ring.push(vertices.len());
            vertices.push([
                radius * sin_t * phi.cos(),
                radius * sin_t * phi.sin(),
                radius * cos_t,
            ]);
        }
        rings.push(ring);
    }
    let bottom_idx = vertices.len();
    vertices.push([0.0, 0.0, -radius]);

    let mut cells = Vec::new();
    let top_idx = 0usize;
    if let Some(first_ring) = rings.first() {
        for lon in 0..n_lon {
            let next = (lon + 1) % n_lon;
            cells.push(vec![top_idx, first_ring[lon], first_ring[next]]);
        }
    }

    for band in 0..rings.len().saturating_sub(1) {
        stitch_rings(&rings[band], &rings[band + 1], &mut cells);
    }

    if let Some(last_ring) = rings.last() {
        for lon in 0..n_lon {
            let next = (lon + 1) % n_lon;
            cells.push(vec![last_ring[lon], bottom_idx, last_ring[next]]);
        }
    }

    build_mesh(DataSetKind::PolyData, vertices, &cells, CellType::Triangle)
}

/// Vertices, rings and side triangles of a tube along `+z` from `z = 0`.
fn cylinder_parts(
    radius: f64,
    height: f64,
    n_theta: usize,
    n_z: usize,
) -> Result<(Vec<Vec3>, Vec<Vec<usize>>, Vec<Vec<usize>>), MeshError> {
    if radius <= 0.0 || height <= 0.0 {
        return Err(invalid_geometry("radius and height must be positive"));
    }
    if n_theta < 3 || n_z < 1 {
        return Err(invalid_geometry(
            "cylinder shell requires n_theta >= 3 and n_z >= 1",
        ));
    }

    let mut vertices = Vec::new();
    let mut rings: Vec<Vec<usize>> = Vec::with_capacity(n_z + 1);
    let two_pi = std::f64::consts::TAU;
    for k in 0..=n_z {
        let z = height * (k as f64) / (n_z as f64);
        let mut ring = Vec::with_capacity(n_theta);
        for t in 0..n_theta {
            let phi = two_pi * (t as f64) / (n_theta as f64);
            ring.push(vertices.len());
            vertices.push([radius * phi.cos(), radius * phi.sin(), z]);
        }
        rings.push(ring);
    }

    let mut cells = Vec::new();
    for band in 0..n_z {
        stitch_rings(&rings[band], &rings[band + 1], &mut cells);
    }
    Ok((vertices, rings, cells))
}

/// Generate an open cylindrical tube (triangles) with `n_theta` around and `n_z` along height.
///
/// The tube runs along `+z` from `z = 0`; both end rings are boundary loops.
pub fn cylinder_shell(
    radius: f64,
    height: f64,
    n_theta: usize,
    n_z: usize,
) -> Result<Mesh, MeshError> {
    let (vertices, _, cells) = cylinder_parts(radius, height, n_theta, n_z)?;
    build_mesh(DataSetKind::PolyData, vertices, &cells, CellType::Triangle)
}

/// [`cylinder_shell`] with its top ring fanned to an apex at `(0, 0, height)`.
///
/// The bottom ring is the only boundary loop; the apex is the last point.
pub fn capped_cylinder_shell(
    radius: f64,
    height: f64,
    n_theta: usize,
    n_z: usize,
) -> Result<Mesh, MeshError> {
    let (mut vertices, rings, mut cells) = cylinder_parts(radius, height, n_theta, n_z)?;
    let apex = vertices.len();
    vertices.push([0.0, 0.0, height]);
    let top = &rings[n_z];
    for t in 0..n_theta {
        cells.push(vec![top[t], top[(t + 1) % n_theta], apex]);
    }
    build_mesh(DataSetKind::PolyData, vertices, &cells, CellType::Triangle)
}

/// Shape of [`bifurcating_tube`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BifurcatingTubeOpts {
    pub trunk_radius: f64,
    pub branch_radius: f64,
    pub trunk_length: f64,
    pub branch_length: f64,
    /// Angle between each branch axis and the trunk axis, radians.
    pub branch_angle: f64,
    /// Points on each half of the junction ring; rings have twice as many.
    pub half_resolution: usize,
    pub trunk_rings: usize,
    pub branch_rings: usize,
}

impl Default for BifurcatingTubeOpts {
    fn default() -> Self {
        Self {
            trunk_radius: 1.0,
            branch_radius: 0.8,
            trunk_length: 6.0,
            branch_length: 6.0,
            branch_angle: std::f64::consts::FRAC_PI_4,
            half_resolution: 8,
            trunk_rings: 16,
            branch_rings: 16,
        }
    }
}

/// Rings over which a branch morphs from its junction loop to a circle.
const BRANCH_BLEND_RINGS: f64 = 3.0;

/// Generate a Y-shaped tube: one trunk along `+z` splitting into two branches.
///
/// The trunk ends at `z = 0` with a ring of `2m` points. A straight seam of
/// `m - 1` points along the x axis cuts that ring into two D-shaped loops, and
/// each loop is swept into a branch leaning towards `+y` or `-y`. The three
/// open ends are the trunk's first ring (lowest ids) and the branch tips.
pub fn bifurcating_tube(opts: &BifurcatingTubeOpts) -> Result<Mesh, MeshError> {
    let m = opts.half_resolution;
    if opts.trunk_radius <= 0.0 || opts.branch_radius <= 0.0 {
        return Err(invalid_geometry("radii must be positive"));
    }
    if opts.trunk_length <= 0.0 || opts.branch_length <= 0.0 {
        return Err(invalid_geometry("lengths must be positive"));
    }
    if m < 2 || opts.trunk_rings < 1 || opts.branch_rings < 1 {
        return Err(invalid_geometry(
            "bifurcating tube requires half_resolution >= 2 and at least one ring per tube",
        ));
    }
    let n = 2 * m;
    let r = opts.trunk_radius;
    let pi = std::f64::consts::PI;

    let mut vertices: Vec<Vec3> = Vec::new();
    let mut cells = Vec::new();

    let mut trunk: Vec<Vec<usize>> = Vec::with_capacity(opts.trunk_rings + 1);
    for j in 0..=opts.trunk_rings {
        let z = -opts.trunk_length + opts.trunk_length * j as f64 / opts.trunk_rings as f64;
        let mut ring = Vec::with_capacity(n);
        for i in 0..n {
            let theta = pi * i as f64 / m as f64;
            ring.push(vertices.len());
            vertices.push([r * theta.cos(), r * theta.sin(), z]);
        }
        trunk.push(ring);
    }
    for band in 0..opts.trunk_rings {
        stitch_rings(&trunk[band], &trunk[band + 1], &mut cells);
    }

    let top = &trunk[opts.trunk_rings];
    let seam: Vec<usize> = (1..m)
        .map(|k| {
            vertices.push([r * (pi * k as f64 / m as f64).cos(), 0.0, 0.0]);
            vertices.len() - 1
        })
        .collect();

    // +y loop: top[0..=m] back along the seam; -y loop: top[m..], top[0], then the seam.
    let mut left: Vec<usize> = top[..=m].to_vec();
    left.extend(seam.iter().rev());
    let mut right: Vec<usize> = top[m..].to_vec();
    right.push(top[0]);
    right.extend(seam.iter());

    let (sin_a, cos_a) = opts.branch_angle.sin_cos();
    for (junction, side) in [(left, 1.0), (right, -1.0)] {
        let dir = [0.0, side * sin_a, cos_a];
        let u = [1.0, 0.0, 0.0];
        let w = normalize(sub([0.0, 1.0, 0.0], scale(dir, dir[1])))
            .ok_or_else(|| invalid_geometry("branch angle must be below a right angle"))?;
        let base: Vec<Vec3> = junction.iter().map(|&v| vertices[v]).collect();
        let c0 = centroid(base.iter().copied());

        let mut previous = junction;
        for j in 1..=opts.branch_rings {
            let cj = add(c0, scale(dir, opts.branch_length * j as f64 / opts.branch_rings as f64));
            let t = (j as f64 / BRANCH_BLEND_RINGS).min(1.0);
            let mut ring = Vec::with_capacity(n);
            for &b in &base {
                let rel = sub(b, c0);
                let (sin_p, cos_p) = rel[1].atan2(rel[0]).sin_cos();
                let circle = add(
                    scale(u, opts.branch_radius * cos_p),
                    scale(w, opts.branch_radius * sin_p),
                );
                ring.push(vertices.len());
                vertices.push(add(cj, lerp(rel, circle, t)));
            }
            stitch_rings(&previous, &ring, &mut cells);
            previous = ring;
        }
    }

    build_mesh(DataSetKind::PolyData, vertices, &cells, CellType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_edge_count(mesh: &Mesh) -> usize {
        let mut count = 0;
        for (cell, (_, pts)) in mesh.cells().iter().enumerate() {
            for k in 0..pts.len() {
                let (a, b) = (pts[k], pts[(k + 1) % pts.len()]);
                if mesh.cell_edge_neighbors(Some(cell), a, b).unwrap().is_empty() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn disk_counts() {
        let mesh = triangulated_disk(1.0, 3, 8).unwrap();
        assert_eq!(mesh.number_of_points(), 1 + 3 * 8);
        assert_eq!(mesh.number_of_cells(), 8 + 2 * 2 * 8);
        assert_eq!(free_edge_count(&mesh), 8);
    }

    #[test]
    fn sphere_is_closed() {
        let mesh = sphere_shell(1.0, 6, 8).unwrap();
        assert_eq!(free_edge_count(&mesh), 0);
    }

    #[test]
    fn cylinder_has_two_open_rings() {
        let mesh = cylinder_shell(1.0, 4.0, 12, 6).unwrap();
        assert_eq!(free_edge_count(&mesh), 24);
    }

    #[test]
    fn capped_cylinder_has_one_open_ring() {
        let mesh = capped_cylinder_shell(1.0, 4.0, 12, 6).unwrap();
        assert_eq!(mesh.number_of_points(), 12 * 7 + 1);
        assert_eq!(mesh.number_of_cells(), 2 * 12 * 6 + 12);
        assert_eq!(free_edge_count(&mesh), 12);
    }

    #[test]
    fn tube_has_three_open_rings() {
        let opts = BifurcatingTubeOpts::default();
        let mesh = bifurcating_tube(&opts).unwrap();
        let n = 2 * opts.half_resolution;
        assert_eq!(free_edge_count(&mesh), 3 * n);
        assert_eq!(
            mesh.number_of_points(),
            (opts.trunk_rings + 1) * n + (opts.half_resolution - 1) + 2 * opts.branch_rings * n
        );
    }

    #[test]
    fn tet_box_counts() {
        let mesh = structured_box_3d(2, 1, 1, [0.0; 3], [2.0, 1.0, 1.0]).unwrap();
        assert_eq!(mesh.kind(), DataSetKind::UnstructuredGrid);
        assert_eq!(mesh.number_of_points(), 12);
        assert_eq!(mesh.number_of_cells(), 12);
    }

    #[test]
    fn bad_parameters_fail() {
        assert!(triangulated_disk(0.0, 1, 8).is_err());
        assert!(structured_box_3d(0, 1, 1, [0.0; 3], [1.0; 3]).is_err());
        assert!(cylinder_shell(1.0, 2.0, 2, 1).is_err());
    }
}
