//! Advancing-front profiles: cross-sections of the tube and their edge tables.
//!
//! A profile is a closed loop of virtual points, one per mesh edge crossing
//! the front. Row `k` of its [`EdgeTable`] is the `(inner, outer)` pair of
//! mesh points whose edge carries virtual point `k`: `inner` is already swept,
//! `outer` is not. Profiles taken from open boundaries use `(v, v)` rows.

use hashbrown::HashMap;

use crate::geometry::vector::{add, centroid, distance, distance2, dot, scale, sub, Vec3};
use crate::mesh_error::MeshError;
use crate::topology::mesh::Mesh;

/// Ordered `(inner, outer)` point pairs; insertion order is meaningful.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeTable {
    rows: Vec<[usize; 2]>,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, inner: usize, outer: usize) {
        self.rows.push([inner, outer]);
    }

    /// Push unless the exact pair is already present. Returns whether it was added.
    pub fn insert_unique(&mut self, inner: usize, outer: usize) -> bool {
        if self.position(inner, outer).is_some() {
            return false;
        }
        self.push(inner, outer);
        true
    }

    /// First row equal to `(inner, outer)`.
    pub fn position(&self, inner: usize, outer: usize) -> Option<usize> {
        self.rows.iter().position(|&r| r == [inner, outer])
    }

    pub fn get(&self, i: usize) -> Option<[usize; 2]> {
        self.rows.get(i).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        self.rows.iter().copied()
    }

    pub fn inner_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|r| r[0])
    }

    pub fn contains_inner(&self, p: usize) -> bool {
        self.rows.iter().any(|r| r[0] == p)
    }
}

/// One cross-section of the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub(crate) points: Vec<Vec3>,
    pub(crate) edges: EdgeTable,
    /// Bifurcation this profile was born at; `None` for open boundaries.
    pub(crate) origin: Option<usize>,
}

impl Profile {
    /// Profile of an open boundary loop given by its point ids.
    pub fn boundary(mesh: &Mesh, ids: &[usize]) -> Result<Self, MeshError> {
        let mut points = Vec::with_capacity(ids.len());
        let mut edges = EdgeTable::new();
        for &v in ids {
            points.push(mesh.point(v)?);
            edges.push(v, v);
        }
        Ok(Self {
            points,
            edges,
            origin: None,
        })
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn edges(&self) -> &EdgeTable {
        &self.edges
    }

    #[inline]
    pub fn origin(&self) -> Option<usize> {
        self.origin
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn barycenter(&self) -> Vec3 {
        centroid(self.points.iter().copied())
    }

    /// Mean distance of the profile points from their barycenter.
    pub fn mean_radius(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let c = self.barycenter();
        self.points.iter().map(|&p| distance(p, c)).sum::<f64>() / self.points.len() as f64
    }

    /// Largest distance of a profile point from `from`.
    pub fn max_distance(&self, from: Vec3) -> f64 {
        self.points
            .iter()
            .map(|&p| distance(p, from))
            .fold(0.0, f64::max)
    }
}

/// Where segment `inner -> outer` leaves the sphere `(center, radius)`.
///
/// With `h` the distance from the center to the segment's line and `t0` the
/// foot of that perpendicular, the exit point sits at `t0 + sqrt(r² - h²)`
/// along the segment. When the segment is degenerate or does not straddle
/// the sphere, the endpoint nearer to the center is returned.
pub fn locate_virtual_point(inner: Vec3, outer: Vec3, center: Vec3, radius: f64) -> Vec3 {
    let nearer = if distance2(inner, center) <= distance2(outer, center) {
        inner
    } else {
        outer
    };
    let d = sub(outer, inner);
    let len = dot(d, d).sqrt();
    if len <= f64::EPSILON {
        return nearer;
    }
    let u = scale(d, 1.0 / len);
    let w = sub(center, inner);
    let t0 = dot(w, u);
    let h2 = (dot(w, w) - t0 * t0).max(0.0);
    let b2 = radius * radius - h2;
    if b2 < 0.0 {
        return nearer;
    }
    let t = t0 + b2.sqrt();
    if !(0.0..=len).contains(&t) {
        return nearer;
    }
    add(inner, scale(u, t))
}

/// Split crossing edges into closed profiles.
///
/// Consecutive crossing edges of a loop share a cell; each polygon cut by
/// the front holds exactly two of them. Walking cell to cell from an
/// unconsumed edge back to itself yields one profile. Virtual points are
/// placed on each edge with [`locate_virtual_point`].
pub fn reconstruct_profiles(
    mesh: &Mesh,
    crossing: &EdgeTable,
    center: Vec3,
    radius: f64,
) -> Result<Vec<Profile>, MeshError> {
    let n = crossing.len();
    let mut index: HashMap<(usize, usize), usize> = HashMap::with_capacity(n);
    for (i, [a, b]) in crossing.iter().enumerate() {
        index.entry(edge_key(a, b)).or_insert(i);
    }

    let mut consumed = vec![false; n];
    let mut profiles = Vec::new();
    for start in 0..n {
        if consumed[start] {
            continue;
        }
        consumed[start] = true;
        let mut order = vec![start];
        let (mut current, mut came_from) = (start, None);
        loop {
            let [a, b] = crossing.rows[current];
            let mut next = None;
            for cell in mesh.cell_edge_neighbors(None, a, b)? {
                if Some(cell) == came_from || !mesh.cell_type(cell)?.is_polygonal() {
                    continue;
                }
                if let Some(e) = other_crossing_edge(mesh.cell_points(cell)?, current, &index) {
                    next = Some((cell, e));
                    break;
                }
            }
            let Some((cell, e)) = next else {
                log::error!("profile walk has no continuation past edge ({a}, {b})");
                return Err(MeshError::ProfileReconstruction(a, b));
            };
            if e == start {
                break;
            }
            if consumed[e] {
                log::error!("profile walk re-entered edge {:?} from ({a}, {b})", crossing.rows[e]);
                return Err(MeshError::ProfileReconstruction(a, b));
            }
            consumed[e] = true;
            order.push(e);
            came_from = Some(cell);
            current = e;
        }

        let mut points = Vec::with_capacity(order.len());
        let mut edges = EdgeTable::new();
        for &i in &order {
            let [a, b] = crossing.rows[i];
            points.push(locate_virtual_point(mesh.point(a)?, mesh.point(b)?, center, radius));
            edges.push(a, b);
        }
        profiles.push(Profile {
            points,
            edges,
            origin: None,
        });
    }
    Ok(profiles)
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

fn other_crossing_edge(
    pts: &[usize],
    current: usize,
    index: &HashMap<(usize, usize), usize>,
) -> Option<usize> {
    let n = pts.len();
    (0..n)
        .filter_map(|k| index.get(&edge_key(pts[k], pts[(k + 1) % n])).copied())
        .find(|&e| e != current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_table_first_match_wins() {
        let mut t = EdgeTable::new();
        assert!(t.insert_unique(1, 2));
        assert!(t.insert_unique(2, 1));
        assert!(!t.insert_unique(1, 2));
        assert_eq!(t.len(), 2);
        assert_eq!(t.position(2, 1), Some(1));
        assert!(t.contains_inner(2));
        assert!(!t.contains_inner(3));
    }

    #[test]
    fn virtual_point_lies_on_sphere() {
        let p = locate_virtual_point([0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 1.0, 0.0], 2.0);
        assert!((distance(p, [0.0, 1.0, 0.0]) - 2.0).abs() < 1e-12);
        assert!((p[0] - 3.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn virtual_point_falls_back_to_nearer_endpoint() {
        // sphere misses the segment's line
        let p = locate_virtual_point([0.0, 5.0, 0.0], [4.0, 5.0, 0.0], [0.0; 3], 1.0);
        assert_eq!(p, [0.0, 5.0, 0.0]);
        // degenerate segment
        let q = locate_virtual_point([1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0; 3], 0.5);
        assert_eq!(q, [1.0, 0.0, 0.0]);
        // both endpoints inside
        let r = locate_virtual_point([0.1, 0.0, 0.0], [0.2, 0.0, 0.0], [0.0; 3], 1.0);
        assert_eq!(r, [0.1, 0.0, 0.0]);
    }

    #[test]
    fn crossing_edges_of_a_fan_close_into_one_loop() {
        // pivot 0 swept, its hexagonal ring not
        let mut points = vec![[0.0, 0.0, 0.0]];
        for k in 0..6 {
            let t = std::f64::consts::PI * k as f64 / 3.0;
            points.push([t.cos(), t.sin(), 0.0]);
        }
        let tris: Vec<Vec<usize>> = (0..6).map(|k| vec![0, 1 + k, 1 + (k + 1) % 6]).collect();
        let mesh = Mesh::from_polygons(points, &tris).unwrap();
        let mut crossing = EdgeTable::new();
        for q in [1, 3, 2, 6, 4, 5] {
            crossing.push(0, q);
        }
        let profiles = reconstruct_profiles(&mesh, &crossing, [0.0; 3], 0.5).unwrap();
        assert_eq!(profiles.len(), 1);
        let p = &profiles[0];
        assert_eq!(p.len(), 6);
        assert!((p.mean_radius() - 0.5).abs() < 1e-12);
        // consecutive rows are ring neighbors
        for k in 0..6 {
            let a = p.edges().get(k).unwrap()[1];
            let b = p.edges().get((k + 1) % 6).unwrap()[1];
            assert!(mesh.is_edge(a, b), "{a} and {b} are not adjacent");
        }
    }

    #[test]
    fn broken_front_is_reported() {
        let mesh = Mesh::from_polygons(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            &[vec![0, 1, 2]],
        )
        .unwrap();
        let mut crossing = EdgeTable::new();
        crossing.push(0, 1);
        let err = reconstruct_profiles(&mesh, &crossing, [0.0; 3], 0.5).unwrap_err();
        assert_eq!(err, MeshError::ProfileReconstruction(0, 1));
    }
}
