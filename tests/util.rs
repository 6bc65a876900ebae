#![allow(dead_code)]
use vmtk_mesh::topology::Mesh;

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

/// Every consecutive pair of `ids` is a mesh edge; with `closed`, so is last -> first.
pub fn assert_edge_path(mesh: &Mesh, ids: &[usize], closed: bool) {
    let n = ids.len();
    let pairs = if closed { n } else { n.saturating_sub(1) };
    for k in 0..pairs {
        let (a, b) = (ids[k], ids[(k + 1) % n]);
        assert!(mesh.is_edge(a, b), "{a} -> {b} is not an edge of path {ids:?}");
    }
}

/// Edge-adjacent points of `p`.
pub fn one_ring(mesh: &Mesh, p: usize) -> Vec<usize> {
    mesh.point_edge_neighbors(p).unwrap()
}

pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
}
