mod util;

use proptest::prelude::*;
use util::{approx_eq, assert_permutation, one_ring};
use vmtk_mesh::algs::meshgen::{sphere_shell, triangulated_disk};
use vmtk_mesh::linalg::{DoubleVector, SparseMatrix, uniform_stencils};
use vmtk_mesh::mesh_error::MeshError;
use vmtk_mesh::neighborhood::{NeighborhoodKind, Neighborhoods};

/// Symmetric pattern of the disk's 1-rings with `a_ij = 1 / (1 + i + j)`.
fn symmetric_disk_matrix() -> SparseMatrix {
    let mesh = triangulated_disk(1.0, 3, 8).unwrap();
    let mut m = SparseMatrix::new();
    m.allocate_rows_from_data_set(&mesh, 1).unwrap();
    for i in 0..m.number_of_rows() {
        let cols = m.row(i).unwrap().element_ids().to_vec();
        for j in cols {
            m.set_element(i, j, 1.0 / (1.0 + (i + j) as f64)).unwrap();
        }
        m.set_element(i, i, 2.0 + i as f64).unwrap();
    }
    m
}

#[test]
fn data_set_pattern_is_the_one_ring() {
    let mesh = triangulated_disk(1.0, 3, 8).unwrap();
    let mut m = SparseMatrix::new();
    m.allocate_rows_from_data_set(&mesh, 1).unwrap();
    assert_eq!(m.number_of_rows(), mesh.number_of_points());
    for i in 0..m.number_of_rows() {
        let row = m.row(i).unwrap();
        assert_permutation(row.element_ids(), &one_ring(&mesh, i));
        assert!(row.elements().iter().all(|&v| v == 0.0));
        assert_eq!(row.diagonal_element(), 0.0);
    }
}

#[test]
fn block_layout_for_two_variables() {
    let mesh = triangulated_disk(1.0, 2, 6).unwrap();
    let n = mesh.number_of_points();
    let hoods = Neighborhoods::build(&mesh, NeighborhoodKind::Polygon).unwrap();
    let mut m = SparseMatrix::new();
    m.allocate_rows_from_neighborhoods(&hoods, 2);
    assert_eq!(m.number_of_rows(), 2 * n);
    for i in 0..n {
        let ring = hoods.get(i).unwrap().point_ids();
        let shifted: Vec<usize> = ring.iter().map(|&j| j + n).collect();

        let mut first = ring.to_vec();
        first.extend(&shifted);
        first.push(i + n);
        assert_permutation(m.row(i).unwrap().element_ids(), &first);

        let mut second = ring.to_vec();
        second.push(i);
        second.extend(&shifted);
        assert_permutation(m.row(i + n).unwrap().element_ids(), &second);
    }
    // coupling entries are addressable, the diagonal lives outside the list
    m.set_element(0, n, 1.0).unwrap();
    m.set_element(n, n, 3.0).unwrap();
    assert_eq!(m.element(0, n).unwrap(), 1.0);
    assert_eq!(m.element(n, n).unwrap(), 3.0);
}

#[test]
fn umbrella_stencils_annihilate_constants() {
    let mesh = sphere_shell(1.0, 5, 7).unwrap();
    let hoods = Neighborhoods::for_data_set(&mesh).unwrap();
    let mut m = SparseMatrix::new();
    m.copy_rows_from_stencils(&uniform_stencils(&hoods));
    assert_eq!(m.number_of_rows(), mesh.number_of_points());
    let x = DoubleVector::from_vec(vec![3.5; mesh.number_of_points()]);
    let mut y = DoubleVector::new(mesh.number_of_points());
    y.fill(7.0);
    m.multiply(&x, &mut y).unwrap();
    assert_eq!(y.linf_norm(), 0.0);
}

#[test]
fn nonzeros_count_every_diagonal() {
    let m = symmetric_disk_matrix();
    let off: usize = m.rows().iter().map(|r| r.number_of_elements()).sum();
    assert_eq!(m.number_of_nonzeros(), off + m.number_of_rows());
}

#[test]
fn out_of_pattern_writes_fail() {
    let mut m = symmetric_disk_matrix();
    // 0 is the disk center, the rim is not adjacent to it
    let rim = m.number_of_rows() - 1;
    assert_eq!(
        m.add_element(0, rim, 1.0),
        Err(MeshError::NotInPattern { row: 0, column: rim })
    );
    assert_eq!(m.element(0, rim).unwrap(), 0.0);
    let rows = m.number_of_rows();
    assert_eq!(
        m.set_element(rows, 0, 1.0),
        Err(MeshError::RowOutOfRange { row: rows, rows })
    );
}

proptest! {
    #[test]
    fn symmetric_matrix_transpose_agrees(xs in proptest::collection::vec(-10.0f64..10.0, 25)) {
        let m = symmetric_disk_matrix();
        prop_assert_eq!(m.number_of_rows(), xs.len());
        let mut y = vec![0.0; xs.len()];
        let mut yt = vec![0.0; xs.len()];
        m.multiply(&xs, &mut y).unwrap();
        m.transpose_multiply(&xs, &mut yt).unwrap();
        for (a, b) in y.iter().zip(&yt) {
            prop_assert!(approx_eq(*a, *b, 1e-9), "{} vs {}", a, b);
        }
    }

    #[test]
    fn multiply_is_linear(xs in proptest::collection::vec(-5.0f64..5.0, 25), s in -4.0f64..4.0) {
        let m = symmetric_disk_matrix();
        let mut y = vec![0.0; 25];
        let mut ys = vec![0.0; 25];
        m.multiply(&xs, &mut y).unwrap();
        let scaled: Vec<f64> = xs.iter().map(|x| x * s).collect();
        m.multiply(&scaled, &mut ys).unwrap();
        for (a, b) in y.iter().zip(&ys) {
            prop_assert!((a * s - b).abs() <= 1e-9 * (1.0 + b.abs()), "{} vs {}", a * s, b);
        }
    }
}
