mod util;

use util::{assert_edge_path, assert_permutation};
use vmtk_mesh::algs::boundary::{boundary_loops, extract_boundaries, loops_from_polylines};
use vmtk_mesh::algs::meshgen::{bifurcating_tube, cylinder_shell, triangulated_disk, BifurcatingTubeOpts};
use vmtk_mesh::data::arrays::ORIGINAL_POINT_IDS_ARRAY;
use vmtk_mesh::topology::{CellType, Mesh};

#[test]
fn disk_rim_is_one_closed_loop() {
    let mesh = triangulated_disk(1.0, 3, 8).unwrap();
    let loops = boundary_loops(&mesh).unwrap();
    assert_eq!(loops.len(), 1);
    let rim: Vec<usize> = (17..25).collect();
    assert!(loops[0].closed);
    assert_permutation(&loops[0].point_ids, &rim);
    assert_edge_path(&mesh, &loops[0].point_ids, true);
}

#[test]
fn polylines_carry_original_ids() {
    let mesh = cylinder_shell(1.0, 3.0, 10, 4).unwrap();
    let out = extract_boundaries(&mesh).unwrap();
    assert_eq!(out.number_of_cells(), 2);
    assert_eq!(out.number_of_points(), 20);
    let ids = out
        .point_data()
        .array(ORIGINAL_POINT_IDS_ARRAY)
        .unwrap()
        .as_i64()
        .unwrap();
    assert_eq!(ids.len(), out.number_of_points());
    for (cell_type, pts) in out.cells().iter() {
        assert_eq!(cell_type, CellType::PolyLine);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts.first(), pts.last());
        for &k in pts {
            let original = ids[k] as usize;
            assert_eq!(out.point(k).unwrap(), mesh.point(original).unwrap());
        }
    }
    // bottom ring then top ring
    let loops = loops_from_polylines(&out).unwrap();
    assert_permutation(&loops[0].point_ids, &(0..10).collect::<Vec<_>>());
    assert_permutation(&loops[1].point_ids, &(40..50).collect::<Vec<_>>());
}

#[test]
fn y_tube_has_three_mouths() {
    let opts = BifurcatingTubeOpts::default();
    let mesh = bifurcating_tube(&opts).unwrap();
    let loops = boundary_loops(&mesh).unwrap();
    assert_eq!(loops.len(), 3);
    for l in &loops {
        assert!(l.closed);
        assert_eq!(l.len(), 2 * opts.half_resolution);
        assert_edge_path(&mesh, &l.point_ids, true);
    }
    // the trunk mouth comes first
    assert_permutation(&loops[0].point_ids, &(0..2 * opts.half_resolution).collect::<Vec<_>>());
}

#[test]
fn pinch_point_goes_to_the_first_loop() {
    // two triangles touching only at point 0
    let points = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [-1.0, -1.0, 0.0],
    ];
    let mesh = Mesh::from_polygons(points, &[vec![0, 1, 2], vec![0, 3, 4]]).unwrap();
    let loops = boundary_loops(&mesh).unwrap();
    // the second loop loses the shared point and is too short to keep
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].point_ids, vec![0, 1, 2]);
    assert!(loops[0].closed);
}
