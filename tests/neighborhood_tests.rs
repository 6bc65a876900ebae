mod util;

use util::{approx_eq, assert_edge_path, assert_permutation, one_ring};
use vmtk_mesh::algs::meshgen::{sphere_shell, structured_box_3d, triangulated_disk};
use vmtk_mesh::mesh_error::MeshError;
use vmtk_mesh::neighborhood::{Neighborhood, NeighborhoodFactory, NeighborhoodKind, Neighborhoods};
use vmtk_mesh::topology::DataSetKind;

#[test]
fn closed_surface_rings_are_cycles() {
    let mesh = sphere_shell(1.0, 6, 8).unwrap();
    let all = Neighborhoods::build(&mesh, NeighborhoodKind::PolygonManifold).unwrap();
    assert_eq!(all.len(), mesh.number_of_points());
    for n in &all {
        assert!(!n.is_boundary(), "pivot {} flagged as boundary", n.pivot());
        assert_permutation(n.point_ids(), &one_ring(&mesh, n.pivot()));
        assert_edge_path(&mesh, n.point_ids(), true);
    }
}

#[test]
fn disk_rim_rings_are_open_paths() {
    let (rings, sectors) = (3, 8);
    let mesh = triangulated_disk(1.0, rings, sectors).unwrap();
    let rim: Vec<usize> = (1 + (rings - 1) * sectors..1 + rings * sectors).collect();
    for &p in &rim {
        let n = NeighborhoodFactory::build(NeighborhoodKind::PolygonManifold, &mesh, p).unwrap();
        assert!(n.is_boundary());
        let ids = n.point_ids();
        assert_permutation(ids, &one_ring(&mesh, p));
        assert_edge_path(&mesh, ids, false);
        let (first, last) = (ids[0], ids[ids.len() - 1]);
        assert!(rim.contains(&first) && rim.contains(&last), "{ids:?} does not end on the rim");
    }
}

#[test]
fn polygon_union_equals_triangle_one_ring() {
    let mesh = triangulated_disk(1.0, 3, 8).unwrap();
    for p in 0..mesh.number_of_points() {
        let n = NeighborhoodFactory::build(NeighborhoodKind::Polygon, &mesh, p).unwrap();
        assert_permutation(n.point_ids(), &one_ring(&mesh, p));
        assert!(!n.point_ids().contains(&p));
    }
    // center and rim
    assert!(!NeighborhoodFactory::build(NeighborhoodKind::Polygon, &mesh, 0).unwrap().is_boundary());
    assert!(NeighborhoodFactory::build(NeighborhoodKind::Polygon, &mesh, 20).unwrap().is_boundary());
}

#[test]
fn factory_picks_kind_from_data_set() {
    let surface = sphere_shell(1.0, 4, 6).unwrap();
    let volume = structured_box_3d(2, 2, 2, [0.0; 3], [1.0; 3]).unwrap();
    assert_eq!(NeighborhoodFactory::for_data_set(&surface), NeighborhoodKind::Polygon);
    assert_eq!(volume.kind(), DataSetKind::UnstructuredGrid);
    assert_eq!(
        NeighborhoodFactory::for_data_set(&volume),
        NeighborhoodKind::UnstructuredGrid
    );
    let all = Neighborhoods::for_data_set(&volume).unwrap();
    assert_eq!(all.kind(), NeighborhoodKind::UnstructuredGrid);
    assert!(all.iter().all(|n| n.number_of_points() > 0));
}

#[test]
fn mismatched_data_set_leaves_neighborhood_untouched() {
    let volume = structured_box_3d(1, 1, 1, [0.0; 3], [1.0; 3]).unwrap();
    let mut n = Neighborhood::new(NeighborhoodKind::PolygonManifold);
    n.set_pivot(3);
    let before = n.clone();
    assert!(matches!(
        n.build(&volume),
        Err(MeshError::UnsupportedDataSet {
            expected: DataSetKind::PolyData,
            found: DataSetKind::UnstructuredGrid,
        })
    ));
    assert_eq!(n, before);
}

#[test]
fn extended_rings_contain_the_plain_ring() {
    let mesh = sphere_shell(1.0, 6, 8).unwrap();
    for p in 0..mesh.number_of_points() {
        let plain = NeighborhoodFactory::build(NeighborhoodKind::PolygonManifold, &mesh, p).unwrap();
        let ext =
            NeighborhoodFactory::build(NeighborhoodKind::PolygonManifoldExtended, &mesh, p).unwrap();
        assert!(ext.number_of_points() >= plain.number_of_points());
        for id in plain.point_ids() {
            assert!(ext.point_ids().contains(id));
        }
        assert!(!ext.point_ids().contains(&p));
    }
}

#[test]
fn octahedron_rings_gain_the_antipode() {
    // every vertex has valence 4 and sees its antipode across each ring edge
    let mesh = sphere_shell(1.0, 2, 4).unwrap();
    assert_eq!(mesh.number_of_points(), 6);
    for p in 0..mesh.number_of_points() {
        let plain = NeighborhoodFactory::build(NeighborhoodKind::PolygonManifold, &mesh, p).unwrap();
        assert_eq!(plain.number_of_points(), 4);
        let ext =
            NeighborhoodFactory::build(NeighborhoodKind::PolygonManifoldExtended, &mesh, p).unwrap();
        assert_eq!(ext.number_of_points(), 5, "pivot {p}: {:?}", ext.point_ids());

        let x = mesh.point(p).unwrap();
        let extra: Vec<usize> = ext
            .point_ids()
            .iter()
            .copied()
            .filter(|id| !plain.point_ids().contains(id))
            .collect();
        assert_eq!(extra.len(), 1);
        let o = mesh.point(extra[0]).unwrap();
        for k in 0..3 {
            assert!(approx_eq(o[k], -x[k], 1e-12), "{o:?} is not opposite {x:?}");
        }
    }
}
