//! Output data sets of a network extraction.

use crate::algs::network::segment::Segment;
use crate::algs::network::step::Mark;
use crate::data::arrays::DataArray;
use crate::geometry::Vec3;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::mesh::{DataSetKind, Mesh, MeshBuilder};

/// One polyline per segment with a point radius array and a cell topology array.
pub fn network_mesh(
    segments: &[Segment],
    radius_array: &str,
    topology_array: &str,
) -> Result<Mesh, MeshError> {
    let mut out = MeshBuilder::new(DataSetKind::PolyData);
    let mut radii = Vec::new();
    let mut topology = Vec::with_capacity(2 * segments.len());
    for segment in segments {
        let ids: Vec<usize> = segment.points().iter().map(|&p| out.insert_point(p)).collect();
        radii.extend_from_slice(segment.radii());
        out.insert_cell(CellType::PolyLine, &ids);
        topology.extend(segment.topology().as_pair());
    }
    out.point_data_mut()
        .add_array(DataArray::from_f64(radius_array, 1, radii)?);
    out.cell_data_mut()
        .add_array(DataArray::from_i64(topology_array, 2, topology)?);
    out.build()
}

/// Segments collapsed to straight edges between their endpoints.
///
/// Endpoints with identical coordinates become one graph vertex, so segments
/// meeting at a bifurcation center share it. Each edge carries the mean radius
/// of its segment and the segment's topology pair. Empty segments are skipped.
pub fn graph_mesh(
    segments: &[Segment],
    radius_array: &str,
    topology_array: &str,
) -> Result<Mesh, MeshError> {
    let mut out = MeshBuilder::new(DataSetKind::PolyData);
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut radii = Vec::new();
    let mut topology = Vec::new();
    let mut vertex = |p: Vec3, out: &mut MeshBuilder| match vertices.iter().position(|&q| q == p) {
        Some(id) => id,
        None => {
            vertices.push(p);
            out.insert_point(p)
        }
    };
    for segment in segments {
        let (Some(&first), Some(&last)) = (segment.points().first(), segment.points().last()) else {
            continue;
        };
        let a = vertex(first, &mut out);
        let b = vertex(last, &mut out);
        out.insert_cell(CellType::Line, &[a, b]);
        radii.push(segment.mean_radius());
        topology.extend(segment.topology().as_pair());
    }
    out.cell_data_mut()
        .add_array(DataArray::from_f64(radius_array, 1, radii)?);
    out.cell_data_mut()
        .add_array(DataArray::from_i64(topology_array, 2, topology)?);
    out.build()
}

/// Copy of `surface` with the sweep marks as an integer point array.
pub fn marked_model(surface: &Mesh, marks: &[Mark], marks_array: &str) -> Result<Mesh, MeshError> {
    let mut model = surface.clone();
    let values = marks.iter().map(|m| m.as_i64()).collect();
    model
        .point_data_mut()
        .add_array(DataArray::from_i64(marks_array, 1, values)?);
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::arrays::{RADIUS_ARRAY, TOPOLOGY_ARRAY};

    fn segment(points: &[Vec3], start: Option<usize>, end: Option<usize>) -> Segment {
        let mut s = Segment::new(start);
        for (k, &p) in points.iter().enumerate() {
            s.push(p, 1.0 + k as f64);
        }
        s.set_end(end);
        s
    }

    #[test]
    fn graph_shares_bifurcation_vertices() {
        let j = [1.0, 0.0, 0.0];
        let segments = vec![
            segment(&[[0.0; 3], [0.5, 0.0, 0.0], j], Some(0), Some(1)),
            segment(&[[2.0, 1.0, 0.0], j], None, Some(1)),
            segment(&[[2.0, -1.0, 0.0], j], None, Some(1)),
        ];
        let graph = graph_mesh(&segments, RADIUS_ARRAY, TOPOLOGY_ARRAY).unwrap();
        assert_eq!(graph.number_of_points(), 4);
        assert_eq!(graph.number_of_cells(), 3);
        let radius = graph.cell_data().array(RADIUS_ARRAY).unwrap().as_f64().unwrap();
        assert_eq!(radius, &[2.0, 1.5, 1.5]);
        let topo = graph.cell_data().array(TOPOLOGY_ARRAY).unwrap().as_i64().unwrap();
        assert_eq!(topo, &[0, 1, -1, 1, -1, 1]);
    }

    #[test]
    fn network_keeps_every_center() {
        let segments = vec![segment(&[[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]], Some(0), None)];
        let net = network_mesh(&segments, RADIUS_ARRAY, TOPOLOGY_ARRAY).unwrap();
        assert_eq!(net.number_of_points(), 3);
        assert_eq!(net.cell_type(0).unwrap(), CellType::PolyLine);
        let radius = net.point_data().array(RADIUS_ARRAY).unwrap().as_f64().unwrap();
        assert_eq!(radius, &[1.0, 2.0, 3.0]);
    }
}
