#![cfg_attr(docsrs, feature(doc_cfg))]
//! # vmtk-mesh
//!
//! vmtk-mesh provides the mesh-level building blocks of vascular modeling:
//! point neighborhoods on surfaces and volumes, a sparse matrix patterned from
//! those neighborhoods for PDE assembly, boundary-loop extraction, and network
//! extraction, which recovers the centerline skeleton (segments and
//! bifurcations) of a tubular surface.
//!
//! ## Features
//! - Indexed [`Mesh`](topology::Mesh) data set with point-to-cell links and named arrays
//! - Unordered, ordered-manifold and extended neighborhoods ([`neighborhood`])
//! - Row-per-unknown sparse matrix with a dedicated diagonal slot ([`linalg`])
//! - Free-edge boundary polylines ([`algs::boundary`])
//! - Virtual-sphere network extraction ([`algs::network`])
//! - Deterministic fixture generators ([`algs::meshgen`])
//!
//! ## Determinism
//!
//! Every algorithm is single-threaded and iterates in id order, so repeated
//! runs on the same input produce identical output.
//!
//! ## Errors and logging
//!
//! Fallible operations return [`MeshError`](mesh_error::MeshError). Failures
//! are also reported through the `log` facade at the point of detection; the
//! crate installs no logger.

//! Public prelude for vmtk-mesh.

// Re-export our major subsystems:
pub mod algs;
pub mod data;
pub mod geometry;
pub mod linalg;
pub mod mesh_error;
pub mod neighborhood;
pub mod topology;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::algs::boundary::{BoundaryLoop, extract_boundaries};
    pub use crate::algs::network::{
        Bifurcation, NetworkExtraction, NetworkExtractionOpts, Segment, SegmentTopology,
        extract_network, extract_network_with_progress,
    };
    pub use crate::data::{DataArray, DataArrays};
    pub use crate::geometry::Vec3;
    pub use crate::linalg::{DoubleVector, SparseMatrix, SparseMatrixRow, Stencil};
    pub use crate::mesh_error::MeshError;
    pub use crate::neighborhood::{
        Neighborhood, NeighborhoodFactory, NeighborhoodKind, Neighborhoods,
    };
    pub use crate::topology::{CellArray, CellType, DataSetKind, Mesh, MeshBuilder};
}
