//! Re-export public algorithms.

pub mod boundary;
pub mod meshgen;
pub mod network;

pub use boundary::{boundary_loops, extract_boundaries, loops_from_polylines, BoundaryLoop};
pub use network::{extract_network, extract_network_with_progress, NetworkExtraction, NetworkExtractionOpts};
