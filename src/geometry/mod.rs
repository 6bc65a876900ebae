//! Geometry utilities for vmtk-mesh.
//!
//! Plain `[f64; 3]` arithmetic used by the neighborhood visibility test,
//! profile barycenters and virtual-sphere intersections.

pub mod vector;

pub use vector::Vec3;
