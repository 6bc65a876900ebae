//! Top-level module for mesh topology.
//!
//! This module provides the indexed data set every algorithm works on:
//! - [`CellType`] tags and their dimensions
//! - [`CellArray`] / [`CellLinks`] compressed cell storage and the point-to-cell index
//! - [`Mesh`] and [`MeshBuilder`], the adjacency provider (points, cells, edge queries)
//!
//! Most users build a [`Mesh`] through [`Mesh::from_polygons`] or one of the
//! generators in [`crate::algs::meshgen`].

pub mod cell_links;
pub mod cell_type;
pub mod mesh;

pub use cell_links::{CellArray, CellLinks};
pub use cell_type::CellType;
pub use mesh::{DataSetKind, Mesh, MeshBuilder};
