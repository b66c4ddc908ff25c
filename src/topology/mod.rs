//! Top-level module for mesh topology abstractions.
//!
//! This module provides the adjacency view the loop algorithms run on:
//! - typed vertex, edge and face ids
//! - the [`MeshTopology`] trait and its derived quad queries
//! - [`PolyMesh`], an immutable mesh with precomputed adjacency
//! - validation of hand-built or imported meshes

pub mod cell_type;
pub mod mesh_topology;
pub mod point;
pub mod poly_mesh;
pub mod validation;

pub use cell_type::FaceKind;
pub use mesh_topology::MeshTopology;
pub use point::{EdgeId, FaceId, VertexId};
pub use poly_mesh::PolyMesh;
