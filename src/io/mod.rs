//! Mesh I/O helpers.
//!
//! Readers turn a file format into a [`PolyMesh`] plus the file's own node and
//! element numbering, so a selection computed on face ids can be mapped back
//! to the elements it came from.

pub mod gmsh;

use crate::mesh_error::MeshLoopError;
use crate::topology::point::{FaceId, VertexId, id_from_index};
use crate::topology::poly_mesh::PolyMesh;
use std::io::Read;

/// Mesh topology and file-side metadata returned by readers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// The polygon mesh; vertex `i` is the `i`-th node read, face `i` the
    /// `i`-th surface element.
    pub mesh: PolyMesh,
    /// Node coordinates, indexed by vertex id.
    pub positions: Vec<[f64; 3]>,
    /// File node id of each vertex.
    pub node_ids: Vec<u64>,
    /// File element id of each face.
    pub element_ids: Vec<u64>,
}

impl MeshData {
    /// Face created from the file element `element`.
    pub fn face_for_element(&self, element: u64) -> Option<FaceId> {
        self.element_ids
            .iter()
            .position(|&id| id == element)
            .map(id_from_index)
    }

    /// File element id of `face`.
    pub fn element_for_face(&self, face: FaceId) -> Option<u64> {
        self.element_ids.get(face.index()).copied()
    }

    /// Position of `vertex`.
    pub fn position(&self, vertex: VertexId) -> Option<[f64; 3]> {
        self.positions.get(vertex.index()).copied()
    }
}

/// Trait for mesh readers that produce polygon meshes.
pub trait PolyMeshReader {
    /// Parse mesh data from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<MeshData, MeshLoopError>;
}
