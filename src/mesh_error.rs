//! MeshLoopError: Unified error type for alt-face-loops public APIs
//!
//! Mesh construction, topology queries and request validation all report
//! failures through this type instead of panicking. The selector itself never
//! fails once a valid mesh and request exist; query errors such as
//! [`MeshLoopError::NotAQuad`] are turned into loop terminations there.

use crate::topology::point::{EdgeId, FaceId, VertexId};
use thiserror::Error;

/// Unified error type for alt-face-loops operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshLoopError {
    /// An operation that only makes sense on quads was applied to another face.
    #[error("face {face} is not a quad (it has {sides} edges)")]
    NotAQuad { face: FaceId, sides: usize },
    /// The edge is not part of the face's edge cycle.
    #[error("edge {edge} is not an edge of face {face}")]
    EdgeNotInFace { face: FaceId, edge: EdgeId },
    /// Face id outside the mesh.
    #[error("unknown face {0}")]
    UnknownFace(FaceId),
    /// Edge id outside the mesh.
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),
    /// Vertex id outside the mesh.
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    /// A face needs at least three sides.
    #[error("face {face} is degenerate: {sides} sides")]
    DegenerateFace { face: usize, sides: usize },
    /// A polygon references a vertex index beyond the vertex count.
    #[error("face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },
    /// Both endpoints of an edge are the same vertex.
    #[error("edge {edge} joins vertex {vertex} to itself")]
    DegenerateEdge { edge: EdgeId, vertex: VertexId },
    /// Two consecutive edges of a face do not share a vertex.
    #[error("face {face}: edges at positions {position} and the next one are not connected")]
    BrokenFaceCycle { face: FaceId, position: usize },
    /// The same edge occurs twice in one face.
    #[error("face {face} uses edge {edge} more than once")]
    DuplicateFaceEdge { face: FaceId, edge: EdgeId },
    /// An edge with more than two incident faces (only raised when requested).
    #[error("non-manifold edge {edge}: {incident_faces} incident faces")]
    NonManifoldEdge { edge: EdgeId, incident_faces: usize },
    /// Face/edge/vertex tables disagree with each other.
    #[error("inconsistent adjacency: {0}")]
    InconsistentAdjacency(String),
    /// `repeat` must allow at least one stepping iteration.
    #[error("repeat must be at least 1 (got {0})")]
    InvalidRepeat(usize),
    /// Generator parameters or entity counts that cannot form a mesh.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Malformed mesh file contents.
    #[error("mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// Underlying reader failure.
    #[error("mesh I/O error: {0}")]
    MeshIo(String),
}

impl From<std::io::Error> for MeshLoopError {
    fn from(err: std::io::Error) -> Self {
        MeshLoopError::MeshIo(err.to_string())
    }
}
