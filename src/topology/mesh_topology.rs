//! Read-only adjacency API for polygon meshes.
//!
//! This module defines the [`MeshTopology`] trait, the only view of a mesh the
//! loop algorithms depend on. A host adapts its own mesh representation by
//! supplying the four adjacency tables; every derived query (opposite edges,
//! neighbour faces, poles) comes from provided methods so that all
//! representations answer them identically.

use crate::mesh_error::MeshLoopError;
use crate::topology::cell_type::FaceKind;
use crate::topology::point::{EdgeId, FaceId, VertexId, id_from_index};

/// Valence of a regular vertex in a quad mesh.
pub const REGULAR_VALENCE: usize = 4;

/// Read-only adjacency queries over vertices, edges, and faces.
///
/// # Required Methods
/// - entity counts (ids are dense: `0..count`)
/// - `edges_of`: face → edges in cyclic order
/// - `edge_faces`: edge → incident faces
/// - `edge_vertices`: edge → its two endpoints
/// - `vertex_edges`: vertex → incident edges
///
/// Unknown ids yield empty slices / `None` rather than panicking.
///
/// # Provided Methods
/// - Face classification (`face_kind`, `is_quad`)
/// - Quad navigation (`opposite_edge`, `edge_pairs`, `other_face`)
/// - Boundary and pole classification
pub trait MeshTopology {
    fn vertex_count(&self) -> usize;
    fn edge_count(&self) -> usize;
    fn face_count(&self) -> usize;

    /// Edges bounding `face`, in cyclic order.
    fn edges_of(&self, face: FaceId) -> &[EdgeId];
    /// Faces incident to `edge`.
    fn edge_faces(&self, edge: EdgeId) -> &[FaceId];
    /// The two endpoints of `edge`.
    fn edge_vertices(&self, edge: EdgeId) -> Option<[VertexId; 2]>;
    /// Edges incident to `vertex`.
    fn vertex_edges(&self, vertex: VertexId) -> &[EdgeId];

    /// All face ids in ascending order.
    fn faces<'a>(&'a self) -> Box<dyn Iterator<Item = FaceId> + 'a> {
        Box::new((0..self.face_count()).map(id_from_index))
    }

    #[inline]
    fn contains_face(&self, face: FaceId) -> bool {
        face.index() < self.face_count()
    }

    fn face_kind(&self, face: FaceId) -> FaceKind {
        FaceKind::from_sides(self.edges_of(face).len())
    }

    #[inline]
    fn is_quad(&self, face: FaceId) -> bool {
        self.edges_of(face).len() == 4
    }

    /// Number of edges incident to `vertex`.
    #[inline]
    fn valence(&self, vertex: VertexId) -> usize {
        self.vertex_edges(vertex).len()
    }

    /// Position of `edge` within the cycle of `face`.
    fn edge_position(&self, face: FaceId, edge: EdgeId) -> Option<usize> {
        self.edges_of(face).iter().position(|&e| e == edge)
    }

    /// For a quad `[e0, e1, e2, e3]`, the edge two positions away from `edge`.
    fn opposite_edge(&self, face: FaceId, edge: EdgeId) -> Result<EdgeId, MeshLoopError> {
        let edges = self.quad_edges(face)?;
        let i = self
            .edge_position(face, edge)
            .ok_or(MeshLoopError::EdgeNotInFace { face, edge })?;
        Ok(edges[(i + 2) % 4])
    }

    /// The two opposite-edge pairs of a quad: `[[e0, e2], [e1, e3]]`.
    fn edge_pairs(&self, face: FaceId) -> Result<[[EdgeId; 2]; 2], MeshLoopError> {
        let e = self.quad_edges(face)?;
        Ok([[e[0], e[2]], [e[1], e[3]]])
    }

    /// The edges of `face` as a fixed array, or `NotAQuad`.
    fn quad_edges(&self, face: FaceId) -> Result<[EdgeId; 4], MeshLoopError> {
        if !self.contains_face(face) {
            return Err(MeshLoopError::UnknownFace(face));
        }
        let edges = self.edges_of(face);
        <[EdgeId; 4]>::try_from(edges).map_err(|_| MeshLoopError::NotAQuad {
            face,
            sides: edges.len(),
        })
    }

    /// The face across `edge` from `face`.
    ///
    /// `None` when `edge` is a boundary edge or `face` is not incident to it.
    /// On a non-manifold edge the lowest-id incident face other than `face` is
    /// returned, so repeated queries always agree.
    fn other_face(&self, edge: EdgeId, face: FaceId) -> Option<FaceId> {
        let faces = self.edge_faces(edge);
        if !faces.contains(&face) {
            return None;
        }
        faces.iter().copied().filter(|&f| f != face).min()
    }

    /// An edge used by both `a` and `b`, if they are neighbours.
    fn shared_edge(&self, a: FaceId, b: FaceId) -> Option<EdgeId> {
        if a == b {
            return None;
        }
        self.edges_of(a)
            .iter()
            .copied()
            .find(|&e| self.edge_faces(e).contains(&b))
    }

    /// Exactly one incident face.
    #[inline]
    fn is_boundary_edge(&self, edge: EdgeId) -> bool {
        self.edge_faces(edge).len() == 1
    }

    /// No incident face at all.
    #[inline]
    fn is_wire_edge(&self, edge: EdgeId) -> bool {
        self.edge_faces(edge).is_empty()
    }

    /// More than two incident faces.
    #[inline]
    fn is_non_manifold_edge(&self, edge: EdgeId) -> bool {
        self.edge_faces(edge).len() > 2
    }

    /// A vertex touching any edge that is not shared by exactly two faces.
    fn is_boundary_vertex(&self, vertex: VertexId) -> bool {
        self.vertex_edges(vertex)
            .iter()
            .any(|&e| self.edge_faces(e).len() != 2)
    }

    /// Valence other than four.
    #[inline]
    fn is_pole(&self, vertex: VertexId) -> bool {
        self.valence(vertex) != REGULAR_VALENCE
    }

    /// A pole away from any boundary. Rim vertices of an open mesh have
    /// valence 2 or 3 without breaking loops, so only these count when
    /// walking.
    fn is_interior_pole(&self, vertex: VertexId) -> bool {
        self.is_pole(vertex) && !self.is_boundary_vertex(vertex)
    }

    /// First interior pole among the endpoints of `edge`.
    fn interior_pole_on(&self, edge: EdgeId) -> Option<VertexId> {
        self.edge_vertices(edge)?
            .into_iter()
            .find(|&v| self.is_interior_pole(v))
    }
}
