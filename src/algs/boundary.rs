//! Boundary classification utilities.
//!
//! These helpers classify vertices and edges by the number of incident faces,
//! and summarize a mesh for trace output.

use std::fmt;

use crate::topology::cell_type::FaceKind;
use crate::topology::mesh_topology::MeshTopology;
use crate::topology::point::{EdgeId, VertexId, id_from_index};

/// Classified vertex sets, each sorted by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexClassification {
    /// Vertices touching a boundary, wire, or non-manifold edge.
    pub boundary: Vec<VertexId>,
    /// Regular interior vertices (valence four).
    pub interior: Vec<VertexId>,
    /// Interior vertices with valence other than four.
    pub poles: Vec<VertexId>,
}

/// Classified edge sets, each sorted by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeClassification {
    pub boundary: Vec<EdgeId>,
    pub interior: Vec<EdgeId>,
    pub non_manifold: Vec<EdgeId>,
    /// Edges with no incident face.
    pub wire: Vec<EdgeId>,
}

/// Classify every vertex of `mesh`.
///
/// Rim vertices go to `boundary` whatever their valence; only interior
/// vertices can be poles.
pub fn classify_vertices<M>(mesh: &M) -> VertexClassification
where
    M: MeshTopology + ?Sized,
{
    let mut out = VertexClassification::default();
    for v in 0..mesh.vertex_count() {
        let vertex: VertexId = id_from_index(v);
        if mesh.is_boundary_vertex(vertex) {
            out.boundary.push(vertex);
        } else if mesh.is_pole(vertex) {
            out.poles.push(vertex);
        } else {
            out.interior.push(vertex);
        }
    }
    out
}

/// Classify every edge of `mesh` by its incident face count.
pub fn classify_edges<M>(mesh: &M) -> EdgeClassification
where
    M: MeshTopology + ?Sized,
{
    let mut out = EdgeClassification::default();
    for e in 0..mesh.edge_count() {
        let edge: EdgeId = id_from_index(e);
        match mesh.edge_faces(edge).len() {
            0 => out.wire.push(edge),
            1 => out.boundary.push(edge),
            2 => out.interior.push(edge),
            _ => out.non_manifold.push(edge),
        }
    }
    out
}

/// Entity counts of a mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshSummary {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub quads: usize,
    pub triangles: usize,
    /// Faces with five or more sides.
    pub ngons: usize,
    pub boundary_edges: usize,
    pub non_manifold_edges: usize,
    pub poles: usize,
}

impl MeshSummary {
    pub fn of<M>(mesh: &M) -> Self
    where
        M: MeshTopology + ?Sized,
    {
        let mut summary = MeshSummary {
            vertices: mesh.vertex_count(),
            edges: mesh.edge_count(),
            faces: mesh.face_count(),
            ..Self::default()
        };
        for face in mesh.faces() {
            match mesh.face_kind(face) {
                FaceKind::Quad => summary.quads += 1,
                FaceKind::Triangle => summary.triangles += 1,
                FaceKind::NGon(_) => summary.ngons += 1,
                FaceKind::Degenerate(_) => {}
            }
        }
        let edges = classify_edges(mesh);
        summary.boundary_edges = edges.boundary.len();
        summary.non_manifold_edges = edges.non_manifold.len();
        summary.poles = classify_vertices(mesh).poles.len();
        summary
    }

    /// Every face is a quad.
    pub fn is_all_quads(&self) -> bool {
        self.quads == self.faces
    }
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mesh: {} vertices, {} edges, {} faces ({} quads, {} triangles, {} n-gons), \
             {} boundary edges, {} non-manifold edges, {} poles",
            self.vertices,
            self.edges,
            self.faces,
            self.quads,
            self.triangles,
            self.ngons,
            self.boundary_edges,
            self.non_manifold_edges,
            self.poles
        )
    }
}
