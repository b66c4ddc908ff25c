//! `PolyMesh`: an immutable polygon mesh with precomputed adjacency.
//!
//! The mesh is built once from either vertex loops (`from_polygons`) or
//! explicit edges plus faces-as-edge-cycles (`from_parts`, the layout most
//! editing hosts keep). After construction the four adjacency tables never
//! change, and every [`MeshTopology`] query is a slice lookup.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshLoopError;
use crate::topology::mesh_topology::MeshTopology;
use crate::topology::point::{EdgeId, FaceId, VertexId, id_from_index};
use crate::topology::validation::{ValidationOptions, validate_poly_mesh};

/// Polygon mesh adjacency: face→edges, edge→faces, edge→vertices,
/// vertex→edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolyMesh {
    face_edges: Vec<Vec<EdgeId>>,
    edge_faces: Vec<Vec<FaceId>>,
    edge_verts: Vec<[VertexId; 2]>,
    vertex_edges: Vec<Vec<EdgeId>>,
}

impl PolyMesh {
    /// Build a mesh from polygons given as vertex index loops.
    ///
    /// Edges are created in first-seen order while scanning the polygons, so
    /// the same input always yields the same edge ids. Non-manifold edges are
    /// accepted (and logged); use [`PolyMesh::from_polygons_with`] to reject
    /// them.
    pub fn from_polygons<P, I>(vertex_count: usize, polygons: P) -> Result<Self, MeshLoopError>
    where
        P: IntoIterator<Item = I>,
        I: AsRef<[u32]>,
    {
        Self::from_polygons_with(vertex_count, polygons, ValidationOptions::default())
    }

    /// [`PolyMesh::from_polygons`] with explicit validation options.
    pub fn from_polygons_with<P, I>(
        vertex_count: usize,
        polygons: P,
        options: ValidationOptions,
    ) -> Result<Self, MeshLoopError>
    where
        P: IntoIterator<Item = I>,
        I: AsRef<[u32]>,
    {
        check_capacity(vertex_count, "vertices")?;
        let mut edge_index: HashMap<(u32, u32), EdgeId> = HashMap::new();
        let mut edges: Vec<[VertexId; 2]> = Vec::new();
        let mut faces: Vec<Vec<EdgeId>> = Vec::new();

        for (face, polygon) in polygons.into_iter().enumerate() {
            let polygon = polygon.as_ref();
            if polygon.len() < 3 {
                return Err(MeshLoopError::DegenerateFace {
                    face,
                    sides: polygon.len(),
                });
            }
            if let Some(&vertex) = polygon.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(MeshLoopError::VertexOutOfRange {
                    face,
                    vertex,
                    vertex_count,
                });
            }

            let mut cycle = Vec::with_capacity(polygon.len());
            for (a, b) in polygon.iter().copied().circular_tuple_windows() {
                if a == b {
                    return Err(MeshLoopError::DegenerateFace {
                        face,
                        sides: polygon.iter().dedup().count(),
                    });
                }
                let key = if a < b { (a, b) } else { (b, a) };
                let edge = *edge_index.entry(key).or_insert_with(|| {
                    edges.push([VertexId::new(a), VertexId::new(b)]);
                    id_from_index(edges.len() - 1)
                });
                cycle.push(edge);
            }
            faces.push(cycle);
        }

        Self::assemble(vertex_count, edges, faces, options)
    }

    /// Build a mesh from explicit edges and faces given as edge cycles.
    pub fn from_parts(
        vertex_count: usize,
        edges: Vec<[VertexId; 2]>,
        faces: Vec<Vec<EdgeId>>,
    ) -> Result<Self, MeshLoopError> {
        Self::from_parts_with(vertex_count, edges, faces, ValidationOptions::default())
    }

    /// [`PolyMesh::from_parts`] with explicit validation options.
    pub fn from_parts_with(
        vertex_count: usize,
        edges: Vec<[VertexId; 2]>,
        faces: Vec<Vec<EdgeId>>,
        options: ValidationOptions,
    ) -> Result<Self, MeshLoopError> {
        check_capacity(vertex_count, "vertices")?;
        if let Some(&vertex) = edges
            .iter()
            .flatten()
            .find(|v| v.index() >= vertex_count)
        {
            return Err(MeshLoopError::UnknownVertex(vertex));
        }
        for (face, cycle) in faces.iter().enumerate() {
            if cycle.len() < 3 {
                return Err(MeshLoopError::DegenerateFace {
                    face,
                    sides: cycle.len(),
                });
            }
            if let Some(&edge) = cycle.iter().find(|e| e.index() >= edges.len()) {
                return Err(MeshLoopError::UnknownEdge(edge));
            }
        }
        Self::assemble(vertex_count, edges, faces, options)
    }

    fn assemble(
        vertex_count: usize,
        edge_verts: Vec<[VertexId; 2]>,
        face_edges: Vec<Vec<EdgeId>>,
        options: ValidationOptions,
    ) -> Result<Self, MeshLoopError> {
        check_capacity(edge_verts.len(), "edges")?;
        check_capacity(face_edges.len(), "faces")?;

        let mut edge_faces = vec![Vec::new(); edge_verts.len()];
        for (f, cycle) in face_edges.iter().enumerate() {
            let face: FaceId = id_from_index(f);
            for edge in cycle {
                let incident = &mut edge_faces[edge.index()];
                if incident.last() != Some(&face) {
                    incident.push(face);
                }
            }
        }

        let mut vertex_edges = vec![Vec::new(); vertex_count];
        for (e, [a, b]) in edge_verts.iter().enumerate() {
            let edge: EdgeId = id_from_index(e);
            vertex_edges[a.index()].push(edge);
            if a != b {
                vertex_edges[b.index()].push(edge);
            }
        }

        let mesh = PolyMesh {
            face_edges,
            edge_faces,
            edge_verts,
            vertex_edges,
        };
        validate_poly_mesh(&mesh, options)?;
        crate::debug_invariants!(mesh.validate_invariants(), "PolyMesh::assemble");
        Ok(mesh)
    }

    /// Vertices of `face` in cycle order, starting with the vertex shared by
    /// its last and first edge.
    pub fn face_vertices(&self, face: FaceId) -> Result<Vec<VertexId>, MeshLoopError> {
        if !self.contains_face(face) {
            return Err(MeshLoopError::UnknownFace(face));
        }
        let edges = self.edges_of(face);
        let mut out = Vec::with_capacity(edges.len());
        for (position, (prev, next)) in edges
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| (self.edge_verts[a.index()], self.edge_verts[b.index()]))
            .enumerate()
        {
            let shared = prev
                .into_iter()
                .find(|v| next.contains(v))
                .ok_or(MeshLoopError::BrokenFaceCycle { face, position })?;
            out.push(shared);
        }
        out.rotate_right(1);
        Ok(out)
    }

    /// Validate against custom options after construction.
    pub fn validate(&self, options: ValidationOptions) -> Result<(), MeshLoopError> {
        validate_poly_mesh(self, options)
    }
}

fn check_capacity(count: usize, what: &str) -> Result<(), MeshLoopError> {
    if count > u32::MAX as usize {
        return Err(MeshLoopError::InvalidGeometry(format!(
            "too many {what}: {count} exceeds the u32 id range"
        )));
    }
    Ok(())
}

impl MeshTopology for PolyMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertex_edges.len()
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edge_verts.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.face_edges.len()
    }

    #[inline]
    fn edges_of(&self, face: FaceId) -> &[EdgeId] {
        self.face_edges.get(face.index()).map_or(&[], Vec::as_slice)
    }

    #[inline]
    fn edge_faces(&self, edge: EdgeId) -> &[FaceId] {
        self.edge_faces.get(edge.index()).map_or(&[], Vec::as_slice)
    }

    #[inline]
    fn edge_vertices(&self, edge: EdgeId) -> Option<[VertexId; 2]> {
        self.edge_verts.get(edge.index()).copied()
    }

    #[inline]
    fn vertex_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.vertex_edges.get(vertex.index()).map_or(&[], Vec::as_slice)
    }
}

impl DebugInvariants for PolyMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PolyMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshLoopError> {
        let inconsistent = |msg: String| Err(MeshLoopError::InconsistentAdjacency(msg));

        for (f, cycle) in self.face_edges.iter().enumerate() {
            let face: FaceId = id_from_index(f);
            for edge in cycle {
                if !self.edge_faces(*edge).contains(&face) {
                    return inconsistent(format!("face {face} lists edge {edge}, not vice versa"));
                }
            }
        }

        for (e, faces) in self.edge_faces.iter().enumerate() {
            let edge: EdgeId = id_from_index(e);
            if !faces.windows(2).all(|w| w[0] < w[1]) {
                return inconsistent(format!("faces of edge {edge} are not strictly ascending"));
            }
            for face in faces {
                if !self.edges_of(*face).contains(&edge) {
                    return inconsistent(format!("edge {edge} lists face {face}, not vice versa"));
                }
            }
        }

        for (v, edges) in self.vertex_edges.iter().enumerate() {
            let vertex: VertexId = id_from_index(v);
            for edge in edges {
                let ends = self
                    .edge_vertices(*edge)
                    .ok_or(MeshLoopError::UnknownEdge(*edge))?;
                if !ends.contains(&vertex) {
                    return inconsistent(format!("vertex {vertex} lists edge {edge}"));
                }
            }
        }
        for (e, ends) in self.edge_verts.iter().enumerate() {
            let edge: EdgeId = id_from_index(e);
            for v in ends {
                if !self.vertex_edges(*v).contains(&edge) {
                    return inconsistent(format!("edge {edge} endpoint {v} misses the edge"));
                }
            }
        }

        Ok(())
    }
}
