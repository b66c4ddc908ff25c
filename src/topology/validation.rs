//! Topology validation helpers.
//!
//! These checks run on any [`MeshTopology`], so host adapters can be verified
//! with the same rules [`PolyMesh`](crate::topology::poly_mesh::PolyMesh)
//! applies to itself while it is built.

use crate::mesh_error::MeshLoopError;
use crate::topology::mesh_topology::MeshTopology;
use crate::topology::point::{EdgeId, FaceId};
use std::collections::HashSet;

/// Optional validation toggles for polygon mesh checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject edges whose two endpoints coincide.
    pub check_degenerate_edges: bool,
    /// Reject faces that list the same edge twice.
    pub check_duplicate_face_edges: bool,
    /// Ensure consecutive edges of every face share a vertex.
    pub check_face_cycles: bool,
    /// How to handle edges with more than two incident faces.
    pub non_manifold: NonManifoldHandling,
}

impl ValidationOptions {
    /// Enable all checks and treat non-manifold edges as errors.
    pub fn all() -> Self {
        Self {
            non_manifold: NonManifoldHandling::Error,
            ..Self::default()
        }
    }
}

impl Default for ValidationOptions {
    /// All structural checks on; non-manifold edges are only logged, since
    /// traversal copes with them.
    fn default() -> Self {
        Self {
            check_degenerate_edges: true,
            check_duplicate_face_edges: true,
            check_face_cycles: true,
            non_manifold: NonManifoldHandling::Warn,
        }
    }
}

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold edges.
    Warn,
    /// Return an error on non-manifold edges.
    Error,
}

/// Validate a mesh's edges and face cycles against `options`.
pub fn validate_poly_mesh<M>(mesh: &M, options: ValidationOptions) -> Result<(), MeshLoopError>
where
    M: MeshTopology + ?Sized,
{
    if options.check_degenerate_edges {
        for e in 0..mesh.edge_count() {
            let edge = EdgeId::new(e as u32);
            let [a, b] = mesh
                .edge_vertices(edge)
                .ok_or(MeshLoopError::UnknownEdge(edge))?;
            if a == b {
                return Err(MeshLoopError::DegenerateEdge { edge, vertex: a });
            }
        }
    }

    for face in mesh.faces() {
        let edges = mesh.edges_of(face);

        if options.check_duplicate_face_edges {
            let mut seen = HashSet::with_capacity(edges.len());
            for &edge in edges {
                if !seen.insert(edge) {
                    return Err(MeshLoopError::DuplicateFaceEdge { face, edge });
                }
            }
        }

        if options.check_face_cycles {
            check_face_cycle(mesh, face, edges)?;
        }
    }

    validate_non_manifold(mesh, options.non_manifold)
}

fn check_face_cycle<M>(mesh: &M, face: FaceId, edges: &[EdgeId]) -> Result<(), MeshLoopError>
where
    M: MeshTopology + ?Sized,
{
    let n = edges.len();
    for position in 0..n {
        let here = mesh
            .edge_vertices(edges[position])
            .ok_or(MeshLoopError::UnknownEdge(edges[position]))?;
        let next_edge = edges[(position + 1) % n];
        let next = mesh
            .edge_vertices(next_edge)
            .ok_or(MeshLoopError::UnknownEdge(next_edge))?;
        if !here.iter().any(|v| next.contains(v)) {
            return Err(MeshLoopError::BrokenFaceCycle { face, position });
        }
    }
    Ok(())
}

/// Detect non-manifold edges by counting incident faces.
fn validate_non_manifold<M>(mesh: &M, handling: NonManifoldHandling) -> Result<(), MeshLoopError>
where
    M: MeshTopology + ?Sized,
{
    if handling == NonManifoldHandling::Ignore {
        return Ok(());
    }

    for e in 0..mesh.edge_count() {
        let edge = EdgeId::new(e as u32);
        let count = mesh.edge_faces(edge).len();
        if count > 2 {
            match handling {
                NonManifoldHandling::Warn => {
                    log::warn!("Non-manifold edge detected: edge={edge} incident_faces={count}");
                }
                NonManifoldHandling::Error => {
                    return Err(MeshLoopError::NonManifoldEdge {
                        edge,
                        incident_faces: count,
                    });
                }
                NonManifoldHandling::Ignore => {}
            }
        }
    }

    Ok(())
}
