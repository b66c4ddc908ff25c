//! Face loop walking.
//!
//! A face loop is a strip of quads connected edge-to-opposite-edge. The
//! walker enters a quad through one edge, leaves through the opposite edge
//! and repeats on the neighbouring face until it returns to where it started
//! (a closed ring) or meets something it cannot cross (an open strip).
//!
//! The walk is iterative and keeps a visited set, so no face appears twice
//! and the number of steps never exceeds the mesh's face count.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshLoopError;
use crate::topology::cell_type::FaceKind;
use crate::topology::mesh_topology::MeshTopology;
use crate::topology::point::{EdgeId, FaceId, VertexId};

/// Why a walk (or a step between loops) stopped short.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The edge to cross has only one face.
    Boundary { edge: EdgeId },
    /// The face beyond the edge is not a quad; it is not part of the loop.
    NonQuad { face: FaceId, kind: FaceKind },
    /// The edge to cross touches an interior pole.
    Pole { vertex: VertexId, edge: EdgeId },
    /// The face beyond the edge already belongs to the walk.
    Revisit { face: FaceId },
    /// A non-manifold edge under [`NonManifoldTraversal::Stop`].
    NonManifold { edge: EdgeId },
    /// The edge given to the stepper is not in the anchor's side pair.
    NotASideEdge { face: FaceId, edge: EdgeId },
    /// Safety bound of one step per mesh face was reached.
    StepLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Boundary { edge } => write!(f, "boundary at edge {edge}"),
            Termination::NonQuad { face, kind } => write!(f, "non-quad face {face} ({kind})"),
            Termination::Pole { vertex, edge } => {
                write!(f, "pole at vertex {vertex} (edge {edge})")
            }
            Termination::Revisit { face } => write!(f, "face {face} already visited"),
            Termination::NonManifold { edge } => write!(f, "non-manifold edge {edge}"),
            Termination::NotASideEdge { face, edge } => {
                write!(f, "edge {edge} is not a side edge of face {face}")
            }
            Termination::StepLimit => f.write_str("step limit reached"),
        }
    }
}

/// How traversal treats edges with more than two incident faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonManifoldTraversal {
    /// Continue into the lowest-id face other than the current one.
    #[default]
    FirstOther,
    /// Treat the edge like a boundary.
    Stop,
}

/// Options shared by the walker and the stepper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// End loops before crossing an edge that touches an interior pole.
    pub stop_at_poles: bool,
    pub non_manifold: NonManifoldTraversal,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            stop_at_poles: true,
            non_manifold: NonManifoldTraversal::FirstOther,
        }
    }
}

/// Closed rings return to their start face; open strips end somewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopKind {
    Closed,
    Open,
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopKind::Closed => f.write_str("closed"),
            LoopKind::Open => f.write_str("open"),
        }
    }
}

/// An ordered strip of quads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceLoop {
    faces: Vec<FaceId>,
    anchor: FaceId,
    travel: [EdgeId; 2],
    kind: LoopKind,
    ends: Vec<Termination>,
    non_manifold: Vec<EdgeId>,
}

impl FaceLoop {
    /// Faces in walking order. For loops from [`LoopWalker::face_loop`] the
    /// backward end comes first.
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// The face the loop was walked from.
    pub fn anchor(&self) -> FaceId {
        self.anchor
    }

    /// The anchor's entry edge and its opposite.
    pub fn travel_pair(&self) -> [EdgeId; 2] {
        self.travel
    }

    pub fn kind(&self) -> LoopKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.kind == LoopKind::Closed
    }

    /// Termination reason per open end; empty for closed loops.
    pub fn ends(&self) -> &[Termination] {
        &self.ends
    }

    /// Non-manifold edges the walk crossed.
    pub fn non_manifold_edges(&self) -> &[EdgeId] {
        &self.non_manifold
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn contains(&self, face: FaceId) -> bool {
        self.faces.contains(&face)
    }
}

impl fmt::Display for FaceLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} faces, {}", self.faces.len(), self.kind)?;
        if !self.ends.is_empty() {
            f.write_str(" (")?;
            for (i, end) in self.ends.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                write!(f, "{end}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Result of crossing one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Crossing {
    pub face: FaceId,
    pub non_manifold: bool,
}

/// Cross `edge` out of `face` into the neighbouring quad.
pub(crate) fn cross<M>(
    mesh: &M,
    face: FaceId,
    edge: EdgeId,
    options: WalkOptions,
    check_poles: bool,
) -> Result<Crossing, Termination>
where
    M: MeshTopology + ?Sized,
{
    if check_poles && options.stop_at_poles {
        if let Some(vertex) = mesh.interior_pole_on(edge) {
            return Err(Termination::Pole { vertex, edge });
        }
    }
    let non_manifold = mesh.is_non_manifold_edge(edge);
    if non_manifold && options.non_manifold == NonManifoldTraversal::Stop {
        return Err(Termination::NonManifold { edge });
    }
    let next = mesh
        .other_face(edge, face)
        .ok_or(Termination::Boundary { edge })?;
    if !mesh.is_quad(next) {
        return Err(Termination::NonQuad {
            face: next,
            kind: mesh.face_kind(next),
        });
    }
    Ok(Crossing {
        face: next,
        non_manifold,
    })
}

/// One direction of a walk.
struct Ray {
    faces: Vec<FaceId>,
    end: Option<Termination>,
    non_manifold: Vec<EdgeId>,
}

/// Walks face loops over a borrowed mesh.
#[derive(Clone, Copy, Debug)]
pub struct LoopWalker<'m, M: ?Sized> {
    mesh: &'m M,
    options: WalkOptions,
}

impl<'m, M> LoopWalker<'m, M>
where
    M: MeshTopology + ?Sized,
{
    pub fn new(mesh: &'m M) -> Self {
        Self::with_options(mesh, WalkOptions::default())
    }

    pub fn with_options(mesh: &'m M, options: WalkOptions) -> Self {
        Self { mesh, options }
    }

    pub fn options(&self) -> WalkOptions {
        self.options
    }

    /// Walk from `seed`, entered through `entry`, leaving through the
    /// opposite edge, in one direction only.
    ///
    /// Errors only when `seed` is not a quad or `entry` is not one of its
    /// edges.
    pub fn walk(&self, seed: FaceId, entry: EdgeId) -> Result<FaceLoop, MeshLoopError> {
        let exit = self.mesh.opposite_edge(seed, entry)?;
        let mut visited = HashSet::from([seed]);
        let ray = self.ray(seed, entry, &mut visited);
        Ok(Self::assemble(seed, [entry, exit], None, ray))
    }

    /// The whole loop through `seed` along the travel pair containing
    /// `entry`: forward through the edge opposite `entry`, then, if the ring
    /// did not close, backward through `entry` itself.
    pub fn face_loop(&self, seed: FaceId, entry: EdgeId) -> Result<FaceLoop, MeshLoopError> {
        let exit = self.mesh.opposite_edge(seed, entry)?;
        let mut visited = HashSet::from([seed]);
        let forward = self.ray(seed, entry, &mut visited);
        if forward.end.is_none() {
            return Ok(Self::assemble(seed, [entry, exit], None, forward));
        }
        let backward = self.ray(seed, exit, &mut visited);
        Ok(Self::assemble(seed, [entry, exit], Some(backward), forward))
    }

    fn assemble(
        seed: FaceId,
        travel: [EdgeId; 2],
        backward: Option<Ray>,
        forward: Ray,
    ) -> FaceLoop {
        match backward {
            None => FaceLoop {
                kind: if forward.end.is_some() {
                    LoopKind::Open
                } else {
                    LoopKind::Closed
                },
                ends: forward.end.into_iter().collect(),
                faces: forward.faces,
                anchor: seed,
                travel,
                non_manifold: forward.non_manifold,
            },
            // The backward ray closed on its own: it already holds the ring.
            Some(backward) if backward.end.is_none() => {
                let mut faces = backward.faces;
                faces[1..].reverse();
                FaceLoop {
                    faces,
                    anchor: seed,
                    travel,
                    kind: LoopKind::Closed,
                    ends: Vec::new(),
                    non_manifold: backward.non_manifold,
                }
            }
            Some(backward) => {
                let mut faces: Vec<FaceId> = backward.faces[1..].iter().rev().copied().collect();
                faces.extend(forward.faces);
                let mut non_manifold = backward.non_manifold;
                non_manifold.extend(forward.non_manifold);
                FaceLoop {
                    faces,
                    anchor: seed,
                    travel,
                    kind: LoopKind::Open,
                    ends: backward.end.into_iter().chain(forward.end).collect(),
                    non_manifold,
                }
            }
        }
    }

    fn ray(&self, seed: FaceId, entry: EdgeId, visited: &mut HashSet<FaceId>) -> Ray {
        let mut faces = vec![seed];
        let mut non_manifold = Vec::new();
        let mut face = seed;
        let mut edge = entry;

        for _ in 0..self.mesh.face_count() {
            let exit = match self.mesh.opposite_edge(face, edge) {
                Ok(exit) => exit,
                Err(_) => {
                    let end = Termination::NonQuad {
                        face,
                        kind: self.mesh.face_kind(face),
                    };
                    return Ray {
                        faces,
                        end: Some(end),
                        non_manifold,
                    };
                }
            };
            let crossing = match cross(self.mesh, face, exit, self.options, true) {
                Ok(crossing) => crossing,
                Err(end) => {
                    return Ray {
                        faces,
                        end: Some(end),
                        non_manifold,
                    };
                }
            };
            if crossing.non_manifold {
                non_manifold.push(exit);
            }
            if crossing.face == seed {
                return Ray {
                    faces,
                    end: None,
                    non_manifold,
                };
            }
            if !visited.insert(crossing.face) {
                return Ray {
                    faces,
                    end: Some(Termination::Revisit {
                        face: crossing.face,
                    }),
                    non_manifold,
                };
            }
            faces.push(crossing.face);
            face = crossing.face;
            edge = exit;
        }

        Ray {
            faces,
            end: Some(Termination::StepLimit),
            non_manifold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::meshgen::{grid_face, quad_cylinder, quad_grid};
    use crate::topology::poly_mesh::PolyMesh;

    fn f(i: u32) -> FaceId {
        FaceId::new(i)
    }

    #[test]
    fn walk_is_one_directional() {
        let mesh = quad_grid(5, 1).unwrap();
        let walker = LoopWalker::new(&mesh);
        let seed = grid_face(5, 2, 0);
        // edge 0 of a grid face is its bottom edge; use the left edge (3)
        // so the walk leaves through the right edge
        let left = mesh.edges_of(seed)[3];
        let ray = walker.walk(seed, left).unwrap();
        assert_eq!(ray.faces(), &[f(2), f(3), f(4)]);
        assert_eq!(ray.kind(), LoopKind::Open);
        assert!(matches!(ray.ends(), [Termination::Boundary { .. }]));
    }

    #[test]
    fn face_loop_spans_both_directions() {
        let mesh = quad_grid(5, 3).unwrap();
        let walker = LoopWalker::new(&mesh);
        let seed = grid_face(5, 2, 1);
        let left = mesh.edges_of(seed)[3];
        let lp = walker.face_loop(seed, left).unwrap();
        let row: Vec<FaceId> = (0..5).map(|i| grid_face(5, i, 1)).collect();
        assert_eq!(lp.faces(), row.as_slice());
        assert_eq!(lp.anchor(), seed);
        assert_eq!(lp.ends().len(), 2);
        assert!(!lp.is_closed());
    }

    #[test]
    fn ring_closes_without_repeats() {
        let mesh = quad_cylinder(6, 2).unwrap();
        let walker = LoopWalker::new(&mesh);
        let seed = f(7);
        let lp = walker.face_loop(seed, mesh.edges_of(seed)[3]).unwrap();
        assert!(lp.is_closed());
        assert_eq!(lp.len(), 6);
        assert!(lp.ends().is_empty());
        let unique: HashSet<_> = lp.faces().iter().collect();
        assert_eq!(unique.len(), lp.len());
        assert_eq!(lp.faces()[0], seed);
    }

    #[test]
    fn non_quad_ends_the_walk_and_is_excluded() {
        // quad, quad, triangle in a row
        //  4---5---6
        //  | 0 | 1 |\
        //  0---1---2-3  (triangle 2 = [2, 3, 6])
        let mesh = PolyMesh::from_polygons(7, [vec![0u32, 1, 5, 4], vec![1, 2, 6, 5], vec![2, 3, 6]])
            .unwrap();
        let walker = LoopWalker::new(&mesh);
        let lp = walker.face_loop(f(0), mesh.edges_of(f(0))[3]).unwrap();
        assert_eq!(lp.faces(), &[f(0), f(1)]);
        assert!(lp.ends().contains(&Termination::NonQuad {
            face: f(2),
            kind: FaceKind::Triangle
        }));
    }

    #[test]
    fn non_quad_seed_is_an_error() {
        let mesh = PolyMesh::from_polygons(3, [[0u32, 1, 2]]).unwrap();
        let walker = LoopWalker::new(&mesh);
        let err = walker.walk(f(0), mesh.edges_of(f(0))[0]).unwrap_err();
        assert_eq!(err, MeshLoopError::NotAQuad { face: f(0), sides: 3 });
    }

    #[test]
    fn display_lists_ends() {
        let mesh = quad_grid(2, 1).unwrap();
        let walker = LoopWalker::new(&mesh);
        let lp = walker.face_loop(f(0), mesh.edges_of(f(0))[3]).unwrap();
        let text = lp.to_string();
        assert!(text.starts_with("2 faces, open ("), "{text}");
        assert!(text.contains("boundary at edge"), "{text}");
    }
}
