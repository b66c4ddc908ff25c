//! Stepping from one face loop to the next parallel loop.
//!
//! The anchor face of a loop has two opposite-edge pairs. The loop runs
//! through its *travel* pair; the other pair is the *side* pair, and crossing
//! one side edge lands on a face of the neighbouring parallel loop.

use crate::algs::loop_walk::{FaceLoop, Termination, WalkOptions, cross};
use crate::mesh_error::MeshLoopError;
use crate::topology::mesh_topology::MeshTopology;
use crate::topology::point::{EdgeId, FaceId};

/// Where a step landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Anchor of the next loop.
    pub face: FaceId,
    /// Edge of `face` to start the next loop walk from.
    pub entry: EdgeId,
    /// Side edge that was crossed.
    pub crossed: EdgeId,
    /// Side edge of `face` to cross when stepping on in the same direction.
    pub next_side: EdgeId,
    /// `crossed` has more than two incident faces.
    pub non_manifold: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct LoopStepper<'m, M: ?Sized> {
    mesh: &'m M,
    options: WalkOptions,
}

impl<'m, M> LoopStepper<'m, M>
where
    M: MeshTopology + ?Sized,
{
    pub fn new(mesh: &'m M) -> Self {
        Self::with_options(mesh, WalkOptions::default())
    }

    pub fn with_options(mesh: &'m M, options: WalkOptions) -> Self {
        Self { mesh, options }
    }

    /// The anchor's side pair as `[positive, negative]`: the edges after and
    /// before the first travel edge in the anchor's cycle.
    pub fn side_edges(&self, face_loop: &FaceLoop) -> Result<[EdgeId; 2], MeshLoopError> {
        let anchor = face_loop.anchor();
        let edges = self.mesh.quad_edges(anchor)?;
        let [entry, _] = face_loop.travel_pair();
        let i = self
            .mesh
            .edge_position(anchor, entry)
            .ok_or(MeshLoopError::EdgeNotInFace {
                face: anchor,
                edge: entry,
            })?;
        Ok([edges[(i + 1) % 4], edges[(i + 3) % 4]])
    }

    /// Cross `side_edge` of the loop's anchor into the next parallel loop.
    pub fn step(&self, face_loop: &FaceLoop, side_edge: EdgeId) -> Result<Step, Termination> {
        let anchor = face_loop.anchor();
        let not_a_side = Termination::NotASideEdge {
            face: anchor,
            edge: side_edge,
        };
        let sides = self.side_edges(face_loop).map_err(|_| not_a_side)?;
        if !sides.contains(&side_edge) {
            return Err(not_a_side);
        }
        self.cross_side(anchor, side_edge)
    }

    /// Cross `side_edge` out of `face` without checking it against a loop.
    pub(crate) fn cross_side(&self, face: FaceId, side_edge: EdgeId) -> Result<Step, Termination> {
        let crossing = cross(self.mesh, face, side_edge, self.options, false)?;
        let next = crossing.face;
        // `cross` only returns quads
        let edges = self.mesh.quad_edges(next).map_err(|_| Termination::NonQuad {
            face: next,
            kind: self.mesh.face_kind(next),
        })?;
        let i = self
            .mesh
            .edge_position(next, side_edge)
            .ok_or(Termination::Boundary { edge: side_edge })?;
        Ok(Step {
            face: next,
            entry: edges[(i + 1) % 4],
            crossed: side_edge,
            next_side: edges[(i + 2) % 4],
            non_manifold: crossing.non_manifold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::loop_walk::LoopWalker;
    use crate::algs::meshgen::{grid_face, quad_grid};
    use crate::topology::cell_type::FaceKind;
    use crate::topology::poly_mesh::PolyMesh;

    #[test]
    fn steps_to_the_neighbouring_row() {
        let mesh = quad_grid(4, 3).unwrap();
        let walker = LoopWalker::new(&mesh);
        let stepper = LoopStepper::new(&mesh);
        let seed = grid_face(4, 1, 1);
        // bottom edge: the loop is the column through the seed
        let column = walker.face_loop(seed, mesh.edges_of(seed)[0]).unwrap();
        let [pos, neg] = stepper.side_edges(&column).unwrap();
        assert_eq!(pos, mesh.edges_of(seed)[1]);
        assert_eq!(neg, mesh.edges_of(seed)[3]);

        let step = stepper.step(&column, pos).unwrap();
        assert_eq!(step.face, grid_face(4, 2, 1));
        assert_eq!(step.crossed, pos);
        assert_eq!(step.next_side, mesh.edges_of(step.face)[1]);
        assert!(!step.non_manifold);

        let next = walker.face_loop(step.face, step.entry).unwrap();
        let expected: Vec<FaceId> = (0..3).map(|j| grid_face(4, 2, j)).collect();
        let mut faces = next.faces().to_vec();
        faces.sort();
        assert_eq!(faces, expected);
    }

    #[test]
    fn boundary_and_travel_edges_do_not_step() {
        let mesh = quad_grid(2, 1).unwrap();
        let walker = LoopWalker::new(&mesh);
        let stepper = LoopStepper::new(&mesh);
        let seed = grid_face(2, 0, 0);
        let column = walker.face_loop(seed, mesh.edges_of(seed)[0]).unwrap();
        let left = mesh.edges_of(seed)[3];
        assert_eq!(
            stepper.step(&column, left),
            Err(Termination::Boundary { edge: left })
        );
        let bottom = mesh.edges_of(seed)[0];
        assert_eq!(
            stepper.step(&column, bottom),
            Err(Termination::NotASideEdge {
                face: seed,
                edge: bottom
            })
        );
    }

    #[test]
    fn non_quad_neighbour_stops_the_step() {
        // quad 0 = [0, 1, 3, 2], triangle 1 = [1, 4, 3] to its right
        let mesh = PolyMesh::from_polygons(5, [vec![0u32, 1, 3, 2], vec![1, 4, 3]]).unwrap();
        let walker = LoopWalker::new(&mesh);
        let stepper = LoopStepper::new(&mesh);
        let seed = FaceId::new(0);
        let column = walker.face_loop(seed, mesh.edges_of(seed)[0]).unwrap();
        let [pos, _] = stepper.side_edges(&column).unwrap();
        assert_eq!(
            stepper.step(&column, pos),
            Err(Termination::NonQuad {
                face: FaceId::new(1),
                kind: FaceKind::Triangle
            })
        );
    }
}
