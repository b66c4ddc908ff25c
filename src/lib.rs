//! # alt-face-loops
//!
//! alt-face-loops selects alternating parallel face loops on quad-dominant
//! polygon meshes. Given seed faces, it walks the face loop through each seed,
//! steps sideways to the neighbouring parallel loops and keeps every
//! `skip_count + 1`-th of them, up to `repeat` steps on each side.
//!
//! ## Features
//! - [`MeshTopology`](topology::MeshTopology), a read-only adjacency trait a
//!   host implements once for its own mesh type
//! - [`PolyMesh`](topology::PolyMesh), a ready-made implementation built from
//!   vertex loops or edge cycles
//! - Loop walking, loop stepping and the alternating selector in [`algs`]
//! - Structured test meshes ([`algs::meshgen`]) and a Gmsh 2.2 reader
//!   ([`io::gmsh`])
//!
//! ## Determinism
//!
//! Selection never depends on seed order or hash iteration: seeds are sorted,
//! non-manifold edges resolve to the lowest-id neighbour, and the result is an
//! ordered set. The same mesh and request always give the same result.
//!
//! ## Usage
//!
//! ```
//! use alt_face_loops::prelude::*;
//!
//! let mesh = quad_grid(5, 5)?;
//! let seed = grid_face(5, 2, 2);
//! let result = select_alternate_loops(&mesh, [seed], 1, 5, false)?;
//! assert!(result.contains(seed));
//! # Ok::<(), MeshLoopError>(())
//! ```

pub mod algs;
pub mod debug_invariants;
pub mod io;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::alternating::{
        AlternatingSelector, SelectionRequest, SelectionResult, SelectionWarning,
        select_alternate_loops,
    };
    pub use crate::algs::loop_step::{LoopStepper, Step};
    pub use crate::algs::loop_walk::{
        FaceLoop, LoopKind, LoopWalker, NonManifoldTraversal, Termination, WalkOptions,
    };
    pub use crate::algs::meshgen::{grid_face, quad_cylinder, quad_grid, quad_torus};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshLoopError;
    pub use crate::topology::cell_type::FaceKind;
    pub use crate::topology::mesh_topology::MeshTopology;
    pub use crate::topology::point::{EdgeId, FaceId, VertexId};
    pub use crate::topology::poly_mesh::PolyMesh;
    pub use crate::topology::validation::{NonManifoldHandling, ValidationOptions};
}
