//! Re-export public algorithms.

pub mod alternating;
pub mod boundary;
pub mod loop_step;
pub mod loop_walk;
pub mod meshgen;
pub mod trace;

pub use alternating::{
    AlternatingSelector, SelectionRequest, SelectionResult, SelectionWarning,
    select_alternate_loops,
};
pub use boundary::{MeshSummary, classify_edges, classify_vertices};
pub use loop_step::{LoopStepper, Step};
pub use loop_walk::{FaceLoop, LoopKind, LoopWalker, NonManifoldTraversal, Termination, WalkOptions};
