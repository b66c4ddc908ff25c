//! Alternating parallel loop selection.
//!
//! For every seed face the selector walks the loop through the seed, then
//! steps outward across the seed's side edges one parallel loop at a time,
//! keeping every `skip_count + 1`-th loop. Each seed runs a small state
//! machine:
//!
//! ```text
//! Idle -> Expanding(Positive) -> Expanding(Negative) -> Done
//! ```
//!
//! Results of all seeds are unioned. Nothing here fails once a request has
//! been built: unknown or non-quad seeds become [`SelectionWarning`]s and
//! blocked walks end as open loops.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algs::boundary::MeshSummary;
use crate::algs::loop_step::LoopStepper;
use crate::algs::loop_walk::{FaceLoop, LoopWalker, WalkOptions};
use crate::algs::trace::Trace;
use crate::mesh_error::MeshLoopError;
use crate::topology::cell_type::FaceKind;
use crate::topology::mesh_topology::MeshTopology;
use crate::topology::point::{EdgeId, FaceId};

/// Default number of loops left out between selected loops.
pub const DEFAULT_SKIP_COUNT: usize = 1;
/// Default number of steps per direction.
pub const DEFAULT_REPEAT: usize = 5;

/// Immutable parameters of one selection run.
///
/// Seeds are kept de-duplicated and sorted. `repeat` is at least one; this is
/// checked on construction and again when deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelectionRequest")]
pub struct SelectionRequest {
    seeds: Vec<FaceId>,
    skip_count: usize,
    repeat: usize,
    debug: bool,
    walk: WalkOptions,
}

impl SelectionRequest {
    pub fn new<I>(seeds: I, skip_count: usize, repeat: usize) -> Result<Self, MeshLoopError>
    where
        I: IntoIterator<Item = FaceId>,
    {
        if repeat == 0 {
            return Err(MeshLoopError::InvalidRepeat(repeat));
        }
        let seeds: BTreeSet<FaceId> = seeds.into_iter().collect();
        Ok(Self {
            seeds: seeds.into_iter().collect(),
            skip_count,
            repeat,
            debug: false,
            walk: WalkOptions::default(),
        })
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_walk_options(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    pub fn seeds(&self) -> &[FaceId] {
        &self.seeds
    }

    pub fn skip_count(&self) -> usize {
        self.skip_count
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn walk_options(&self) -> WalkOptions {
        self.walk
    }

    /// Whether the loop `index` steps away from the seed loop is selected.
    #[inline]
    pub fn includes(&self, index: usize) -> bool {
        // a skip count of usize::MAX keeps only the seed loop
        index % self.skip_count.saturating_add(1) == 0
    }
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            skip_count: DEFAULT_SKIP_COUNT,
            repeat: DEFAULT_REPEAT,
            debug: false,
            walk: WalkOptions::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawSelectionRequest {
    seeds: Vec<FaceId>,
    skip_count: usize,
    repeat: usize,
    debug: bool,
    walk: WalkOptions,
}

impl Default for RawSelectionRequest {
    fn default() -> Self {
        let d = SelectionRequest::default();
        Self {
            seeds: d.seeds,
            skip_count: d.skip_count,
            repeat: d.repeat,
            debug: d.debug,
            walk: d.walk,
        }
    }
}

impl TryFrom<RawSelectionRequest> for SelectionRequest {
    type Error = MeshLoopError;

    fn try_from(raw: RawSelectionRequest) -> Result<Self, Self::Error> {
        Ok(SelectionRequest::new(raw.seeds, raw.skip_count, raw.repeat)?
            .with_debug(raw.debug)
            .with_walk_options(raw.walk))
    }
}

/// Recoverable problems reported alongside a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionWarning {
    /// The request had no seed faces.
    NothingSelected,
    /// A seed id outside the mesh.
    UnknownSeed(FaceId),
    /// A seed that is not a quad contributes nothing.
    NonQuadSeed { face: FaceId, kind: FaceKind },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::NothingSelected => f.write_str("nothing selected"),
            SelectionWarning::UnknownSeed(face) => write!(f, "seed face {face} is not in the mesh"),
            SelectionWarning::NonQuadSeed { face, kind } => {
                write!(f, "seed face {face} is not a quad ({kind})")
            }
        }
    }
}

/// Faces to select, plus what happened on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionResult {
    pub selected: BTreeSet<FaceId>,
    /// Empty unless the request asked for debug output.
    pub trace: Vec<String>,
    pub warnings: Vec<SelectionWarning>,
}

impl SelectionResult {
    pub fn contains(&self, face: FaceId) -> bool {
        self.selected.contains(&face)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Side of the seed loop being expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    fn side_index(self) -> usize {
        match self {
            Direction::Positive => 0,
            Direction::Negative => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => f.write_str("+"),
            Direction::Negative => f.write_str("-"),
        }
    }
}

/// Per-seed progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Expanding(Direction),
    Done,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::Expanding(Direction::Positive),
            Phase::Expanding(Direction::Positive) => Phase::Expanding(Direction::Negative),
            Phase::Expanding(Direction::Negative) | Phase::Done => Phase::Done,
        }
    }
}

/// Why a seed walks along a particular edge pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PairChoice {
    /// An edge of the pair is shared with another seed.
    Shared { edge: EdgeId, with: FaceId },
    /// No pair or both pairs are shared with other seeds.
    Ambiguous,
}

/// Runs alternating loop selection over a borrowed mesh.
#[derive(Clone, Copy, Debug)]
pub struct AlternatingSelector<'m, M: ?Sized> {
    mesh: &'m M,
}

impl<'m, M> AlternatingSelector<'m, M>
where
    M: MeshTopology + ?Sized,
{
    pub fn new(mesh: &'m M) -> Self {
        Self { mesh }
    }

    pub fn select(&self, request: &SelectionRequest) -> SelectionResult {
        let mut trace = Trace::new(request.debug());
        let mut result = SelectionResult::default();
        if trace.is_enabled() {
            trace.record(format_args!("{}", MeshSummary::of(self.mesh)));
        }

        let seeds: BTreeSet<FaceId> = request.seeds().iter().copied().collect();
        if seeds.is_empty() {
            warn(&mut result, &mut trace, SelectionWarning::NothingSelected);
        }

        for &seed in &seeds {
            if !self.mesh.contains_face(seed) {
                warn(&mut result, &mut trace, SelectionWarning::UnknownSeed(seed));
                continue;
            }
            let pairs = match self.mesh.edge_pairs(seed) {
                Ok(pairs) => pairs,
                Err(_) => {
                    let kind = self.mesh.face_kind(seed);
                    warn(&mut result, &mut trace, SelectionWarning::NonQuadSeed { face: seed, kind });
                    continue;
                }
            };

            let travel: Vec<[EdgeId; 2]> = match self.travel_pair(seed, pairs, &seeds) {
                (pair, PairChoice::Shared { edge, with }) => {
                    trace.record(format_args!(
                        "seed {seed}: travel pair [{}, {}] (edge {edge} shared with seed {with})",
                        pair[0], pair[1]
                    ));
                    vec![pair]
                }
                (_, PairChoice::Ambiguous) => {
                    trace.record(format_args!(
                        "seed {seed}: ambiguous direction, expanding pairs [{}, {}] and [{}, {}]",
                        pairs[0][0], pairs[0][1], pairs[1][0], pairs[1][1]
                    ));
                    pairs.to_vec()
                }
            };

            for pair in travel {
                self.run_seed(seed, pair, request, &mut result.selected, &mut trace);
            }
        }

        result.trace = trace.into_lines();
        result
    }

    /// The pair holding an edge shared with exactly one side's worth of other
    /// seeds; otherwise the seed is ambiguous.
    fn travel_pair(
        &self,
        seed: FaceId,
        pairs: [[EdgeId; 2]; 2],
        seeds: &BTreeSet<FaceId>,
    ) -> ([EdgeId; 2], PairChoice) {
        let marks: Vec<Option<(EdgeId, FaceId)>> = pairs
            .iter()
            .map(|pair| {
                pair.iter().find_map(|&edge| {
                    self.mesh
                        .edge_faces(edge)
                        .iter()
                        .find(|&&f| f != seed && seeds.contains(&f))
                        .map(|&with| (edge, with))
                })
            })
            .collect();
        match (marks[0], marks[1]) {
            (Some((edge, with)), None) => (pairs[0], PairChoice::Shared { edge, with }),
            (None, Some((edge, with))) => (pairs[1], PairChoice::Shared { edge, with }),
            _ => (pairs[0], PairChoice::Ambiguous),
        }
    }

    /// Drive one seed along one travel pair through its phases.
    fn run_seed(
        &self,
        seed: FaceId,
        pair: [EdgeId; 2],
        request: &SelectionRequest,
        selected: &mut BTreeSet<FaceId>,
        trace: &mut Trace,
    ) {
        let walker = LoopWalker::with_options(self.mesh, request.walk_options());
        let stepper = LoopStepper::with_options(self.mesh, request.walk_options());
        let mut visited: HashSet<FaceId> = HashSet::new();
        let mut seed_loop: Option<FaceLoop> = None;
        let mut phase = Phase::Idle;

        while phase != Phase::Done {
            match phase {
                Phase::Idle => {
                    let face_loop = match walker.face_loop(seed, pair[0]) {
                        Ok(face_loop) => face_loop,
                        Err(err) => {
                            trace.record(format_args!("  seed {seed}: {err}"));
                            return;
                        }
                    };
                    trace.record(format_args!("  loop 0: {face_loop}, selected"));
                    note_non_manifold(trace, &face_loop);
                    visited.extend(face_loop.faces().iter().copied());
                    selected.extend(face_loop.faces().iter().copied());
                    seed_loop = Some(face_loop);
                }
                Phase::Expanding(direction) => {
                    if let Some(seed_loop) = &seed_loop {
                        self.expand(
                            direction,
                            seed_loop,
                            (&walker, &stepper),
                            request,
                            &mut visited,
                            selected,
                            trace,
                        );
                    }
                }
                Phase::Done => {}
            }
            phase = phase.next();
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &self,
        direction: Direction,
        seed_loop: &FaceLoop,
        (walker, stepper): (&LoopWalker<'m, M>, &LoopStepper<'m, M>),
        request: &SelectionRequest,
        visited: &mut HashSet<FaceId>,
        selected: &mut BTreeSet<FaceId>,
        trace: &mut Trace,
    ) {
        let mut side = match stepper.side_edges(seed_loop) {
            Ok(sides) => sides[direction.side_index()],
            Err(err) => {
                trace.record(format_args!("  {direction}: {err}"));
                return;
            }
        };
        let mut current = seed_loop.clone();

        for index in 1..=request.repeat() {
            let step = match stepper.step(&current, side) {
                Ok(step) => step,
                Err(end) => {
                    trace.record(format_args!("  {direction} stops before loop {index}: {end}"));
                    return;
                }
            };
            if step.non_manifold {
                trace.record(format_args!(
                    "  {direction} crossed non-manifold edge {}",
                    step.crossed
                ));
            }
            if visited.contains(&step.face) {
                trace.record(format_args!(
                    "  {direction} stops before loop {index}: face {} already visited",
                    step.face
                ));
                return;
            }
            let next = match walker.face_loop(step.face, step.entry) {
                Ok(next) => next,
                Err(err) => {
                    trace.record(format_args!("  {direction} stops before loop {index}: {err}"));
                    return;
                }
            };
            let included = request.includes(index);
            trace.record(format_args!(
                "  {direction} loop {index}: {next}, {}",
                if included { "selected" } else { "skipped" }
            ));
            note_non_manifold(trace, &next);
            visited.extend(next.faces().iter().copied());
            if included {
                selected.extend(next.faces().iter().copied());
            }
            side = step.next_side;
            current = next;
        }
        trace.record(format_args!(
            "  {direction} stops after {} steps (repeat limit)",
            request.repeat()
        ));
    }
}

fn note_non_manifold(trace: &mut Trace, face_loop: &FaceLoop) {
    for edge in face_loop.non_manifold_edges() {
        trace.record(format_args!("    crossed non-manifold edge {edge}"));
    }
}

fn warn(result: &mut SelectionResult, trace: &mut Trace, warning: SelectionWarning) {
    log::warn!("{warning}");
    trace.record(format_args!("warning: {warning}"));
    result.warnings.push(warning);
}

/// Select alternating parallel loops around `seeds`.
///
/// Fails only when `repeat` is zero; every other problem is reported in
/// [`SelectionResult::warnings`].
pub fn select_alternate_loops<M, I>(
    mesh: &M,
    seeds: I,
    skip_count: usize,
    repeat: usize,
    debug: bool,
) -> Result<SelectionResult, MeshLoopError>
where
    M: MeshTopology + ?Sized,
    I: IntoIterator<Item = FaceId>,
{
    let request = SelectionRequest::new(seeds, skip_count, repeat)?.with_debug(debug);
    Ok(AlternatingSelector::new(mesh).select(&request))
}
