//! Face kind metadata for polygon faces.

use std::fmt;

/// Shape class of a polygon face, derived from its side count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FaceKind {
    /// Three sides.
    Triangle,
    /// Four sides; the only kind that takes part in loop walking.
    Quad,
    /// Five or more sides.
    NGon(usize),
    /// Fewer than three sides. Builders reject these, but host adapters may
    /// still report them.
    Degenerate(usize),
}

impl FaceKind {
    /// Classifies a face by its number of edges.
    pub fn from_sides(sides: usize) -> Self {
        match sides {
            0..=2 => FaceKind::Degenerate(sides),
            3 => FaceKind::Triangle,
            4 => FaceKind::Quad,
            n => FaceKind::NGon(n),
        }
    }

    /// Number of edges of the face.
    pub fn sides(self) -> usize {
        match self {
            FaceKind::Triangle => 3,
            FaceKind::Quad => 4,
            FaceKind::NGon(n) | FaceKind::Degenerate(n) => n,
        }
    }

    #[inline]
    pub fn is_quad(self) -> bool {
        matches!(self, FaceKind::Quad)
    }
}

impl fmt::Display for FaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceKind::Triangle => f.write_str("triangle"),
            FaceKind::Quad => f.write_str("quad"),
            FaceKind::NGon(n) => write!(f, "{n}-gon"),
            FaceKind::Degenerate(n) => write!(f, "degenerate {n}-sided face"),
        }
    }
}
