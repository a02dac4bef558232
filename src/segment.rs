use std::fmt::{Display, Formatter};

use unordered_pair::UnorderedPair;

use crate::location::Position;

/// An undirected unit edge between two adjacent vertices.
///
/// `Segment::new(a, b) == Segment::new(b, a)`, and both hash identically.
///
/// A wrapping board two cells wide has two horizontal edges between the same pair of vertices, one inside the grid
/// and one across the seam. The seam edge is built with [`Self::across_seam`] and is a different segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Segment {
    ends: UnorderedPair<Position>,
    seam: bool,
}

impl Segment {
    /// The edge joining `a` and `b` inside the grid.
    pub fn new(a: Position, b: Position) -> Self {
        Self { ends: UnorderedPair::from((a, b)), seam: false }
    }

    /// The edge joining `a` and `b` across the horizontal wrap seam.
    pub fn across_seam(a: Position, b: Position) -> Self {
        Self { ends: UnorderedPair::from((a, b)), seam: true }
    }

    /// Both endpoints, lower one first.
    pub fn endpoints(&self) -> (Position, Position) {
        let UnorderedPair(a, b) = self.ends;
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Whether this edge joins the rightmost and leftmost vertex columns of a wrapping board.
    pub fn crosses_seam(&self) -> bool {
        self.seam
    }

    /// Whether both endpoints share a row.
    pub fn is_horizontal(&self) -> bool {
        let UnorderedPair(a, b) = self.ends;
        a.1 == b.1
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.endpoints();
        write!(f, "{a}{}{b}", if self.seam { "~" } else { "-" })
    }
}
