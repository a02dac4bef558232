use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::board::Board;
use crate::location::Position;
use crate::segment::Segment;
use crate::step::Move;

/// A line drawn on a [`Board`]: a start vertex and the moves taken from it.
///
/// Paths are never mutated; [`Self::extend`] returns a new path. The vertex and segment lists are derived from the
/// moves through [`Board::step`], so a path is only meaningful relative to the board it was built on.
#[derive(Clone, Debug)]
pub struct Path {
    moves: Vec<Move>,
    vertices: Vec<Position>,
    segments: Vec<Segment>,
    visited: HashSet<Position>,
    traced: HashSet<Segment>,
}

impl Path {
    /// The empty path at `start`.
    pub fn new(start: Position) -> Self {
        Self {
            moves: Vec::new(),
            vertices: vec![start],
            segments: Vec::new(),
            visited: HashSet::from([start]),
            traced: HashSet::new(),
        }
    }

    /// Replay `moves` from `start`, or [`None`] if any of them steps off `board`.
    pub fn from_moves(board: &Board, start: Position, moves: impl IntoIterator<Item = Move>) -> Option<Self> {
        moves.into_iter().try_fold(Self::new(start), |path, step| {
            board.step(path.last(), step)?;
            Some(path.extend(board, step))
        })
    }

    /// A new path with `step` appended.
    ///
    /// # Panics
    /// If `step` leaves the board from the last vertex. Moves drawn from [`Board::legal_moves`] never do.
    pub fn extend(&self, board: &Board, step: Move) -> Self {
        let from = self.last();
        let segment = board.segment_for_step(from, step)
            .unwrap_or_else(|| panic!("{step:?} from {from} leaves the board"));
        let (a, b) = segment.endpoints();
        let to = if a == from { b } else { a };

        let mut extended = self.clone();
        extended.moves.push(step);
        extended.vertices.push(to);
        extended.segments.push(segment);
        extended.visited.insert(to);
        extended.traced.insert(segment);
        extended
    }

    /// Whether stepping from the last vertex lands on a vertex already on this path.
    ///
    /// A step off the board counts as intersecting, since it cannot be taken either.
    pub fn self_intersects(&self, board: &Board, step: Move) -> bool {
        board.step(self.last(), step)
            .map_or(true, |to| self.visited.contains(&to))
    }

    /// The vertex the line starts from.
    pub fn start(&self) -> Position {
        self.vertices[0]
    }

    /// The vertex the line currently ends at.
    pub fn last(&self) -> Position {
        self.vertices[self.vertices.len() - 1]
    }

    /// Every move, first move first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Every vertex, start first.
    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }

    /// Every edge, in the order they were traced.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The most recently traced edge, or [`None`] for an empty path.
    pub fn last_segment(&self) -> Option<Segment> {
        self.segments.last().copied()
    }

    /// Whether `vertex` is on the line.
    pub fn visits(&self, vertex: Position) -> bool {
        self.visited.contains(&vertex)
    }

    /// Whether `segment` is on the line.
    pub fn traces(&self, segment: &Segment) -> bool {
        self.traced.contains(segment)
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether no move has been made yet.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.moves.iter().try_for_each(|step| write!(f, "{step}"))
    }
}
