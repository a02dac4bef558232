use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::cell::Cell;
use crate::location::{Coord, Dimension, Position};
use crate::segment::Segment;
use crate::solver::{SolutionStrategy, Solver};
use crate::state::BoardState;
use crate::step::Move;

/// A triangle cell and the number of its edges the line must trace.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Triangle {
    /// Cell-space position of the triangle.
    pub position: Position,
    /// How many of the cell's four edges the line must trace.
    pub required: usize,
}

/// An immutable puzzle: cells, where the line may start and end, and whether the board wraps horizontally.
///
/// Two coordinate spaces are in play. Cells are addressed by `(column, row)` in a `cell_width` by `cell_height` grid.
/// Path vertices sit on cell corners, in a grid one larger in both directions, except that a horizontally wrapping
/// board reuses its leftmost vertex column as the rightmost seam and so has `cell_width` vertex columns.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::BoardBuilder).
#[derive(Debug)]
pub struct Board {
    // cell columns, cell rows
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) cells: Array2<Cell>,
    pub(crate) starts: Vec<Position>,
    pub(crate) ends: HashSet<Position>,
    pub(crate) wrap: bool,
    // per cell, in `Move::VARIANTS` order
    pub(crate) borders: Array2<[Segment; 4]>,
    pub(crate) triangles: Vec<Triangle>,
    // indices into `triangles`
    pub(crate) triangle_index: HashMap<Segment, Vec<usize>>,
    pub(crate) cares_about_regions: bool,
}

impl Board {
    pub(crate) fn new(cells: Array2<Cell>, dims: (Dimension, Dimension), starts: Vec<Position>, ends: HashSet<Position>, wrap: bool) -> Self {
        let vertex_columns = if wrap { dims.0.get() } else { dims.0.get() + 1 };
        let borders = Array2::from_shape_fn(cells.raw_dim(), |index| borders_of(Position::from(index), vertex_columns, wrap));

        let triangles = cells.indexed_iter()
            .filter_map(|(index, cell)| match cell {
                Cell::Triangle(required) => Some(Triangle { position: Position::from(index), required: usize::from(*required) }),
                _ => None,
            })
            .collect_vec();

        let mut triangle_index: HashMap<Segment, Vec<usize>> = HashMap::with_capacity(triangles.len() * 4);
        for (index, triangle) in triangles.iter().enumerate() {
            for segment in &borders[triangle.position.as_index()] {
                triangle_index.entry(*segment).or_default().push(index);
            }
        }

        let cares_about_regions = cells.iter().any(Cell::cares_about_regions);

        let board = Self {
            dims,
            cells,
            starts,
            ends,
            wrap,
            borders,
            triangles,
            triangle_index,
            cares_about_regions,
        };

        log::debug!(
            "built {}x{} board (wrap: {}), {} start(s), {} end(s), {} triangle(s), region rules {}",
            board.cell_width(), board.cell_height(), board.wrap, board.starts.len(), board.ends.len(),
            board.triangles.len(), if board.cares_about_regions { "on" } else { "off" },
        );

        board
    }

    /// Number of cell columns.
    pub fn cell_width(&self) -> Coord {
        self.dims.0.get()
    }

    /// Number of cell rows.
    pub fn cell_height(&self) -> Coord {
        self.dims.1.get()
    }

    /// Number of vertex columns.
    pub fn width(&self) -> Coord {
        if self.wrap { self.cell_width() } else { self.cell_width() + 1 }
    }

    /// Number of vertex rows.
    pub fn height(&self) -> Coord {
        self.cell_height() + 1
    }

    /// Whether the leftmost and rightmost vertex columns are the same column.
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Start vertices, in the order the search fans out from them.
    pub fn starts(&self) -> &[Position] {
        &self.starts
    }

    /// End vertices. A line may finish on any of them.
    pub fn ends(&self) -> &HashSet<Position> {
        &self.ends
    }

    /// Whether the line may finish on `vertex`.
    pub fn is_end(&self, vertex: Position) -> bool {
        self.ends.contains(&vertex)
    }

    /// Every cell, indexed `[row, column]`.
    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// The cell at a cell-space position, if it exists.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.as_index())
    }

    /// Every triangle cell, in row-major order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Whether any cell is a square or a star, i.e. whether region analysis can reject a line.
    pub fn cares_about_regions(&self) -> bool {
        self.cares_about_regions
    }

    /// Step from a path vertex, or [`None`] if that would leave the board.
    pub fn step(&self, from: Position, step: Move) -> Option<Position> {
        step.attempt_within(from, (self.width(), self.height()), self.wrap)
    }

    /// Step from a cell to its neighbour, or [`None`] if that would leave the board.
    pub fn cell_step(&self, from: Position, step: Move) -> Option<Position> {
        step.attempt_within(from, (self.cell_width(), self.cell_height()), self.wrap)
    }

    /// All moves that stay on the board from `from`, in [`Move::VARIANTS`] order.
    pub fn legal_moves(&self, from: Position) -> impl Iterator<Item = Move> + '_ {
        Move::VARIANTS.iter()
            .copied()
            .filter(move |step| self.step(from, *step).is_some())
    }

    /// The edge traced by stepping from `from`.
    ///
    /// The far endpoint is exactly the vertex [`Self::step`] lands on, so a step across the wrap seam yields an edge
    /// whose endpoints are both real vertex columns. That edge is marked with [`Segment::across_seam`].
    pub fn segment_for_step(&self, from: Position, step: Move) -> Option<Segment> {
        let to = self.step(from, step)?;
        let wraps = self.wrap && match step {
            Move::Left => from.0 == 0,
            Move::Right => from.0 + 1 == self.width(),
            Move::Up | Move::Down => false,
        };

        Some(if wraps { Segment::across_seam(from, to) } else { Segment::new(from, to) })
    }

    /// The four edges framing a cell, in [`Move::VARIANTS`] order.
    ///
    /// The edge at a move's index is also the one separating the cell from its neighbour in that direction.
    pub fn segments_bordering(&self, cell: Position) -> &[Segment; 4] {
        &self.borders[cell.as_index()]
    }

    /// Triangles with `segment` among their borders.
    pub(crate) fn triangles_bordering(&self, segment: Segment) -> impl Iterator<Item = &Triangle> {
        self.triangle_index.get(&segment)
            .into_iter()
            .flatten()
            .map(move |index| &self.triangles[*index])
    }

    /// Search for lines solving this board, see [`Solver`].
    pub fn solve(&self, strategy: SolutionStrategy) -> Vec<BoardState<'_>> {
        Solver::new(strategy).solve(self)
    }
}

/// The four edges framing `cell` on a board with `vertex_columns` vertex columns.
fn borders_of(cell: Position, vertex_columns: Coord, wrap: bool) -> [Segment; 4] {
    let Position(x, y) = cell;
    let seam = wrap && x + 1 == vertex_columns;
    let right = if seam { 0 } else { x + 1 };
    let horizontal = if seam { Segment::across_seam } else { Segment::new };

    let top_left = Position(x, y);
    let top_right = Position(right, y);
    let bottom_left = Position(x, y + 1);
    let bottom_right = Position(right, y + 1);

    // Up, Down, Left, Right
    [
        horizontal(top_left, top_right),
        horizontal(bottom_left, bottom_right),
        Segment::new(top_left, bottom_left),
        Segment::new(top_right, bottom_right),
    ]
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            writeln!(f, "{}", row.iter().map(Cell::symbol).collect::<String>())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::VariantArray;

    use crate::builder::BoardBuilder;
    use crate::location::Position;
    use crate::segment::Segment;
    use crate::step::Move;

    #[test]
    fn vertex_dimensions() {
        let flat = BoardBuilder::parse("..../....").unwrap().add_start(Position(0, 0)).add_end(Position(4, 2)).build().unwrap();
        assert_eq!((flat.cell_width(), flat.cell_height()), (4, 2));
        assert_eq!((flat.width(), flat.height()), (5, 3));

        let wrapped = BoardBuilder::parse("..../....").unwrap()
            .wrap_horizontal(true)
            .add_start(Position(0, 0))
            .add_end(Position(3, 2))
            .build()
            .unwrap();
        assert_eq!((wrapped.width(), wrapped.height()), (4, 3));
    }

    #[test]
    fn legal_moves_in_canonical_order() {
        let board = BoardBuilder::parse("../..").unwrap().add_start(Position(0, 0)).add_end(Position(2, 2)).build().unwrap();
        assert_eq!(board.legal_moves(Position(0, 0)).collect::<Vec<_>>(), vec![Move::Down, Move::Right]);
        assert_eq!(board.legal_moves(Position(1, 1)).collect::<Vec<_>>(), Move::VARIANTS.to_vec());
        assert_eq!(board.legal_moves(Position(2, 2)).collect::<Vec<_>>(), vec![Move::Up, Move::Left]);
    }

    #[test]
    fn seam_segment_matches_step() {
        let board = BoardBuilder::parse("...").unwrap()
            .wrap_horizontal(true)
            .add_start(Position(0, 1))
            .add_end(Position(1, 0))
            .build()
            .unwrap();

        assert_eq!(board.step(Position(2, 0), Move::Right), Some(Position(0, 0)));
        assert_eq!(board.step(Position(0, 0), Move::Left), Some(Position(2, 0)));
        let seam = Segment::across_seam(Position(2, 0), Position(0, 0));
        assert_eq!(board.segment_for_step(Position(2, 0), Move::Right), Some(seam));
        assert_eq!(board.segment_for_step(Position(1, 0), Move::Right), Some(Segment::new(Position(1, 0), Position(2, 0))));
        assert_eq!(board.segment_for_step(Position(0, 0), Move::Left), Some(seam));
        assert_eq!(board.segments_bordering(Position(2, 0))[Move::Up as usize], seam);
        assert_eq!(board.segments_bordering(Position(2, 0))[Move::Right as usize], Segment::new(Position(0, 0), Position(0, 1)));
    }

    #[test]
    fn borders_separate_neighbours() {
        for (description, wrap, end) in [(".../...", false, Position(3, 2)), (".../...", true, Position(2, 2)), ("../..", true, Position(1, 2))] {
            let board = BoardBuilder::parse(description).unwrap()
                .wrap_horizontal(wrap)
                .add_start(Position(0, 0))
                .add_end(end)
                .build()
                .unwrap();

            for (index, _) in board.cells().indexed_iter() {
                let cell = Position::from(index);
                let borders = board.segments_bordering(cell);
                assert_eq!(borders.iter().collect::<HashSet<_>>().len(), 4);
                for (side, step) in Move::VARIANTS.iter().enumerate() {
                    if let Some(neighbour) = board.cell_step(cell, *step) {
                        assert_eq!(board.segments_bordering(neighbour)[step.invert() as usize], borders[side]);
                    }
                }
            }
        }
    }

    #[test]
    fn two_column_wrap_keeps_parallel_edges_apart() {
        let board = BoardBuilder::parse(".1").unwrap()
            .wrap_horizontal(true)
            .add_start(Position(0, 1))
            .add_end(Position(1, 0))
            .build()
            .unwrap();

        let left = board.segments_bordering(Position(0, 0)).iter().collect::<HashSet<_>>();
        let right = board.segments_bordering(Position(1, 0)).iter().collect::<HashSet<_>>();
        // only the two vertical edges are shared, one on each side
        assert_eq!(left.intersection(&right).count(), 2);

        let inside = board.segment_for_step(Position(0, 1), Move::Right).unwrap();
        let seam = board.segment_for_step(Position(0, 1), Move::Left).unwrap();
        assert_ne!(inside, seam);
        assert_eq!(board.triangles_bordering(inside).count(), 0);
        assert_eq!(board.triangles_bordering(seam).count(), 1);
    }

    #[test]
    fn triangle_index() {
        let board = BoardBuilder::parse("2.").unwrap().add_start(Position(0, 1)).add_end(Position(2, 0)).build().unwrap();
        assert_eq!(board.triangles().len(), 1);
        assert!(!board.cares_about_regions());
        let shared = Segment::new(Position(1, 0), Position(1, 1));
        assert_eq!(board.triangles_bordering(shared).count(), 1);
        let far = Segment::new(Position(2, 0), Position(2, 1));
        assert_eq!(board.triangles_bordering(far).count(), 0);
    }

    #[test]
    fn displays_symbols() {
        let board = BoardBuilder::parse("Kp/3.").unwrap().add_start(Position(0, 0)).add_end(Position(2, 2)).build().unwrap();
        assert_eq!(format!("{}", board), "Kp\n3.\n");
        assert!(board.cares_about_regions());
    }
}
