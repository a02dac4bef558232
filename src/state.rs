use std::fmt::{Debug, Formatter};

use itertools::Itertools;

use crate::board::{Board, Triangle};
use crate::cell::{Cell, Color};
use crate::path::Path;
use crate::region::Regions;

/// How far the line has been drawn.
#[derive(Clone, Debug)]
pub enum Progress {
    /// No vertex chosen yet; the root of the search.
    Unstarted,
    /// A line of at least one vertex.
    InProgress(Path),
}

/// One node of the search: a board and the line drawn on it so far.
#[derive(Clone)]
pub struct BoardState<'b> {
    board: &'b Board,
    progress: Progress,
}

impl<'b> BoardState<'b> {
    /// The root state, before any start vertex is chosen.
    pub fn new(board: &'b Board) -> Self {
        Self { board, progress: Progress::Unstarted }
    }

    /// A state with `path` already drawn.
    pub fn with_path(board: &'b Board, path: Path) -> Self {
        Self { board, progress: Progress::InProgress(path) }
    }

    /// The board this state is drawn on.
    pub fn board(&self) -> &'b Board {
        self.board
    }

    /// Whether a line has been started, and the line if so.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// The line drawn so far, or [`None`] at the root.
    pub fn path(&self) -> Option<&Path> {
        match &self.progress {
            Progress::Unstarted => None,
            Progress::InProgress(path) => Some(path),
        }
    }

    /// Every state one move further on.
    ///
    /// From the root that is every single-move line out of every start vertex. Otherwise it is every legal move from
    /// the end of the line that neither revisits a vertex nor pushes a triangle past its count.
    pub fn possible_next_states(&self) -> Vec<BoardState<'b>> {
        match &self.progress {
            Progress::Unstarted => self.board.starts()
                .iter()
                .flat_map(|start| self.board.legal_moves(*start)
                    .map(move |step| Path::new(*start).extend(self.board, step)))
                .map(|path| Self::with_path(self.board, path))
                .filter(|state| !state.hit_dead_end())
                .collect_vec(),
            Progress::InProgress(path) => self.board.legal_moves(path.last())
                .filter(|step| !path.self_intersects(self.board, *step))
                .map(|step| Self::with_path(self.board, path.extend(self.board, step)))
                .filter(|state| !state.hit_dead_end())
                .collect_vec(),
        }
    }

    fn traced_count(&self, triangle: &Triangle) -> usize {
        self.path().map_or(0, |path| self.board.segments_bordering(triangle.position)
            .iter()
            .filter(|segment| path.traces(segment))
            .count())
    }

    /// Whether any triangle's traced edge count relates to its required count by `compare`.
    ///
    /// With `newest_only`, only triangles bordering the most recently traced segment are considered.
    fn any_triangle(&self, compare: impl Fn(usize, usize) -> bool, newest_only: bool) -> bool {
        let violates = |triangle: &Triangle| compare(self.traced_count(triangle), triangle.required);

        if newest_only {
            self.path()
                .and_then(Path::last_segment)
                .is_some_and(|segment| self.board.triangles_bordering(segment).any(violates))
        } else {
            self.board.triangles().iter().any(violates)
        }
    }

    /// Whether some triangle already has more traced edges than it allows.
    ///
    /// Segments are only ever added, so counts never fall; it is enough to look at triangles next to the newest
    /// segment, as long as every ancestor state passed this check too.
    pub fn hit_dead_end(&self) -> bool {
        self.any_triangle(|actual, required| actual > required, true)
    }

    /// Like [`Self::hit_dead_end`], but checking every triangle on the board.
    pub fn any_triangle_overwhelmed(&self) -> bool {
        self.any_triangle(|actual, required| actual > required, false)
    }

    /// Whether some triangle does not have exactly its required count.
    pub fn any_triangle_unsatisfied(&self) -> bool {
        self.any_triangle(|actual, required| actual != required, false)
    }

    /// The regions the line cuts the board into, or [`None`] at the root.
    pub fn regions(&self) -> Option<Regions> {
        self.path().map(|path| Regions::compute(self.board, path))
    }

    /// Whether the line is a solution: it ends on an end vertex and every square, star and triangle is satisfied.
    pub fn succeeded(&self) -> bool {
        let Some(path) = self.path() else {
            return false;
        };

        if !self.board.is_end(path.last()) {
            return false;
        }

        if self.board.cares_about_regions() {
            let regions = Regions::compute(self.board, path);
            if !regions.contents(self.board).all(|contents| region_satisfied(&contents)) {
                return false;
            }
        }

        !self.any_triangle_unsatisfied()
    }
}

/// Squares in a region must share one color, and each star must pair with exactly one other symbol of its color.
fn region_satisfied(contents: &[Cell]) -> bool {
    let squares = contents.iter()
        .filter_map(|cell| match cell {
            Cell::Square(color) => Some(*color),
            _ => None,
        })
        .counts();

    if squares.len() > 1 {
        return false;
    }

    let stars = contents.iter()
        .filter_map(|cell| match cell {
            Cell::Star(color) => Some(*color),
            _ => None,
        })
        .counts();

    stars.into_iter().all(|(color, star_count): (Color, usize)| {
        matches!((star_count, squares.get(&color).copied().unwrap_or(0)), (1, 1) | (2, 0))
    })
}

impl Debug for BoardState<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.progress {
            Progress::Unstarted => write!(f, "BoardState(unstarted)"),
            Progress::InProgress(path) => write!(f, "BoardState(path: {} from {})", path, path.start()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::BoardBuilder;
    use crate::cell::{Cell, Color};
    use crate::location::Position;
    use crate::path::Path;
    use crate::state::{region_satisfied, BoardState};
    use crate::step::Move;

    #[test]
    fn root_fans_out_from_every_start() {
        let board = BoardBuilder::parse("../..").unwrap()
            .add_start(Position(0, 0))
            .add_start(Position(1, 1))
            .add_end(Position(2, 2))
            .build()
            .unwrap();

        let children = BoardState::new(&board).possible_next_states();
        let lines = children.iter()
            .map(|state| (state.path().unwrap().start(), state.path().unwrap().to_string()))
            .collect::<Vec<_>>();

        assert_eq!(lines, vec![
            (Position(0, 0), "D".to_string()),
            (Position(0, 0), "R".to_string()),
            (Position(1, 1), "U".to_string()),
            (Position(1, 1), "D".to_string()),
            (Position(1, 1), "L".to_string()),
            (Position(1, 1), "R".to_string()),
        ]);
    }

    #[test]
    fn expansion_skips_visited_vertices() {
        let board = BoardBuilder::parse("../..").unwrap().add_start(Position(0, 0)).add_end(Position(2, 2)).build().unwrap();
        let path = Path::from_moves(&board, Position(0, 0), [Move::Right, Move::Down]).unwrap();
        let next = BoardState::with_path(&board, path).possible_next_states()
            .into_iter()
            .map(|state| state.path().unwrap().moves().last().copied().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(next, vec![Move::Down, Move::Left, Move::Right]);
    }

    #[test]
    fn overwhelmed_triangles_are_pruned() {
        let board = BoardBuilder::parse("1.").unwrap().add_start(Position(0, 0)).add_end(Position(2, 1)).build().unwrap();
        let path = Path::from_moves(&board, Position(0, 0), [Move::Right]).unwrap();
        let state = BoardState::with_path(&board, path);
        assert!(!state.hit_dead_end());

        // down would trace the triangle's second edge
        let next = state.possible_next_states()
            .into_iter()
            .map(|state| state.path().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(next, vec!["RR".to_string()]);

        let over = BoardState::with_path(&board, Path::from_moves(&board, Position(0, 0), [Move::Right, Move::Down]).unwrap());
        assert!(over.hit_dead_end());
        assert!(over.any_triangle_overwhelmed());
    }

    #[test]
    fn expansion_never_yields_dead_ends() {
        let board = BoardBuilder::parse("11/11").unwrap().add_start(Position(0, 2)).add_end(Position(2, 0)).build().unwrap();
        let mut frontier = vec![BoardState::new(&board)];
        let mut expanded = 0;

        while let Some(state) = frontier.pop() {
            for child in state.possible_next_states() {
                assert!(!child.hit_dead_end());
                assert!(!child.any_triangle_overwhelmed());
                expanded += 1;
                frontier.push(child);
            }
        }

        assert!(expanded > 0);
    }

    #[test]
    fn unsatisfied_until_exact() {
        let board = BoardBuilder::parse("2").unwrap().add_start(Position(0, 0)).add_end(Position(1, 1)).build().unwrap();
        let one = BoardState::with_path(&board, Path::from_moves(&board, Position(0, 0), [Move::Right]).unwrap());
        assert!(one.any_triangle_unsatisfied());
        let two = BoardState::with_path(&board, Path::from_moves(&board, Position(0, 0), [Move::Right, Move::Down]).unwrap());
        assert!(!two.any_triangle_unsatisfied());
        assert!(two.succeeded());
    }

    #[test]
    fn root_never_succeeds() {
        let board = BoardBuilder::parse(".").unwrap().add_start(Position(0, 0)).add_end(Position(0, 0)).build().unwrap();
        let root = BoardState::new(&board);
        assert!(!root.succeeded());
        assert!(root.regions().is_none());
        assert!(!root.hit_dead_end());
    }

    #[test]
    fn must_end_on_an_end() {
        let board = BoardBuilder::parse(".").unwrap().add_start(Position(0, 0)).add_end(Position(1, 1)).build().unwrap();
        let short = BoardState::with_path(&board, Path::from_moves(&board, Position(0, 0), [Move::Right]).unwrap());
        assert!(!short.succeeded());
    }

    #[test]
    fn star_pairings() {
        use Cell::{Empty, Square, Star};
        let (k, w) = (Color::Black, Color::White);

        assert!(region_satisfied(&[Empty, Empty]));
        assert!(region_satisfied(&[Square(k), Square(k), Empty]));
        assert!(!region_satisfied(&[Square(k), Square(w)]));
        assert!(region_satisfied(&[Star(k), Star(k)]));
        assert!(region_satisfied(&[Star(k), Square(k)]));
        assert!(region_satisfied(&[Star(k), Star(k), Square(w)]));
        assert!(!region_satisfied(&[Star(k)]));
        assert!(!region_satisfied(&[Star(k), Square(k), Square(k)]));
        assert!(!region_satisfied(&[Star(k), Star(k), Square(k)]));
        assert!(!region_satisfied(&[Star(k), Star(k), Star(k)]));
        assert!(!region_satisfied(&[Star(k), Square(w)]));
        assert!(region_satisfied(&[Star(k), Square(k), Star(w), Star(w)]));
    }
}
