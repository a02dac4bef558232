use std::sync::OnceLock;

use rayon::prelude::*;
use strum::{Display, EnumString, VariantArray};

use crate::board::Board;
use crate::path::Path;
use crate::state::BoardState;

/// Which solutions a [`Solver`] hands back.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "kebab-case")]
pub enum SolutionStrategy {
    /// Every solution.
    #[default]
    All,
    /// The first solution found; the search stops as soon as there is one.
    First,
    /// A single solution with the fewest moves.
    ShortestPath,
}

/// Exhaustive depth-first search over every line that can be drawn on a [`Board`].
///
/// At each state the children that already solve the board are collected first, in expansion order, followed by
/// whatever each child's subtree yields. A solution is still expanded further, since end vertices do not stop the line.
///
/// With [`Self::parallel`], sibling subtrees are searched on the `rayon` pool. Results are merged in child order, so
/// [`SolutionStrategy::All`] returns the same list either way; [`SolutionStrategy::First`] returns whichever
/// solution some worker reaches first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Solver {
    strategy: SolutionStrategy,
    parallel: bool,
}

impl Solver {
    /// A sequential solver.
    pub fn new(strategy: SolutionStrategy) -> Self {
        Self { strategy, parallel: false }
    }

    /// Search sibling branches on the `rayon` pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Which solutions [`Self::solve`] hands back.
    pub fn strategy(&self) -> SolutionStrategy {
        self.strategy
    }

    /// Search `board`, returning solutions according to the strategy.
    ///
    /// No solution is an empty [`Vec`]. [`SolutionStrategy::First`] and [`SolutionStrategy::ShortestPath`] return at
    /// most one state.
    pub fn solve<'b>(&self, board: &'b Board) -> Vec<BoardState<'b>> {
        log::debug!("searching for {} solution(s){}", self.strategy, if self.parallel { " in parallel" } else { "" });

        // set once by the first solution under `First`; every branch gives up once it is
        let found = OnceLock::new();
        let solutions = self.search(&BoardState::new(board), &found);

        let result = match self.strategy {
            SolutionStrategy::All => solutions,
            SolutionStrategy::First => found.into_inner().into_iter().collect(),
            SolutionStrategy::ShortestPath => solutions.into_iter()
                .min_by_key(|state| state.path().map_or(0, Path::len))
                .into_iter()
                .collect(),
        };

        log::debug!("search finished with {} solution(s)", result.len());
        result
    }

    fn search<'b>(&self, state: &BoardState<'b>, found: &OnceLock<BoardState<'b>>) -> Vec<BoardState<'b>> {
        if found.get().is_some() {
            return Vec::new();
        }

        let children = state.possible_next_states();

        let mut solutions = Vec::new();
        for child in children.iter().filter(|child| child.succeeded()) {
            log::trace!("found solution {child:?}");

            if self.strategy == SolutionStrategy::First {
                // another worker may already have set it
                let _ = found.set(child.clone());
                return Vec::new();
            }

            solutions.push(child.clone());
        }

        let deeper = if self.parallel {
            children.par_iter()
                .map(|child| self.search(child, found))
                .collect::<Vec<_>>()
        } else {
            children.iter()
                .map(|child| self.search(child, found))
                .collect::<Vec<_>>()
        };

        solutions.extend(deeper.into_iter().flatten());
        solutions
    }
}
