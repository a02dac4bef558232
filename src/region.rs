use ndarray::Array2;
use strum::VariantArray;

use crate::board::Board;
use crate::cell::Cell;
use crate::location::Position;
use crate::path::Path;
use crate::step::Move;

/// The cells of a board partitioned by a path: two cells share a region when one can be reached from the other
/// without crossing a traced segment.
///
/// Regions live in an arena; every cell maps to the index of its region, so membership lookups are constant time.
#[derive(Clone, Debug)]
pub struct Regions {
    members: Vec<Vec<Position>>,
    index: Array2<usize>,
}

impl Regions {
    /// Flood fill the cells of `board`, treating every segment traced by `path` as a wall.
    pub fn compute(board: &Board, path: &Path) -> Self {
        let mut index = Array2::from_elem(board.cells().raw_dim(), usize::MAX);
        let mut members = Vec::new();

        for (cell_index, _) in board.cells().indexed_iter() {
            if index[cell_index] != usize::MAX {
                continue;
            }

            let region = members.len();
            let mut region_members = Vec::new();
            let mut frontier = vec![Position::from(cell_index)];
            index[cell_index] = region;

            while let Some(cell) = frontier.pop() {
                region_members.push(cell);

                let walls = board.segments_bordering(cell);
                for (side, step) in Move::VARIANTS.iter().enumerate() {
                    if path.traces(&walls[side]) {
                        continue;
                    }

                    let Some(neighbour) = board.cell_step(cell, *step) else {
                        continue;
                    };

                    let slot = &mut index[neighbour.as_index()];
                    if *slot == usize::MAX {
                        *slot = region;
                        frontier.push(neighbour);
                    }
                }
            }

            region_members.sort_unstable();
            members.push(region_members);
        }

        Self { members, index }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for a region set computed from a board, since boards have cells.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every region, each as its sorted list of cells.
    pub fn iter(&self) -> impl Iterator<Item = &[Position]> {
        self.members.iter().map(Vec::as_slice)
    }

    /// The region containing `cell`, or [`None`] if it is not a cell of the board.
    pub fn region_of(&self, cell: Position) -> Option<&[Position]> {
        self.index.get(cell.as_index()).map(|region| self.members[*region].as_slice())
    }

    /// The contents of every region.
    pub fn contents<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = Vec<Cell>> + 'a {
        self.iter().map(move |region| region.iter()
            .map(|cell| board.cells()[cell.as_index()])
            .collect())
    }
}
