use std::collections::HashSet;

use itertools::Itertools;
use ndarray::Array2;

use crate::board::Board;
use crate::cell::{parse_cells, Cell, ParseError};
use crate::location::{Dimension, Position};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum BuilderInvalidReason {
    /// A cell, start or end was placed outside the grid.
    #[display("feature out of bounds at {_0}")]
    FeatureOutOfBounds(Position),
    /// No start vertex was given.
    #[display("no start vertex")]
    NoStart,
    /// No end vertex was given.
    #[display("no end vertex")]
    NoEnd,
    /// A triangle must ask for one to three edges.
    #[display("triangle at {_0} requires an impossible edge count")]
    TriangleCountOutOfRange(Position),
    /// A wrapping board needs at least two cell columns, otherwise a horizontal step lands where it started.
    #[display("a wrapping board needs at least two columns")]
    WrapTooNarrow,
}

/// Builder for [`Board`]s.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Cell placement is checked immediately; starts and ends are checked by [`Self::build`], since whether a vertex is on
/// the board depends on [`Self::wrap_horizontal`].
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    cells: Array2<Cell>,
    starts: Vec<Position>,
    ends: HashSet<Position>,
    wrap: bool,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl BoardBuilder {
    /// Construct a builder for an all-empty grid with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self::with_cells(Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), Cell::default))
            .unwrap_or_else(|| unreachable!("dimensions are nonzero"))
    }

    /// Construct a builder around a grid indexed `[row, column]`, or [`None`] if the grid has no cells.
    pub fn with_cells(cells: Array2<Cell>) -> Option<Self> {
        let (rows, columns) = cells.dim();
        let dims = (Dimension::new(columns)?, Dimension::new(rows)?);

        Some(Self {
            dims,
            cells,
            starts: Vec::new(),
            ends: HashSet::new(),
            wrap: false,
            invalid_reasons: Vec::new(),
        })
    }

    /// Construct a builder from a `/`-delimited description, see [`parse_cells`].
    pub fn parse(description: &str) -> Result<Self, ParseError> {
        Self::with_cells(parse_cells(description)?).ok_or(ParseError::Empty)
    }

    /// Put `cell` at a cell-space `position`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `position` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn set_cell(&mut self, position: Position, cell: Cell) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.cells.get_mut(position.as_index()) {
            Some(slot) => *slot = cell,
            None => self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds(position)),
        }

        self
    }

    /// Add a vertex the line may start from. Adding the same vertex twice has no further effect.
    pub fn add_start(&mut self, vertex: Position) -> &mut Self {
        if !self.starts.contains(&vertex) {
            self.starts.push(vertex);
        }

        self
    }

    /// Add a vertex the line may end at.
    pub fn add_end(&mut self, vertex: Position) -> &mut Self {
        self.ends.insert(vertex);
        self
    }

    /// Make the leftmost and rightmost vertex columns the same column.
    pub fn wrap_horizontal(&mut self, wrap: bool) -> &mut Self {
        self.wrap = wrap;
        self
    }

    fn vertex_dims(&self) -> (usize, usize) {
        let columns = if self.wrap { self.dims.0.get() } else { self.dims.0.get() + 1 };
        (columns, self.dims.1.get() + 1)
    }

    fn collect_invalid_reasons(&self) -> Vec<BuilderInvalidReason> {
        let mut reasons = self.invalid_reasons.clone();

        if self.wrap && self.dims.0.get() < 2 {
            reasons.push(BuilderInvalidReason::WrapTooNarrow);
        }

        if self.starts.is_empty() {
            reasons.push(BuilderInvalidReason::NoStart);
        }
        if self.ends.is_empty() {
            reasons.push(BuilderInvalidReason::NoEnd);
        }

        let (columns, rows) = self.vertex_dims();
        reasons.extend(self.starts.iter()
            .chain(self.ends.iter().sorted())
            .filter(|Position(x, y)| *x >= columns || *y >= rows)
            .map(|vertex| BuilderInvalidReason::FeatureOutOfBounds(*vertex)));

        reasons.extend(self.cells.indexed_iter()
            .filter(|(_, cell)| matches!(cell, Cell::Triangle(count) if !(1..=3).contains(count)))
            .map(|(index, _)| BuilderInvalidReason::TriangleCountOutOfRange(Position::from(index))));

        reasons
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some` with every [`BuilderInvalidReason`] otherwise.
    pub fn is_valid(&self) -> Option<Vec<BuilderInvalidReason>> {
        let reasons = self.collect_invalid_reasons();
        (!reasons.is_empty()).then_some(reasons)
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, Vec<BuilderInvalidReason>> {
        if let Some(reasons) = self.is_valid() {
            return Err(reasons);
        }

        Ok(Board::new(self.cells.clone(), self.dims, self.starts.clone(), self.ends.clone(), self.wrap))
    }
}
