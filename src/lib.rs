#![warn(missing_docs)]

//! # `witless`
//!
//! A solver for single-line path puzzles in the style of [The Witness](https://en.wikipedia.org/wiki/The_Witness_(2016_video_game)).
//! A line is drawn along the corners of a grid of cells from a start vertex to an end vertex, never visiting a vertex twice.
//! The edges it traces cut the cells into regions, and the symbols in the cells constrain which lines are valid:
//! - squares: every square in a region has the same color;
//! - stars: a star's region holds exactly one other square or star of its color;
//! - triangles: exactly that many of the cell's four edges are traced.
//!
//! Boards may wrap horizontally, in which case the leftmost and rightmost vertex columns are the same column.
//!
//! Begin by building a board using [`BoardBuilder`], usually from a `/`-delimited description (see [`parse_cells`]).
//! Then call [`solve()`](crate::Board::solve) or run a [`Solver`], yielding [`BoardState`]s whose [`Path`] solves the board.
//!
//! # Internals
//! The search is an exhaustive depth-first walk over every self-avoiding line. Every extension is checked against the
//! triangles bordering the new edge, and a line that already traces too many edges of a triangle is dropped on the spot;
//! without that cut triangle-heavy boards are hopeless. Lines that reach an end vertex are checked in full: the regions
//! are found by flood filling the cells with the traced edges as walls, then squares, stars and triangles are counted.

pub use board::{Board, Triangle};
pub use builder::{BoardBuilder, BuilderInvalidReason};
pub use cell::{parse_cells, Cell, Color, ParseError};
pub use location::Position;
pub use path::Path;
pub use region::Regions;
pub use segment::Segment;
pub use solver::{SolutionStrategy, Solver};
pub use state::{BoardState, Progress};
pub use step::{Axis, Move};

pub(crate) mod board;
pub(crate) mod builder;
pub(crate) mod cell;
pub(crate) mod location;
pub(crate) mod path;
pub(crate) mod region;
mod render;
pub(crate) mod segment;
pub(crate) mod solver;
pub(crate) mod state;
pub(crate) mod step;
