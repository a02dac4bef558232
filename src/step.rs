use std::fmt::{Display, Formatter};

use strum::VariantArray;

use crate::location::{Coord, Position};

/// The axis a [`Move`] perturbs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Axis {
    /// Along a row; wraps on a wrapping board.
    Horizontal,
    /// Along a column; never wraps.
    Vertical,
}

/// One unit step of the line along the vertex grid.
///
/// [`Move::VARIANTS`] is the canonical order in which moves are tried, which fixes the order solutions are found in.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Move {
    /// Towards row 0.
    Up,
    /// Towards the bottom row.
    Down,
    /// Towards column 0, or across the seam.
    Left,
    /// Towards the rightmost column, or across the seam.
    Right,
}

impl Move {
    /// The move that undoes this one.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The axis this move travels along.
    pub fn axis(&self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// `U`, `D`, `L` or `R`, as used in move strings like `RDRU`.
    pub fn letter(&self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Step `from` inside a `width` by `height` grid.
    ///
    /// The vertical axis never wraps. With `wrap`, the horizontal axis is taken modulo `width`.
    pub(crate) fn attempt_within(&self, from: Position, (width, height): (Coord, Coord), wrap: bool) -> Option<Position> {
        let Position(x, y) = from;
        if x >= width || y >= height {
            return None;
        }

        match self {
            Self::Up => y.checked_sub(1).map(|y| Position(x, y)),
            Self::Down => (y + 1 < height).then(|| Position(x, y + 1)),
            Self::Left => match x.checked_sub(1) {
                Some(x) => Some(Position(x, y)),
                None => wrap.then(|| Position(width - 1, y)),
            },
            Self::Right => {
                if x + 1 < width {
                    Some(Position(x + 1, y))
                } else {
                    wrap.then(|| Position(0, y))
                }
            }
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for Move {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::VARIANTS.iter()
            .find(|mv| mv.letter() == value.to_ascii_uppercase())
            .copied()
            .ok_or(value)
    }
}
