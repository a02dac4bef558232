use ndarray::Array2;
use strum::VariantArray;

/// The closed set of colors a square or star can carry.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, derive_more::Display)]
pub enum Color {
    /// `W`
    White,
    /// `K`
    Black,
    /// `G`
    Green,
    /// `R`
    Red,
    /// `B`
    Blue,
    /// `Y`
    Yellow,
    /// `P`
    Purple,
}

impl Color {
    /// The uppercase letter used for this color in puzzle descriptions.
    pub fn initial(&self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'K',
            Self::Green => 'G',
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Yellow => 'Y',
            Self::Purple => 'P',
        }
    }

    /// The color whose [`Self::initial`] is `initial`.
    pub fn from_initial(initial: char) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|color| color.initial() == initial)
    }
}

/// The contents of one cell of a board.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cell {
    /// No symbol.
    #[default]
    Empty,
    /// Shares a region only with squares of the same color.
    Square(Color),
    /// Its region holds exactly one other symbol of its color.
    Star(Color),
    /// Exactly this many of the cell's four edges are on the line.
    Triangle(u8),
}

impl Cell {
    /// Whether this cell constrains the region it ends up in.
    pub fn cares_about_regions(&self) -> bool {
        matches!(self, Self::Square(_) | Self::Star(_))
    }

    /// The character this cell is written as in a puzzle description.
    pub fn symbol(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::Square(color) => color.initial(),
            Self::Star(color) => color.initial().to_ascii_lowercase(),
            Self::Triangle(count) => char::from(b'0' + *count),
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'E' | 'e' | ' ' | '.' => Some(Self::Empty),
            '1'..='3' => symbol.to_digit(10).map(|count| Self::Triangle(count as u8)),
            _ if symbol.is_ascii_uppercase() => Color::from_initial(symbol).map(Self::Square),
            _ if symbol.is_ascii_lowercase() => Color::from_initial(symbol.to_ascii_uppercase()).map(Self::Star),
            _ => None,
        }
    }
}

/// Reasons a puzzle description cannot be read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// The description has no cells at all.
    #[display("empty puzzle description")]
    Empty,
    /// A character that names no cell.
    #[display("invalid character '{symbol}' at row {row}, column {column}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Zero-based row of the character.
        row: usize,
        /// Zero-based column of the character.
        column: usize,
    },
    /// A row whose length differs from the first row.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the short or long row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of this row.
        found: usize,
    },
}

/// Parse a `/`-delimited description into a grid of cells, indexed `[row, column]`.
///
/// `E`, `e`, space and `.` are empty cells, `1` to `3` are triangles, an uppercase [`Color::initial`] is a square
/// and its lowercase form is a star. For example `"K.W/2pp"` is a two by three grid.
pub fn parse_cells(description: &str) -> Result<Array2<Cell>, ParseError> {
    let rows = description.split('/')
        .enumerate()
        .map(|(row, symbols)| symbols.chars()
            .enumerate()
            .map(|(column, symbol)| Cell::from_symbol(symbol)
                .ok_or(ParseError::UnknownSymbol { symbol, row, column }))
            .collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;

    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(ParseError::Empty);
    }

    if let Some((row, found)) = rows.iter()
        .map(Vec::len)
        .enumerate()
        .find(|(_, len)| *len != width) {
        return Err(ParseError::RaggedRow { row, expected: width, found });
    }

    let height = rows.len();
    Array2::from_shape_vec((height, width), rows.into_iter().flatten().collect())
        .map_err(|_| ParseError::Empty)
}

#[cfg(test)]
mod tests {
    use crate::cell::{parse_cells, Cell, Color, ParseError};

    #[test]
    fn parses_every_symbol_kind() {
        let cells = parse_cells("KwE/.13").unwrap();
        assert_eq!(cells.dim(), (2, 3));
        assert_eq!(cells[(0, 0)], Cell::Square(Color::Black));
        assert_eq!(cells[(0, 1)], Cell::Star(Color::White));
        assert_eq!(cells[(0, 2)], Cell::Empty);
        assert_eq!(cells[(1, 0)], Cell::Empty);
        assert_eq!(cells[(1, 1)], Cell::Triangle(1));
        assert_eq!(cells[(1, 2)], Cell::Triangle(3));
    }

    #[test]
    fn symbols_reparse() {
        let cells = parse_cells("PPW./..e./.WWG/G.WW").unwrap();
        let written = cells.rows()
            .into_iter()
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("/");
        assert_eq!(parse_cells(&written).unwrap(), cells);
    }

    #[test]
    fn unknown_symbol() {
        assert_eq!(parse_cells("J"), Err(ParseError::UnknownSymbol { symbol: 'J', row: 0, column: 0 }));
        assert_eq!(parse_cells("..4"), Err(ParseError::UnknownSymbol { symbol: '4', row: 0, column: 2 }));
        assert_eq!(parse_cells("../.x"), Err(ParseError::UnknownSymbol { symbol: 'x', row: 1, column: 1 }));
        assert_eq!(format!("{}", parse_cells("J").unwrap_err()), "invalid character 'J' at row 0, column 0");
    }

    #[test]
    fn malformed_grids() {
        assert_eq!(parse_cells(""), Err(ParseError::Empty));
        assert_eq!(parse_cells("../."), Err(ParseError::RaggedRow { row: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn only_squares_and_stars_care() {
        assert!(Cell::Square(Color::Red).cares_about_regions());
        assert!(Cell::Star(Color::Red).cares_about_regions());
        assert!(!Cell::Triangle(2).cares_about_regions());
        assert!(!Cell::Empty.cares_about_regions());
    }
}
