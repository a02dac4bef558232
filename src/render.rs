use std::fmt::{Display, Formatter};

use crate::cell::Cell;
use crate::location::Position;
use crate::state::BoardState;
use crate::step::Move;

const LINE: char = '#';
const VERTEX: char = '.';
const BLANK: char = ' ';

impl BoardState<'_> {
    /// Draw the board with the line on top of it, one text row per vertex row and per cell row.
    ///
    /// Vertices are `.`, traced vertices and edges `#`, and cells show their [`Cell::symbol`] (blank when empty).
    /// On a wrapping board the seam column is drawn on both sides.
    pub fn render(&self) -> String {
        let board = self.board();
        let path = self.path();
        let columns = board.cell_width();
        let rows = board.cell_height();

        let vertex = |x: usize, y: usize| Position(x % board.width(), y);
        // every edge drawn is a legal step right or down from its top left vertex
        let on_line = |from: Position, step: Move| board.segment_for_step(from, step)
            .is_some_and(|segment| path.is_some_and(|path| path.traces(&segment)));
        let mark = |traced: bool| if traced { LINE } else { BLANK };

        let mut out = String::with_capacity((2 * columns + 2) * (2 * rows + 1));

        for y in 0..=rows {
            for x in 0..=columns {
                out.push(if path.is_some_and(|path| path.visits(vertex(x, y))) { LINE } else { VERTEX });
                if x < columns {
                    out.push(mark(on_line(vertex(x, y), Move::Right)));
                }
            }
            out.push('\n');

            if y == rows {
                break;
            }

            for x in 0..=columns {
                out.push(mark(on_line(vertex(x, y), Move::Down)));
                if x < columns {
                    out.push(match board.cells()[(y, x)] {
                        Cell::Empty => BLANK,
                        cell => cell.symbol(),
                    });
                }
            }
            out.push('\n');
        }

        out
    }
}

impl Display for BoardState<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
