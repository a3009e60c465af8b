use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::cell::{Cell, Goal};
use crate::point::Point;

/// Reasons a textual board cannot be decoded.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseBoardError {
    /// The input held no rows at all.
    #[error("board text is empty")]
    Empty,
    /// A row's character count disagreed with the first row, or was odd.
    #[error("row {row} is {len} characters long, expected {expected}")]
    UnevenRow {
        /// Zero-based row index.
        row: usize,
        /// Characters found on the row.
        len: usize,
        /// Characters required by the first row.
        expected: usize,
    },
    /// A cell's marker character named no goal and no bumper.
    #[error("unrecognized cell glyph {glyph:?}")]
    BadGlyph {
        /// The offending character.
        glyph: char,
    },
    /// A cell's fence character was not a hex digit or space.
    #[error("invalid fence mask {glyph:?}")]
    BadFenceMask {
        /// The offending character.
        glyph: char,
    },
}

/// A rectangular grid of [`Cell`]s.
///
/// Boards are built by parsing the two-characters-per-cell text format (see
/// the crate docs) or composed out of quadrant boards with
/// [`Board::paste_boards`]. A board must not be mutated while a
/// [`bake`](Board::bake)d table or a running [`solve`](Board::solve) borrows
/// it; the borrow checker enforces exactly that.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
}

impl Board {
    /// An empty `width` × `height` board with no fences, goals, or bumpers.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            cells: Array2::from_shape_simple_fn(
                (height as usize, width as usize),
                Cell::default,
            ),
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.cells.ncols() as i32
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.cells.nrows() as i32
    }

    #[inline]
    fn as_index(point: Point) -> (usize, usize) {
        (point.y as usize, point.x as usize)
    }

    /// The cell at `point`, which must be on the board.
    #[inline]
    pub fn cell(&self, point: Point) -> &Cell {
        &self.cells[Self::as_index(point)]
    }

    /// Mutable access to the cell at `point`, which must be on the board.
    #[inline]
    pub fn cell_mut(&mut self, point: Point) -> &mut Cell {
        &mut self.cells[Self::as_index(point)]
    }

    /// Whether `point` lies on the board.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width() && point.y >= 0 && point.y < self.height()
    }

    /// Whether `point` lies on the outermost ring of cells.
    pub fn is_edge(&self, point: Point) -> bool {
        self.contains(point)
            && (point.x == 0
                || point.y == 0
                || point.x == self.width() - 1
                || point.y == self.height() - 1)
    }

    /// Whether a wall separates two adjacent cells.
    ///
    /// A fence declared on either side counts; positions off the board are
    /// treated as walled off.
    pub fn has_fence_between(&self, cells: UnorderedPair<Point>) -> bool {
        let UnorderedPair(p0, p1) = cells;
        if !self.contains(p0) || !self.contains(p1) {
            return true;
        }
        match p0.direction_to(p1) {
            Some(dir) => self.cell(p0).fence(dir) || self.cell(p1).fence(dir.inverse()),
            None => false,
        }
    }

    /// Declare a wall between two adjacent on-board cells, storing the flag
    /// on both sides.
    pub fn set_fence_between(&mut self, cells: UnorderedPair<Point>) {
        let UnorderedPair(p0, p1) = cells;
        debug_assert!(self.contains(p0) && self.contains(p1));
        if let Some(dir) = p0.direction_to(p1) {
            self.cell_mut(p0).set_fence(dir, true);
            self.cell_mut(p1).set_fence(dir.inverse(), true);
        }
    }

    /// Whether a one-cell step from `p0` to `p1` is blocked by a fence or the
    /// board boundary.
    #[inline]
    pub fn is_move_blocked(&self, p0: Point, p1: Point) -> bool {
        self.has_fence_between(UnorderedPair(p0, p1))
    }

    /// Locate the cell carrying `goal`. The caller guarantees the goal is on
    /// the board; `None` signals a violated precondition, not a recoverable
    /// state.
    pub fn find_goal(&self, goal: Goal) -> Option<Point> {
        self.cells
            .indexed_iter()
            .find(|(_, cell)| cell.goal == Some(goal))
            .map(|((y, x), _)| Point::new(x as i32, y as i32))
    }

    /// A copy of this board rotated by `turns` clockwise quarter-turns.
    /// Odd rotation counts swap the dimensions.
    pub fn rotate90(&self, turns: i32) -> Board {
        let turns = turns.rem_euclid(4);
        let size = Point::new(self.width(), self.height());
        let mut result = match turns % 2 {
            0 => Board::new(self.width(), self.height()),
            _ => Board::new(self.height(), self.width()),
        };

        for ((y, x), cell) in self.cells.indexed_iter() {
            let location = Point::new(x as i32, y as i32);
            *result.cell_mut(location.rotate90(size, turns)) = cell.rotated(turns);
        }

        result
    }

    /// Concatenate a grid of quadrant boards into one board.
    ///
    /// Boards within a row must share a height and the rows must produce
    /// equal total widths; full puzzle boards are assembled this way from a
    /// library of quadrant templates.
    pub fn paste_boards(rows: &[Vec<Board>]) -> Board {
        let full_height = rows.iter().map(|row| row[0].height()).sum();
        let full_width = rows[0].iter().map(|board| board.width()).sum();

        let mut result = Board::new(full_width, full_height);

        let mut y_base = 0;
        for row in rows {
            let mut x_base = 0;
            for board in row {
                debug_assert_eq!(board.height(), row[0].height());
                for ((y, x), cell) in board.cells.indexed_iter() {
                    *result.cell_mut(Point::new(x_base + x as i32, y_base + y as i32)) = *cell;
                }
                x_base += board.width();
            }
            y_base += row[0].height();
        }

        result
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Decode the newline-terminated two-characters-per-cell format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s.lines().collect_vec();
        let expected = lines.first().map_or(0, |line| line.chars().count());
        if expected == 0 {
            return Err(ParseBoardError::Empty);
        }

        let mut board = Board::new(expected as i32 / 2, lines.len() as i32);
        for (y, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != expected || len % 2 != 0 {
                return Err(ParseBoardError::UnevenRow { row: y, len, expected });
            }
            for (x, (marker, fences)) in line.chars().tuples().enumerate() {
                *board.cell_mut(Point::new(x as i32, y as i32)) =
                    Cell::from_glyphs(marker, fences)?;
            }
        }

        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out =
            String::with_capacity(self.cells.nrows() * (self.cells.ncols() * 2 + 1));
        for row in self.cells.rows() {
            for cell in row {
                out.extend(cell.glyphs());
            }
            out.push('\n');
        }
        write!(f, "{}", out)
    }
}
