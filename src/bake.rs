use log::debug;
use ndarray::Array3;
use strum::VariantArray;

use crate::board::Board;
use crate::direction::Direction;
use crate::point::Point;

/// Precomputed lone-robot move outcomes for one board and robot count.
///
/// For every cell, robot slot, and direction the table holds where that robot
/// would rest if it were alone on the board. Entries whose lone-robot slide
/// was deflected by a bumper are left empty: with other robots present such a
/// path could be cut short anywhere along the chain, so only plain
/// blocked/unblocked slides take the fast path.
///
/// The table borrows the board, so the board cannot change while a baked
/// table is alive.
pub struct BakedBoard<'a> {
    board: &'a Board,
    // (cell index, robot slot, direction)
    table: Array3<Option<Point>>,
}

impl Board {
    /// Precompute the single-robot move table for `num_robots` robot slots.
    pub fn bake(&self, num_robots: usize) -> BakedBoard<'_> {
        let cells = (self.width() * self.height()) as usize;
        let mut table = Array3::from_elem((cells, num_robots, 4), None);
        let mut skipped = 0usize;

        for y in 0..self.height() {
            for x in 0..self.width() {
                let origin = Point::new(x, y);
                let index = (y * self.width() + x) as usize;
                for slot in 0..num_robots {
                    for direction in Direction::VARIANTS {
                        let slide = self.slide_from(origin, slot, *direction, &[], false, None);
                        if slide.deflected {
                            skipped += 1;
                            continue;
                        }
                        table[[index, slot, *direction as usize]] = Some(slide.resting);
                    }
                }
            }
        }

        debug!(
            "baked {} move entries ({} deflected slides skipped)",
            cells * num_robots * 4 - skipped,
            skipped
        );

        BakedBoard { board: self, table }
    }
}

impl BakedBoard<'_> {
    /// The board this table was baked from.
    pub fn board(&self) -> &Board {
        self.board
    }

    /// Resting point of the given move, preferring the baked table.
    ///
    /// The table answer is only trusted when no other robot sits on the
    /// straight-line ray from the mover in the move direction; any other
    /// robot there, or a missing table entry, falls back to full simulation.
    /// Agrees exactly with [`Board::simulate_move`] in all cases.
    pub fn fast_move(&self, robots: &[Point], mover: usize, direction: Direction) -> Point {
        let origin = robots[mover];
        let index = (origin.y * self.board.width() + origin.x) as usize;

        if let Some(resting) = self.table[[index, mover, direction as usize]] {
            let intercepted = robots
                .iter()
                .enumerate()
                .any(|(i, robot)| i != mover && origin.direction_to(*robot) == Some(direction));
            if !intercepted {
                return resting;
            }
        }

        self.board.simulate_move(robots, mover, direction)
    }
}
