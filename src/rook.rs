use std::collections::VecDeque;

use ndarray::Array2;
use strum::VariantArray;

use crate::board::Board;
use crate::direction::Direction;
use crate::point::Point;

/// A per-color breadth-first distance field over the board: the minimum
/// number of slides a lone robot of that color needs to reach the goal cell
/// from anywhere, ignoring the other robots.
///
/// Ignoring collisions can only shorten the answer, so the field is an
/// admissible lower bound on the true multi-robot distance and safe to guide
/// the best-first search with.
pub(crate) struct RookField {
    distances: Array2<Option<u32>>,
}

impl RookField {
    /// Build the field for robots of identity `color` against a goal at
    /// `goal`.
    ///
    /// Works backward from the goal: each visited cell expands four
    /// unobstructed slides of a hypothetical lone robot, and every cell those
    /// slides pass through, deflection segments included, is one more move
    /// away than the cell being expanded. Bumper endpoints are allowed here;
    /// over-marking only lowers the bound.
    pub(crate) fn build(board: &Board, goal: Point, color: usize) -> Self {
        let mut distances: Array2<Option<u32>> = Array2::from_elem(
            (board.height() as usize, board.width() as usize),
            None,
        );
        distances[(goal.y as usize, goal.x as usize)] = Some(0);

        let mut queue = VecDeque::from([goal]);
        while let Some(cell) = queue.pop_front() {
            let next_distance = distances[(cell.y as usize, cell.x as usize)]
                .expect("queued cells have distances")
                + 1;
            for direction in Direction::VARIANTS {
                for entered in board.slide_cells(cell, color, *direction) {
                    let slot = &mut distances[(entered.y as usize, entered.x as usize)];
                    if slot.is_none() {
                        *slot = Some(next_distance);
                        queue.push_back(entered);
                    }
                }
            }
        }

        Self { distances }
    }

    /// The lower bound at `point`; `None` when the goal is unreachable from
    /// there even without collisions.
    pub(crate) fn distance(&self, point: Point) -> Option<u32> {
        self.distances[(point.y as usize, point.x as usize)]
    }
}
