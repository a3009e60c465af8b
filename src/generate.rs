//! Seeded assembly of full puzzle boards from a library of quadrant
//! templates, plus robot-placement generation and the difficulty-validation
//! loop that rejects placements solvable in too few moves.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::cell::Goal;
use crate::point::Point;
use crate::solver::SolveError;

/// Quadrant templates in the textual board format, one set per board
/// quadrant. Each template is 8×8; a full board pastes four of them, one per
/// set, rotated into place.
const QUADRANT_SETS: [&[&str]; 4] = [
    &[concat!(
        "           1    \n",
        "   8        08 1\n",
        "  61            \n",
        "                \n",
        "             8  \n",
        " 8          F  1\n",
        "      99        \n",
        "               F\n",
    )],
    &[concat!(
        "           1    \n",
        "    8  1        \n",
        "     2          \n",
        "  71            \n",
        "   2        23  \n",
        " 2              \n",
        "          D2 1  \n",
        "      W8 1     F\n",
    )],
    &[concat!(
        "       4        \n",
        " 4A             \n",
        "   2        56  \n",
        "                \n",
        "    C4          \n",
        "     2       432\n",
        " 2              \n",
        "               F\n",
    )],
    &[concat!(
        "     8   4      \n",
        "   41           \n",
        "                \n",
        "           4E8  \n",
        " 8       8      \n",
        "        B4      \n",
        "  4C            \n",
        "               F\n",
    )],
];

/// Assemble a full 16×16 board for `seed`: one template drawn from each
/// quadrant set, shuffled, then rotated into the four quadrant orientations
/// and pasted together. Deterministic per seed.
pub fn generate_board(seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut quadrants: Vec<Board> = QUADRANT_SETS
        .iter()
        .map(|set| {
            set[rng.gen_range(0..set.len())]
                .parse()
                .expect("quadrant templates are well-formed")
        })
        .collect();
    quadrants.shuffle(&mut rng);

    Board::paste_boards(&[
        vec![quadrants[0].rotate90(0), quadrants[3].rotate90(1)],
        vec![quadrants[1].rotate90(3), quadrants[2].rotate90(2)],
    ])
}

/// Draw `count` distinct robot starting cells: never on a goal, a bumper, or
/// a fully fenced-off cell.
pub fn generate_robot_placement<R: Rng>(board: &Board, rng: &mut R, count: usize) -> Vec<Point> {
    let mut placement = Vec::with_capacity(count);

    while placement.len() < count {
        let point = Point::new(
            rng.gen_range(0..board.width()),
            rng.gen_range(0..board.height()),
        );
        if placement.contains(&point) {
            continue;
        }
        let cell = board.cell(point);
        if cell.fully_fenced() || cell.goal.is_some() || cell.bumper.is_some() {
            continue;
        }
        placement.push(point);
    }

    placement
}

/// Regenerate robot placements until one admits no solution of length
/// `<= min_depth` for `goal`, making the drawn puzzle worth bidding on.
///
/// Gives up after `attempts` rejected placements and returns `Ok(None)`; a
/// board can have goals that are trivially reachable from almost everywhere.
pub fn place_robots_for_goal<R: Rng>(
    board: &Board,
    goal: Goal,
    count: usize,
    min_depth: u32,
    attempts: usize,
    rng: &mut R,
) -> Result<Option<Vec<Point>>, SolveError> {
    for _ in 0..attempts {
        let placement = generate_robot_placement(board, rng, count);
        if board.solve(goal, &placement, Some(min_depth))?.is_none() {
            return Ok(Some(placement));
        }
    }
    Ok(None)
}
