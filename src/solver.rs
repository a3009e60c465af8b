use std::collections::{HashMap, VecDeque};

use log::{debug, trace};
use strum::VariantArray;
use thiserror::Error;

use crate::board::Board;
use crate::cell::{Color, Goal};
use crate::direction::Direction;
use crate::point::Point;
use crate::rook::RookField;
use crate::state::{RobotState, StateEncoder, MAX_ROBOTS};

/// Ply ceiling for the search: configurations whose depth-plus-heuristic
/// bound exceeds this are abandoned, and no solution longer than this is ever
/// reported.
pub const MAX_MOVE: u32 = 25;

/// Checkable precondition failures of [`Board::solve`].
///
/// Everything else about the inputs (robots on the board, distinct cells) is
/// a caller contract; search exhaustion is the `Ok(None)` outcome, not an
/// error.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum SolveError {
    /// The goal to solve for appears nowhere on the board.
    #[error("goal {0:?} is not on the board")]
    GoalNotFound(Goal),
    /// The robot list was empty or larger than the supported maximum.
    #[error("unsupported robot count {0}, expected 1 to {MAX_ROBOTS}")]
    RobotCount(usize),
}

/// One step of a solution: the cell a robot left, the direction it slid, and
/// which robot it was.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RobotMove {
    /// The mover's position before the slide.
    pub origin: Point,
    /// The direction it slid.
    pub direction: Direction,
    /// The mover's identity, resolved during solution replay.
    pub color: Color,
}

/// Predecessor record in the visited table: how a state was first reached.
struct PrevMove {
    origin: Point,
    direction: Direction,
    prev: u64,
}

/// Frontier of pending states, bucketed by priority with FIFO order inside a
/// bucket so that equal-priority states expand in insertion order.
struct BucketQueue {
    buckets: Vec<VecDeque<RobotState>>,
    lowest: usize,
    len: usize,
}

impl BucketQueue {
    fn new() -> Self {
        Self {
            buckets: (0..=MAX_MOVE as usize).map(|_| VecDeque::new()).collect(),
            lowest: 0,
            len: 0,
        }
    }

    fn push(&mut self, priority: usize, state: RobotState) {
        self.buckets[priority].push_back(state);
        self.lowest = self.lowest.min(priority);
        self.len += 1;
    }

    fn pop(&mut self) -> Option<RobotState> {
        if self.len == 0 {
            return None;
        }
        while self.buckets[self.lowest].is_empty() {
            self.lowest += 1;
        }
        self.len -= 1;
        self.buckets[self.lowest].pop_front()
    }
}

impl Board {
    /// Find a shortest sequence of slides that delivers an eligible robot
    /// onto the cell carrying `goal`.
    ///
    /// `robots[i]` is robot `i`'s starting cell; a chip goal is satisfied
    /// only by its color's robot, the warp tile by any robot. Returns
    /// `Ok(None)` when no solution exists within [`MAX_MOVE`] moves.
    ///
    /// With `early_out = Some(k)` the search is depth-bounded: it reports,
    /// by returning a solution, exactly whether a solution of length `<= k`
    /// exists, and never explores deeper. A configuration that already
    /// satisfies the goal returns the empty solution, or `None` under
    /// `early_out`, where a zero-move solution says nothing useful about
    /// puzzle difficulty.
    pub fn solve(
        &self,
        goal: Goal,
        robots: &[Point],
        early_out: Option<u32>,
    ) -> Result<Option<Vec<RobotMove>>, SolveError> {
        if robots.is_empty() || robots.len() > MAX_ROBOTS {
            return Err(SolveError::RobotCount(robots.len()));
        }
        let goal_pos = self.find_goal(goal).ok_or(SolveError::GoalNotFound(goal))?;
        debug_assert!(robots.iter().all(|robot| self.contains(*robot)));

        debug!(
            "solving goal {:?} at {} for {} robots, early_out {:?}",
            goal,
            goal_pos,
            robots.len(),
            early_out
        );

        if robots
            .iter()
            .enumerate()
            .any(|(i, robot)| goal.matches(i) && *robot == goal_pos)
        {
            return Ok(match early_out {
                Some(_) => None,
                None => Some(Vec::new()),
            });
        }
        if early_out == Some(0) {
            // nothing deeper than the zero-move check above may be reported
            return Ok(None);
        }

        let encoder = StateEncoder::for_board(self, robots.len());
        let baked = self.bake(robots.len());
        let fields: Vec<Option<RookField>> = (0..robots.len())
            .map(|i| goal.matches(i).then(|| RookField::build(self, goal_pos, i)))
            .collect();
        // lower bound for a configuration: the best eligible robot's field
        // value; None when no eligible robot can reach the goal at all
        let heuristic = |positions: &[Point]| -> Option<u32> {
            fields
                .iter()
                .zip(positions)
                .filter_map(|(field, position)| field.as_ref()?.distance(*position))
                .min()
        };

        let mut visited: HashMap<u64, Option<PrevMove>> = HashMap::new();
        visited.insert(encoder.key(robots), None);

        let mut frontier = BucketQueue::new();
        match heuristic(robots) {
            Some(bound) if bound <= MAX_MOVE => {
                frontier.push(bound as usize, RobotState::new(robots.to_vec()));
            }
            _ => return Ok(None),
        }

        let mut expanded = 0u64;
        while let Some(state) = frontier.pop() {
            expanded += 1;
            let state_key = encoder.key(&state.robots);

            for mover in 0..state.robots.len() {
                for direction in Direction::VARIANTS.iter().copied() {
                    let resting = baked.fast_move(&state.robots, mover, direction);
                    if resting == state.robots[mover] {
                        continue;
                    }

                    let mut next_robots = state.robots.clone();
                    next_robots[mover] = resting;
                    let key = encoder.key(&next_robots);
                    if visited.contains_key(&key) {
                        continue;
                    }

                    let depth = state.depth + 1;
                    visited.insert(
                        key,
                        Some(PrevMove {
                            origin: state.robots[mover],
                            direction,
                            prev: state_key,
                        }),
                    );

                    if goal.matches(mover) && resting == goal_pos {
                        let moves = self.replay_solution(robots, key, &visited);
                        trace!(
                            "solution of {} moves after {} expansions, {} states seen",
                            moves.len(),
                            expanded,
                            visited.len()
                        );
                        return Ok(Some(moves));
                    }

                    if early_out.is_some_and(|limit| depth >= limit) {
                        continue;
                    }
                    let Some(bound) = heuristic(&next_robots) else {
                        continue;
                    };
                    let priority = depth + bound;
                    if priority > MAX_MOVE {
                        continue;
                    }
                    frontier.push(priority as usize, RobotState {
                        robots: next_robots,
                        depth,
                    });
                }
            }
        }

        debug!(
            "frontier exhausted after {} expansions, {} states seen",
            expanded,
            visited.len()
        );
        Ok(None)
    }

    /// Walk the visited table's predecessor chain back from the goal state,
    /// then replay the move list forward against the original robot order to
    /// resolve which robot made each slide.
    fn replay_solution(
        &self,
        original: &[Point],
        final_key: u64,
        visited: &HashMap<u64, Option<PrevMove>>,
    ) -> Vec<RobotMove> {
        let mut chain = Vec::new();
        let mut key = final_key;
        while let Some(Some(prev)) = visited.get(&key) {
            chain.push((prev.origin, prev.direction));
            key = prev.prev;
        }
        chain.reverse();

        let mut robots = original.to_vec();
        let mut moves = Vec::with_capacity(chain.len());
        for (origin, direction) in chain {
            let mover = robots
                .iter()
                .position(|robot| *robot == origin)
                .expect("every solution move starts at some robot's cell");
            robots[mover] = self.simulate_move(&robots, mover, direction);
            moves.push(RobotMove {
                origin,
                direction,
                color: Color::VARIANTS[mover],
            });
        }
        moves
    }
}
