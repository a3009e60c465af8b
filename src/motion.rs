//! The movement simulator: one robot sliding until blocked, with bumper
//! deflection chains and loop protection.

use crate::board::Board;
use crate::direction::Direction;
use crate::point::Point;

/// Outcome of one simulated slide.
pub(crate) struct Slide {
    /// Where the robot came to rest; equals the origin for a blocked,
    /// nullified, or looping move.
    pub(crate) resting: Point,
    /// Whether any bumper changed the slide's direction. A deflected slide
    /// must not be served from the baked table, since another robot could
    /// intercept it mid-chain.
    pub(crate) deflected: bool,
}

impl Board {
    /// Slide the robot at `robots[mover]` in `direction` and return its
    /// resting point.
    ///
    /// The slide stops at fences, the board edge, and other robots. A bumper
    /// whose color differs from the mover's redirects the slide; one of the
    /// mover's own color is passed through. A slide that would come to rest
    /// on any bumper cell is nullified and the origin is returned, as is a
    /// slide whose deflection chain loops back to its starting cell.
    ///
    /// Pure: identical inputs give identical outputs, and nothing on the
    /// board or in `robots` is written.
    pub fn simulate_move(&self, robots: &[Point], mover: usize, direction: Direction) -> Point {
        self.slide_from(robots[mover], mover, direction, robots, false, None)
            .resting
    }

    /// [`simulate_move`](Board::simulate_move), also reporting the waypoints
    /// a renderer needs: the origin, every cell where a bumper changed the
    /// direction, and the resting cell. A move with no effect reports an
    /// empty path.
    pub fn simulate_move_recorded(
        &self,
        robots: &[Point],
        mover: usize,
        direction: Direction,
    ) -> (Point, Vec<Point>) {
        let mut path = Vec::new();
        let resting = self
            .slide_from(robots[mover], mover, direction, robots, false, Some(&mut path))
            .resting;
        (resting, path)
    }

    /// The slide rule shared by the public simulator, the baking pass, and
    /// the distance-field builder.
    ///
    /// `origin` is the starting cell and `color` the sliding robot's identity
    /// (for bumper transparency); `blockers` are the occupied cells that stop
    /// the slide. With `allow_invalid_endpoint` the bumper-resting
    /// nullification is skipped, which the distance field needs.
    pub(crate) fn slide_from(
        &self,
        origin: Point,
        color: usize,
        mut direction: Direction,
        blockers: &[Point],
        allow_invalid_endpoint: bool,
        mut path: Option<&mut Vec<Point>>,
    ) -> Slide {
        let mut pos = origin;
        let mut delta = direction.delta();
        let mut deflected = false;

        if let Some(p) = path.as_deref_mut() {
            p.clear();
            p.push(origin);
        }

        loop {
            let next = pos + delta;

            // Deflection is a bijection on directions per cell, so an endless
            // bumper chain must come back through the starting cell; stopping
            // there turns the loop into a no-op move.
            if next == origin {
                if let Some(p) = path.as_deref_mut() {
                    p.clear();
                }
                return Slide {
                    resting: origin,
                    deflected,
                };
            }

            let blocked =
                self.is_move_blocked(pos, next) || blockers.iter().any(|robot| *robot == next);

            if blocked {
                // A robot may not come to rest on a bumper cell, its own
                // color included; the whole move is taken back.
                if self.cell(pos).bumper.is_some() && !allow_invalid_endpoint {
                    if let Some(p) = path.as_deref_mut() {
                        p.clear();
                    }
                    return Slide {
                        resting: origin,
                        deflected,
                    };
                }
                break;
            }

            pos = next;
            if let Some(bumper) = self.cell(pos).bumper {
                if bumper.color as usize != color {
                    if let Some(p) = path.as_deref_mut() {
                        p.push(pos);
                    }
                    deflected = true;
                    direction = direction.deflected(bumper.slant);
                    delta = direction.delta();
                }
            }
        }

        if let Some(p) = path {
            if p.len() == 1 && p[0] == pos {
                // never left the origin
                p.clear();
            } else {
                p.push(pos);
            }
        }

        Slide {
            resting: pos,
            deflected,
        }
    }

    /// Every cell a lone robot of `color` enters when sliding from `origin`,
    /// deflection segments included, resting cell last. Bumper endpoints are
    /// permitted. Used to grow the rook distance field outward.
    pub(crate) fn slide_cells(
        &self,
        origin: Point,
        color: usize,
        mut direction: Direction,
    ) -> Vec<Point> {
        let mut cells = Vec::new();
        let mut pos = origin;
        let mut delta = direction.delta();

        loop {
            let next = pos + delta;
            if next == origin || self.is_move_blocked(pos, next) {
                break;
            }

            pos = next;
            cells.push(pos);
            if let Some(bumper) = self.cell(pos).bumper {
                if bumper.color as usize != color {
                    direction = direction.deflected(bumper.slant);
                    delta = direction.delta();
                }
            }
        }

        cells
    }
}
