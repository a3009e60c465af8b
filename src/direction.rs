use strum::VariantArray;

use crate::point::Point;

/// One of the four slide directions.
///
/// The discriminant order is load-bearing: fence bitmasks in the textual board
/// format assign bit `i` to variant `i`, and a clockwise quarter-turn is
/// `(index + 1) % 4`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Direction {
    /// Toward negative x.
    Left,
    /// Toward negative y.
    Up,
    /// Toward positive x.
    Right,
    /// Toward positive y.
    Down,
}

impl Direction {
    /// Unit displacement of one step in this direction.
    #[inline]
    pub fn delta(self) -> Point {
        match self {
            Self::Left => Point::new(-1, 0),
            Self::Up => Point::new(0, -1),
            Self::Right => Point::new(1, 0),
            Self::Down => Point::new(0, 1),
        }
    }

    /// The opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Rotate by `turns` signed clockwise quarter-turns.
    pub fn rotate90(self, turns: i32) -> Self {
        Self::VARIANTS[(self as usize + turns.rem_euclid(4) as usize) % 4]
    }

    /// The outgoing direction after hitting a bumper of the given slant.
    ///
    /// Each slant is a fixed mapping on the incoming direction, and each is
    /// its own inverse, as mirror reflections are.
    pub fn deflected(self, slant: bool) -> Self {
        if slant {
            // the "/" mirror
            match self {
                Self::Up => Self::Right,
                Self::Left => Self::Down,
                Self::Right => Self::Up,
                Self::Down => Self::Left,
            }
        } else {
            // the "\" mirror
            match self {
                Self::Up => Self::Left,
                Self::Right => Self::Down,
                Self::Left => Self::Up,
                Self::Down => Self::Right,
            }
        }
    }
}
