use strum::VariantArray;

use crate::board::ParseBoardError;
use crate::direction::Direction;

/// Robot (and bumper) colors; a robot's index in a configuration is its
/// color's index in [`Color::VARIANTS`].
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Color {
    /// Robot 0.
    Yellow,
    /// Robot 1.
    Green,
    /// Robot 2.
    Red,
    /// Robot 3.
    Blue,
}

impl Color {
    /// The lowercase bumper glyph for this color.
    fn glyph(self) -> char {
        match self {
            Self::Yellow => 'y',
            Self::Green => 'g',
            Self::Red => 'r',
            Self::Blue => 'u',
        }
    }

    fn from_glyph(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'y' => Some(Self::Yellow),
            'g' => Some(Self::Green),
            'r' => Some(Self::Red),
            'u' => Some(Self::Blue),
            _ => None,
        }
    }
}

/// Goal chip symbols. The warp marker is not a symbol; see [`Goal::Warp`].
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Symbol {
    /// Encoded as goal values 0..=3.
    Star,
    /// Encoded as goal values 4..=7.
    Moon,
    /// Encoded as goal values 8..=11.
    Gear,
    /// Encoded as goal values 12..=15.
    Saturn,
}

/// A target marker on a cell.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Goal {
    /// A colored chip, satisfied only by the robot of its color.
    Chip {
        /// The robot that must reach this chip.
        color: Color,
        /// Which of the color's four chips this is.
        symbol: Symbol,
    },
    /// The warp tile, satisfied by any robot.
    Warp,
}

impl Goal {
    /// Decode from the integer form `symbol * 4 + color`; 16 is the warp
    /// tile. Returns `None` for values above 16.
    pub fn from_int(value: u8) -> Option<Self> {
        match value {
            0..=15 => Some(Self::Chip {
                color: Color::VARIANTS[usize::from(value % 4)],
                symbol: Symbol::VARIANTS[usize::from(value / 4)],
            }),
            16 => Some(Self::Warp),
            _ => None,
        }
    }

    /// Encode to the integer form `symbol * 4 + color`; the warp tile is 16.
    pub fn to_int(self) -> u8 {
        match self {
            Self::Chip { color, symbol } => symbol as u8 * 4 + color as u8,
            Self::Warp => 16,
        }
    }

    /// Whether the robot at `index` may satisfy this goal.
    pub fn matches(self, index: usize) -> bool {
        match self {
            Self::Chip { color, .. } => color as usize == index,
            Self::Warp => true,
        }
    }

    pub(crate) fn glyph(self) -> char {
        match self {
            Self::Chip { .. } => char::from_digit(u32::from(self.to_int()), 16)
                .unwrap()
                .to_ascii_uppercase(),
            Self::Warp => 'W',
        }
    }

    fn from_glyph(c: char) -> Option<Self> {
        if c == 'W' {
            return Some(Self::Warp);
        }
        // only digits and uppercase hex name goals; lowercase letters are
        // bumper glyphs
        if c.is_ascii_digit() || c.is_ascii_uppercase() {
            return c.to_digit(16).and_then(|v| Self::from_int(v as u8));
        }
        None
    }
}

/// A diagonal deflector occupying a cell.
///
/// Transparent to the robot of its own color, redirecting to every other
/// robot. No robot may end a slide resting on one.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Bumper {
    /// The one robot that passes through unaffected.
    pub color: Color,
    /// Mirror orientation; `true` is the "/" mirror. Flips under odd board
    /// rotations.
    pub slant: bool,
}

impl Bumper {
    pub(crate) fn glyph(self) -> char {
        if self.slant {
            self.color.glyph().to_ascii_uppercase()
        } else {
            self.color.glyph()
        }
    }

    fn from_glyph(c: char) -> Option<Self> {
        Color::from_glyph(c).map(|color| Bumper {
            color,
            slant: c.is_ascii_uppercase(),
        })
    }
}

/// One square of a board: four fence flags plus at most one of a goal or a
/// bumper.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    fences: [bool; 4],
    /// The goal marker on this cell, if any.
    pub goal: Option<Goal>,
    /// The bumper on this cell, if any.
    pub bumper: Option<Bumper>,
}

impl Cell {
    /// Whether a fence lines the given side of this cell.
    #[inline]
    pub fn fence(&self, direction: Direction) -> bool {
        self.fences[direction as usize]
    }

    /// Set or clear the fence on one side of this cell.
    pub fn set_fence(&mut self, direction: Direction, value: bool) {
        self.fences[direction as usize] = value;
    }

    /// The fence flags as the 4-bit mask of the textual format, bit `i` for
    /// direction `i`.
    pub fn fence_mask(&self) -> u8 {
        Direction::VARIANTS
            .iter()
            .filter(|dir| self.fence(**dir))
            .fold(0, |mask, dir| mask | 1 << *dir as usize)
    }

    /// Whether all four sides are fenced off.
    pub fn fully_fenced(&self) -> bool {
        self.fences.iter().all(|f| *f)
    }

    /// Decode a cell from its two text-format characters: a goal/bumper glyph
    /// and a fence mask nibble, either of which may be a space.
    pub(crate) fn from_glyphs(marker: char, fences: char) -> Result<Self, ParseBoardError> {
        let mut cell = Cell::default();

        if marker != ' ' {
            if let Some(goal) = Goal::from_glyph(marker) {
                cell.goal = Some(goal);
            } else if let Some(bumper) = Bumper::from_glyph(marker) {
                cell.bumper = Some(bumper);
            } else {
                return Err(ParseBoardError::BadGlyph { glyph: marker });
            }
        }

        if fences != ' ' {
            let mask = fences
                .to_digit(16)
                .ok_or(ParseBoardError::BadFenceMask { glyph: fences })?;
            for dir in Direction::VARIANTS {
                cell.set_fence(*dir, mask & 1 << *dir as usize != 0);
            }
        }

        Ok(cell)
    }

    /// The two text-format characters for this cell.
    pub(crate) fn glyphs(&self) -> [char; 2] {
        let marker = match (self.goal, self.bumper) {
            (Some(goal), _) => goal.glyph(),
            (None, Some(bumper)) => bumper.glyph(),
            (None, None) => ' ',
        };
        let mask = self.fence_mask();
        let fences = match mask {
            0 => ' ',
            _ => char::from_digit(u32::from(mask), 16)
                .unwrap()
                .to_ascii_uppercase(),
        };
        [marker, fences]
    }

    /// This cell after `turns` clockwise quarter-turns: fences rotate with
    /// the cell, the goal is unchanged, and a bumper's slant flips on odd
    /// rotation counts.
    pub fn rotated(&self, turns: i32) -> Self {
        let mut cell = Cell {
            fences: [false; 4],
            goal: self.goal,
            bumper: self.bumper,
        };
        for dir in Direction::VARIANTS {
            cell.set_fence(dir.rotate90(turns), self.fence(*dir));
        }
        if let Some(bumper) = cell.bumper.as_mut() {
            if turns.rem_euclid(2) == 1 {
                bumper.slant = !bumper.slant;
            }
        }
        cell
    }
}
