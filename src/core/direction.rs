//! Compass headings, robot-relative directions and the rotation algebra
//! between them.
//!
//! Headings form the cyclic group Z/4 in clockwise order
//! (North=0, East=1, South=2, West=3). Relative directions are offsets
//! into that group.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MazeError;

const ABSOLUTE_NAMES: &str = "NORTH, EAST, SOUTH, WEST";
const RELATIVE_NAMES: &str = "AHEAD, BEHIND, LEFT, RIGHT";
const ALL_NAMES: &str = "NORTH, EAST, SOUTH, WEST, AHEAD, BEHIND, LEFT, RIGHT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn index(self) -> u8 {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Wraps modulo 4.
    pub fn from_index(i: u8) -> Self {
        Self::ALL[usize::from(i % 4)]
    }

    fn rotate(self, quarter_turns: u8) -> Self {
        Self::from_index(self.index() + quarter_turns)
    }

    /// Absolute heading of `rel` when facing `self`.
    pub fn resolve(self, rel: Relative) -> Heading {
        self.rotate(rel.offset())
    }

    /// Which relative direction points at `target` when facing `self`.
    pub fn relative_to(self, target: Heading) -> Relative {
        Relative::from_offset(target.index() + 4 - self.index())
    }

    pub fn opposite(self) -> Heading {
        self.resolve(Relative::Behind)
    }

    /// Grid offset; y grows southwards.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::North => "NORTH",
            Heading::East => "EAST",
            Heading::South => "SOUTH",
            Heading::West => "WEST",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Heading {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Direction>() {
            Ok(Direction::Absolute(h)) => Ok(h),
            _ => Err(MazeError::invalid_direction(s, ABSOLUTE_NAMES)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relative {
    Ahead,
    Behind,
    Left,
    Right,
}

impl Relative {
    pub const ALL: [Relative; 4] = [
        Relative::Ahead,
        Relative::Right,
        Relative::Behind,
        Relative::Left,
    ];

    /// Clockwise quarter turns.
    pub fn offset(self) -> u8 {
        match self {
            Relative::Ahead => 0,
            Relative::Right => 1,
            Relative::Behind => 2,
            Relative::Left => 3,
        }
    }

    fn from_offset(q: u8) -> Self {
        Self::ALL[usize::from(q % 4)]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relative::Ahead => "AHEAD",
            Relative::Behind => "BEHIND",
            Relative::Left => "LEFT",
            Relative::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Relative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relative {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Direction>() {
            Ok(Direction::Relative(r)) => Ok(r),
            _ => Err(MazeError::invalid_direction(s, RELATIVE_NAMES)),
        }
    }
}

/// Any of the eight direction names accepted at the text boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Absolute(Heading),
    Relative(Relative),
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Absolute(h) => h.as_str(),
            Direction::Relative(r) => r.as_str(),
        }
    }

    /// Absolute heading this direction denotes when facing `facing`.
    pub fn resolve(self, facing: Heading) -> Heading {
        match self {
            Direction::Absolute(h) => h,
            Direction::Relative(r) => facing.resolve(r),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = match s.to_ascii_uppercase().as_str() {
            "NORTH" => Direction::Absolute(Heading::North),
            "EAST" => Direction::Absolute(Heading::East),
            "SOUTH" => Direction::Absolute(Heading::South),
            "WEST" => Direction::Absolute(Heading::West),
            "AHEAD" => Direction::Relative(Relative::Ahead),
            "BEHIND" => Direction::Relative(Relative::Behind),
            "LEFT" => Direction::Relative(Relative::Left),
            "RIGHT" => Direction::Relative(Relative::Right),
            _ => return Err(MazeError::invalid_direction(s, ALL_NAMES)),
        };
        Ok(d)
    }
}

impl From<Heading> for Direction {
    fn from(h: Heading) -> Self {
        Direction::Absolute(h)
    }
}

impl From<Relative> for Direction {
    fn from(r: Relative) -> Self {
        Direction::Relative(r)
    }
}
