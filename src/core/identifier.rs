//! Maze identifiers: a compact `"<size>-<wall%>-<seed>"` encoding of the
//! generation parameters.
//!
//! Wall probability travels as an integer percentage so the identifier stays
//! exact and easy to type; decoding divides by 100 again.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// Largest accepted wall percentage.
pub const MAX_WALL_PERCENT: u8 = 100;

/// Largest accepted grid side length.
pub const MAX_SIZE: u32 = 1024;

/// Seeds picked from the clock are folded into this range.
const CLOCK_SEED_MODULUS: u64 = 100_000;

/// Everything needed to regenerate a maze bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeParams {
    pub size: u32,
    pub wall_percent: u8,
    pub seed: u64,
}

impl MazeParams {
    pub fn new(size: u32, wall_percent: u8, seed: u64) -> Self {
        Self {
            size,
            wall_percent,
            seed,
        }
    }

    /// Build from a probability in [0, 1]. The percentage is truncated, so
    /// `0.257` becomes 25%.
    pub fn from_probability(size: u32, wall_probability: f64, seed: u64) -> Self {
        let pct = (wall_probability.clamp(0.0, 1.0) * 100.0) as u8;
        Self::new(size, pct, seed)
    }

    /// Fresh parameters with a seed taken from the system clock.
    pub fn random(size: u32, wall_probability: f64) -> Self {
        Self::from_probability(size, wall_probability, clock_seed())
    }

    pub fn wall_probability(&self) -> f64 {
        f64::from(self.wall_percent) / 100.0
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.size == 0 {
            return Err("size must be >= 1");
        }
        if self.size > MAX_SIZE {
            return Err("size must be <= 1024");
        }
        if self.wall_percent > MAX_WALL_PERCENT {
            return Err("wall percentage must be in [0, 100]");
        }
        Ok(())
    }

    pub fn id(&self) -> String {
        encode(self.size, self.wall_percent, self.seed)
    }
}

impl fmt::Display for MazeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.size, self.wall_percent, self.seed)
    }
}

impl FromStr for MazeParams {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

pub fn encode(size: u32, wall_percent: u8, seed: u64) -> String {
    format!("{size}-{wall_percent}-{seed}")
}

pub fn decode(id: &str) -> Result<MazeParams, MazeError> {
    let parts: Vec<&str> = id.split('-').collect();
    if parts.len() != 3 {
        return Err(MazeError::malformed(
            id,
            format!("expected 3 segments, found {}", parts.len()),
        ));
    }

    let size: u32 = parse_segment(id, parts[0], "size")?;
    let wall_percent: u8 = parse_segment(id, parts[1], "wall percentage")?;
    let seed: u64 = parse_segment(id, parts[2], "seed")?;

    let params = MazeParams::new(size, wall_percent, seed);
    params
        .validate()
        .map_err(|reason| MazeError::malformed(id, reason))?;
    Ok(params)
}

fn parse_segment<T: FromStr>(id: &str, segment: &str, what: &str) -> Result<T, MazeError> {
    // `u32::from_str` accepts a leading '+', which would break the round trip.
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MazeError::malformed(
            id,
            format!("{what} '{segment}' is not an unsigned integer"),
        ));
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(MazeError::malformed(
            id,
            format!("{what} '{segment}' has a leading zero"),
        ));
    }
    segment
        .parse()
        .map_err(|_| MazeError::malformed(id, format!("{what} '{segment}' is out of range")))
}

fn clock_seed() -> u64 {
    let micros = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or(0);
    (micros % u128::from(CLOCK_SEED_MODULUS)) as u64
}
