//! Square cell grid and the solvable-maze generator.

use core::fmt;
use core::str::FromStr;
use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::Heading;
use crate::error::MazeError;
use crate::identifier::MazeParams;
use crate::prng::Prng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    Wall,
    Empty,
    Visited,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cell::Wall => "WALL",
            Cell::Empty => "EMPTY",
            Cell::Visited => "BEEN_THERE",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WALL" => Ok(Cell::Wall),
            "EMPTY" => Ok(Cell::Empty),
            "BEEN_THERE" => Ok(Cell::Visited),
            _ => Err(format!("unknown cell status '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: u32) -> Self {
        let n = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![Cell::Empty; n],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major cell states.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn start(&self) -> Position {
        Position::ORIGIN
    }

    pub fn target(&self) -> Position {
        let last = self.size.saturating_sub(1);
        Position::new(last, last)
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        let n = i64::from(self.size);
        (0..n).contains(&x) && (0..n).contains(&y)
    }

    fn idx(&self, p: Position) -> usize {
        (p.y as usize) * (self.size as usize) + (p.x as usize)
    }

    /// Out-of-bounds positions read as walls.
    pub fn get(&self, p: Position) -> Cell {
        if p.x >= self.size || p.y >= self.size {
            return Cell::Wall;
        }
        self.cells[self.idx(p)]
    }

    pub(crate) fn set(&mut self, p: Position, cell: Cell) {
        if p.x < self.size && p.y < self.size {
            let i = self.idx(p);
            self.cells[i] = cell;
        }
    }

    /// The in-bounds neighbour of `p` towards `heading`, if any.
    pub fn neighbor(&self, p: Position, heading: Heading) -> Option<Position> {
        let (dx, dy) = heading.delta();
        let nx = i64::from(p.x) + dx;
        let ny = i64::from(p.y) + dy;
        if self.in_bounds(nx, ny) {
            Some(Position::new(nx as u32, ny as u32))
        } else {
            None
        }
    }

    /// Turn every `Visited` mark back into `Empty`; walls are untouched.
    pub(crate) fn clear_visited(&mut self) {
        for c in self.cells.iter_mut() {
            if *c == Cell::Visited {
                *c = Cell::Empty;
            }
        }
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// Wall mask in row-major order; identical for grids generated from the
    /// same parameters regardless of where the robot has been.
    pub fn wall_layout(&self) -> Vec<bool> {
        self.cells.iter().map(|c| c.is_wall()).collect()
    }
}

/// Breadth-first search from the start to the target over non-wall cells.
pub fn is_solvable(grid: &Grid) -> bool {
    let start = grid.start();
    let target = grid.target();
    if grid.get(start).is_wall() || grid.get(target).is_wall() {
        return false;
    }

    let mut seen = vec![false; grid.cells.len()];
    let mut queue = VecDeque::new();
    seen[grid.idx(start)] = true;
    queue.push_back(start);

    while let Some(p) = queue.pop_front() {
        if p == target {
            return true;
        }
        for h in Heading::ALL {
            let Some(n) = grid.neighbor(p, h) else {
                continue;
            };
            let i = grid.idx(n);
            if !seen[i] && !grid.cells[i].is_wall() {
                seen[i] = true;
                queue.push_back(n);
            }
        }
    }
    false
}

/// Generate a grid with a guaranteed start-to-target path.
///
/// A single [`Prng`] seeded from `params.seed` drives every attempt, and
/// cells are drawn in row-major order, so equal parameters always yield the
/// same grid.
pub fn generate(params: &MazeParams, max_attempts: u32) -> Result<Grid, MazeError> {
    params.validate().map_err(MazeError::InvalidConfig)?;

    let p = params.wall_probability();
    let mut rng = Prng::new(params.seed);

    for attempt in 1..=max_attempts {
        let mut grid = Grid::new(params.size);
        for y in 0..params.size {
            for x in 0..params.size {
                if rng.chance(p) {
                    grid.set(Position::new(x, y), Cell::Wall);
                }
            }
        }
        let (start, target) = (grid.start(), grid.target());
        grid.set(start, Cell::Empty);
        grid.set(target, Cell::Empty);

        if is_solvable(&grid) {
            tracing::debug!(id = %params, attempt, "generated solvable maze");
            grid.set(start, Cell::Visited);
            return Ok(grid);
        }
        tracing::debug!(id = %params, attempt, "maze attempt not solvable");
    }

    Err(MazeError::GenerationFailure {
        attempts: max_attempts,
        size: params.size,
        wall_probability: p,
    })
}

/// Generate many independent grids. Each uses its own generator, so the
/// result is the same with or without the `parallel` feature.
pub fn generate_many(params: &[MazeParams], max_attempts: u32) -> Vec<Result<Grid, MazeError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        params
            .par_iter()
            .map(|p| generate(p, max_attempts))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        params.iter().map(|p| generate(p, max_attempts)).collect()
    }
}
