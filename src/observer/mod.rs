use crate::direction::Heading;
use crate::engine::{MazeEvent, RobotMaze};
use crate::grid::{Cell, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A read-only snapshot of the maze and robot, everything a renderer needs.
///
/// Design intent:
/// - Observers cannot mutate or steer the robot.
/// - Snapshotting is *on-demand* and allocates; commands never build one.
/// - Cells are row-major: index `y * size + x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeSnapshot {
    pub maze_id: String,
    pub size: u32,
    pub cells: Vec<Cell>,

    pub robot: Position,
    pub heading: Heading,
    pub target: Position,

    pub run_count: u32,
    pub step_count: u32,
    pub remaining_fuel: u32,
    pub out_of_fuel: bool,
    pub at_target: bool,

    pub console: Vec<String>,
}

impl MazeSnapshot {
    pub fn cell(&self, p: Position) -> Cell {
        if p.x >= self.size || p.y >= self.size {
            return Cell::Wall;
        }
        let i = (p.y as usize) * (self.size as usize) + (p.x as usize);
        self.cells.get(i).copied().unwrap_or(Cell::Wall)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub struct MazeAdapter<'a> {
    maze: &'a RobotMaze,
}

impl<'a> MazeAdapter<'a> {
    pub fn new(maze: &'a RobotMaze) -> Self {
        Self { maze }
    }

    pub fn snapshot(&self) -> MazeSnapshot {
        let grid = self.maze.grid();
        MazeSnapshot {
            maze_id: self.maze.maze_id(),
            size: grid.size(),
            cells: grid.cells().to_vec(),

            robot: self.maze.position(),
            heading: self.maze.heading(),
            target: self.maze.target(),

            run_count: self.maze.run_count(),
            step_count: self.maze.step_count(),
            remaining_fuel: self.maze.remaining_fuel(),
            out_of_fuel: self.maze.is_out_of_fuel(),
            at_target: self.maze.at_target(),

            console: self.maze.console().to_vec(),
        }
    }
}

/// Notified after every state-changing command and reset.
///
/// The maze is only borrowed immutably; take a [`MazeAdapter`] snapshot if
/// the state must outlive the callback.
pub trait MazeObserver {
    fn on_event(&mut self, event: &MazeEvent, maze: &RobotMaze);
}
