//! # robot_maze
//!
//! Reproducible, always-solvable grid mazes with a fuel-limited robot, for
//! pathfinding exercises.
//!
//! A maze is fully described by its identifier `"<size>-<wall%>-<seed>"`.
//! The same identifier always rebuilds the same wall layout, and every
//! generated maze has a path from the top-left start to the bottom-right
//! target.
//!
//! ## Quick Start
//!
//! ```
//! use robot_maze::prelude::*;
//!
//! let mut maze = RobotMaze::from_id("5-0-7", MazeConfig::default()).unwrap();
//!
//! assert_eq!(maze.sense(Relative::Ahead), Cell::Empty);
//! for _ in 0..4 {
//!     maze.move_forward();
//! }
//! maze.turn(Relative::Left);
//! for _ in 0..4 {
//!     maze.move_forward();
//! }
//! assert!(maze.at_target());
//! assert_eq!(maze.step_count(), 9);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialize snapshots and load JSON configuration
//! - `cli` (default): Build the `robot-maze-cli` binary
//! - `parallel`: Generate batches of mazes on rayon
//!
//! ## Modules
//!
//! - [`identifier`]: Maze id codec
//! - [`direction`]: Headings and relative directions
//! - [`grid`]: Cells and the solvable-maze generator
//! - [`engine`]: The robot command API
//! - [`observer`]: Read-only snapshots and change notification

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/identifier.rs"]
pub mod identifier;

#[path = "core/direction.rs"]
pub mod direction;

#[path = "core/grid.rs"]
pub mod grid;

#[path = "core/robot.rs"]
pub mod robot;

#[path = "core/console.rs"]
pub mod console;

#[path = "core/history.rs"]
pub mod history;

#[path = "core/engine.rs"]
pub mod engine;

pub mod config;
pub mod error;
pub mod observer;

/// Prelude module for convenient imports.
///
/// ```
/// use robot_maze::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::MazeConfig;
    pub use crate::direction::{Direction, Heading, Relative};
    pub use crate::engine::{
        verify_reproducibility, Command, CommandOutcome, CommandResponse, MazeEvent, RobotMaze,
    };
    pub use crate::error::MazeError;
    pub use crate::grid::{Cell, Grid, Position};
    pub use crate::identifier::MazeParams;
    pub use crate::observer::{MazeAdapter, MazeObserver, MazeSnapshot};
    pub use crate::robot::RobotStatus;
}
