//! The simulation: one maze, one robot, and the commands that drive it.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MazeConfig;
use crate::console::Console;
use crate::direction::{Heading, Relative};
use crate::error::MazeError;
use crate::grid::{self, Cell, Grid, Position};
use crate::history::{Frame, FrameHistory};
use crate::identifier::{self, MazeParams};
use crate::observer::{MazeAdapter, MazeObserver, MazeSnapshot};
use crate::robot::{FuelCharge, Robot, RobotStatus};

const MSG_OUT_OF_FUEL: &str = "I can't do that... I'm out of fuel! Restart and try again.";
const MSG_BUMP: &str = "I tried to walk forward... ow that's a wall!";

/// What a state-changing command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommandOutcome {
    /// Heading changed (or deliberately stayed the same).
    Turned,
    Moved,
    /// Moved onto the target cell.
    ReachedTarget,
    /// Wall or boundary ahead; the step was still paid for.
    Blocked,
    /// This command used the last unit of fuel and had no effect.
    FuelExhausted,
    /// Already out of fuel; nothing happened.
    OutOfFuel,
}

impl CommandOutcome {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            CommandOutcome::Turned | CommandOutcome::Moved | CommandOutcome::ReachedTarget
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommandOutcome::Turned => "turned",
            CommandOutcome::Moved => "moved",
            CommandOutcome::ReachedTarget => "reached_target",
            CommandOutcome::Blocked => "blocked",
            CommandOutcome::FuelExhausted => "fuel_exhausted",
            CommandOutcome::OutOfFuel => "out_of_fuel",
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitted to observers after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MazeEvent {
    Created,
    Reset,
    Command(CommandOutcome),
}

/// One instruction of the text protocol, e.g. `turn left` or `sense:ahead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Sense(Relative),
    Turn(Relative),
    SetHeading(Heading),
    Move,
    Reset,
}

impl FromStr for Command {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == ':')
            .filter(|p| !p.is_empty());
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(MazeError::UnknownCommand(s.to_string()));
        }

        let cmd = match (verb.as_str(), arg) {
            ("move", None) => Command::Move,
            ("reset", None) => Command::Reset,
            ("sense", Some(d)) => Command::Sense(d.parse()?),
            ("turn", Some(d)) => Command::Turn(d.parse()?),
            ("heading" | "set_heading", Some(d)) => Command::SetHeading(d.parse()?),
            _ => return Err(MazeError::UnknownCommand(s.to_string())),
        };
        Ok(cmd)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Sense(r) => write!(f, "sense {r}"),
            Command::Turn(r) => write!(f, "turn {r}"),
            Command::SetHeading(h) => write!(f, "heading {h}"),
            Command::Move => f.write_str("move"),
            Command::Reset => f.write_str("reset"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResponse {
    Sensed(Cell),
    Outcome(CommandOutcome),
    Reset,
}

impl fmt::Display for CommandResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResponse::Sensed(c) => write!(f, "{c}"),
            CommandResponse::Outcome(o) => write!(f, "{o}"),
            CommandResponse::Reset => f.write_str("reset"),
        }
    }
}

/// A generated maze together with the robot exploring it.
pub struct RobotMaze {
    params: MazeParams,
    config: MazeConfig,
    grid: Grid,
    robot: Robot,
    console: Console,
    history: FrameHistory,
    /// Step count at which the target was first reached this run.
    solved_in: Option<u32>,
    observers: Vec<Box<dyn MazeObserver + Send>>,
}

impl fmt::Debug for RobotMaze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotMaze")
            .field("params", &self.params)
            .field("robot", &self.robot)
            .field("solved_in", &self.solved_in)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl RobotMaze {
    /// A fresh maze using `config.size` and `config.wall_probability` and a
    /// clock-derived seed. Call [`RobotMaze::maze_id`] to get it back later.
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        config.validate().map_err(MazeError::InvalidConfig)?;
        let params = MazeParams::random(config.size, config.wall_probability);
        Self::from_params(params, config)
    }

    /// Rebuild the maze an identifier was issued for.
    pub fn from_id(id: &str, config: MazeConfig) -> Result<Self, MazeError> {
        let params = identifier::decode(id)?;
        Self::from_params(params, config)
    }

    pub fn from_params(params: MazeParams, config: MazeConfig) -> Result<Self, MazeError> {
        config.validate().map_err(MazeError::InvalidConfig)?;
        let grid = grid::generate(&params, config.max_attempts)?;

        let mut maze = Self {
            params,
            grid,
            robot: Robot::new(config.max_steps),
            console: Console::new(config.console_lines, config.message_width),
            history: FrameHistory::new(config.history_capacity),
            solved_in: None,
            observers: Vec::new(),
            config,
        };
        tracing::info!(id = %maze.params, walls = maze.grid.wall_count(), "maze ready");
        maze.capture(MazeEvent::Created);
        Ok(maze)
    }

    pub fn add_observer(&mut self, observer: Box<dyn MazeObserver + Send>) {
        self.observers.push(observer);
    }

    // ---- queries ---------------------------------------------------------

    /// What lies one cell away in `dir`. Never costs fuel and works in any
    /// state, including out of fuel.
    pub fn sense(&self, dir: Relative) -> Cell {
        let heading = self.robot.heading.resolve(dir);
        self.grid
            .neighbor(self.robot.position, heading)
            .map(|p| self.grid.get(p))
            .unwrap_or(Cell::Wall)
    }

    pub fn heading(&self) -> Heading {
        self.robot.heading()
    }

    pub fn position(&self) -> Position {
        self.robot.position()
    }

    pub fn target(&self) -> Position {
        self.grid.target()
    }

    pub fn at_target(&self) -> bool {
        self.robot.position() == self.grid.target()
    }

    pub fn maze_id(&self) -> String {
        self.params.id()
    }

    pub fn params(&self) -> &MazeParams {
        &self.params
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn remaining_fuel(&self) -> u32 {
        self.robot.remaining_fuel()
    }

    pub fn step_count(&self) -> u32 {
        self.robot.step_count()
    }

    pub fn run_count(&self) -> u32 {
        self.robot.run_count()
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.robot.is_out_of_fuel()
    }

    pub fn status(&self) -> RobotStatus {
        self.robot.status()
    }

    pub fn solved_in(&self) -> Option<u32> {
        self.solved_in
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub fn snapshot(&self) -> MazeSnapshot {
        MazeAdapter::new(self).snapshot()
    }

    // ---- commands --------------------------------------------------------

    pub fn turn(&mut self, dir: Relative) -> CommandOutcome {
        let outcome = self.charge().unwrap_or_else(|| {
            self.robot.heading = self.robot.heading.resolve(dir);
            CommandOutcome::Turned
        });
        self.finish(outcome)
    }

    pub fn set_heading(&mut self, heading: Heading) -> CommandOutcome {
        let outcome = self.charge().unwrap_or_else(|| {
            self.robot.heading = heading;
            CommandOutcome::Turned
        });
        self.finish(outcome)
    }

    /// One cell forward along the current heading.
    pub fn move_forward(&mut self) -> CommandOutcome {
        let outcome = match self.charge() {
            Some(o) => o,
            None => self.step_forward(),
        };
        self.finish(outcome)
    }

    /// Start a new run on the same layout.
    pub fn reset(&mut self) {
        self.robot.reset();
        self.grid.clear_visited();
        self.grid.set(self.grid.start(), Cell::Visited);
        self.solved_in = None;
        self.history.clear();
        tracing::info!(id = %self.params, run = self.robot.run_count(), "run reset");
        self.capture(MazeEvent::Reset);
    }

    pub fn execute(&mut self, command: Command) -> CommandResponse {
        match command {
            Command::Sense(r) => CommandResponse::Sensed(self.sense(r)),
            Command::Turn(r) => CommandResponse::Outcome(self.turn(r)),
            Command::SetHeading(h) => CommandResponse::Outcome(self.set_heading(h)),
            Command::Move => CommandResponse::Outcome(self.move_forward()),
            Command::Reset => {
                self.reset();
                CommandResponse::Reset
            }
        }
    }

    /// Parse and run one text command. Parse errors leave the maze untouched.
    pub fn execute_str(&mut self, line: &str) -> Result<CommandResponse, MazeError> {
        let command: Command = line.parse()?;
        Ok(self.execute(command))
    }

    pub fn sense_str(&self, dir: &str) -> Result<Cell, MazeError> {
        Ok(self.sense(dir.parse()?))
    }

    pub fn turn_str(&mut self, dir: &str) -> Result<CommandOutcome, MazeError> {
        let rel: Relative = dir.parse()?;
        Ok(self.turn(rel))
    }

    /// Only the four compass names are accepted.
    pub fn set_heading_str(&mut self, dir: &str) -> Result<CommandOutcome, MazeError> {
        let heading: Heading = dir.parse()?;
        Ok(self.set_heading(heading))
    }

    // ---- console ---------------------------------------------------------

    pub fn print(&mut self, message: &str) {
        self.console.push(message);
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
    }

    // ---- internals -------------------------------------------------------

    /// Charge one step. `Some` means the command must not take effect.
    fn charge(&mut self) -> Option<CommandOutcome> {
        match self.robot.charge() {
            FuelCharge::Charged => None,
            FuelCharge::Exhausted => {
                tracing::info!(
                    id = %self.params,
                    steps = self.robot.step_count(),
                    "robot ran out of fuel"
                );
                self.report_out_of_fuel();
                Some(CommandOutcome::FuelExhausted)
            }
            FuelCharge::Empty => {
                self.report_out_of_fuel();
                Some(CommandOutcome::OutOfFuel)
            }
        }
    }

    fn report_out_of_fuel(&mut self) {
        self.console.push(MSG_OUT_OF_FUEL);
        let msg = format!(
            "Search unsuccessful: Target not reached by {} steps.",
            self.robot.max_steps()
        );
        self.console.push(&msg);
    }

    fn step_forward(&mut self) -> CommandOutcome {
        let next = self
            .grid
            .neighbor(self.robot.position, self.robot.heading)
            .filter(|p| !self.grid.get(*p).is_wall());

        let Some(next) = next else {
            self.console.push(MSG_BUMP);
            return CommandOutcome::Blocked;
        };

        self.robot.position = next;
        self.grid.set(next, Cell::Visited);

        if !self.at_target() {
            return CommandOutcome::Moved;
        }
        let steps = self.robot.step_count();
        self.solved_in.get_or_insert(steps);
        tracing::info!(id = %self.params, steps, "target reached");
        self.console.push(&format!("Target reached in {steps} steps!"));
        CommandOutcome::ReachedTarget
    }

    fn finish(&mut self, outcome: CommandOutcome) -> CommandOutcome {
        tracing::debug!(
            id = %self.params,
            outcome = outcome.as_str(),
            x = self.robot.position.x,
            y = self.robot.position.y,
            heading = self.robot.heading.as_str(),
            steps = self.robot.step_count(),
            "command"
        );
        self.capture(MazeEvent::Command(outcome));
        outcome
    }

    fn capture(&mut self, event: MazeEvent) {
        self.history.capture(Frame {
            position: self.robot.position,
            heading: self.robot.heading,
            step_count: self.robot.step_count(),
            event,
        });
        self.notify(event);
    }

    fn notify(&mut self, event: MazeEvent) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        for o in observers.iter_mut() {
            o.on_event(&event, self);
        }
        self.observers = observers;
    }
}

/// Build the maze for `id` twice and compare the wall layouts.
pub fn verify_reproducibility(id: &str, config: &MazeConfig) -> Result<bool, MazeError> {
    let a = RobotMaze::from_id(id, config.clone())?;
    let b = RobotMaze::from_id(id, config.clone())?;
    let same = a.grid.wall_layout() == b.grid.wall_layout();
    if same {
        tracing::info!(id, "maze layouts are identical");
    } else {
        tracing::error!(id, "maze layouts differ");
    }
    Ok(same)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn open_maze(max_steps: u32) -> RobotMaze {
        RobotMaze::from_id("5-0-7", MazeConfig::default().with_max_steps(max_steps)).unwrap()
    }

    #[test]
    fn sense_reports_boundaries_and_visits() {
        let mut m = open_maze(100);
        // Facing south at the origin: north (behind) and west (right) are out of bounds.
        assert_eq!(m.sense(Relative::Behind), Cell::Wall);
        assert_eq!(m.sense(Relative::Right), Cell::Wall);
        assert_eq!(m.sense(Relative::Ahead), Cell::Empty);
        assert_eq!(m.sense(Relative::Left), Cell::Empty);

        m.move_forward();
        assert_eq!(m.sense(Relative::Behind), Cell::Visited);
    }

    #[test]
    fn sense_reads_walls() {
        let mut m = open_maze(100);
        m.grid.set(Position::new(0, 1), Cell::Wall);
        assert_eq!(m.sense(Relative::Ahead), Cell::Wall);
        assert_eq!(m.move_forward(), CommandOutcome::Blocked);
        assert_eq!(m.position(), Position::ORIGIN);
        assert_eq!(m.step_count(), 1);
        assert_eq!(m.console().last(), Some(MSG_BUMP));
    }

    #[test]
    fn turning_and_heading() {
        let mut m = open_maze(100);
        assert_eq!(m.turn(Relative::Left), CommandOutcome::Turned);
        assert_eq!(m.heading(), Heading::East);
        assert_eq!(m.turn(Relative::Behind), CommandOutcome::Turned);
        assert_eq!(m.heading(), Heading::West);
        assert_eq!(m.turn(Relative::Ahead), CommandOutcome::Turned);
        assert_eq!(m.heading(), Heading::West);
        assert_eq!(m.set_heading(Heading::North), CommandOutcome::Turned);
        assert_eq!(m.heading(), Heading::North);
        assert_eq!(m.step_count(), 4);
    }

    #[test]
    fn string_boundary_rejects_before_charging() {
        let mut m = open_maze(100);
        assert!(matches!(
            m.set_heading_str("LEFT"),
            Err(MazeError::InvalidDirection { .. })
        ));
        assert!(matches!(
            m.turn_str("north"),
            Err(MazeError::InvalidDirection { .. })
        ));
        assert!(m.sense_str("sideways").is_err());
        assert_eq!(m.step_count(), 0);
        assert_eq!(m.heading(), Heading::South);

        assert_eq!(m.set_heading_str("east").unwrap(), CommandOutcome::Turned);
        assert_eq!(m.sense_str("ahead").unwrap(), Cell::Empty);
        assert_eq!(m.step_count(), 1);
    }

    #[test]
    fn fuel_exhaustion_discards_the_last_action() {
        let mut m = open_maze(2);
        assert_eq!(m.turn(Relative::Left), CommandOutcome::Turned);
        assert_eq!(m.turn(Relative::Left), CommandOutcome::FuelExhausted);
        assert_eq!(m.heading(), Heading::East);
        assert!(m.is_out_of_fuel());
        assert_eq!(m.status(), RobotStatus::OutOfFuel);
        assert_eq!(m.remaining_fuel(), 0);

        let lines = m.console().to_vec();
        assert_eq!(lines[lines.len() - 2], MSG_OUT_OF_FUEL);
        assert_eq!(
            lines[lines.len() - 1],
            "Search unsuccessful: Target not reached by 2 steps."
        );

        assert_eq!(m.set_heading(Heading::North), CommandOutcome::OutOfFuel);
        assert_eq!(m.move_forward(), CommandOutcome::OutOfFuel);
        assert_eq!(m.heading(), Heading::East);
        assert_eq!(m.step_count(), 2);

        // Sensing still works.
        assert_eq!(m.sense(Relative::Ahead), Cell::Empty);
    }

    #[test]
    fn reaching_target_is_reported_once_per_run() {
        let mut m = open_maze(100);
        for _ in 0..4 {
            m.move_forward();
        }
        m.turn(Relative::Left);
        for _ in 0..3 {
            assert_eq!(m.move_forward(), CommandOutcome::Moved);
        }
        assert_eq!(m.move_forward(), CommandOutcome::ReachedTarget);
        assert!(m.at_target());
        assert_eq!(m.solved_in(), Some(9));
        assert_eq!(m.console().last(), Some("Target reached in 9 steps!"));

        // Leaving and coming back keeps the first solution length.
        m.turn(Relative::Behind);
        m.move_forward();
        m.turn(Relative::Behind);
        assert_eq!(m.move_forward(), CommandOutcome::ReachedTarget);
        assert_eq!(m.solved_in(), Some(9));
    }

    #[test]
    fn reset_clears_run_state() {
        let mut m = open_maze(100);
        m.move_forward();
        m.move_forward();
        m.reset();
        assert_eq!(m.solved_in(), None);
        assert_eq!(m.history().frames().len(), 1);
        assert_eq!(m.history().frames()[0].event, MazeEvent::Reset);
        assert_eq!(m.grid().get(Position::ORIGIN), Cell::Visited);
        assert_eq!(m.grid().get(Position::new(0, 2)), Cell::Empty);
    }

    #[test]
    fn text_protocol() {
        assert_eq!("move".parse::<Command>().unwrap(), Command::Move);
        assert_eq!("RESET".parse::<Command>().unwrap(), Command::Reset);
        assert_eq!(
            "turn left".parse::<Command>().unwrap(),
            Command::Turn(Relative::Left)
        );
        assert_eq!(
            "sense:ahead".parse::<Command>().unwrap(),
            Command::Sense(Relative::Ahead)
        );
        assert_eq!(
            "set_heading West".parse::<Command>().unwrap(),
            Command::SetHeading(Heading::West)
        );
        assert!(matches!(
            "jump".parse::<Command>(),
            Err(MazeError::UnknownCommand(_))
        ));
        assert!(matches!(
            "move north".parse::<Command>(),
            Err(MazeError::UnknownCommand(_))
        ));
        assert!(matches!(
            "heading left".parse::<Command>(),
            Err(MazeError::InvalidDirection { .. })
        ));

        for c in [
            Command::Move,
            Command::Reset,
            Command::Sense(Relative::Behind),
            Command::Turn(Relative::Right),
            Command::SetHeading(Heading::North),
        ] {
            assert_eq!(c.to_string().parse::<Command>().unwrap(), c);
        }
    }

    #[test]
    fn execute_dispatches() {
        let mut m = open_maze(100);
        assert_eq!(
            m.execute_str("sense ahead").unwrap(),
            CommandResponse::Sensed(Cell::Empty)
        );
        assert_eq!(
            m.execute_str("move").unwrap(),
            CommandResponse::Outcome(CommandOutcome::Moved)
        );
        assert_eq!(m.execute_str("reset").unwrap(), CommandResponse::Reset);
        assert_eq!(m.run_count(), 1);
        assert!(m.execute_str("fly").is_err());
        assert_eq!(m.step_count(), 0);
    }

    #[test]
    fn history_is_bounded_at_capture() {
        let cfg = MazeConfig::default().with_history_capacity(3);
        let mut m = RobotMaze::from_id("5-0-7", cfg).unwrap();
        for _ in 0..5 {
            m.turn(Relative::Right);
        }
        assert_eq!(m.history().frames().len(), 3);
        assert_eq!(m.history().dropped(), 3);
        assert_eq!(m.history().frames()[0].event, MazeEvent::Created);
    }

    #[test]
    fn user_messages_share_the_console() {
        let cfg = MazeConfig::default().with_console_lines(2);
        let mut m = RobotMaze::from_id("5-0-7", cfg).unwrap();
        m.print("first\nline");
        assert_eq!(m.console().last(), Some("first line"));
        m.print("second");
        m.print("third");
        assert_eq!(m.console().to_vec(), vec!["second", "third"]);
        m.clear_console();
        assert!(m.console().is_empty());
    }

    struct Recorder(Arc<Mutex<Vec<(MazeEvent, u32)>>>);

    impl MazeObserver for Recorder {
        fn on_event(&mut self, event: &MazeEvent, maze: &RobotMaze) {
            self.0.lock().unwrap().push((*event, maze.step_count()));
        }
    }

    #[test]
    fn observers_see_every_state_change() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut m = open_maze(100);
        m.add_observer(Box::new(Recorder(Arc::clone(&log))));

        m.sense(Relative::Ahead);
        m.move_forward();
        m.turn(Relative::Left);
        m.reset();

        let seen = log.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                (MazeEvent::Command(CommandOutcome::Moved), 1),
                (MazeEvent::Command(CommandOutcome::Turned), 2),
                (MazeEvent::Reset, 0),
            ]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = RobotMaze::from_id("5-0-7", MazeConfig::default().with_max_steps(0));
        assert!(matches!(err, Err(MazeError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_id_is_rejected() {
        let err = RobotMaze::from_id("5-zero-7", MazeConfig::default());
        assert!(matches!(err, Err(MazeError::MalformedIdentifier { .. })));
    }

    #[test]
    fn random_maze_reports_reusable_id() {
        let a = RobotMaze::new(MazeConfig::default().with_size(7)).unwrap();
        let b = RobotMaze::from_id(&a.maze_id(), MazeConfig::default()).unwrap();
        assert_eq!(a.grid().wall_layout(), b.grid().wall_layout());
        assert_eq!(a.params().size, 7);
    }

    #[test]
    fn reproducibility_check() {
        assert!(verify_reproducibility("10-30-12345", &MazeConfig::default()).unwrap());
        assert!(verify_reproducibility("bad", &MazeConfig::default()).is_err());
    }
}
