//! The robot's mutable state and its fuel bookkeeping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::Heading;
use crate::grid::Position;

pub const START_HEADING: Heading = Heading::South;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RobotStatus {
    Active,
    /// Terminal for the current run; only a reset leaves it.
    OutOfFuel,
}

/// Result of charging one unit of fuel before a state-changing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelCharge {
    /// The step was paid for; the command may take effect.
    Charged,
    /// This step used the last unit. The command's effect is discarded.
    Exhausted,
    /// Already out of fuel; nothing was charged.
    Empty,
}

#[derive(Debug, Clone)]
pub struct Robot {
    pub(crate) position: Position,
    pub(crate) heading: Heading,
    step_count: u32,
    max_steps: u32,
    out_of_fuel: bool,
    run_count: u32,
}

impl Robot {
    pub fn new(max_steps: u32) -> Self {
        Self {
            position: Position::ORIGIN,
            heading: START_HEADING,
            step_count: 0,
            max_steps,
            out_of_fuel: false,
            run_count: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.out_of_fuel
    }

    pub fn status(&self) -> RobotStatus {
        if self.out_of_fuel {
            RobotStatus::OutOfFuel
        } else {
            RobotStatus::Active
        }
    }

    pub fn remaining_fuel(&self) -> u32 {
        self.max_steps.saturating_sub(self.step_count)
    }

    /// Pay for one command. The step is counted before the command is
    /// evaluated, so a blocked move costs as much as a successful one and
    /// the step that reaches the budget is never productive.
    pub fn charge(&mut self) -> FuelCharge {
        if self.out_of_fuel {
            return FuelCharge::Empty;
        }
        self.step_count = self.step_count.saturating_add(1);
        if self.step_count >= self.max_steps {
            self.out_of_fuel = true;
            return FuelCharge::Exhausted;
        }
        FuelCharge::Charged
    }

    /// Back to the start for a new run.
    pub fn reset(&mut self) {
        self.position = Position::ORIGIN;
        self.heading = START_HEADING;
        self.step_count = 0;
        self.out_of_fuel = false;
        self.run_count = self.run_count.saturating_add(1);
    }
}
