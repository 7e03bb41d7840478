//! Tunables for a maze instance.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::error::MazeError;
use crate::identifier;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    /// Side length used when no identifier is supplied.
    pub size: u32,
    /// Wall probability used when no identifier is supplied.
    pub wall_probability: f64,

    /// Generation attempts before giving up with `GenerationFailure`.
    pub max_attempts: u32,
    /// Fuel budget: state-changing commands per run.
    pub max_steps: u32,

    pub console_lines: usize,
    /// Console lines are cropped to this many characters.
    pub message_width: usize,
    /// Frames kept per run; 0 disables capture.
    pub history_capacity: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 10,
            wall_probability: 0.2,
            max_attempts: 1000,
            max_steps: 1000,
            console_lines: 10,
            message_width: 90,
            history_capacity: 500,
        }
    }
}

impl MazeConfig {
    pub const MAX_SIZE: u32 = identifier::MAX_SIZE;

    /// Small maze with a tight budget, for short handouts and recorded runs.
    pub fn short_run() -> Self {
        Self {
            size: 6,
            wall_probability: 0.4,
            max_steps: 100,
            console_lines: 6,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_wall_probability(mut self, p: f64) -> Self {
        self.wall_probability = p;
        self
    }

    pub fn with_max_steps(mut self, steps: u32) -> Self {
        self.max_steps = steps;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_console_lines(mut self, lines: usize) -> Self {
        self.console_lines = lines;
        self
    }

    pub fn with_history_capacity(mut self, frames: usize) -> Self {
        self.history_capacity = frames;
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.size == 0 {
            return Err("size must be >= 1");
        }
        if self.size > Self::MAX_SIZE {
            return Err("size too large");
        }
        if !self.wall_probability.is_finite() || !(0.0..=1.0).contains(&self.wall_probability) {
            return Err("wall_probability must be in [0, 1]");
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be >= 1");
        }
        if self.max_steps == 0 {
            return Err("max_steps must be >= 1");
        }
        if self.message_width == 0 {
            return Err("message_width must be >= 1");
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, MazeError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate().map_err(MazeError::InvalidConfig)?;
        Ok(cfg)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, MazeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
