//! Errors surfaced by maze construction and the command boundary.
//!
//! Running out of fuel and bumping into a wall are *outcomes* of a command,
//! not errors; see [`crate::engine::CommandOutcome`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error(
        "Invalid maze id '{id}': {reason}. Expected format 'size-wallprob-seed' (e.g. '10-30-12345')"
    )]
    MalformedIdentifier { id: String, reason: String },

    #[error("Invalid direction '{token}'. Must be one of: {expected}")]
    InvalidDirection {
        token: String,
        expected: &'static str,
    },

    #[error(
        "Failed to generate a solvable maze after {attempts} attempts. Try reducing wall probability (currently {wall_probability}) or increasing maze size (currently {size})"
    )]
    GenerationFailure {
        attempts: u32,
        size: u32,
        wall_probability: f64,
    },

    #[error("Invalid maze configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("Unknown command '{0}'. Expected move, reset, sense <dir>, turn <dir> or heading <dir>")]
    UnknownCommand(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl MazeError {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        MazeError::MalformedIdentifier {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_direction(token: &str, expected: &'static str) -> Self {
        MazeError::InvalidDirection {
            token: token.to_string(),
            expected,
        }
    }
}
