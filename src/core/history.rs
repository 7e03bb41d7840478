//! Per-run replay buffer, bounded when frames are captured.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::Heading;
use crate::engine::MazeEvent;
use crate::grid::Position;

/// Robot pose after one event. Visited cells can be rebuilt from the
/// positions, so the grid itself is not copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    pub position: Position,
    pub heading: Heading,
    pub step_count: u32,
    pub event: MazeEvent,
}

#[derive(Debug, Clone, Default)]
pub struct FrameHistory {
    frames: Vec<Frame>,
    capacity: usize,
    dropped: u64,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Store `frame` unless the buffer is full. Returns whether it was kept.
    pub fn capture(&mut self, frame: Frame) -> bool {
        if self.frames.len() >= self.capacity {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        self.frames.push(frame);
        true
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames rejected since the last clear.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.dropped = 0;
    }
}
