//! Bounded message log shown beneath the maze by whatever renders it.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Console {
    lines: VecDeque<String>,
    capacity: usize,
    width: usize,
}

impl Console {
    pub fn new(capacity: usize, width: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            width,
        }
    }

    /// Append one line, evicting the oldest once `capacity` is reached.
    pub fn push(&mut self, message: &str) {
        if self.capacity == 0 {
            return;
        }
        let line = sanitize(message, self.width);
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// Single-line, printable, at most `width` characters.
fn sanitize(message: &str, width: usize) -> String {
    message
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .take(width)
        .collect()
}
